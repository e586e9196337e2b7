pub mod password;
pub mod repo;
pub mod repo_types;

pub use repo::UserRepository;
pub use repo_types::{User, UserField, UserFilter, USERS_TABLE, USER_KEY};
