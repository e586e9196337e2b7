//! Users table access: a typed repository over a generic record store,
//! with Argon2 password hashing.

pub mod cli;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod users;

pub use error::{PasswordError, RepoError, StoreError};
pub use store::{FieldValue, Fields, MemoryRecordStore, PgRecordStore, RecordStore, Row};
pub use users::{User, UserField, UserFilter, UserRepository};
