use tracing::{debug, info, instrument, warn};

use super::password::hash_password;
use super::repo_types::{User, UserField, UserFilter};
use crate::error::{RepoError, RepoResult};
use crate::store::{FieldValue, Fields, RecordStore, Row};

/// Typed access to the users table over a generic record store.
#[derive(Debug, Clone)]
pub struct UserRepository<S> {
    store: S,
}

fn decode(row: Row) -> RepoResult<User> {
    if !row.is_object() {
        return Err(RepoError::MalformedResult(format!("expected object, got {}", row)));
    }
    serde_json::from_value(row).map_err(|e| RepoError::MalformedResult(e.to_string()))
}

impl<S: RecordStore> UserRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    async fn first_by(&mut self, field: UserField, value: FieldValue) -> RepoResult<Option<User>> {
        let row = self
            .store
            .set_where(field.column(), value)
            .get_first()
            .await?;
        row.map(decode).transpose()
    }

    /// Find a user by id.
    #[instrument(skip(self), fields(table = %self.store.table()))]
    pub async fn get_by_id(&mut self, user_id: i64) -> RepoResult<Option<User>> {
        self.first_by(UserField::Id, user_id.into()).await
    }

    /// Find a user by email.
    #[instrument(skip(self), fields(table = %self.store.table()))]
    pub async fn get_by_email(&mut self, email: &str) -> RepoResult<Option<User>> {
        self.first_by(UserField::Email, email.into()).await
    }

    /// Check whether a user already exists with a matching field. Clears any
    /// filters left pending on the store first.
    #[instrument(skip(self, filter), fields(table = %self.store.table(), field = %filter.field()))]
    pub async fn exists(&mut self, filter: UserFilter) -> RepoResult<bool> {
        let field = filter.field();
        let row = self
            .store
            .clear()
            .set_where(field.column(), filter.into_value())
            .get_first()
            .await?;

        match row.map(decode) {
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) => {
                warn!(error = %e, %field, "exists got a malformed record");
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// Create a new user with a hashed password. Input is expected to be
    /// validated already; uniqueness is left to the store.
    #[instrument(skip(self, password), fields(table = %self.store.table()))]
    pub async fn create_new(&mut self, email: &str, password: &str) -> RepoResult<i64> {
        let hash = hash_password(password)?;

        // the rest of the columns have defaults in the schema
        let mut fields = Fields::new();
        fields.insert(UserField::Email.column().to_string(), email.into());
        fields.insert(UserField::Password.column().to_string(), hash.into());

        let id = self.store.insert(fields).await?;
        info!(user_id = id, "user created");
        Ok(id)
    }

    /// Look up `email` and check `password` against the stored hash.
    #[instrument(skip(self, password), fields(table = %self.store.table()))]
    pub async fn verify_credentials(
        &mut self,
        email: &str,
        password: &str,
    ) -> RepoResult<Option<User>> {
        let Some(user) = self.get_by_email(email).await? else {
            debug!("unknown email");
            return Ok(None);
        };
        if user.password_matches(password) {
            Ok(Some(user))
        } else {
            warn!(user_id = user.user_id, "password mismatch");
            Ok(None)
        }
    }
}
