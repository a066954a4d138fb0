//! Partner account service: registration and authentication.
//!
//! Implements the [`AccountService`] driving port over a user repository
//! and a password hasher. The service is stateless; every call re-reads or
//! writes storage.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::ports::{
    AccountService, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::user::{NewUser, Registration, User, UserId};

/// The one message both authentication failure modes produce. Unknown
/// email and wrong password must be indistinguishable to the caller.
const BAD_CREDENTIALS: &str = "incorrect email or password";

/// Account service over a repository and a hasher.
#[derive(Clone)]
pub struct PartnerAccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> PartnerAccountService<R, H> {
    /// Create a new service with the given adapters.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => Error::conflict("email is already registered")
            .with_details(json!({ "field": "email", "code": "duplicate_email" })),
    }
}

#[async_trait]
impl<R, H> AccountService for PartnerAccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<UserId, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(|err| Error::internal(err.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                name: registration.name().to_owned(),
                email: registration.email().to_owned(),
                tax_id: registration.tax_id().to_owned(),
                phone: registration.phone().to_owned(),
                password_hash,
            })
            .await
            .map_err(map_user_persistence_error)?;

        debug!(user_id = %user.id, "partner registered");
        Ok(user.id)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized(BAD_CREDENTIALS))?;

        if !self.hasher.verify(credentials.password(), &user.password_hash) {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::PasswordHashError;

    #[derive(Default)]
    struct StubUserRepository {
        users: Mutex<Vec<User>>,
        fail_connection: bool,
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
            if self.fail_connection {
                return Err(UserPersistenceError::connection("database unavailable"));
            }
            let mut users = self.users.lock().expect("lock");
            if users.iter().any(|existing| existing.email == user.email) {
                return Err(UserPersistenceError::DuplicateEmail);
            }
            let stored = User {
                id: UserId::generate(),
                name: user.name,
                email: user.email,
                tax_id: user.tax_id,
                phone: user.phone,
                password_hash: user.password_hash,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            users.push(stored.clone());
            Ok(stored)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
            Ok(self
                .users
                .lock()
                .expect("lock")
                .iter()
                .find(|user| user.email == email)
                .cloned())
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
            Ok(self
                .users
                .lock()
                .expect("lock")
                .iter()
                .find(|user| user.id == id)
                .cloned())
        }
    }

    /// Reversible marker hashing; good enough for exercising the service.
    struct StubHasher;

    impl PasswordHasher for StubHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, stored_hash: &str) -> bool {
            stored_hash == format!("hashed:{password}")
        }
    }

    fn service() -> PartnerAccountService<StubUserRepository, StubHasher> {
        PartnerAccountService::new(Arc::new(StubUserRepository::default()), Arc::new(StubHasher))
    }

    fn registration(email: &str) -> Registration {
        Registration::try_from_parts("Ana", email, "123.456.789-00", "(85) 99999-0000", "s3cret")
            .expect("valid registration")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_a_conflict_and_one_row_persists() {
        let service = service();
        service
            .register(registration("ana@example.com"))
            .await
            .expect("first registration succeeds");

        let err = service
            .register(registration("ana@example.com"))
            .await
            .expect_err("second registration fails");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(service.users.users.lock().expect("lock").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_the_hash_not_the_password() {
        let service = service();
        service
            .register(registration("ana@example.com"))
            .await
            .expect("registers");

        let stored = service
            .users
            .find_by_email("ana@example.com")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.password_hash, "hashed:s3cret");
    }

    #[rstest]
    #[case("nobody@example.com", "s3cret")]
    #[case("ana@example.com", "wrong")]
    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let service = service();
        service
            .register(registration("ana@example.com"))
            .await
            .expect("registers");

        let credentials =
            LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        let err = service
            .authenticate(&credentials)
            .await
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), BAD_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_returns_the_user_on_match() {
        let service = service();
        service
            .register(registration("ana@example.com"))
            .await
            .expect("registers");

        let credentials = LoginCredentials::try_from_parts("Ana@Example.com", "s3cret")
            .expect("credentials shape");
        let user = service
            .authenticate(&credentials)
            .await
            .expect("authenticates");
        assert_eq!(user.email, "ana@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn storage_outage_maps_to_service_unavailable() {
        let repo = StubUserRepository {
            fail_connection: true,
            ..StubUserRepository::default()
        };
        let service = PartnerAccountService::new(Arc::new(repo), Arc::new(StubHasher));

        let err = service
            .register(registration("ana@example.com"))
            .await
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
