//! Driven port for the remote authentication endpoints.
//!
//! Login and registration both answer with the signed-in user and a bearer
//! token; verification only acknowledges the code.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{
    AuthenticatedUser, EntityId, LoginCredentials, Registration, Session, UserRole,
    VerificationRequest,
};

use super::ApiError;

/// Remote authentication endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, ApiError>;

    /// Create an account and sign it in.
    async fn register(&self, registration: &Registration) -> Result<Session, ApiError>;

    /// Confirm an e-mail address with the code sent to it.
    async fn verify(&self, request: &VerificationRequest) -> Result<(), ApiError>;
}

/// Verification code accepted by [`FixtureAuthGateway`].
pub const FIXTURE_VERIFICATION_CODE: &str = "123456";

#[derive(Debug, Clone)]
struct Account {
    user: AuthenticatedUser,
    password: String,
    verified: bool,
}

/// In-memory authentication server.
///
/// Tokens have the form `fixture-token-{userId}`. Registered accounts are
/// students.
#[derive(Debug, Default)]
pub struct FixtureAuthGateway {
    accounts: Mutex<Vec<Account>>,
}

impl FixtureAuthGateway {
    /// Add an existing account that can log in with `password`.
    #[must_use]
    pub fn with_account(self, user: AuthenticatedUser, password: &str) -> Self {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Account {
                user,
                password: password.to_owned(),
                verified: true,
            });
        self
    }

    /// Whether the account registered under `email` has been verified.
    pub fn is_verified(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|account| account.user.email == email && account.verified)
    }

    fn session_for(user: &AuthenticatedUser) -> Session {
        Session::new(user.clone(), format!("fixture-token-{}", user.user_id))
    }
}

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, ApiError> {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|account| {
                account.user.email == credentials.email()
                    && account.password == credentials.password()
            })
            .map(|account| Self::session_for(&account.user))
            .ok_or_else(|| ApiError::unauthorized("invalid credentials"))
    }

    async fn register(&self, registration: &Registration) -> Result<Session, ApiError> {
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        if accounts
            .iter()
            .any(|account| account.user.email == registration.email())
        {
            return Err(ApiError::conflict("email already registered"));
        }
        let next = accounts
            .iter()
            .map(|account| account.user.user_id.get())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let user = AuthenticatedUser {
            user_id: EntityId::new(next),
            first_name: registration.first_name().to_owned(),
            last_name: registration.last_name().to_owned(),
            email: registration.email().to_owned(),
            role: UserRole::Student,
        };
        let session = Self::session_for(&user);
        accounts.push(Account {
            user,
            password: registration.password().to_owned(),
            verified: false,
        });
        Ok(session)
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<(), ApiError> {
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        let account = accounts
            .iter_mut()
            .find(|account| account.user.email == request.email())
            .ok_or_else(|| ApiError::not_found(format!("no account for {}", request.email())))?;
        if request.code() != FIXTURE_VERIFICATION_CODE {
            return Err(ApiError::validation("invalid verification code"));
        }
        account.verified = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::auth::RegistrationParts;
    use rstest::rstest;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: EntityId::new(1),
            first_name: "Ada".to_owned(),
            last_name: "Admin".to_owned(),
            email: "admin@example.com".to_owned(),
            role: UserRole::Admin,
        }
    }

    #[rstest]
    #[case("admin@example.com", "password1", true)]
    #[case("admin@example.com", "password2", false)]
    #[case("other@example.com", "password1", false)]
    #[tokio::test]
    async fn fixture_login_checks_email_and_password(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let gateway = FixtureAuthGateway::default().with_account(admin(), "password1");
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        match (should_succeed, gateway.login(&creds).await) {
            (true, Ok(session)) => assert_eq!(session.token(), "fixture-token-1"),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(session)) => panic!("expected failure, got session: {session:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn registration_then_verification() {
        let gateway = FixtureAuthGateway::default();
        let registration = Registration::try_from_parts(RegistrationParts {
            first_name: "Brian",
            last_name: "Kamau",
            email: "brian@example.com",
            phone_number: "0711111111",
            password: "secret1",
            confirm_password: "secret1",
        })
        .expect("valid registration");

        let session = gateway.register(&registration).await.expect("register");
        assert_eq!(session.user().role, UserRole::Student);
        assert!(!gateway.is_verified("brian@example.com"));

        let duplicate = gateway.register(&registration).await.expect_err("duplicate");
        assert_eq!(duplicate.code(), ErrorCode::Conflict);

        let request = VerificationRequest::try_from_parts("brian@example.com", "123456")
            .expect("valid request");
        gateway.verify(&request).await.expect("verify");
        assert!(gateway.is_verified("brian@example.com"));
    }
}
