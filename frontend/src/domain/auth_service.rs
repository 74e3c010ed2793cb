//! Login, sign-up, verification and logout.
//!
//! This is the only code that changes the current session: successful login
//! and registration persist the returned session; logout clears it.

use std::sync::Arc;

use tracing::{info, warn};

use super::forms::{FormInput, FormState, LoginInput, RegistrationInput, VerificationField, VerificationInput};
use super::ports::{ApiError, AuthGateway, Notification, Notifier};
use super::{
    AuthenticatedUser, Error, LoginCredentials, Registration, Session, SessionContext,
    VerificationRequest,
};

/// Authentication use cases over an [`AuthGateway`].
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    /// Service updating `session` with results from `gateway`.
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            session,
            notifier,
        }
    }

    /// Session this service maintains.
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Sign in and persist the session.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let result = self.gateway.login(credentials).await;
        self.start_session(result, "Login")
    }

    /// Create an account, sign it in and persist the session.
    pub async fn register(&self, registration: &Registration) -> Result<AuthenticatedUser, Error> {
        let result = self.gateway.register(registration).await;
        self.start_session(result, "Registration")
    }

    /// Confirm an e-mail address.
    pub async fn verify(&self, request: &VerificationRequest) -> Result<(), Error> {
        match self.gateway.verify(request).await {
            Ok(()) => {
                info!("email verified");
                self.notifier
                    .notify(Notification::success("Email verified successfully"));
                Ok(())
            }
            Err(err) => Err(self.failed("Verification", err)),
        }
    }

    /// Forget the current session in memory and in storage.
    pub fn logout(&self) -> Result<(), Error> {
        self.session.end()?;
        info!("logged out");
        self.notifier.notify(Notification::success("Logged out"));
        Ok(())
    }

    /// Submit the login form.
    pub async fn submit_login(
        &self,
        form: &mut FormState<LoginInput>,
    ) -> Result<AuthenticatedUser, Error> {
        let credentials = form.begin_submit()?;
        let result = self.login(&credentials).await;
        settle(form, result)
    }

    /// Submit the sign-up form.
    pub async fn submit_register(
        &self,
        form: &mut FormState<RegistrationInput>,
    ) -> Result<AuthenticatedUser, Error> {
        let registration = form.begin_submit()?;
        let result = self.register(&registration).await;
        settle(form, result)
    }

    /// Submit the verification form.
    ///
    /// A blank e-mail field is filled from the signed-in user's address.
    pub async fn submit_verify(&self, form: &mut FormState<VerificationInput>) -> Result<(), Error> {
        if form.input().get(VerificationField::Email).trim().is_empty()
            && let Some(user) = self.session.user()
        {
            form.edit(VerificationField::Email, &user.email)?;
        }
        let request = form.begin_submit()?;
        let result = self.verify(&request).await;
        settle(form, result)
    }

    fn start_session(
        &self,
        result: Result<Session, ApiError>,
        action: &str,
    ) -> Result<AuthenticatedUser, Error> {
        let session = result.map_err(|err| self.failed(action, err))?;
        let user = session.user().clone();
        if let Err(err) = self.session.establish(session) {
            warn!(error = %err, "session could not be persisted");
            self.notifier
                .notify(Notification::error(format!("{action} failed: {err}")));
            return Err(err.into());
        }
        info!(user_id = %user.user_id, role = %user.role, "signed in");
        self.notifier
            .notify(Notification::success(format!("{action} successful")));
        Ok(user)
    }

    fn failed(&self, action: &str, err: ApiError) -> Error {
        warn!(error = %err, "{action} failed");
        self.notifier
            .notify(Notification::error(format!("{action} failed: {err}")));
        err.into()
    }
}

fn settle<I: FormInput, T>(form: &mut FormState<I>, result: Result<T, Error>) -> Result<T, Error> {
    match &result {
        Ok(_) => form.succeed(),
        Err(_) => form.fail(),
    }
    result
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::forms::{FormPhase, LoginField, RegistrationField};
    use crate::domain::ports::{
        FIXTURE_VERIFICATION_CODE, FixtureAuthGateway, FixtureSessionStore, MockAuthGateway,
        MockSessionStore, NotificationKind, RecordingNotifier, SessionStoreError,
    };
    use crate::domain::{EntityId, ErrorCode, UserRole};
    use rstest::rstest;

    fn landlord() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: EntityId::new(4),
            first_name: "Peter".to_owned(),
            last_name: "Kamau".to_owned(),
            email: "peter@example.com".to_owned(),
            role: UserRole::Landlord,
        }
    }

    struct Setup {
        service: AuthService,
        store: Arc<FixtureSessionStore>,
        notifier: Arc<RecordingNotifier>,
    }

    fn setup(gateway: Arc<dyn AuthGateway>) -> Setup {
        let store = Arc::new(FixtureSessionStore::default());
        let session = Arc::new(SessionContext::signed_out(store.clone()));
        let notifier = Arc::new(RecordingNotifier::default());
        Setup {
            service: AuthService::new(gateway, session, notifier.clone()),
            store,
            notifier,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn login_persists_session() {
        let gateway = FixtureAuthGateway::default().with_account(landlord(), "secret1");
        let setup = setup(Arc::new(gateway));
        let mut form = FormState::<LoginInput>::open(None);
        form.edit(LoginField::Email, "peter@example.com")
            .expect("idle form accepts edits");
        form.edit(LoginField::Password, "secret1")
            .expect("idle form accepts edits");

        let user = setup
            .service
            .submit_login(&mut form)
            .await
            .expect("login succeeds");

        assert_eq!(user.role, UserRole::Landlord);
        assert!(setup.store.is_populated());
        assert_eq!(setup.service.session().role(), Some(UserRole::Landlord));
        assert_eq!(form.phase(), FormPhase::Succeeded);
        assert_eq!(
            setup.notifier.last().map(|n| n.message),
            Some("Login successful".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_login_leaves_session_empty() {
        let gateway = FixtureAuthGateway::default().with_account(landlord(), "secret1");
        let setup = setup(Arc::new(gateway));
        let credentials = LoginCredentials::try_from_parts("peter@example.com", "wrong-pass")
            .expect("well-formed credentials");

        let err = setup
            .service
            .login(&credentials)
            .await
            .expect_err("bad password");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert!(setup.service.session().current().is_none());
        assert!(!setup.store.is_populated());
        assert_eq!(
            setup.notifier.last().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_form_never_reaches_gateway() {
        let mut gateway = MockAuthGateway::new();
        gateway.expect_register().never();
        let setup = setup(Arc::new(gateway));
        let mut form = FormState::<RegistrationInput>::open(None);
        form.edit(RegistrationField::Email, "not-an-email")
            .expect("idle form accepts edits");

        let err = setup
            .service
            .submit_register(&mut form)
            .await
            .expect_err("invalid form");

        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(setup.notifier.notifications().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn verify_defaults_to_session_email() {
        let gateway = Arc::new(FixtureAuthGateway::default().with_account(landlord(), "secret1"));
        let setup = setup(gateway.clone());
        let credentials = LoginCredentials::try_from_parts("peter@example.com", "secret1")
            .expect("well-formed credentials");
        setup.service.login(&credentials).await.expect("login");

        let mut form = FormState::<VerificationInput>::open(None);
        form.edit(VerificationField::Code, FIXTURE_VERIFICATION_CODE)
            .expect("idle form accepts edits");
        setup
            .service
            .submit_verify(&mut form)
            .await
            .expect("verification succeeds");

        assert!(gateway.is_verified("peter@example.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn logout_clears_memory_and_storage() {
        let gateway = FixtureAuthGateway::default().with_account(landlord(), "secret1");
        let setup = setup(Arc::new(gateway));
        let credentials = LoginCredentials::try_from_parts("peter@example.com", "secret1")
            .expect("well-formed credentials");
        setup.service.login(&credentials).await.expect("login");

        setup.service.logout().expect("logout");

        assert!(setup.service.session().current().is_none());
        assert!(!setup.store.is_populated());
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failure_does_not_sign_in() {
        let mut store = MockSessionStore::new();
        store
            .expect_save()
            .returning(|_| Err(SessionStoreError::io("disk full")));
        let session = Arc::new(SessionContext::signed_out(Arc::new(store)));
        let gateway = FixtureAuthGateway::default().with_account(landlord(), "secret1");
        let service = AuthService::new(
            Arc::new(gateway),
            Arc::clone(&session),
            Arc::new(RecordingNotifier::default()),
        );
        let credentials = LoginCredentials::try_from_parts("peter@example.com", "secret1")
            .expect("well-formed credentials");

        let err = service.login(&credentials).await.expect_err("store fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(session.current().is_none());
    }
}
