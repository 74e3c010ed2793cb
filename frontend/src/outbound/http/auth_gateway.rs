//! Reqwest-backed [`AuthGateway`].

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::dto::{AuthResponseDto, LoginRequestDto, RegisterRequestDto};
use super::transport::ApiTransport;
use crate::domain::ports::{ApiError, AuthGateway};
use crate::domain::{LoginCredentials, Registration, Session, VerificationRequest};

const LOGIN_PATH: &str = "auth/login";
const REGISTER_PATH: &str = "auth/register";
const VERIFY_PATH: &str = "auth/verify";

/// HTTP adapter for the authentication endpoints.
#[derive(Clone)]
pub struct HttpAuthGateway {
    transport: ApiTransport,
}

impl HttpAuthGateway {
    /// Gateway issuing requests through `transport`.
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, ApiError> {
        let reply: AuthResponseDto = self
            .transport
            .send_json(Method::POST, LOGIN_PATH, &LoginRequestDto::from(credentials))
            .await?;
        info!(user_id = %reply.user.user_id, "login accepted");
        Ok(reply.into_session())
    }

    async fn register(&self, registration: &Registration) -> Result<Session, ApiError> {
        let reply: AuthResponseDto = self
            .transport
            .send_json(
                Method::POST,
                REGISTER_PATH,
                &RegisterRequestDto::from(registration),
            )
            .await?;
        info!(user_id = %reply.user.user_id, "registration accepted");
        Ok(reply.into_session())
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<(), ApiError> {
        self.transport.post_ignoring_reply(VERIFY_PATH, request).await
    }
}
