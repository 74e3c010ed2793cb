//! Wire shapes of the authentication endpoints.
//!
//! The adapter serialises domain payloads into these DTOs and decodes replies
//! into domain sessions in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::{AuthenticatedUser, LoginCredentials, Registration, Session};

#[derive(Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            email: credentials.email(),
            password: credentials.password(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterRequestDto<'a> {
    pub(super) first_name: &'a str,
    pub(super) last_name: &'a str,
    pub(super) email: &'a str,
    pub(super) phone_number: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a Registration> for RegisterRequestDto<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            first_name: registration.first_name(),
            last_name: registration.last_name(),
            email: registration.email(),
            phone_number: registration.phone_number(),
            password: registration.password(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct AuthResponseDto {
    pub(super) token: String,
    pub(super) user: AuthenticatedUser,
}

impl AuthResponseDto {
    pub(super) fn into_session(self) -> Session {
        Session::new(self.user, self.token)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{EntityId, UserRole};
    use serde_json::json;

    #[test]
    fn decodes_login_reply_into_session() {
        let reply = json!({
            "token": "abc",
            "user": {
                "userId": 3,
                "firstName": "Amina",
                "lastName": "Otieno",
                "email": "amina@example.com",
                "role": "Landlord"
            }
        });
        let session = serde_json::from_value::<AuthResponseDto>(reply)
            .expect("reply decodes")
            .into_session();
        assert_eq!(session.token(), "abc");
        assert_eq!(session.user().user_id, EntityId::new(3));
        assert_eq!(session.user().role, UserRole::Landlord);
    }

    #[test]
    fn login_request_uses_wire_names() {
        let credentials =
            LoginCredentials::try_from_parts("amina@example.com", "secret1").expect("valid");
        let body = serde_json::to_value(LoginRequestDto::from(&credentials)).expect("serialises");
        assert_eq!(body, json!({ "email": "amina@example.com", "password": "secret1" }));
    }
}
