//! Authentication payloads: login credentials, registrations and e-mail
//! verification requests.
//!
//! Constructors validate raw strings with the same rules the forms apply, so
//! an instance of any type here is always safe to send.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::forms::{FieldErrors, rules};

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and matches the accepted e-mail pattern.
/// - `password` has at least six characters and keeps caller whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = rules::email(email).map_err(|msg| errors.insert("email", msg)).ok();
        let password = rules::password(password)
            .map_err(|msg| errors.insert("password", msg))
            .ok();
        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(Self {
                email,
                password: Zeroizing::new(password),
            }),
            _ => Err(errors),
        }
    }

    /// Login e-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated sign-up details.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    password: Zeroizing<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Raw sign-up form values.
#[derive(Clone, Copy, Default)]
pub struct RegistrationParts<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Login e-mail address.
    pub email: &'a str,
    /// Mobile number.
    pub phone_number: &'a str,
    /// Chosen password.
    pub password: &'a str,
    /// Password typed a second time.
    pub confirm_password: &'a str,
}

impl Registration {
    /// Validate every field, collecting all messages at once.
    pub fn try_from_parts(parts: RegistrationParts<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut check = |field: &'static str, result: Result<String, String>| {
            result.map_err(|msg| errors.insert(field, msg)).ok()
        };
        let first_name = check(
            "firstName",
            rules::bounded(parts.first_name, "First name", rules::MAX_NAME_LEN),
        );
        let last_name = check(
            "lastName",
            rules::bounded(parts.last_name, "Last name", rules::MAX_NAME_LEN),
        );
        let email = check("email", rules::email(parts.email));
        let phone_number = check("phoneNumber", rules::phone(parts.phone_number));
        let password = check("password", rules::password(parts.password));
        let confirmed = check(
            "confirmPassword",
            if parts.password == parts.confirm_password {
                Ok(String::new())
            } else {
                Err("Passwords must match".to_owned())
            },
        );

        match (first_name, last_name, email, phone_number, password, confirmed) {
            (Some(first_name), Some(last_name), Some(email), Some(phone_number), Some(password), Some(_)) => {
                Ok(Self {
                    first_name,
                    last_name,
                    email,
                    phone_number,
                    password: Zeroizing::new(password),
                })
            }
            _ => Err(errors),
        }
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Login e-mail address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Mobile number.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// E-mail verification request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRequest {
    email: String,
    code: String,
}

impl VerificationRequest {
    /// Validate the address and six-digit code.
    pub fn try_from_parts(email: &str, code: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = rules::email(email)
            .and_then(|value| {
                if value.chars().count() > rules::MAX_EMAIL_LEN {
                    Err(format!("Max {} characters", rules::MAX_EMAIL_LEN))
                } else {
                    Ok(value)
                }
            })
            .map_err(|msg| errors.insert("email", msg))
            .ok();
        let code = rules::verification_code(code)
            .map_err(|msg| errors.insert("code", msg))
            .ok();
        match (email, code) {
            (Some(email), Some(code)) => Ok(Self { email, code }),
            _ => Err(errors),
        }
    }

    /// Address being verified.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Code from the verification e-mail.
    pub fn code(&self) -> &str {
        &self.code
    }
}
