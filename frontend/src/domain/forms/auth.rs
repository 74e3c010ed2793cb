//! Login, sign-up and e-mail verification forms.
//!
//! These forms have no backing record; their outputs are the validated
//! payloads from [`crate::domain::auth`]. Password text is held in
//! [`Zeroizing`] buffers and never appears in `Debug` output.

use std::fmt;

use zeroize::Zeroizing;

use super::{FieldErrors, FormField, FormInput};
use crate::domain::auth::{LoginCredentials, Registration, RegistrationParts, VerificationRequest};

fn field_error<T>(result: Result<T, FieldErrors>, field: &str) -> Result<(), String> {
    match result {
        Ok(_) => Ok(()),
        Err(errors) => errors.get(field).map_or(Ok(()), |msg| Err(msg.to_owned())),
    }
}

fn replace_secret(slot: &mut Zeroizing<String>, value: &str) {
    *slot = Zeroizing::new(value.to_owned());
}

/// Login form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Login e-mail address.
    Email,
    /// Password.
    Password,
}

impl FormField for LoginField {
    fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Text typed into the login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    email: String,
    password: Zeroizing<String>,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl FormInput for LoginInput {
    type Record = ();
    type Field = LoginField;
    type Output = LoginCredentials;

    const FIELDS: &'static [LoginField] = &[LoginField::Email, LoginField::Password];

    fn from_record(_: &()) -> Self {
        Self::default()
    }

    fn set(&mut self, field: LoginField, value: &str) {
        match field {
            LoginField::Email => value.clone_into(&mut self.email),
            LoginField::Password => replace_secret(&mut self.password, value),
        }
    }

    fn get(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => self.password.as_str(),
        }
    }

    fn check(&self, field: LoginField) -> Result<(), String> {
        field_error(self.build(), field.name())
    }

    fn build(&self) -> Result<LoginCredentials, FieldErrors> {
        LoginCredentials::try_from_parts(&self.email, &self.password)
    }
}

/// Sign-up form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Login e-mail address.
    Email,
    /// Mobile number.
    PhoneNumber,
    /// Chosen password.
    Password,
    /// Password typed a second time.
    ConfirmPassword,
}

impl FormField for RegistrationField {
    fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

/// Text typed into the sign-up form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    password: Zeroizing<String>,
    confirm_password: Zeroizing<String>,
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}

impl FormInput for RegistrationInput {
    type Record = ();
    type Field = RegistrationField;
    type Output = Registration;

    const FIELDS: &'static [RegistrationField] = &[
        RegistrationField::FirstName,
        RegistrationField::LastName,
        RegistrationField::Email,
        RegistrationField::PhoneNumber,
        RegistrationField::Password,
        RegistrationField::ConfirmPassword,
    ];

    fn from_record(_: &()) -> Self {
        Self::default()
    }

    fn set(&mut self, field: RegistrationField, value: &str) {
        match field {
            RegistrationField::FirstName => value.clone_into(&mut self.first_name),
            RegistrationField::LastName => value.clone_into(&mut self.last_name),
            RegistrationField::Email => value.clone_into(&mut self.email),
            RegistrationField::PhoneNumber => value.clone_into(&mut self.phone_number),
            RegistrationField::Password => replace_secret(&mut self.password, value),
            RegistrationField::ConfirmPassword => {
                replace_secret(&mut self.confirm_password, value);
            }
        }
    }

    fn get(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::FirstName => &self.first_name,
            RegistrationField::LastName => &self.last_name,
            RegistrationField::Email => &self.email,
            RegistrationField::PhoneNumber => &self.phone_number,
            RegistrationField::Password => self.password.as_str(),
            RegistrationField::ConfirmPassword => self.confirm_password.as_str(),
        }
    }

    fn check(&self, field: RegistrationField) -> Result<(), String> {
        field_error(self.build(), field.name())
    }

    fn build(&self) -> Result<Registration, FieldErrors> {
        Registration::try_from_parts(RegistrationParts {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            phone_number: &self.phone_number,
            password: &self.password,
            confirm_password: &self.confirm_password,
        })
    }
}

/// Verification form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationField {
    /// Address being verified.
    Email,
    /// Six-digit code from the verification e-mail.
    Code,
}

impl FormField for VerificationField {
    fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Code => "code",
        }
    }
}

/// Text typed into the verification form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationInput {
    email: String,
    code: String,
}

impl FormInput for VerificationInput {
    type Record = ();
    type Field = VerificationField;
    type Output = VerificationRequest;

    const FIELDS: &'static [VerificationField] = &[VerificationField::Email, VerificationField::Code];

    fn from_record(_: &()) -> Self {
        Self::default()
    }

    fn set(&mut self, field: VerificationField, value: &str) {
        let slot = match field {
            VerificationField::Email => &mut self.email,
            VerificationField::Code => &mut self.code,
        };
        value.clone_into(slot);
    }

    fn get(&self, field: VerificationField) -> &str {
        match field {
            VerificationField::Email => &self.email,
            VerificationField::Code => &self.code,
        }
    }

    fn check(&self, field: VerificationField) -> Result<(), String> {
        field_error(self.build(), field.name())
    }

    fn build(&self) -> Result<VerificationRequest, FieldErrors> {
        VerificationRequest::try_from_parts(&self.email, &self.code)
    }
}
