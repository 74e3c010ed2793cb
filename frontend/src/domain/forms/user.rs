//! Admin form for updating a user's name and role.

use super::flow::{EntityForm, FormMode};
use super::{FieldErrors, FormField, FormInput, rules};
use crate::domain::{User, UserDraft, UserRole};

/// Editable user fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Account role.
    Role,
}

impl FormField for UserField {
    fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Role => "role",
        }
    }
}

/// Text typed into the user update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdateInput {
    first_name: String,
    last_name: String,
    role: String,
}

/// Parsed user update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account role.
    pub role: UserRole,
}

impl UserUpdateInput {
    fn first_name(&self) -> Result<String, String> {
        rules::bounded(&self.first_name, "First name", rules::MAX_NAME_LEN)
    }

    fn last_name(&self) -> Result<String, String> {
        rules::bounded(&self.last_name, "Last name", rules::MAX_NAME_LEN)
    }

    fn role(&self) -> Result<UserRole, String> {
        rules::required(&self.role, "Role")?
            .parse()
            .map_err(|_| "Role must be one of admin, student, Landlord".to_owned())
    }
}

impl FormInput for UserUpdateInput {
    type Record = User;
    type Field = UserField;
    type Output = UserUpdate;

    const FIELDS: &'static [UserField] = &[UserField::FirstName, UserField::LastName, UserField::Role];

    fn from_record(record: &User) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            role: record.role.to_string(),
        }
    }

    fn set(&mut self, field: UserField, value: &str) {
        let slot = match field {
            UserField::FirstName => &mut self.first_name,
            UserField::LastName => &mut self.last_name,
            UserField::Role => &mut self.role,
        };
        value.clone_into(slot);
    }

    fn get(&self, field: UserField) -> &str {
        match field {
            UserField::FirstName => &self.first_name,
            UserField::LastName => &self.last_name,
            UserField::Role => &self.role,
        }
    }

    fn check(&self, field: UserField) -> Result<(), String> {
        match field {
            UserField::FirstName => self.first_name().map(drop),
            UserField::LastName => self.last_name().map(drop),
            UserField::Role => self.role().map(drop),
        }
    }

    fn build(&self) -> Result<UserUpdate, FieldErrors> {
        match (self.first_name(), self.last_name(), self.role()) {
            (Ok(first_name), Ok(last_name), Ok(role)) => Ok(UserUpdate {
                first_name,
                last_name,
                role,
            }),
            _ => Err(self.validate()),
        }
    }
}

impl EntityForm for UserUpdateInput {
    const MODE: FormMode = FormMode::Update;

    fn draft(output: UserUpdate, _selected: Option<&User>) -> UserDraft {
        UserDraft {
            first_name: Some(output.first_name),
            last_name: Some(output.last_name),
            role: Some(output.role),
            ..UserDraft::default()
        }
    }
}
