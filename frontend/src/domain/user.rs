//! User accounts as served by `/user_all` and `/user/{id}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::resource::{EntityId, ParentKind, Resource, ResourceKind};
use super::wire;

/// Account role. The wire spelling is preserved exactly (`Landlord` is
/// capitalised by the API, the other two are not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Platform administrator.
    #[serde(rename = "admin")]
    Admin,
    /// Student looking for accommodation.
    #[serde(rename = "student", alias = "user")]
    Student,
    /// Hostel owner.
    #[serde(rename = "Landlord", alias = "landlord")]
    Landlord,
}

impl UserRole {
    /// All roles in display order.
    pub const ALL: [Self; 3] = [Self::Student, Self::Landlord, Self::Admin];

    /// Wire spelling of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
            Self::Landlord => "Landlord",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not one of the three known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'; expected admin|student|Landlord")]
pub struct ParseUserRoleError(String);

impl FromStr for UserRole {
    type Err = ParseUserRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            "landlord" => Ok(Self::Landlord),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Marketplace account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned id.
    pub user_id: EntityId,
    /// Given name.
    #[serde(default, with = "wire::text")]
    pub first_name: String,
    /// Family name.
    #[serde(default, with = "wire::text")]
    pub last_name: String,
    /// Login e-mail address.
    #[serde(default, with = "wire::text")]
    pub email: String,
    /// Contact number, when provided at registration.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Whether the e-mail verification code has been confirmed.
    #[serde(default, with = "wire::flag")]
    pub verified: bool,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Course of study (students only).
    #[serde(default)]
    pub course: Option<String>,
    /// Year of study (students only).
    #[serde(default, rename = "year_of_study")]
    pub year_of_study: Option<String>,
    /// Avatar URL.
    #[serde(default, rename = "image_URL")]
    pub image_url: Option<String>,
}

impl User {
    /// `first last`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// Partial user record for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Login e-mail address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Account role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::Users;
    const ID_FIELD: &'static str = "userId";
    const PARENTS: &'static [ParentKind] = &[];

    type Draft = UserDraft;

    fn id(&self) -> EntityId {
        self.user_id
    }

    fn owner(&self) -> Option<EntityId> {
        Some(self.user_id)
    }
}
