//! Hostel reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{EntityId, ParentKind, Resource, ResourceKind};
use super::wire;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// A student's review of a hostel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Server-assigned id.
    pub review_id: EntityId,
    /// Reviewed hostel.
    pub hostel_id: EntityId,
    /// Reviewing student.
    pub user_id: EntityId,
    /// Star rating between [`MIN_RATING`] and [`MAX_RATING`].
    #[serde(with = "wire::count")]
    pub rating: u32,
    /// Free-text comment.
    #[serde(default, with = "wire::text")]
    pub comment: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Hostel display name, when joined in by the API.
    #[serde(default, with = "wire::text")]
    pub hostel_name: String,
}

/// Partial review record for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    /// Reviewed hostel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_id: Option<EntityId>,
    /// Reviewing student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
    /// Star rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    /// Free-text comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Resource for Review {
    const KIND: ResourceKind = ResourceKind::Reviews;
    const ID_FIELD: &'static str = "reviewId";
    const PARENTS: &'static [ParentKind] = &[ParentKind::Hostel];

    type Draft = ReviewDraft;

    fn id(&self) -> EntityId {
        self.review_id
    }

    fn owner(&self) -> Option<EntityId> {
        Some(self.user_id)
    }
}
