//! Student form for reviewing a hostel.

use super::flow::{EntityForm, FormMode};
use super::{FieldErrors, FormField, FormInput, rules};
use crate::domain::review::{MAX_RATING, MIN_RATING};
use crate::domain::{EntityId, Review, ReviewDraft};

/// Review form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    /// Reviewed hostel.
    HostelId,
    /// Reviewing student; pre-filled from the session.
    UserId,
    /// Star rating.
    Rating,
    /// Free-text comment.
    Comment,
}

impl FormField for ReviewField {
    fn name(self) -> &'static str {
        match self {
            Self::HostelId => "hostelId",
            Self::UserId => "userId",
            Self::Rating => "rating",
            Self::Comment => "comment",
        }
    }
}

/// Text typed into the review form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewInput {
    hostel_id: String,
    user_id: String,
    rating: String,
    comment: String,
}

/// Parsed review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    /// Reviewed hostel.
    pub hostel_id: EntityId,
    /// Reviewing student.
    pub user_id: EntityId,
    /// Star rating.
    pub rating: u32,
    /// Free-text comment.
    pub comment: String,
}

impl ReviewInput {
    fn hostel_id(&self) -> Result<EntityId, String> {
        rules::id(&self.hostel_id, "Hostel")
    }

    fn user_id(&self) -> Result<EntityId, String> {
        rules::id(&self.user_id, "User")
    }

    fn rating(&self) -> Result<u32, String> {
        let out_of_range = || format!("Rating must be between {MIN_RATING} and {MAX_RATING}");
        let rating: u32 = rules::required(&self.rating, "Rating")?
            .parse()
            .map_err(|_| out_of_range())?;
        if (u32::from(MIN_RATING)..=u32::from(MAX_RATING)).contains(&rating) {
            Ok(rating)
        } else {
            Err(out_of_range())
        }
    }

    fn comment(&self) -> Result<String, String> {
        rules::required(&self.comment, "Comment")
    }
}

impl FormInput for ReviewInput {
    type Record = Review;
    type Field = ReviewField;
    type Output = ReviewSubmission;

    const FIELDS: &'static [ReviewField] = &[
        ReviewField::HostelId,
        ReviewField::UserId,
        ReviewField::Rating,
        ReviewField::Comment,
    ];

    fn from_record(record: &Review) -> Self {
        Self {
            hostel_id: record.hostel_id.to_string(),
            user_id: record.user_id.to_string(),
            rating: record.rating.to_string(),
            comment: record.comment.clone(),
        }
    }

    fn set(&mut self, field: ReviewField, value: &str) {
        let slot = match field {
            ReviewField::HostelId => &mut self.hostel_id,
            ReviewField::UserId => &mut self.user_id,
            ReviewField::Rating => &mut self.rating,
            ReviewField::Comment => &mut self.comment,
        };
        value.clone_into(slot);
    }

    fn get(&self, field: ReviewField) -> &str {
        match field {
            ReviewField::HostelId => &self.hostel_id,
            ReviewField::UserId => &self.user_id,
            ReviewField::Rating => &self.rating,
            ReviewField::Comment => &self.comment,
        }
    }

    fn check(&self, field: ReviewField) -> Result<(), String> {
        match field {
            ReviewField::HostelId => self.hostel_id().map(drop),
            ReviewField::UserId => self.user_id().map(drop),
            ReviewField::Rating => self.rating().map(drop),
            ReviewField::Comment => self.comment().map(drop),
        }
    }

    fn build(&self) -> Result<ReviewSubmission, FieldErrors> {
        match (self.hostel_id(), self.user_id(), self.rating(), self.comment()) {
            (Ok(hostel_id), Ok(user_id), Ok(rating), Ok(comment)) => Ok(ReviewSubmission {
                hostel_id,
                user_id,
                rating,
                comment,
            }),
            _ => Err(self.validate()),
        }
    }
}

impl EntityForm for ReviewInput {
    const MODE: FormMode = FormMode::Create;

    fn draft(output: ReviewSubmission, _selected: Option<&Review>) -> ReviewDraft {
        ReviewDraft {
            hostel_id: Some(output.hostel_id),
            user_id: Some(output.user_id),
            rating: Some(output.rating),
            comment: Some(output.comment),
        }
    }
}
