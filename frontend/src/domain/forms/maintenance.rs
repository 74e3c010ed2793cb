//! Admin form for updating a maintenance ticket.

use super::flow::{EntityForm, FormMode};
use super::{FieldErrors, FormField, FormInput, rules};
use crate::domain::{Maintenance, MaintenanceDraft, ResourceKind};

/// Editable maintenance fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceField {
    /// Short summary.
    IssueTitle,
    /// Full description.
    Description,
    /// Resolved or pending.
    Status,
}

impl FormField for MaintenanceField {
    fn name(self) -> &'static str {
        match self {
            Self::IssueTitle => "issueTitle",
            Self::Description => "description",
            Self::Status => "status",
        }
    }
}

/// Text typed into the maintenance update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceUpdateInput {
    issue_title: String,
    description: String,
    status: String,
}

/// Parsed maintenance update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceUpdate {
    /// Short summary.
    pub issue_title: String,
    /// Full description.
    pub description: String,
    /// Resolution flag.
    pub status: bool,
}

impl MaintenanceUpdateInput {
    fn issue_title(&self) -> Result<String, String> {
        rules::required(&self.issue_title, "Issue title")
    }

    fn description(&self) -> Result<String, String> {
        rules::required(&self.description, "Description")
    }

    fn status(&self) -> Result<bool, String> {
        rules::flag(
            &self.status,
            "Status",
            ResourceKind::Maintenance.status_labels(),
        )
    }
}

impl FormInput for MaintenanceUpdateInput {
    type Record = Maintenance;
    type Field = MaintenanceField;
    type Output = MaintenanceUpdate;

    const FIELDS: &'static [MaintenanceField] = &[
        MaintenanceField::IssueTitle,
        MaintenanceField::Description,
        MaintenanceField::Status,
    ];

    fn from_record(record: &Maintenance) -> Self {
        Self {
            issue_title: record.issue_title.clone(),
            description: record.description.clone(),
            status: record.status.to_string(),
        }
    }

    fn set(&mut self, field: MaintenanceField, value: &str) {
        let slot = match field {
            MaintenanceField::IssueTitle => &mut self.issue_title,
            MaintenanceField::Description => &mut self.description,
            MaintenanceField::Status => &mut self.status,
        };
        value.clone_into(slot);
    }

    fn get(&self, field: MaintenanceField) -> &str {
        match field {
            MaintenanceField::IssueTitle => &self.issue_title,
            MaintenanceField::Description => &self.description,
            MaintenanceField::Status => &self.status,
        }
    }

    fn check(&self, field: MaintenanceField) -> Result<(), String> {
        match field {
            MaintenanceField::IssueTitle => self.issue_title().map(drop),
            MaintenanceField::Description => self.description().map(drop),
            MaintenanceField::Status => self.status().map(drop),
        }
    }

    fn build(&self) -> Result<MaintenanceUpdate, FieldErrors> {
        match (self.issue_title(), self.description(), self.status()) {
            (Ok(issue_title), Ok(description), Ok(status)) => Ok(MaintenanceUpdate {
                issue_title,
                description,
                status,
            }),
            _ => Err(self.validate()),
        }
    }
}

impl EntityForm for MaintenanceUpdateInput {
    const MODE: FormMode = FormMode::Update;

    fn draft(output: MaintenanceUpdate, selected: Option<&Maintenance>) -> MaintenanceDraft {
        MaintenanceDraft {
            hostel_id: selected.map(|m| m.hostel_id),
            room_id: selected.map(|m| m.room_id),
            user_id: selected.map(|m| m.user_id),
            issue_title: Some(output.issue_title),
            description: Some(output.description),
            status: Some(output.status),
        }
    }
}
