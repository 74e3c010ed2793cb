//! `hostel-admin` command arguments.

use std::fmt;

use clap::{Args, Parser, Subcommand};

use crate::domain::view::{RoleFilter, SortOrder};
use crate::domain::{EntityId, ParentKind, ResourceKind};

/// Top-level arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hostel-admin",
    about = "Browse and administer the hostel booking marketplace",
    version
)]
pub struct CliArgs {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Every console command.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login(LoginArgs),
    /// Create a student account and sign it in.
    Register(RegisterArgs),
    /// Confirm an e-mail address with the emailed code.
    Verify(VerifyArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List a resource with optional filters.
    List(ListArgs),
    /// Show one record.
    Show {
        /// Resource family, e.g. `bookings`.
        resource: ResourceKind,
        /// Record id.
        id: EntityId,
    },
    /// List the records of a resource that belong to a parent record.
    Children {
        /// Resource family, e.g. `rooms`.
        resource: ResourceKind,
        /// Parent kind: `user`, `hostel`, `room` or `booking`.
        parent: ParentKind,
        /// Parent record id.
        parent_id: EntityId,
    },
    /// Delete one record.
    Delete(DeleteArgs),
    /// Edit a booking; omitted fields keep their current values.
    UpdateBooking(UpdateBookingArgs),
    /// Edit a payment; omitted fields keep their current values.
    UpdatePayment(UpdatePaymentArgs),
    /// Edit a maintenance ticket; omitted fields keep their current values.
    UpdateMaintenance(UpdateMaintenanceArgs),
    /// Edit a user; omitted fields keep their current values.
    UpdateUser(UpdateUserArgs),
    /// Post a review of a hostel.
    Review(ReviewArgs),
    /// List landlord accounts.
    Landlords,
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Verify(_) => "verify",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::List(_) => "list",
            Self::Show { .. } => "show",
            Self::Children { .. } => "children",
            Self::Delete(_) => "delete",
            Self::UpdateBooking(_) => "update-booking",
            Self::UpdatePayment(_) => "update-payment",
            Self::UpdateMaintenance(_) => "update-maintenance",
            Self::UpdateUser(_) => "update-user",
            Self::Review(_) => "review",
            Self::Landlords => "landlords",
        }
    }
}

/// `login` arguments.
#[derive(Clone, Args)]
pub struct LoginArgs {
    /// Account e-mail.
    #[arg(long)]
    pub email: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
}

impl fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginArgs")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `register` arguments.
#[derive(Clone, Args)]
pub struct RegisterArgs {
    /// Given name.
    #[arg(long)]
    pub first_name: String,
    /// Family name.
    #[arg(long)]
    pub last_name: String,
    /// Account e-mail.
    #[arg(long)]
    pub email: String,
    /// Phone number in the form `07XXXXXXXX`.
    #[arg(long)]
    pub phone_number: String,
    /// Password, at least six characters.
    #[arg(long)]
    pub password: String,
    /// Password again.
    #[arg(long)]
    pub confirm_password: String,
}

impl fmt::Debug for RegisterArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterArgs")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}

/// `verify` arguments.
#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Address to verify; defaults to the signed-in user's.
    #[arg(long)]
    pub email: Option<String>,
    /// Six-digit code.
    #[arg(long)]
    pub code: String,
}

/// `list` arguments.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Resource family, e.g. `bookings`.
    pub resource: ResourceKind,
    /// Case-insensitive text matched against the resource's search fields.
    #[arg(long, default_value = "")]
    pub search: String,
    /// `all`, `true`, `false` or a resource label such as `confirmed`.
    #[arg(long, default_value = "all")]
    pub status: String,
    /// `all`, `student`, `Landlord` or `admin`; users only.
    #[arg(long, default_value = "all")]
    pub role: RoleFilter,
    /// `asc` or `desc` by id; server order when omitted.
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

/// `delete` arguments.
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Resource family, e.g. `rooms`.
    pub resource: ResourceKind,
    /// Record id.
    pub id: EntityId,
    /// Confirm the deletion; nothing is sent without it.
    #[arg(long)]
    pub confirm: bool,
}

/// `update-booking` arguments.
#[derive(Debug, Clone, Args)]
pub struct UpdateBookingArgs {
    /// Booking id.
    pub id: EntityId,
    /// Check-in date, `YYYY-MM-DD`.
    #[arg(long)]
    pub check_in_date: Option<String>,
    /// Length of stay.
    #[arg(long)]
    pub duration: Option<String>,
    /// Amount due.
    #[arg(long)]
    pub total_amount: Option<String>,
    /// `confirmed`/`cancelled` or `true`/`false`.
    #[arg(long)]
    pub status: Option<String>,
}

/// `update-payment` arguments.
#[derive(Debug, Clone, Args)]
pub struct UpdatePaymentArgs {
    /// Payment id.
    pub id: EntityId,
    /// Amount paid.
    #[arg(long)]
    pub amount: Option<String>,
    /// Payment method, e.g. `M-Pesa`.
    #[arg(long)]
    pub method: Option<String>,
    /// `confirmed`/`pending` or `true`/`false`.
    #[arg(long)]
    pub status: Option<String>,
}

/// `update-maintenance` arguments.
#[derive(Debug, Clone, Args)]
pub struct UpdateMaintenanceArgs {
    /// Ticket id.
    pub id: EntityId,
    /// Short title.
    #[arg(long)]
    pub issue_title: Option<String>,
    /// Details of the issue.
    #[arg(long)]
    pub description: Option<String>,
    /// `resolved`/`pending` or `true`/`false`.
    #[arg(long)]
    pub status: Option<String>,
}

/// `update-user` arguments.
#[derive(Debug, Clone, Args)]
pub struct UpdateUserArgs {
    /// User id.
    pub id: EntityId,
    /// Given name.
    #[arg(long)]
    pub first_name: Option<String>,
    /// Family name.
    #[arg(long)]
    pub last_name: Option<String>,
    /// `student`, `Landlord` or `admin`.
    #[arg(long)]
    pub role: Option<String>,
}

/// `review` arguments.
#[derive(Debug, Clone, Args)]
pub struct ReviewArgs {
    /// Hostel being reviewed.
    #[arg(long)]
    pub hostel_id: EntityId,
    /// Stars from 1 to 5.
    #[arg(long)]
    pub rating: String,
    /// Review text.
    #[arg(long)]
    pub comment: String,
    /// Author; defaults to the signed-in user.
    #[arg(long)]
    pub user_id: Option<EntityId>,
}
