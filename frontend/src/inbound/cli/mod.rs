//! Command-line admin console.
//!
//! `args` declares the clap command tree, `commands` runs a parsed command
//! against a [`crate::FrontendState`] and returns the text to print, and
//! `render` formats tables and summary lines.

mod args;
mod commands;
pub mod render;

pub use args::{
    CliArgs, Command, DeleteArgs, ListArgs, LoginArgs, RegisterArgs, ReviewArgs,
    UpdateBookingArgs, UpdateMaintenanceArgs, UpdatePaymentArgs, UpdateUserArgs, VerifyArgs,
};
pub use commands::run;
