//! Field validators shared by every form.
//!
//! Each rule takes the raw text the user typed and returns either the parsed
//! value or the message to show next to the field.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::{Amount, EntityId};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static CODE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[\w-]+(\.[\w-]+)*@([\w-]+\.)+[a-zA-Z]{2,7}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^07\d{8}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn code_regex() -> &'static Regex {
    CODE_RE.get_or_init(|| {
        Regex::new(r"^\d{6}$")
            .unwrap_or_else(|error| panic!("verification code regex failed to compile: {error}"))
    })
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;
/// Maximum accepted length of a person's name.
pub const MAX_NAME_LEN: usize = 50;
/// Maximum accepted length of an e-mail address on the verification form.
pub const MAX_EMAIL_LEN: usize = 100;

/// Trimmed, non-empty text.
pub fn required(raw: &str, label: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Required text no longer than `max` characters.
pub fn bounded(raw: &str, label: &str, max: usize) -> Result<String, String> {
    let value = required(raw, label)?;
    if value.chars().count() > max {
        return Err(format!("Max {max} characters"));
    }
    Ok(value)
}

/// Record identifier.
pub fn id(raw: &str, label: &str) -> Result<EntityId, String> {
    required(raw, label)?
        .parse()
        .map_err(|_| format!("{label} must be a number"))
}

/// Non-negative money amount.
pub fn amount(raw: &str, label: &str) -> Result<Amount, String> {
    let parsed: Amount = required(raw, label)?
        .parse()
        .map_err(|err| format!("{label}: {err}"))?;
    if parsed.is_negative() {
        return Err(format!("{label} must not be negative"));
    }
    Ok(parsed)
}

/// `YYYY-MM-DD` date.
pub fn date(raw: &str, label: &str) -> Result<NaiveDate, String> {
    let value = required(raw, label)?;
    crate::domain::wire::date::parse(&value).ok_or_else(|| format!("{label} must be a valid date"))
}

/// Boolean flag, accepting `true`/`false` or the two display labels.
pub fn flag(raw: &str, label: &str, labels: Option<(&str, &str)>) -> Result<bool, String> {
    let value = required(raw, label)?.to_ascii_lowercase();
    match value.as_str() {
        "true" | "yes" | "1" => return Ok(true),
        "false" | "no" | "0" => return Ok(false),
        _ => {}
    }
    match labels {
        Some((yes, _)) if value == yes => Ok(true),
        Some((_, no)) if value == no => Ok(false),
        Some((yes, no)) => Err(format!("{label} must be {yes} or {no}")),
        None => Err(format!("{label} must be true or false")),
    }
}

/// E-mail address matching the marketplace's accepted pattern.
pub fn email(raw: &str) -> Result<String, String> {
    let value = required(raw, "Email")?;
    if email_regex().is_match(&value) {
        Ok(value)
    } else {
        Err("Invalid email".to_owned())
    }
}

/// Kenyan mobile number in `07XXXXXXXX` form.
pub fn phone(raw: &str) -> Result<String, String> {
    let value = required(raw, "Phone number")?;
    if phone_regex().is_match(&value) {
        Ok(value)
    } else {
        Err("Phone number must be 10 digits starting with 07".to_owned())
    }
}

/// Password of at least [`MIN_PASSWORD_LEN`] characters. Whitespace is kept.
pub fn password(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("Password is required".to_owned());
    }
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(raw.to_owned())
}

/// Six-digit verification code.
pub fn verification_code(raw: &str) -> Result<String, String> {
    let value = required(raw, "Verification code")?;
    if code_regex().is_match(&value) {
        Ok(value)
    } else {
        Err("Code must be 6 digit number".to_owned())
    }
}
