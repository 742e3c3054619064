//! Form validation
//!
//! Checks applied to user input before anything reaches the stores or the
//! document store. Failures are collected per field and reported back as a
//! [`ValidationErrors`] map; they are never retried.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FitnessGoal, UserCreate};

/// Field name -> message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", describe(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

fn describe(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message for a field; the first message per field wins
    pub fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn phone_regex() -> Option<&'static Regex> {
    static PHONE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&PHONE_REGEX, r"^\+?[1-9]\d{1,14}$")
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&EMAIL_REGEX, r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
}

// ============================================================================
// Phone / OTP / email
// ============================================================================

/// Phone number with all whitespace removed
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// E.164-like check on the whitespace-free number
pub fn validate_phone_number(phone: &str) -> bool {
    phone_regex().is_some_and(|re| re.is_match(&normalize_phone_number(phone)))
}

/// Format a North American number as `+1 (XXX) XXX-XXXX`.
///
/// Anything that is not 10 digits, or 11 digits starting with 1, is returned unchanged.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let local = match digits.len() {
        10 => &digits[..],
        11 if digits.starts_with('1') => &digits[1..],
        _ => return phone.to_string(),
    };
    format!("+1 ({}) {}-{}", &local[..3], &local[3..6], &local[6..])
}

/// Validate the login phone field, returning the normalized number
pub fn check_phone_number(phone: &str) -> Result<String, ValidationErrors> {
    if phone.trim().is_empty() {
        return Err(ValidationErrors::single(
            "phoneNumber",
            "Please enter your phone number",
        ));
    }
    if !validate_phone_number(phone) {
        return Err(ValidationErrors::single(
            "phoneNumber",
            "Please enter a valid phone number",
        ));
    }
    Ok(normalize_phone_number(phone))
}

pub fn validate_otp(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

pub fn check_otp(code: &str) -> Result<String, ValidationErrors> {
    let code = code.trim();
    if validate_otp(code) {
        Ok(code.to_string())
    } else {
        Err(ValidationErrors::single(
            "otp",
            "Please enter the complete 6-digit OTP",
        ))
    }
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

// ============================================================================
// Family
// ============================================================================

/// Trimmed, uppercased invite code
pub fn normalize_invite_code(code: &str) -> Result<String, ValidationErrors> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationErrors::single(
            "inviteCode",
            "Please enter the invite code",
        ));
    }
    Ok(code.to_uppercase())
}

pub fn check_family_name(name: &str) -> Result<String, ValidationErrors> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationErrors::single(
            "familyName",
            "Please enter a family group name",
        ));
    }
    Ok(name.to_string())
}

// ============================================================================
// Password
// ============================================================================

/// Every rule the password breaks; empty when it is acceptable
pub fn validate_password(password: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if password.chars().count() < 8 {
        problems.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one number");
    }
    problems
}

// ============================================================================
// Profile form
// ============================================================================

/// Raw profile form input, as typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub goal: FitnessGoal,
}

/// Parse a required numeric field and check it against an inclusive range
fn parse_in_range(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &str,
    range: (f64, f64),
    required: &str,
    invalid: &str,
) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, required);
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= range.0 && value <= range.1 => Some(value),
        _ => {
            errors.add(field, invalid);
            None
        }
    }
}

impl ProfileForm {
    /// Validate every field and build the profile for `phone_number`
    pub fn validate(&self, phone_number: &str) -> Result<UserCreate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required");
        }

        let age_invalid = "Please enter a valid age (13-100)";
        let age = parse_in_range(
            &mut errors,
            "age",
            &self.age,
            (13.0, 100.0),
            "Age is required",
            age_invalid,
        )
        .and_then(|age| {
            if age.fract() == 0.0 {
                Some(age as u32)
            } else {
                errors.add("age", age_invalid);
                None
            }
        });
        let weight = parse_in_range(
            &mut errors,
            "weight",
            &self.weight,
            (30.0, 300.0),
            "Weight is required",
            "Please enter a valid weight (30-300 kg)",
        );
        let height = parse_in_range(
            &mut errors,
            "height",
            &self.height,
            (100.0, 250.0),
            "Height is required",
            "Please enter a valid height (100-250 cm)",
        );

        match (age, weight, height) {
            (Some(age), Some(weight), Some(height)) if errors.is_empty() => Ok(UserCreate {
                phone_number: phone_number.to_string(),
                name: name.to_string(),
                age,
                weight,
                height,
                goal: self.goal,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: &str, weight: &str, height: &str) -> ProfileForm {
        ProfileForm {
            name: name.to_string(),
            age: age.to_string(),
            weight: weight.to_string(),
            height: height.to_string(),
            goal: FitnessGoal::WeightLoss,
        }
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone_number("+1 555 123 4567"));
        assert!(validate_phone_number("447911123456"));
        assert!(!validate_phone_number("0123456"));
        assert!(!validate_phone_number("+1-555-123"));
        assert!(!validate_phone_number(""));
        assert_eq!(check_phone_number(" +44 7911 123456 ").unwrap(), "+447911123456");
        assert_eq!(
            check_phone_number("   ").unwrap_err().get("phoneNumber"),
            Some("Please enter your phone number")
        );
    }

    #[test]
    fn test_phone_formatting() {
        assert_eq!(format_phone_number("5551234567"), "+1 (555) 123-4567");
        assert_eq!(format_phone_number("1-555-123-4567"), "+1 (555) 123-4567");
        assert_eq!(format_phone_number("+447911123456"), "+447911123456");
    }

    #[test]
    fn test_otp_and_email() {
        assert!(validate_otp("123456"));
        assert!(!validate_otp("12345"));
        assert!(!validate_otp("12a456"));
        assert!(check_otp("12 456").is_err());
        assert!(validate_email("sam@example.com"));
        assert!(!validate_email("sam@example"));
        assert!(!validate_email("sam @example.com"));
    }

    #[test]
    fn test_invite_code_is_normalized() {
        assert_eq!(normalize_invite_code("  ab12cd ").unwrap(), "AB12CD");
        assert!(normalize_invite_code(" ").is_err());
        assert_eq!(check_family_name("  The Smiths ").unwrap(), "The Smiths");
    }

    #[test]
    fn test_password_lists_every_failure() {
        assert!(validate_password("Secret123").is_empty());
        let problems = validate_password("abc");
        assert_eq!(problems.len(), 3);
        assert!(problems.contains(&"Password must contain at least one number"));
    }

    #[test]
    fn test_profile_form_ok() {
        let user = form(" Sam ", "34", "72.5", "180").validate("+15551234567").unwrap();
        assert_eq!(user.name, "Sam");
        assert_eq!(user.age, 34);
        assert_eq!(user.weight, 72.5);
        assert_eq!(user.goal, FitnessGoal::WeightLoss);
    }

    #[test]
    fn test_profile_form_reports_each_field() {
        let errors = form("", "", "abc", "300").validate("+15551234567").unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("age"), Some("Age is required"));
        assert_eq!(errors.get("weight"), Some("Please enter a valid weight (30-300 kg)"));
        assert_eq!(errors.get("height"), Some("Please enter a valid height (100-250 cm)"));
    }

    #[test]
    fn test_profile_form_range_edges() {
        assert!(form("A", "13", "30", "100").validate("+1").is_ok());
        assert!(form("A", "100", "300", "250").validate("+1").is_ok());
        let errors = form("A", "12", "30", "100").validate("+1").unwrap_err();
        assert_eq!(errors.get("age"), Some("Please enter a valid age (13-100)"));
        let errors = form("A", "30.5", "70", "170").validate("+1").unwrap_err();
        assert_eq!(errors.get("age"), Some("Please enter a valid age (13-100)"));
    }

    #[test]
    fn test_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.add("b", "second");
        errors.add("a", "first");
        errors.add("a", "ignored");
        assert_eq!(errors.to_string(), "validation failed: a: first; b: second");
    }
}
