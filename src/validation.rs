//! Employee field validation.
//!
//! Every rule is a pure function: callers hand in the raw form input plus
//! the current collection (for uniqueness checks) and get back a map from
//! field to error classification. An empty map means the input is valid
//! and the parsed [`ValidEmployee`] can be stored.
//!
//! Rules per field, first failing rule wins:
//! - names: required, min 2 chars, max 50 chars, letters/space/hyphen/apostrophe
//! - email: required, `local@domain.tld` shape, unique (case-insensitive)
//! - phone: required, 10-15 digits once separators are stripped, optional
//!   leading `+`, unique by normalized digits
//! - date of birth: required, ISO date, not in the future, age 18-100
//! - date of employment: required, ISO date, at most 1 year ahead, not
//!   before the date of birth
//! - department/position: required, member of the known options
//!
//! Classifications carry stable `key()` strings; turning those into
//! human-readable text is the localization layer's job, not ours.

use crate::dates::{age_on, parse_date, today, years_from};
use crate::model::{Department, Employee, EmployeeInput, Position, ValidEmployee};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;
/// The original rule table said 16, but persistence was always gated on 18.
/// 18 is the rule that held in practice, so 18 it is.
pub const MIN_AGE_YEARS: i32 = 18;
pub const MAX_AGE_YEARS: i32 = 100;
pub const MAX_FUTURE_EMPLOYMENT_YEARS: i32 = 1;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]*$").unwrap());
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿĞğİıÖöŞşÜüÇç '\-]+$").unwrap());

/// The validated fields of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    DateOfEmployment,
    Department,
    Position,
}

impl Field {
    /// Stable camelCase key, matching the wire names of [`Employee`].
    pub fn key(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::DateOfBirth => "dateOfBirth",
            Field::DateOfEmployment => "dateOfEmployment",
            Field::Department => "department",
            Field::Position => "position",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error classification for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    TooShort,
    TooLong,
    InvalidCharacters,
    InvalidFormat,
    AlreadyExists,
    InvalidDate,
    InFuture,
    TooYoung,
    TooOld,
    TooFarInFuture,
    BeforeBirth,
    UnknownOption,
}

impl ValidationError {
    /// Stable identifier for the localization boundary.
    pub fn key(&self) -> &'static str {
        match self {
            ValidationError::Required => "required",
            ValidationError::TooShort => "tooShort",
            ValidationError::TooLong => "tooLong",
            ValidationError::InvalidCharacters => "invalidCharacters",
            ValidationError::InvalidFormat => "invalidFormat",
            ValidationError::AlreadyExists => "alreadyExists",
            ValidationError::InvalidDate => "invalidDate",
            ValidationError::InFuture => "inFuture",
            ValidationError::TooYoung => "tooYoung",
            ValidationError::TooOld => "tooOld",
            ValidationError::TooFarInFuture => "tooFarInFuture",
            ValidationError::BeforeBirth => "beforeBirth",
            ValidationError::UnknownOption => "unknownOption",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-field error classifications. Absence of a field means it is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.0.iter().map(|(f, e)| (*f, *e))
    }

    fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

/// Validate raw form input against the current collection.
///
/// `exclude` names the record being edited so its own email and phone do
/// not trip the uniqueness checks.
pub fn validate(
    input: &EmployeeInput,
    existing: &[Employee],
    exclude: Option<Uuid>,
) -> Result<ValidEmployee, ValidationErrors> {
    validate_on(input, existing, exclude, today())
}

/// Like [`validate`] but with an explicit "today", so age and future-date
/// boundaries can be pinned down in tests.
pub fn validate_on(
    input: &EmployeeInput,
    existing: &[Employee],
    exclude: Option<Uuid>,
    today: NaiveDate,
) -> Result<ValidEmployee, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let first_name = check(&mut errors, Field::FirstName, validate_name(&input.first_name));
    let last_name = check(&mut errors, Field::LastName, validate_name(&input.last_name));
    let email = check(
        &mut errors,
        Field::Email,
        validate_email(&input.email, existing, exclude),
    );
    let phone = check(
        &mut errors,
        Field::Phone,
        validate_phone(&input.phone, existing, exclude),
    );
    let date_of_birth = check(
        &mut errors,
        Field::DateOfBirth,
        validate_date_of_birth(&input.date_of_birth, today),
    );
    // The before-birth comparison needs a parseable birth date, whether or
    // not the age rules accepted it.
    let birth_for_range = parse_date(&input.date_of_birth);
    let date_of_employment = check(
        &mut errors,
        Field::DateOfEmployment,
        validate_date_of_employment(&input.date_of_employment, birth_for_range, today),
    );
    let department = check(
        &mut errors,
        Field::Department,
        validate_department(&input.department),
    );
    let position = check(&mut errors, Field::Position, validate_position(&input.position));

    if !errors.is_empty() {
        return Err(errors);
    }

    // All checks passed, so every parse above produced a value.
    match (
        first_name,
        last_name,
        email,
        phone,
        date_of_birth,
        date_of_employment,
        department,
        position,
    ) {
        (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(phone),
            Some(date_of_birth),
            Some(date_of_employment),
            Some(department),
            Some(position),
        ) => Ok(ValidEmployee {
            first_name,
            last_name,
            email,
            phone,
            date_of_birth,
            date_of_employment,
            department,
            position,
        }),
        _ => unreachable!("empty error map implies every field parsed"),
    }
}

fn check<T>(
    errors: &mut ValidationErrors,
    field: Field,
    outcome: Result<T, ValidationError>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(error) => {
            errors.insert(field, error);
            None
        }
    }
}

/// First or last name: trimmed, 2-50 characters, letters (including
/// accented and Turkish ones), spaces, hyphens and apostrophes.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required);
    }
    let length = name.chars().count();
    if length < NAME_MIN_LENGTH {
        return Err(ValidationError::TooShort);
    }
    if length > NAME_MAX_LENGTH {
        return Err(ValidationError::TooLong);
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(name.to_string())
}

/// Email: `local@domain.tld` shape, unique among `existing` ignoring case.
pub fn validate_email(
    email: &str,
    existing: &[Employee],
    exclude: Option<Uuid>,
) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidFormat);
    }
    if email_taken(email, existing, exclude) {
        return Err(ValidationError::AlreadyExists);
    }
    Ok(email.to_string())
}

/// Phone: 10-15 digits once separators are stripped, optional leading `+`,
/// unique among `existing` by normalized digits.
pub fn validate_phone(
    phone: &str,
    existing: &[Employee],
    exclude: Option<Uuid>,
) -> Result<String, ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::Required);
    }
    let digits = phone_digits(phone);
    if digits.len() < PHONE_MIN_DIGITS {
        return Err(ValidationError::TooShort);
    }
    if digits.len() > PHONE_MAX_DIGITS {
        return Err(ValidationError::TooLong);
    }
    if !PHONE_PATTERN.is_match(phone) {
        return Err(ValidationError::InvalidFormat);
    }
    if phone_taken(phone, existing, exclude) {
        return Err(ValidationError::AlreadyExists);
    }
    Ok(phone.to_string())
}

/// Date of birth: ISO date, not in the future, age within 18-100.
pub fn validate_date_of_birth(
    value: &str,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    let birth = parse_date(value).ok_or(ValidationError::InvalidDate)?;
    if birth > today {
        return Err(ValidationError::InFuture);
    }
    let age = age_on(birth, today);
    if age < MIN_AGE_YEARS {
        return Err(ValidationError::TooYoung);
    }
    if age > MAX_AGE_YEARS {
        return Err(ValidationError::TooOld);
    }
    Ok(birth)
}

/// Date of employment: ISO date, at most one year ahead of today, and not
/// before the birth date when one parsed.
pub fn validate_date_of_employment(
    value: &str,
    birth: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    let employment = parse_date(value).ok_or(ValidationError::InvalidDate)?;
    if employment > years_from(today, MAX_FUTURE_EMPLOYMENT_YEARS) {
        return Err(ValidationError::TooFarInFuture);
    }
    if let Some(birth) = birth {
        if employment < birth {
            return Err(ValidationError::BeforeBirth);
        }
    }
    Ok(employment)
}

pub fn validate_department(value: &str) -> Result<Department, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required);
    }
    Department::from_name(value).ok_or(ValidationError::UnknownOption)
}

pub fn validate_position(value: &str) -> Result<Position, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required);
    }
    Position::from_name(value).ok_or(ValidationError::UnknownOption)
}

/// A phone number reduced to its digits, the form used for uniqueness.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Case-insensitive exact email match against the collection, skipping the
/// excluded record.
pub fn email_taken(email: &str, existing: &[Employee], exclude: Option<Uuid>) -> bool {
    let needle = email.trim().to_lowercase();
    existing
        .iter()
        .filter(|emp| Some(emp.id) != exclude)
        .any(|emp| emp.email.to_lowercase() == needle)
}

/// Digit-normalized exact phone match against the collection, skipping the
/// excluded record.
pub fn phone_taken(phone: &str, existing: &[Employee], exclude: Option<Uuid>) -> bool {
    let needle = phone_digits(phone);
    existing
        .iter()
        .filter(|emp| Some(emp.id) != exclude)
        .any(|emp| phone_digits(&emp.phone) == needle)
}
