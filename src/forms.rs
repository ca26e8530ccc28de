//! Login and registration form input and its validation.

use serde::Deserialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use url::Url;

use crate::api::types::{LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 2;
pub const MIN_AGE_YEARS: i32 = 18;

/// Placeholder origin used to resolve `next` paths.
const NEXT_BASE: &str = "http://pina.invalid/";
const BIRTH_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub const MSG_EMAIL: &str = "Email inválido";
pub const MSG_PASSWORD_LEN: &str = "La contraseña debe tener al menos 8 caracteres";
pub const MSG_PASSWORD_UPPER: &str = "Incluye al menos una letra mayúscula";
pub const MSG_PASSWORD_LOWER: &str = "Incluye al menos una letra minúscula";
pub const MSG_PASSWORD_DIGIT: &str = "Incluye al menos un número";
pub const MSG_NAME: &str = "Nombre demasiado corto";
pub const MSG_BIRTH_DATE: &str = "Debes ser mayor de 18 años";

/// First validation message per field, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, &'static str)>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        if self.get(field).is_none() {
            self.0.push((field, message));
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Shape check only: one `@`, non-empty local part, dotted domain, no spaces.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after a successful login; see [`safe_next`].
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginForm {
    /// The credentials are submitted exactly as typed.
    ///
    /// # Errors
    ///
    /// Returns per-field messages when the email is malformed or the
    /// password is shorter than [`MIN_PASSWORD_LEN`].
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        if !is_valid_email(&self.email) {
            errors.push("email", MSG_EMAIL);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("password", MSG_PASSWORD_LEN);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest { email: self.email.clone(), password: self.password.clone() })
    }
}

/// Accept only same-origin absolute paths as a post-login destination.
/// Browsers drop tabs and newlines while parsing a `Location`, so any
/// control or whitespace character is refused outright.
#[must_use]
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| {
        n.starts_with('/')
            && !n.starts_with("//")
            && !n.contains('\\')
            && !n.chars().any(|c| c.is_control() || c.is_whitespace())
            && stays_on_origin(n)
    })
}

fn stays_on_origin(path: &str) -> bool {
    let Ok(base) = Url::parse(NEXT_BASE) else {
        return false;
    };
    base.join(path).is_ok_and(|joined| joined.origin() == base.origin())
}

// =============================================================================
// REGISTER
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub birth_date: String,
}

impl RegisterForm {
    /// Validate against today's UTC date.
    ///
    /// # Errors
    ///
    /// See [`RegisterForm::validate_at`].
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        self.validate_at(OffsetDateTime::now_utc().date())
    }

    /// Normalize and validate the form as of `today`.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule of each field.
    pub fn validate_at(&self, today: Date) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = self.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            errors.push("email", MSG_EMAIL);
        }
        if self.full_name.trim().chars().count() < MIN_NAME_LEN {
            errors.push("full_name", MSG_NAME);
        }
        if let Some(message) = password_problem(&self.password) {
            errors.push("password", message);
        }
        let birth_date = self.birth_date.trim();
        if !is_adult(birth_date, today) {
            errors.push("birth_date", MSG_BIRTH_DATE);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            full_name: self.full_name.trim().to_owned(),
            email,
            password: self.password.clone(),
            birth_date: birth_date.to_owned(),
        })
    }
}

fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Some(MSG_PASSWORD_LEN)
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some(MSG_PASSWORD_UPPER)
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some(MSG_PASSWORD_LOWER)
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some(MSG_PASSWORD_DIGIT)
    } else {
        None
    }
}

/// `YYYY-MM-DD` birth date at least [`MIN_AGE_YEARS`] before `today`.
#[must_use]
pub fn is_adult(birth_date: &str, today: Date) -> bool {
    let Ok(born) = Date::parse(birth_date, BIRTH_DATE_FORMAT) else {
        return false;
    };
    let mut age = today.year() - born.year();
    if (u8::from(today.month()), today.day()) < (u8::from(born.month()), born.day()) {
        age -= 1;
    }
    age >= MIN_AGE_YEARS
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
