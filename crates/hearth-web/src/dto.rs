//! Request/response DTOs and validation for the contact endpoint.
//!
//! The select-style fields (`interest`, `budget`, `timeline`) are typed
//! enums, so an unknown value is rejected at deserialization. Free-text
//! fields are checked by [`ContactRequest::validate`], which reports every
//! failed field at once.

use serde::{Deserialize, Serialize};

/// A single field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interest {
    NewBuild,
    Renovation,
    Investment,
    Consultation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "under-500k")]
    Under500k,
    #[serde(rename = "500k-1m")]
    From500kTo1m,
    #[serde(rename = "1m-5m")]
    From1mTo5m,
    #[serde(rename = "above-5m")]
    Above5m,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeline {
    Immediate,
    Medium,
    Long,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub interest: Interest,
    pub budget: Budget,
    pub timeline: Timeline,
    pub message: String,
    pub privacy_accepted: bool,
}

impl ContactRequest {
    /// Checks every free-text field, returning all failures at once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len < 2 {
            errors.push(FieldError {
                field: "name",
                message: "Name must be at least 2 characters",
            });
        } else if name_len > 50 {
            errors.push(FieldError {
                field: "name",
                message: "Name must be less than 50 characters",
            });
        } else if !self.name.chars().all(is_name_char) {
            errors.push(FieldError {
                field: "name",
                message: "Name contains invalid characters",
            });
        }

        if self.email.is_empty() {
            errors.push(FieldError {
                field: "email",
                message: "Email is required",
            });
        } else if self.email.chars().count() > 100 {
            errors.push(FieldError {
                field: "email",
                message: "Email is too long",
            });
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError {
                field: "email",
                message: "Please enter a valid email address",
            });
        }

        if let Some(phone) = &self.phone {
            if !phone.is_empty() && !is_valid_phone(phone) {
                errors.push(FieldError {
                    field: "phone",
                    message: "Please enter a valid phone number (e.g., 214-555-1234)",
                });
            }
        }

        let message_len = self.message.chars().count();
        if message_len < 10 {
            errors.push(FieldError {
                field: "message",
                message: "Message must be at least 10 characters",
            });
        } else if message_len > 1000 {
            errors.push(FieldError {
                field: "message",
                message: "Message must be less than 1000 characters",
            });
        }

        if !self.privacy_accepted {
            errors.push(FieldError {
                field: "privacyAccepted",
                message: "You must accept the privacy policy to continue",
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub message: String,
    pub submission_id: String,
}

/// Letters (including Latin-1 accents), whitespace, apostrophes, hyphens.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{C0}'..='\u{FF}').contains(&c)
        || c.is_whitespace()
        || c == '\''
        || c == '-'
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// US-style phone: optional `+1`/`1` prefix, 10 digits, with `-`, `.`,
/// space, and parentheses as separators.
fn is_valid_phone(phone: &str) -> bool {
    if phone
        .chars()
        .any(|c| !(c.is_ascii_digit() || "+-.() ".contains(c)))
    {
        return false;
    }
    if phone.contains('+') && !phone.starts_with("+1") {
        return false;
    }

    let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => true,
        11 => digits[0] == '1',
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("214-555-1234".to_string()),
            interest: Interest::NewBuild,
            budget: Budget::From1mTo5m,
            timeline: Timeline::Medium,
            message: "We would like to discuss a custom build.".to_string(),
            privacy_accepted: true,
        }
    }

    // === deserialization ===

    #[test]
    fn deserializes_kebab_case_selects() {
        let json = r#"{
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "interest": "new-build",
            "budget": "500k-1m",
            "timeline": "immediate",
            "message": "We would like to discuss a custom build.",
            "privacyAccepted": true
        }"#;
        let request: ContactRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.interest, Interest::NewBuild);
        assert_eq!(request.budget, Budget::From500kTo1m);
        assert_eq!(request.timeline, Timeline::Immediate);
        assert!(request.phone.is_none());
    }

    #[test]
    fn rejects_unknown_select_values() {
        let json = r#"{
            "name": "Ada",
            "email": "ada@example.com",
            "interest": "teardown",
            "budget": "500k-1m",
            "timeline": "immediate",
            "message": "We would like to discuss a custom build.",
            "privacyAccepted": true
        }"#;
        assert!(serde_json::from_str::<ContactRequest>(json).is_err());
    }

    // === validation ===

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn short_name_fails() {
        let mut request = valid_request();
        request.name = "A".to_string();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "Name must be at least 2 characters");
    }

    #[test]
    fn long_name_fails() {
        let mut request = valid_request();
        request.name = "x".repeat(51);
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].message, "Name must be less than 50 characters");
    }

    #[test]
    fn accented_and_hyphenated_names_pass() {
        let mut request = valid_request();
        request.name = "Renée O'Brien-Müller".to_string();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn name_with_digits_fails() {
        let mut request = valid_request();
        request.name = "Ada L0velace".to_string();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].message, "Name contains invalid characters");
    }

    #[test]
    fn empty_email_fails_with_required_message() {
        let mut request = valid_request();
        request.email = String::new();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].message, "Email is required");
    }

    #[test]
    fn malformed_emails_fail() {
        for email in ["no-at-sign", "@example.com", "a@b", "a@.com", "a@b.com.", "a b@c.d"] {
            let mut request = valid_request();
            request.email = email.to_string();
            let errors = request.validate().unwrap_err();
            assert_eq!(errors[0].field, "email", "expected failure for {email}");
        }
    }

    #[test]
    fn overlong_email_fails() {
        let mut request = valid_request();
        request.email = format!("{}@example.com", "x".repeat(95));
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].message, "Email is too long");
    }

    #[test]
    fn phone_formats_accepted() {
        for phone in [
            "214-555-1234",
            "(214) 555-1234",
            "214.555.1234",
            "2145551234",
            "+1 214 555 1234",
            "1-214-555-1234",
        ] {
            let mut request = valid_request();
            request.phone = Some(phone.to_string());
            assert!(request.validate().is_ok(), "expected {phone} to pass");
        }
    }

    #[test]
    fn phone_formats_rejected() {
        for phone in ["12345", "+44 20 7946 0958", "214-555-12345", "abc-def-ghij"] {
            let mut request = valid_request();
            request.phone = Some(phone.to_string());
            let errors = request.validate().unwrap_err();
            assert_eq!(errors[0].field, "phone", "expected failure for {phone}");
        }
    }

    #[test]
    fn empty_phone_is_allowed() {
        let mut request = valid_request();
        request.phone = Some(String::new());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn short_message_fails() {
        let mut request = valid_request();
        request.message = "too short".to_string();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].message, "Message must be at least 10 characters");
    }

    #[test]
    fn overlong_message_fails() {
        let mut request = valid_request();
        request.message = "x".repeat(1001);
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors[0].message,
            "Message must be less than 1000 characters"
        );
    }

    #[test]
    fn privacy_must_be_accepted() {
        let mut request = valid_request();
        request.privacy_accepted = false;
        let errors = request.validate().unwrap_err();
        assert_eq!(errors[0].field, "privacyAccepted");
    }

    #[test]
    fn all_failures_reported_together() {
        let request = ContactRequest {
            name: "A".to_string(),
            email: "bad".to_string(),
            phone: Some("123".to_string()),
            interest: Interest::Consultation,
            budget: Budget::Under500k,
            timeline: Timeline::Long,
            message: "short".to_string(),
            privacy_accepted: false,
        };
        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            ["name", "email", "phone", "message", "privacyAccepted"]
        );
    }
}
