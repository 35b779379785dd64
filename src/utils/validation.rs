use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::ApiError;

/// Runs the derive-generated validators on a request DTO, flattening
/// failures into a single 400 message.
pub fn check_payload<T: Validate>(dto: &T) -> Result<(), ApiError> {
    dto.validate()
        .map_err(|errors| ApiError::bad_request(format_validation_errors(&errors)))
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    let mut parts = Vec::new();
    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("invalid value ({})", error.code));
            parts.push(format!("{}: {}", field, message));
        }
    }
    parts.join("; ")
}

/// Outward code format only; no lookup against the postcode file.
pub fn validate_uk_postcode(postcode: &str) -> Result<(), ValidationError> {
    let re = Regex::new(r"^(?i)[A-Z]{1,2}\d[A-Z\d]?\s*\d[A-Z]{2}$").unwrap();
    if re.is_match(postcode.trim()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("uk_postcode");
        error.message = Some("Enter a valid UK postcode".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 2, message = "Name is required"))]
        name: String,
        #[validate(email(message = "Please enter a valid email address"))]
        email: String,
    }

    #[test]
    fn accepts_valid_payload() {
        let probe = Probe {
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
        };
        assert!(check_payload(&probe).is_ok());
    }

    #[test]
    fn reports_field_level_messages() {
        let probe = Probe {
            name: "P".to_string(),
            email: "not-an-email".to_string(),
        };
        let err = check_payload(&probe).unwrap_err();
        assert_eq!(err.status, rocket::http::Status::BadRequest);
        assert!(err.message.contains("email: Please enter a valid email address"));
        assert!(err.message.contains("name: Name is required"));
    }

    #[test]
    fn postcode_accepts_common_formats() {
        for postcode in ["M1 1AA", "LS1 1BB", "SW1A 2AA", "b33 8th", "E17AB"] {
            assert!(validate_uk_postcode(postcode).is_ok(), "{}", postcode);
        }
    }

    #[test]
    fn postcode_rejects_garbage() {
        for postcode in ["", "12345", "MANCHESTER", "1M 1AA"] {
            assert!(validate_uk_postcode(postcode).is_err(), "{}", postcode);
        }
    }
}
