//! Mock component validator.
//!
//! Only checks that the two required keys appear somewhere in the text.
//! It does not parse YAML or evaluate the schema.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationStatus {
    #[default]
    Idle,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub status: ValidationStatus,
    pub message: String,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            status: ValidationStatus::Idle,
            message: String::from("Ready to validate"),
        }
    }
}

impl Validation {
    fn invalid(message: &str) -> Self {
        Self {
            status: ValidationStatus::Invalid,
            message: message.to_string(),
        }
    }
}

pub fn validate(input: &str) -> Validation {
    if input.trim().is_empty() {
        return Validation::invalid("Input cannot be empty.");
    }
    if input.contains("name:") && input.contains("designator:") {
        Validation {
            status: ValidationStatus::Valid,
            message: String::from(
                "Validation Successful: Structure conforms to 'component.schema.json'.",
            ),
        }
    } else {
        Validation::invalid("Validation Failed: Missing required fields 'name' or 'designator'.")
    }
}
