//! Validation Adapters - Inbound payload validation.
//!
//! Validates raw request bodies into domain values, reporting failures in
//! a flattened form/field shape the API returns verbatim.

mod post_message_validator;

pub use post_message_validator::{validate_post_body, validate_post_value, BodyValidationErrors};
