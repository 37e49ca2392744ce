//! Error conversion glue between the form, domain and service layers.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        match val {
            FormError::Validation(err) => {
                log::error!("Failed to validate form: {err}");
                ServiceError::Form("Please check the form fields.".to_string())
            }
            FormError::PasswordMismatch => ServiceError::Form("Passwords do not match.".to_string()),
        }
    }
}
