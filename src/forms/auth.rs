use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::{LoginRequest, RegisterRequest};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Sign-in form of the console.
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
/// Self-service registration form.
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub confirm_password: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl TryFrom<LoginForm> for LoginRequest {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        let form = LoginForm {
            email: normalize_email(&form.email),
            password: form.password,
        };
        form.validate()?;

        Ok(Self {
            email: form.email,
            password: form.password,
        })
    }
}

impl TryFrom<RegisterForm> for RegisterRequest {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        let form = RegisterForm {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: normalize_email(&form.email),
            password: form.password,
            confirm_password: form.confirm_password,
        };
        form.validate()?;

        if form.password != form.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
        })
    }
}
