// Request field validation, mirroring the limits enforced by the API surface
use std::collections::HashMap;

use crate::error::ApiError;

pub const TITLE_MIN: usize = 3;
pub const CONTENT_MIN: usize = 10;
pub const CONTENT_MAX: usize = 1000;
pub const CATEGORY_NAME_MIN: usize = 2;
pub const CATEGORY_NAME_MAX: usize = 50;
pub const TAG_NAME_MIN: usize = 2;
pub const TAG_NAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 8;

fn invalid(field_errors: HashMap<String, String>) -> ApiError {
    ApiError::validation_error("Validation failed", Some(field_errors))
}

pub fn validate_register(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ApiError> {
    let mut errors = HashMap::new();

    if name.trim().is_empty() {
        errors.insert("name".to_string(), "Name is required".to_string());
    }
    if !email.contains('@') || email.trim().len() < 3 {
        errors.insert("email".to_string(), "A valid email address is required".to_string());
    }
    if password.chars().count() < PASSWORD_MIN {
        errors.insert(
            "password".to_string(),
            format!("Password must be at least {} characters", PASSWORD_MIN),
        );
    }

    if !errors.is_empty() {
        return Err(invalid(errors));
    }

    if password != confirm_password {
        return Err(ApiError::bad_request("Passwords must match"));
    }

    Ok(())
}

pub fn validate_post_title(title: &str) -> Result<(), ApiError> {
    if title.chars().count() < TITLE_MIN {
        let mut errors = HashMap::new();
        errors.insert(
            "title".to_string(),
            format!("Title must be at least {} characters", TITLE_MIN),
        );
        return Err(invalid(errors));
    }
    Ok(())
}

pub fn validate_post_content(content: &str) -> Result<(), ApiError> {
    let len = content.chars().count();
    if len < CONTENT_MIN || len > CONTENT_MAX {
        let mut errors = HashMap::new();
        errors.insert(
            "content".to_string(),
            format!("Content must be between {} and {} characters", CONTENT_MIN, CONTENT_MAX),
        );
        return Err(invalid(errors));
    }
    Ok(())
}

pub fn validate_category_name(name: &str) -> Result<(), ApiError> {
    validate_name(name, CATEGORY_NAME_MIN, CATEGORY_NAME_MAX)
}

pub fn validate_tag_name(name: &str) -> Result<(), ApiError> {
    validate_name(name, TAG_NAME_MIN, TAG_NAME_MAX)
}

fn validate_name(name: &str, min: usize, max: usize) -> Result<(), ApiError> {
    let len = name.trim().chars().count();
    if len < min || len > max {
        let mut errors = HashMap::new();
        errors.insert(
            "name".to_string(),
            format!("Name must be between {} and {} characters", min, max),
        );
        return Err(invalid(errors));
    }
    Ok(())
}
