//! Input validation for credentials
//!
//! Both rules are enforced before any store or hashing work happens.

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate email against the canonical address syntax: a local part, an
/// `@`, and a dotted domain whose final label is at least two letters.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("email too long".to_string());
    }
    let email_regex =
        regex_lite::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    if !email_regex.is_match(email) {
        return Err("invalid email format".to_string());
    }
    Ok(())
}

/// Validate password length bounds
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if password.len() > 128 {
        return Err("password too long".to_string());
    }
    Ok(())
}
