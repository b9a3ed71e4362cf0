//! Newsletter subscription
//!
//! Only validates the address shape and acknowledges. Nothing is stored.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

pub const SUBSCRIBED_MESSAGE: &str = "Subscription successful";

#[derive(Error, Debug, PartialEq)]
pub enum SubscribeError {
    #[error("Valid email is required")]
    InvalidEmail,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"))
}

/// Loose shape check: something@something.something
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Accept a subscription request
pub fn subscribe(email: Option<&str>) -> Result<&'static str, SubscribeError> {
    match email {
        Some(email) if is_valid_email(email) => {
            let domain = email.rsplit('@').next().unwrap_or("");
            info!(domain, "Newsletter subscription accepted");
            Ok(SUBSCRIBED_MESSAGE)
        }
        _ => Err(SubscribeError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("priya.shah@example.co.in"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@."));
    }

    #[test]
    fn test_subscribe() {
        assert_eq!(subscribe(Some("a@b.c")), Ok(SUBSCRIBED_MESSAGE));
        assert_eq!(subscribe(None), Err(SubscribeError::InvalidEmail));
        assert_eq!(
            SubscribeError::InvalidEmail.to_string(),
            "Valid email is required"
        );
    }
}
