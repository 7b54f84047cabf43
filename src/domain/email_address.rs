use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{Error, Result};

/// A user supplied email address of the form `local@domain.tld`, without any whitespace
#[derive(Debug, PartialEq, Clone)]
pub struct EmailAddress(String);

impl FromStr for EmailAddress {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
        }

        if !EMAIL_REGEX.is_match(value) {
            return Err(Error::InvalidEmail);
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
