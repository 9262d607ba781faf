// ABOUTME: Validated OpenFaaS function name.
// ABOUTME: Function names become Kubernetes objects, so they follow RFC 1123 label rules.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FunctionNameError {
    #[error("function name cannot be empty")]
    Empty,

    #[error("function name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("function name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("function name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("function name must be lowercase")]
    NotLowercase,

    #[error("invalid character in function name: '{0}'")]
    InvalidChar(char),
}

/// Name of a function declared in the stack file, used as the `--filter` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName(String);

impl FunctionName {
    pub fn new(value: &str) -> Result<Self, FunctionNameError> {
        if value.is_empty() {
            return Err(FunctionNameError::Empty);
        }

        if value.len() > 63 {
            return Err(FunctionNameError::TooLong);
        }

        // A leading hyphen would be read by faas-cli as a flag.
        if value.starts_with('-') {
            return Err(FunctionNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(FunctionNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(FunctionNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(FunctionNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FunctionName {
    type Err = FunctionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
