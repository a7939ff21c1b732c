/*
 * VegaBuilder
 * Copyright (C) 2022 VegaFusion Technologies LLC
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use std::result;
use thiserror::Error;
use url::ParseError as UrlParseError;

pub type Result<T> = result::Result<T, VegaBuilderError>;

#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    pub contexts: Vec<String>,
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, context) in self.contexts.iter().enumerate() {
            writeln!(f, "    Context[{i}]: {context}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum VegaBuilderError {
    #[error("Invalid input: {0}\n{1}")]
    InvalidInput(String, ErrorContext),

    #[error("Internal error: {0}\n{1}")]
    InternalError(String, ErrorContext),

    #[error("Serde JSON Error: {0}\n{1}")]
    SerdeJsonError(serde_json::Error, ErrorContext),

    #[error("URL parse error: {0}\n{1}")]
    UrlParseError(UrlParseError, ErrorContext),
}

impl VegaBuilderError {
    /// Append a new context level to the error
    pub fn with_context<S, F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        use VegaBuilderError::*;
        match self {
            InvalidInput(msg, mut context) => {
                context.contexts.push(context_fn().into());
                VegaBuilderError::InvalidInput(msg, context)
            }
            InternalError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                VegaBuilderError::InternalError(msg, context)
            }
            SerdeJsonError(err, mut context) => {
                context.contexts.push(context_fn().into());
                VegaBuilderError::SerdeJsonError(err, context)
            }
            UrlParseError(err, mut context) => {
                context.contexts.push(context_fn().into());
                VegaBuilderError::UrlParseError(err, context)
            }
        }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into(), Default::default())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::InternalError(message.into(), Default::default())
    }

    /// Whether the error was raised while validating user input. Malformed
    /// JSON values and URLs supplied to a builder count as invalid input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            VegaBuilderError::InvalidInput(..)
                | VegaBuilderError::SerdeJsonError(..)
                | VegaBuilderError::UrlParseError(..)
        )
    }

    /// The error message without context lines
    pub fn message(&self) -> String {
        match self {
            VegaBuilderError::InvalidInput(msg, _) => msg.clone(),
            VegaBuilderError::InternalError(msg, _) => msg.clone(),
            VegaBuilderError::SerdeJsonError(err, _) => err.to_string(),
            VegaBuilderError::UrlParseError(err, _) => err.to_string(),
        }
    }
}

pub trait ResultWithContext<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<R, E> ResultWithContext<R> for result::Result<R, E>
where
    E: Into<VegaBuilderError>,
{
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Ok(val) => Ok(val),
            Err(err) => {
                let vega_builder_error: VegaBuilderError = err.into();
                Err(vega_builder_error.with_context(context_fn))
            }
        }
    }
}

impl<R> ResultWithContext<R> for Option<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Some(val) => Ok(val),
            None => Err(VegaBuilderError::invalid_input(context_fn().into())),
        }
    }
}

impl From<serde_json::Error> for VegaBuilderError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJsonError(err, Default::default())
    }
}

impl From<UrlParseError> for VegaBuilderError {
    fn from(err: UrlParseError) -> Self {
        Self::UrlParseError(err, Default::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ResultWithContext, VegaBuilderError};

    #[test]
    fn test_context_is_appended() {
        let err = VegaBuilderError::invalid_input("Duplicate Data name: table")
            .with_context(|| "Failed to build Data")
            .with_context(|| "Failed to build chart");
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid input: Duplicate Data name: table"));
        assert!(msg.contains("Context[0]: Failed to build Data"));
        assert!(msg.contains("Context[1]: Failed to build chart"));
        assert_eq!(err.message(), "Duplicate Data name: table");
    }

    #[test]
    fn test_missing_option_is_invalid_input() {
        let missing: Option<u32> = None;
        let err = missing.with_context(|| "No scale named y").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(matches!(err, VegaBuilderError::InvalidInput(..)));
    }

    #[test]
    fn test_serde_error_is_invalid_input() {
        let err: VegaBuilderError = serde_json::from_str::<serde_json::Value>("[1, 2")
            .unwrap_err()
            .into();
        assert!(err.is_invalid_input());
    }
}
