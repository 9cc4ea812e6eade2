//! Error types for the orderflow pipeline.
//!
//! Business-rule rejections are not errors: they travel through
//! [`Outcome::Rejected`](crate::core::Outcome). The types here cover the two
//! fault classes that remain: a malformed pipeline (caught when it is built)
//! and a caller that broke the request contract (caught when a stage runs).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for orderflow operations.
#[derive(Debug, Error)]
pub enum OrderflowError {
    /// The pipeline could not be assembled.
    #[error("{0}")]
    Validation(#[from] PipelineValidationError),

    /// A request broke the field contract a stage relies on.
    #[error("{0}")]
    Contract(#[from] ContractViolation),

    /// A non-terminal stage tried to approve the request.
    #[error("Stage '{stage}' produced an approval but is not the terminal stage")]
    UnexpectedApproval {
        /// The offending stage.
        stage: String,
    },

    /// A stage that may not reject tried to reject the request.
    #[error("Stage '{stage}' is a {kind} stage and may not reject")]
    UnexpectedRejection {
        /// The offending stage.
        stage: String,
        /// Its declared kind.
        kind: crate::core::StageKind,
    },

    /// The chain ran out of stages without a terminal outcome.
    #[error("Pipeline '{pipeline}' finished without a terminal outcome")]
    ChainExhausted {
        /// The pipeline name.
        pipeline: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for OrderflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Metadata about a contract error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "CHAIN-001-EMPTY").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint registered for this code in [`ContractSuggestions`].
    #[must_use]
    pub fn with_suggested_fix(mut self) -> Self {
        self.fix_hint = ContractSuggestions::get(&self.code).map(str::to_string);
        self
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Error raised when a pipeline cannot be assembled.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
    /// Optional contract error info.
    pub error_info: Option<ContractErrorInfo>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
            error_info: None,
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the contract error info.
    #[must_use]
    pub fn with_error_info(mut self, info: ContractErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the contract error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.code.as_str())
    }
}

/// A request field a stage depends on was missing or unusable.
///
/// This is a programmer error on the caller's side. Stages raise it instead
/// of guessing a default, since a guessed price would corrupt the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A required field was absent.
    #[error("Stage '{stage}' requires field '{field}', but it was not provided")]
    MissingField {
        /// The stage that needed the field.
        stage: String,
        /// The field name.
        field: String,
    },

    /// A required field was present but unusable.
    #[error("Stage '{stage}' cannot use field '{field}': {reason}")]
    InvalidField {
        /// The stage that needed the field.
        stage: String,
        /// The field name.
        field: String,
        /// Why the value was refused.
        reason: String,
    },
}

impl ContractViolation {
    /// Creates a missing field violation.
    #[must_use]
    pub fn missing(stage: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            stage: stage.into(),
            field: field.into(),
        }
    }

    /// Creates an invalid field violation.
    #[must_use]
    pub fn invalid(
        stage: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            stage: stage.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field, .. } | Self::InvalidField { field, .. } => field,
        }
    }
}

/// Provides default suggestions for pipeline assembly error codes.
pub struct ContractSuggestions;

impl ContractSuggestions {
    /// Gets a suggestion for a given error code.
    #[must_use]
    pub fn get(code: &str) -> Option<&'static str> {
        match code {
            "CHAIN-001-EMPTY" => Some("Add at least one stage to the pipeline before building."),
            "CHAIN-002-NO_TERMINAL" => Some(
                "End the chain with a terminal stage such as ApprovalStage so every \
                 other stage has a successor.",
            ),
            "CHAIN-003-TERMINAL_NOT_LAST" => Some(
                "Move the terminal stage to the end of the chain; stages after it \
                 can never run.",
            ),
            "CHAIN-004-DUPLICATE" => Some("Give every stage in the chain a unique name."),
            "CHAIN-005-DISCOUNT" => Some(
                "Use a multiplier greater than 0 and at most 1; a discount can only \
                 lower the price.",
            ),
            _ => None,
        }
    }
}
