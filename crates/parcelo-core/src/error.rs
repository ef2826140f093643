// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Parcelo courier toolkit.

use thiserror::Error;

use crate::types::OrderStatus;

/// A timestamp string that could not be parsed as a date-time.
///
/// Carried as a warning by the reconciler and as an error source by
/// [`ParceloError::Timestamp`]; never fatal on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable timestamp `{value}`")]
pub struct TimestampError {
    /// The raw string that failed to parse.
    pub value: String,
}

/// The primary error type used across the Parcelo crates.
#[derive(Debug, Error)]
pub enum ParceloError {
    /// Configuration errors (invalid values, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Courier backend errors (request failure, non-success status, bad JSON).
    #[error("api error: {message}")]
    Api {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A status mutation was requested that the transition table forbids.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// An operation needs state the caller does not have (e.g. a status
    /// update with no last known status for the order).
    #[error("missing precondition: {0}")]
    MissingPrecondition(String),

    /// A timestamp failed to parse where one was required.
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
