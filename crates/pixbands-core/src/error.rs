// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pixbands.

use thiserror::Error;

/// Top-level error type for all Pixbands operations.
#[derive(Debug, Error)]
pub enum PixbandsError {
    // -- Input errors --
    #[error("invalid image: {0}")]
    InvalidImage(String),

    // -- Configuration errors --
    #[error("invalid configuration: {0}")]
    Configuration(String),

    // -- Persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PixbandsError {
    /// Shorthand for building an `InvalidImage` error from anything displayable.
    pub fn invalid_image(detail: impl std::fmt::Display) -> Self {
        Self::InvalidImage(detail.to_string())
    }

    /// Shorthand for building a `Configuration` error from anything displayable.
    pub fn configuration(detail: impl std::fmt::Display) -> Self {
        Self::Configuration(detail.to_string())
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PixbandsError>;
