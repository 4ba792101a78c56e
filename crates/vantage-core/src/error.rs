// Copyright 2025 the vantage authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error taxonomy for the placeholder resolution pipeline.
//!
//! The split matters to callers: parse and lookup failures mean "I do not
//! recognize this placeholder", resolution failures mean "I recognize it but
//! could not compute it", and configuration failures are startup-time defects
//! that abort engine construction.

use thiserror::Error;

/// Failure to split a raw placeholder string into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or produced no tokens.
    #[error("empty placeholder")]
    Empty,
}

/// Failure to map a parsed placeholder onto a registered handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No registered key matches any prefix of the placeholder's tokens.
    #[error("no handler registered for placeholder \"{0}\"")]
    NotFound(String),
}

/// Failure while reading a metric from its external source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("source read failed: {0}")]
pub struct SourceError(
    /// Human-readable cause.
    pub String,
);

impl SourceError {
    /// Creates a source error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Runtime failure inside a handler after a successful registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The underlying metric source could not be read.
    #[error("provider failure: {0}")]
    ProviderFailure(#[from] SourceError),

    /// A computed value could not be rendered as text.
    #[error("format error: {0}")]
    FormatError(String),
}

/// Startup-time configuration defect. Fatal: callers abort engine
/// construction rather than recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two handlers were registered under the same (case-folded) key.
    #[error("duplicate handler key \"{0}\"")]
    DuplicateKey(String),
}

/// Specialized result for handler bodies.
pub type ResolutionResult = Result<String, ResolutionError>;

/// Specialized result for source reads.
pub type SourceResult<T> = Result<T, SourceError>;
