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

//! Identifier parsing: raw placeholder string to an ordered token list.
//!
//! Parsing is purely lexical. It splits on `_`, case-folds a parallel copy
//! of the tokens for registry matching, and performs no semantic validation
//! of argument content; that is deferred to the handler, which has the
//! context to judge it.

use vantage_core::ParseError;

/// The tokenized form of a raw placeholder string.
///
/// Keeps both a case-folded view (handler keys are case-insensitive) and the
/// original tokens (argument casing is significant to some handlers, e.g.
/// world names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPlaceholder {
    folded: Vec<String>,
    original: Vec<String>,
}

impl ParsedPlaceholder {
    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// True when there are no tokens. Unreachable for values produced by
    /// [`parse`], which rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// The first `n` case-folded tokens joined with `_`, as a registry key
    /// candidate.
    pub fn key_prefix(&self, n: usize) -> String {
        self.folded[..n].join("_")
    }

    /// The original-cased tokens after the first `n`, in order.
    pub fn args_after(&self, n: usize) -> Vec<String> {
        self.original[n..].to_vec()
    }
}

/// A fully resolved request: the matched handler key plus its arguments.
///
/// Produced fresh per resolution call and owned by that call alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRequest {
    /// The case-folded registry key that matched.
    pub handler_key: String,
    /// Remaining tokens in original order and casing.
    pub args: Vec<String>,
}

/// Splits a raw placeholder string into tokens.
///
/// Empty input yields [`ParseError::Empty`]. Everything else parses; whether
/// the tokens mean anything is the registry's and handler's business.
pub fn parse(raw: &str) -> Result<ParsedPlaceholder, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let original: Vec<String> = raw.split('_').map(str::to_owned).collect();
    let folded: Vec<String> = original.iter().map(|t| t.to_lowercase()).collect();

    Ok(ParsedPlaceholder { folded, original })
}
