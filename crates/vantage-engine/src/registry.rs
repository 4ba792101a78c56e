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

//! Handler registry: a frozen map from placeholder keys to resolve
//! functions.
//!
//! Registration happens once, through [`RegistryBuilder`], before the engine
//! starts serving. The built [`HandlerRegistry`] is immutable and therefore
//! safe for unbounded concurrent lookups without locking.
//!
//! Matching is longest-prefix: with both `version` and `version_full`
//! registered, the tokens `["version", "full", "x"]` dispatch to
//! `version_full` with args `["x"]`, not to `version` with args
//! `["full", "x"]`. Ties between equally long candidates would fall to
//! registration order (first registered wins), but keys are unique after
//! case-folding, so two distinct keys can never produce the same candidate
//! string; the rule is documented for completeness and the uniqueness that
//! enforces it is tested below.

use crate::parser::{ParsedPlaceholder, PlaceholderRequest};
use std::collections::HashMap;
use vantage_core::{ConfigError, ResolutionResult};

/// A handler's resolve function: ordered args in, formatted text out.
pub type HandlerFn = Box<dyn Fn(&[String]) -> ResolutionResult + Send + Sync>;

/// Accumulates handler registrations before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, HandlerFn>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under a case-insensitive key.
    ///
    /// A duplicate key (after case-folding) is a startup configuration
    /// defect and fails with [`ConfigError::DuplicateKey`]; it is never
    /// silently overwritten.
    pub fn register(
        &mut self,
        key: &str,
        resolve: impl Fn(&[String]) -> ResolutionResult + Send + Sync + 'static,
    ) -> Result<(), ConfigError> {
        let folded = key.to_lowercase();
        if self.entries.contains_key(&folded) {
            return Err(ConfigError::DuplicateKey(folded));
        }
        log::debug!("registered placeholder handler \"{folded}\"");
        self.entries.insert(folded, Box::new(resolve));
        Ok(())
    }

    /// Freezes the key set and produces the read-only registry.
    pub fn build(self) -> HandlerRegistry {
        log::info!("handler registry frozen with {} keys", self.entries.len());
        HandlerRegistry {
            entries: self.entries,
        }
    }
}

/// The frozen key-to-handler map.
pub struct HandlerRegistry {
    entries: HashMap<String, HandlerFn>,
}

impl HandlerRegistry {
    /// Looks up a handler by its exact case-folded key.
    pub fn lookup(&self, key: &str) -> Option<&HandlerFn> {
        self.entries.get(&key.to_lowercase())
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matches parsed tokens against the key set, preferring the longest
    /// registered prefix. Returns the matched request and its handler.
    pub fn match_longest(
        &self,
        parsed: &ParsedPlaceholder,
    ) -> Option<(PlaceholderRequest, &HandlerFn)> {
        for n in (1..=parsed.len()).rev() {
            let candidate = parsed.key_prefix(n);
            if let Some(handler) = self.entries.get(&candidate) {
                let request = PlaceholderRequest {
                    handler_key: candidate,
                    args: parsed.args_after(n),
                };
                return Some((request, handler));
            }
        }
        None
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("keys", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn constant(text: &'static str) -> impl Fn(&[String]) -> ResolutionResult {
        move |_args| Ok(text.to_owned())
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut builder = RegistryBuilder::new();
        builder.register("tps", constant("a")).unwrap();
        let err = builder.register("TPS", constant("b")).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateKey("tps".to_owned()));

        // The original registration survives the failed attempt.
        let registry = builder.build();
        let parsed = parse("tps").unwrap();
        let (_, handler) = registry.match_longest(&parsed).unwrap();
        assert_eq!(handler(&[]).unwrap(), "a");
    }

    #[test]
    fn longest_prefix_wins() {
        let mut builder = RegistryBuilder::new();
        builder.register("foo", constant("short")).unwrap();
        builder.register("foo_bar", constant("long")).unwrap();
        let registry = builder.build();

        let parsed = parse("foo_bar_baz").unwrap();
        let (request, handler) = registry.match_longest(&parsed).unwrap();
        assert_eq!(request.handler_key, "foo_bar");
        assert_eq!(request.args, vec!["baz"]);
        assert_eq!(handler(&request.args).unwrap(), "long");

        let parsed = parse("foo_qux").unwrap();
        let (request, _) = registry.match_longest(&parsed).unwrap();
        assert_eq!(request.handler_key, "foo");
        assert_eq!(request.args, vec!["qux"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut builder = RegistryBuilder::new();
        builder.register("Uptime", constant("x")).unwrap();
        let registry = builder.build();
        assert!(registry.lookup("uptime").is_some());
        assert!(registry.lookup("UPTIME").is_some());
        assert!(registry.lookup("downtime").is_none());
    }

    #[test]
    fn unmatched_tokens_return_none() {
        let mut builder = RegistryBuilder::new();
        builder.register("known", constant("x")).unwrap();
        let registry = builder.build();
        let parsed = parse("unknown_key").unwrap();
        assert!(registry.match_longest(&parsed).is_none());
    }
}
