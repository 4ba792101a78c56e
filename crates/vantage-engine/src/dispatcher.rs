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

//! Resolution dispatcher: the public entry point of the engine.
//!
//! `resolve` never raises to the caller. Every failure mode collapses to one
//! of two configured sentinel texts: the unknown-placeholder text (parse
//! failure or no matching key) or the error text (a recognized handler that
//! failed to compute). Hosts render templates containing many placeholders;
//! one malformed identifier must not disturb the rest.

use crate::cache::SamplingCache;
use crate::config::EngineConfig;
use crate::handlers;
use crate::parser;
use crate::registry::{HandlerRegistry, RegistryBuilder};
use crate::scheduler::RefreshScheduler;
use std::sync::Arc;
use vantage_core::{ConfigError, GameState, SystemMonitor};

/// The assembled placeholder engine.
///
/// Construct with [`EngineBuilder`], call [`Engine::start`] to begin
/// background sampling, and hand [`Engine::resolve`] to the templating
/// host. The owner of the engine's lifetime calls [`Engine::stop`] (or
/// drops the engine) on shutdown.
pub struct Engine {
    config: Arc<EngineConfig>,
    registry: HandlerRegistry,
    cache: Arc<SamplingCache>,
    scheduler: RefreshScheduler,
}

impl Engine {
    /// Resolves a raw placeholder string to its formatted text.
    ///
    /// Always returns a string: a formatted value, the unknown-placeholder
    /// text, or the resolution-error text. Bounded by O(length) parsing and
    /// O(1) cache reads; no blocking I/O happens on this path.
    pub fn resolve(&self, raw: &str) -> String {
        let parsed = match parser::parse(raw) {
            Ok(parsed) => parsed,
            Err(_) => return self.config.unknown_text.clone(),
        };

        let (request, handler) = match self.registry.match_longest(&parsed) {
            Some(found) => found,
            None => {
                log::debug!("no handler for placeholder \"{raw}\"");
                return self.config.unknown_text.clone();
            }
        };

        match handler(&request.args) {
            Ok(text) => text,
            Err(e) => {
                log::warn!(
                    "placeholder \"{}\" (args {:?}) failed: {e}",
                    request.handler_key,
                    request.args
                );
                self.config.error_text.clone()
            }
        }
    }

    /// Starts the background refresh scheduler.
    pub fn start(&mut self) {
        self.scheduler.start(Arc::clone(&self.cache));
    }

    /// Stops the background refresh scheduler. Idempotent.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// True while background sampling is running.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Synchronously refreshes every cached metric once, bypassing the
    /// schedule. Intended for startup warm-up and deterministic tests.
    pub fn refresh_all(&self) {
        self.cache.refresh_all();
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of registered handler keys.
    pub fn handler_count(&self) -> usize {
        self.registry.len()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("handlers", &self.registry.len())
            .field("cached_metrics", &self.cache.len())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Assembles an [`Engine`] from its configuration and metric sources.
pub struct EngineBuilder {
    config: EngineConfig,
    system: Arc<dyn SystemMonitor>,
    game: Arc<dyn GameState>,
    extra: Vec<(String, crate::registry::HandlerFn)>,
}

impl EngineBuilder {
    /// Starts a builder over the given sources.
    pub fn new(
        config: EngineConfig,
        system: Arc<dyn SystemMonitor>,
        game: Arc<dyn GameState>,
    ) -> Self {
        Self {
            config,
            system,
            game,
            extra: Vec::new(),
        }
    }

    /// Adds a host-specific handler on top of the standard set.
    ///
    /// Duplicates against standard or previously added keys surface as
    /// [`ConfigError::DuplicateKey`] from [`EngineBuilder::build`].
    pub fn with_handler(
        mut self,
        key: &str,
        resolve: impl Fn(&[String]) -> vantage_core::ResolutionResult + Send + Sync + 'static,
    ) -> Self {
        self.extra.push((key.to_owned(), Box::new(resolve)));
        self
    }

    /// Builds the engine: wires cached metrics, registers the standard
    /// handler set plus any extras, and freezes the registry.
    ///
    /// Fails fatally on duplicate keys; this is a configuration defect and
    /// callers are expected to abort startup.
    pub fn build(self) -> Result<Engine, ConfigError> {
        let config = Arc::new(self.config);

        let cache = Arc::new(handlers::build_cache(&config, &self.system, &self.game)?);

        let mut registry = RegistryBuilder::new();
        handlers::register_handlers(&mut registry, &config, &self.system, &self.game, &cache)?;
        for (key, resolve) in self.extra {
            registry.register(&key, resolve)?;
        }

        Ok(Engine {
            config,
            registry: registry.build(),
            cache,
            scheduler: RefreshScheduler::new(),
        })
    }
}
