//! Process-wide configuration.
//!
//! The configuration is fixed the first time it is read: either explicitly
//! through [`install`], or implicitly from the environment on first use.
//! It is never mutated afterwards.
//!
//! # Environment
//!
//! - `AVOW_STRATEGY` - `pair` or `expression`; forces one message strategy
//!   on every front end.
//!
//! # Example
//!
//! ```rust
//! use avow::config::{self, Config};
//! use avow::Strategy;
//!
//! // First caller wins; later calls report `ConfigAlreadyInstalled`.
//! let _ = config::install(Config::default().with_strategy(Strategy::Expression));
//! ```

use std::borrow::Cow;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::message::Strategy;

/// Environment variable forcing a message strategy.
pub const STRATEGY_ENV: &str = "AVOW_STRATEGY";

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Lexical tokens the source classifier looks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Syntax {
    /// Token separating an arrow function's parameters from its body.
    pub arrow: Cow<'static, str>,
    /// Keywords that introduce a function definition wherever they occur.
    pub function_keywords: Vec<Cow<'static, str>>,
    /// Keywords that only introduce a definition at the head of the source,
    /// followed by a name and a parameter list. Elsewhere they are plain
    /// identifiers.
    pub head_keywords: Vec<Cow<'static, str>>,
}

impl Syntax {
    /// Returns `true` if `ident` is one of the function keywords.
    #[must_use]
    pub fn is_function_keyword(&self, ident: &str) -> bool {
        self.function_keywords.iter().any(|keyword| keyword == ident)
    }

    /// Returns `true` if `ident` is a head-only keyword.
    #[must_use]
    pub fn is_head_keyword(&self, ident: &str) -> bool {
        self.head_keywords.iter().any(|keyword| keyword == ident)
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            arrow: Cow::Borrowed("=>"),
            function_keywords: vec![Cow::Borrowed("function")],
            head_keywords: vec![Cow::Borrowed("fn")],
        }
    }
}

/// Engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Source syntax recognised by the classifier.
    pub syntax: Syntax,
    /// When set, every front end synthesizes messages with this strategy
    /// instead of its own.
    pub strategy: Option<Strategy>,
}

impl Config {
    /// Default configuration, with overrides read from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(STRATEGY_ENV) {
            match Strategy::parse(&raw) {
                Some(strategy) => config.strategy = Some(strategy),
                None => tracing::warn!(value = %raw, "ignoring unknown {STRATEGY_ENV}"),
            }
        }

        config
    }

    /// Force a message strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Replace the recognised syntax.
    #[must_use]
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }
}

/// Fix the process-wide configuration.
///
/// # Errors
///
/// Returns [`Error::ConfigAlreadyInstalled`] if a configuration was already
/// installed or read.
pub fn install(config: Config) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| Error::ConfigAlreadyInstalled)
}

/// The active configuration.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
