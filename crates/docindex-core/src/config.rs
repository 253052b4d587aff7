//! Resolver configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! max_depth = 16
//! on_cycle = "error"
//! ```

use crate::error::IndexError;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Default limit on embedded-entity nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

///
/// CyclePolicy
/// What to do when an embedded type refers back to a type being resolved.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Log a warning and do not descend into the repeated type.
    #[default]
    #[display("skip")]
    Skip,

    /// Abort resolution with `IndexError::CyclicReference`.
    #[display("error")]
    Error,
}

///
/// ResolverConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Maximum embedded nesting below the root entity.
    pub max_depth: usize,

    pub on_cycle: CyclePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            on_cycle: CyclePolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self, IndexError> {
        let config: Self = toml::from_str(source).map_err(|err| {
            IndexError::invalid_argument(format!("resolver configuration: {err}"))
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if self.max_depth == 0 {
            return Err(IndexError::invalid_argument(
                "resolver configuration: max_depth must be > 0",
            ));
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub const fn with_cycle_policy(mut self, on_cycle: CyclePolicy) -> Self {
        self.on_cycle = on_cycle;
        self
    }
}
