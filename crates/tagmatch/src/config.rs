//! Match engine configuration.

use std::sync::OnceLock;

/// Environment variable overriding `MatchConfig::max_depth`.
pub const MAX_DEPTH_ENV: &str = "TAGMATCH_MAX_DEPTH";

/// Settings for the deep-match algorithm.
///
/// Patterns and values are expected to be acyclic; the depth limit turns a
/// runaway recursion into a `DepthLimitExceeded` error instead of a stack
/// overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Maximum pattern nesting depth the matcher will descend.
    pub max_depth: usize,
}

impl MatchConfig {
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Read configuration from the environment.
    ///
    /// Falls back to the defaults when `TAGMATCH_MAX_DEPTH` is unset or
    /// does not parse as a positive integer.
    pub fn from_env() -> Self {
        match std::env::var(MAX_DEPTH_ENV) {
            Ok(raw) => Self::default().with_max_depth_str(&raw),
            Err(_) => Self::default(),
        }
    }

    /// Process-wide configuration, read from the environment on first use.
    ///
    /// Never changes afterwards; callers wanting other settings pass their
    /// own `MatchConfig` to `match_value_with`.
    pub fn global() -> &'static MatchConfig {
        GLOBAL_CONFIG.get_or_init(MatchConfig::from_env)
    }

    /// Return a copy with a different depth limit.
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        MatchConfig { max_depth }
    }

    fn with_max_depth_str(self, raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(depth) if depth > 0 => self.with_max_depth(depth),
            _ => {
                tracing::warn!(
                    value = raw,
                    default = self.max_depth,
                    "ignoring invalid {MAX_DEPTH_ENV}"
                );
                self
            }
        }
    }
}

static GLOBAL_CONFIG: OnceLock<MatchConfig> = OnceLock::new();

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
