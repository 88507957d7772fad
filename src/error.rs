//! Cosmos-specific error types.
//!
//! Generation, proximity detection, and rendering cannot fail; errors only
//! arise at the edges: reading configuration and wiring up the HUD and camera
//! at startup.  Config errors degrade to compiled defaults; startup wiring
//! errors are returned from systems as [`bevy::ecs::error::BevyError`] and
//! abort the app.

use std::fmt;

/// Top-level error enum for the cosmos app.
#[derive(Debug, Clone, PartialEq)]
pub enum CosmosError {
    /// The configuration file exists but is not valid TOML for [`crate::config::CosmosConfig`].
    ConfigParse {
        /// File the text came from.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A configuration value is outside the range the simulation can run with.
    InvalidConfig {
        /// Name of the config field (for logging).
        name: &'static str,
        /// The rejected value, rendered as text.
        value: String,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// A HUD text sink the frame loop writes to every tick was never spawned.
    MissingUiSink {
        /// Name of the missing field.
        field: &'static str,
    },

    /// More than one HUD node claims the same field, so writes would be ambiguous.
    DuplicateUiSink {
        field: &'static str,
        count: usize,
    },

    /// No 2D camera exists to draw the cosmos through.
    MissingCamera,
}

impl fmt::Display for CosmosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CosmosError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
            CosmosError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
            CosmosError::MissingUiSink { field } => {
                write!(f, "HUD sink '{}' was not spawned", field)
            }
            CosmosError::DuplicateUiSink { field, count } => {
                write!(f, "HUD sink '{}' spawned {} times (expected 1)", field, count)
            }
            CosmosError::MissingCamera => write!(f, "no 2D camera found at startup"),
        }
    }
}

impl std::error::Error for CosmosError {}

/// Convenience alias: a `Result` using `CosmosError` as the error type.
pub type CosmosResult<T> = Result<T, CosmosError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> CosmosResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CosmosError::InvalidConfig {
            name,
            value: value.to_string(),
            expected: "(0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and at least zero.
pub fn require_non_negative(name: &'static str, value: f32) -> CosmosResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CosmosError::InvalidConfig {
            name,
            value: value.to_string(),
            expected: "[0, ∞)",
        })
    }
}

/// Returns an error unless `value` is a probability in `[0, 1]`.
pub fn require_probability(name: &'static str, value: f64) -> CosmosResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CosmosError::InvalidConfig {
            name,
            value: value.to_string(),
            expected: "[0, 1]",
        })
    }
}

/// Returns an error unless `value` is a per-frame decay factor in `(0, 1]`.
pub fn require_unit_interval(name: &'static str, value: f32) -> CosmosResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(CosmosError::InvalidConfig {
            name,
            value: value.to_string(),
            expected: "(0, 1]",
        })
    }
}
