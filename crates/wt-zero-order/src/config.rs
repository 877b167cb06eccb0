//! Unit configuration.

use wt_database::{DEFAULT_VARIANT, TechnologyFlags, TechnologyRegistry};

use crate::error::{UnitModelError, UnitModelResult};

/// Everything a zero-order unit needs to know before it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConfig {
    /// Technology name used to look up parameters
    pub technology: String,
    /// Record variant ("default" unless overridden)
    pub variant: String,
    /// Structural capability flags
    pub flags: TechnologyFlags,
    /// Flowsheet time points (seconds); steady state is `[0.0]`
    pub time: Vec<f64>,
}

impl UnitConfig {
    /// Steady-state configuration for `technology` with the default variant.
    pub fn new(technology: impl Into<String>, flags: TechnologyFlags) -> Self {
        Self {
            technology: technology.into(),
            variant: DEFAULT_VARIANT.to_string(),
            flags,
            time: vec![0.0],
        }
    }

    /// Configuration with flags taken from `registry`.
    pub fn from_registry(registry: &TechnologyRegistry, technology: &str) -> Self {
        Self::new(technology, registry.flags(technology))
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_time(mut self, time: Vec<f64>) -> Self {
        self.time = time;
        self
    }

    pub(crate) fn validate(&self) -> UnitModelResult<()> {
        if self.technology.trim().is_empty() {
            return Err(UnitModelError::InvalidConfig {
                what: "technology name is empty",
            });
        }
        if self.time.is_empty() {
            return Err(UnitModelError::InvalidConfig {
                what: "time set is empty",
            });
        }
        if self.time.iter().any(|t| !t.is_finite()) {
            return Err(UnitModelError::InvalidConfig {
                what: "time points must be finite",
            });
        }
        if self.time.windows(2).any(|w| w[1] <= w[0]) {
            return Err(UnitModelError::InvalidConfig {
                what: "time points must be strictly increasing",
            });
        }
        Ok(())
    }
}
