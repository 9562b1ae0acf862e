//! Model parameters.
//!
//! `ModelParams` is an explicit, immutable value handed to the engine at
//! setup.  There are no process-wide defaults: [`ModelParams::default`]
//! simply returns the baseline scenario, and every field can be overridden
//! with struct-update syntax:
//!
//! ```rust
//! use rb_core::ModelParams;
//!
//! let calm = ModelParams { government_legitimacy: 0.95, ..ModelParams::default() };
//! assert!(calm.validate().is_ok());
//! ```

use crate::{RbError, RbResult};

/// How an agent perceives government legitimacy.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegitimacyMode {
    /// Every agent sees `government_legitimacy` unchanged.
    #[default]
    Global,

    /// Legitimacy at a cell drops with the arrests recorded there:
    ///
    ///   L_local = L · (1 − min(arrests, max_local_related) / max_local_related)
    ///
    /// A smaller `max_local_related` saturates sooner.
    Local { max_local_related: f64 },
}

/// Scalar parameters of one model run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelParams {
    /// Fraction of cells populated with agents, in `[0, 1]`.
    pub agent_density: f64,
    /// Fraction of cells populated with cops, in `[0, 1]`.
    pub cop_density: f64,
    /// Arrest-rate constant `k > 0`.
    pub k: f64,
    /// Activation threshold, `>= 0`.
    pub threshold: f64,
    /// Government legitimacy, in `[0, 1]`.
    pub government_legitimacy: f64,
    /// Vision radius in cells, `> 0`.
    pub vision: u32,
    /// Longest jail term an arrest can hand out, `> 0`.
    pub max_jail_term: u32,
    /// When `false` agents stay where they were placed; cops always move.
    pub agent_movement: bool,
    pub legitimacy_mode: LegitimacyMode,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            agent_density:         0.7,
            cop_density:           0.04,
            k:                     2.3,
            threshold:             0.1,
            government_legitimacy: 0.82,
            vision:                7,
            max_jail_term:         30,
            agent_movement:        true,
            legitimacy_mode:       LegitimacyMode::Global,
        }
    }
}

impl ModelParams {
    /// Check every field against its documented range.
    ///
    /// NaN fails every range check.
    pub fn validate(&self) -> RbResult<()> {
        unit("agent_density", self.agent_density)?;
        unit("cop_density", self.cop_density)?;
        positive("k", self.k)?;
        non_negative("threshold", self.threshold)?;
        unit("government_legitimacy", self.government_legitimacy)?;
        positive("vision", f64::from(self.vision))?;
        positive("max_jail_term", f64::from(self.max_jail_term))?;
        if let LegitimacyMode::Local { max_local_related } = self.legitimacy_mode {
            positive("max_local_related", max_local_related)?;
        }
        Ok(())
    }

    /// Legitimacy perceived at a cell with `arrests` recorded arrests.
    pub fn perceived_legitimacy(&self, arrests: u32) -> f64 {
        match self.legitimacy_mode {
            LegitimacyMode::Global => self.government_legitimacy,
            LegitimacyMode::Local { max_local_related } => {
                let pressure = f64::from(arrests).min(max_local_related) / max_local_related;
                self.government_legitimacy * (1.0 - pressure)
            }
        }
    }

    /// `round(density × cells)`.
    #[inline]
    pub fn requested(density: f64, cells: usize) -> usize {
        (density * cells as f64).round() as usize
    }
}

fn unit(name: &'static str, value: f64) -> RbResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RbError::OutOfUnitRange { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> RbResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(RbError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> RbResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(RbError::Negative { name, value })
    }
}
