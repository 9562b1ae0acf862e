//! The scenario catalogue.
//!
//! Every preset shares `k = 2.3` and `threshold = 0.1`; they differ in
//! densities, legitimacy, jail term and vision.  The last two switch on
//! local legitimacy with a low and a high saturation point.

use rb_core::{LegitimacyMode, ModelParams};

/// One named scenario.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParameterSet {
    pub name:          &'static str,
    pub cop_density:   f64,
    pub agent_density: f64,
    pub legitimacy:    f64,
    pub max_jail_term: u32,
    pub vision:        u32,
    /// `Some` switches the run to local legitimacy with this saturation point.
    pub max_local_related: Option<f64>,
}

const fn global(
    name: &'static str,
    cop_density: f64,
    agent_density: f64,
    legitimacy: f64,
    max_jail_term: u32,
    vision: u32,
) -> ParameterSet {
    ParameterSet {
        name,
        cop_density,
        agent_density,
        legitimacy,
        max_jail_term,
        vision,
        max_local_related: None,
    }
}

const fn local(name: &'static str, max_local_related: f64) -> ParameterSet {
    ParameterSet {
        max_local_related: Some(max_local_related),
        ..global(name, 0.04, 0.7, 0.82, 30, 7)
    }
}

static PRESETS: [ParameterSet; 19] = [
    global("Baseline",            0.04, 0.7, 0.82, 30, 7),
    // Single-parameter variations.
    global("High Cop Density",    0.08, 0.7, 0.82, 30, 7),
    global("Low Cop Density",     0.02, 0.7, 0.82, 30, 7),
    global("High Agent Density",  0.04, 0.8, 0.82, 30, 7),
    global("Low Agent Density",   0.04, 0.6, 0.82, 30, 7),
    global("High Legitimacy",     0.04, 0.7, 0.90, 30, 7),
    global("Low Legitimacy",      0.04, 0.7, 0.70, 30, 7),
    global("Long Jail Term",      0.04, 0.7, 0.82, 40, 7),
    global("Short Jail Term",     0.04, 0.7, 0.82, 20, 7),
    global("Large Vision",        0.04, 0.7, 0.82, 30, 9),
    global("Small Vision",        0.04, 0.7, 0.82, 30, 5),
    // Combined variations.
    global("High Repression",     0.08, 0.7, 0.90, 40, 7),
    global("Low Control",         0.02, 0.8, 0.70, 20, 5),
    global("High Tension",        0.04, 0.8, 0.70, 30, 9),
    global("Stable Society",      0.06, 0.6, 0.90, 30, 7),
    // Extremes.
    global("Extreme Unrest",      0.09, 0.9, 0.60, 50, 9),
    global("Extreme Control",     0.09, 0.5, 0.95, 50, 5),
    // Local legitimacy.
    local("Local Legitimacy - High Cop Activity", 5.0),
    local("Local Legitimacy - Low Cop Activity",  15.0),
];

impl ParameterSet {
    /// The full catalogue, baseline first.
    pub fn presets() -> &'static [ParameterSet] {
        &PRESETS
    }

    /// Look a preset up by name, ignoring ASCII case.
    pub fn find(name: &str) -> Option<&'static ParameterSet> {
        PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// The model parameters this scenario runs with.
    pub fn to_params(&self) -> ModelParams {
        let legitimacy_mode = match self.max_local_related {
            Some(max_local_related) => LegitimacyMode::Local { max_local_related },
            None => LegitimacyMode::Global,
        };
        ModelParams {
            agent_density:         self.agent_density,
            cop_density:           self.cop_density,
            k:                     2.3,
            threshold:             0.1,
            government_legitimacy: self.legitimacy,
            vision:                self.vision,
            max_jail_term:         self.max_jail_term,
            agent_movement:        true,
            legitimacy_mode,
        }
    }
}
