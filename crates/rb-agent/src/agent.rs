//! Ordinary agents and their three-state lifecycle.
//!
//! ```text
//!            evaluate                 arrest
//!   Quiet  <──────────>  Active  ──────────────>  Jailed { term }
//!     ^                                              │
//!     └──────────── serve_tick (term reaches 0) ─────┘
//! ```
//!
//! Transitions between Quiet and Active happen only in the engine's
//! evaluation phase and only for free agents.  A released agent comes out
//! Quiet and is not re-evaluated until the next tick.

use rb_core::Coord;

use crate::Actor;

/// Lifecycle state.  A jailed agent is never active; the enum makes the
/// combination unrepresentable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    #[default]
    Quiet,
    Active,
    /// Remaining jail term, always `>= 1`.
    Jailed { term: u32 },
}

/// A simulated individual.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    location:           Coord,
    /// R in `[0, 1]`, fixed for life.
    risk_aversion:      f64,
    /// H in `[0, 1]`, fixed for life.
    perceived_hardship: f64,
    state:              AgentState,
}

impl Agent {
    /// A quiet, free agent.
    pub fn new(location: Coord, risk_aversion: f64, perceived_hardship: f64) -> Self {
        Self {
            location,
            risk_aversion,
            perceived_hardship,
            state: AgentState::Quiet,
        }
    }

    #[inline]
    pub fn risk_aversion(&self) -> f64 {
        self.risk_aversion
    }

    #[inline]
    pub fn perceived_hardship(&self) -> f64 {
        self.perceived_hardship
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == AgentState::Active
    }

    #[inline]
    pub fn is_jailed(&self) -> bool {
        matches!(self.state, AgentState::Jailed { .. })
    }

    #[inline]
    pub fn is_quiet(&self) -> bool {
        self.state == AgentState::Quiet
    }

    /// Remaining jail term; 0 means free.
    #[inline]
    pub fn jail_term(&self) -> u32 {
        match self.state {
            AgentState::Jailed { term } => term,
            _ => 0,
        }
    }

    /// `H · (1 − L)`.
    #[inline]
    pub fn grievance(&self, legitimacy: f64) -> f64 {
        self.perceived_hardship * (1.0 - legitimacy)
    }

    /// `R · P`.
    #[inline]
    pub fn net_risk(&self, arrest_probability: f64) -> f64 {
        self.risk_aversion * arrest_probability
    }

    /// Re-decide between Active and Quiet.
    ///
    /// Active iff `grievance − net_risk > threshold`.  Must not be called on
    /// a jailed agent.
    pub fn evaluate(&mut self, arrest_probability: f64, threshold: f64, legitimacy: f64) {
        debug_assert!(!self.is_jailed(), "evaluated a jailed agent");
        let active = self.grievance(legitimacy) - self.net_risk(arrest_probability) > threshold;
        self.state = if active { AgentState::Active } else { AgentState::Quiet };
    }

    /// Jail for `term` ticks.  A term of 0 would read as "free" and is
    /// rejected in debug builds.
    pub fn jail(&mut self, term: u32) {
        debug_assert!(term >= 1, "jail term must be at least 1");
        self.state = AgentState::Jailed { term };
    }

    /// Serve one tick of a jail term.  Returns `true` if this released the
    /// agent.  Free agents are unaffected.
    pub fn serve_tick(&mut self) -> bool {
        match self.state {
            AgentState::Jailed { term } if term > 1 => {
                self.state = AgentState::Jailed { term: term - 1 };
                false
            }
            AgentState::Jailed { .. } => {
                self.state = AgentState::Quiet;
                true
            }
            _ => false,
        }
    }
}

impl Actor for Agent {
    #[inline]
    fn location(&self) -> Coord {
        self.location
    }

    #[inline]
    fn move_to(&mut self, to: Coord) {
        self.location = to;
    }
}
