//! `rb-agent` — the two actor kinds of the rebellion model.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`actor`] | `Actor` trait — the capability both kinds share            |
//! | [`agent`] | `Agent`, `AgentState` (quiet / active / jailed)            |
//! | [`cop`]   | `Cop`                                                      |
//!
//! Actors only hold their own state.  Neighbourhood counts and the grid
//! occupancy index live in `rb-sim` / `rb-spatial`; the engine computes the
//! inputs and hands them to [`Agent::evaluate`] and [`Cop::arrest`].

pub mod actor;
pub mod agent;
pub mod cop;

#[cfg(test)]
mod tests;

pub use actor::Actor;
pub use agent::{Agent, AgentState};
pub use cop::Cop;
