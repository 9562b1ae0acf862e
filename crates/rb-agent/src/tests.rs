//! Unit tests for rb-agent.

#[cfg(test)]
mod agent {
    use rb_core::Coord;

    use crate::{Actor, Agent, AgentState};

    fn agent(r: f64, h: f64) -> Agent {
        Agent::new(Coord::new(1, 1), r, h)
    }

    #[test]
    fn starts_quiet_and_free() {
        let a = agent(0.5, 0.5);
        assert!(a.is_quiet());
        assert!(!a.is_active());
        assert!(!a.is_jailed());
        assert_eq!(a.jail_term(), 0);
    }

    #[test]
    fn grievance_formula() {
        let a = agent(0.2, 0.9);
        assert!((a.grievance(0.5) - 0.45).abs() < 1e-12);
        assert_eq!(a.grievance(1.0), 0.0);
        assert!((a.net_risk(0.5) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn activates_above_threshold() {
        // G = 0.9 * 0.5 = 0.45, N = 0.2 * 0.5 = 0.1, G - N = 0.35.
        let mut a = agent(0.2, 0.9);
        a.evaluate(0.5, 0.1, 0.5);
        assert!(a.is_active());
        a.evaluate(0.5, 0.35, 0.5);
        assert!(a.is_quiet(), "strict inequality: equal margin stays quiet");
    }

    #[test]
    fn full_legitimacy_never_activates() {
        let mut a = agent(0.0, 1.0);
        a.evaluate(0.0, 0.0, 1.0);
        assert!(a.is_quiet());
    }

    #[test]
    fn jail_and_release() {
        let mut a = agent(0.0, 1.0);
        a.evaluate(0.0, 0.0, 0.0);
        assert!(a.is_active());

        a.jail(3);
        assert_eq!(a.state(), AgentState::Jailed { term: 3 });
        assert!(!a.is_active(), "jailed agents are never active");

        assert!(!a.serve_tick());
        assert_eq!(a.jail_term(), 2);
        assert!(!a.serve_tick());
        assert!(a.serve_tick(), "third tick releases");
        assert!(a.is_quiet());
        assert_eq!(a.jail_term(), 0);
    }

    #[test]
    fn serving_while_free_is_noop() {
        let mut a = agent(0.3, 0.3);
        assert!(!a.serve_tick());
        assert!(a.is_quiet());
    }

    #[test]
    fn move_replaces_location() {
        let mut a = agent(0.3, 0.3);
        a.move_to(Coord::new(7, 8));
        assert_eq!(a.location(), Coord::new(7, 8));
    }
}

#[cfg(test)]
mod cop {
    use rb_core::Coord;

    use crate::{Actor, Agent, Cop};

    #[test]
    fn arrest_jails_and_steps_onto_cell() {
        let mut suspect = Agent::new(Coord::new(4, 4), 0.0, 1.0);
        suspect.evaluate(0.0, 0.0, 0.0);
        let mut cop = Cop::new(Coord::new(2, 2));

        cop.arrest(&mut suspect, 5);

        assert_eq!(cop.location(), Coord::new(4, 4));
        assert_eq!(suspect.location(), Coord::new(4, 4), "the jailed agent keeps its coordinate");
        assert_eq!(suspect.jail_term(), 5);
        assert!(!suspect.is_active());
    }
}
