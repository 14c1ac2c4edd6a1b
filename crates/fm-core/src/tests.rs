//! Unit tests for fm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, VertexId};

    #[test]
    fn index_is_position() {
        assert_eq!(AgentId(42).index(), 42);
        assert_eq!(VertexId(0).index(), 0);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(VertexId(100) > VertexId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(VertexId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(VertexId(3).to_string(), "VertexId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn manhattan_is_l1() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, -4.0);
        assert_eq!(a.manhattan(b), 7.0);
        assert_eq!(b.manhattan(a), 7.0);
    }

    #[test]
    fn zero_distance() {
        let p = Point::new(12.5, -3.25);
        assert_eq!(p.manhattan(p), 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{FleetConfig, SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(1_000);
        assert_eq!(t + 500, Tick(1_500));
        assert_eq!(t.offset(3), Tick(1_003));
        assert_eq!(Tick(1_500) - Tick(1_000), 500u64);
        // Saturates instead of underflowing.
        assert_eq!(Tick(10) - Tick(20), 0u64);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut clock = SimClock::new();
        clock.advance_to(Tick(2_500));
        assert_eq!(clock.current_tick, Tick(2_500));
        clock.advance_to(Tick(1_000));
        assert_eq!(clock.current_tick, Tick(2_500));
        assert_eq!(clock.elapsed_secs(), 2);
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new();
        clock.advance_to(Tick(61_250));
        assert_eq!(clock.elapsed_msm(), (1, 1, 250));
        assert_eq!(clock.to_string(), "T+61250ms (1m 01.250s)");
    }

    #[test]
    fn default_config_is_valid() {
        let config = FleetConfig::default();
        assert_eq!(config.step_interval_ms, 500);
        assert!(config.validate().is_ok());
        assert_eq!(config.end_tick(), Tick(60_000));
    }

    #[test]
    fn zero_interval_rejected() {
        let config = FleetConfig { step_interval_ms: 0, ..FleetConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn snapshot_faster_than_steps_rejected() {
        let config = FleetConfig { snapshot_interval_ms: 100, ..FleetConfig::default() };
        assert!(config.validate().is_err());
    }
}
