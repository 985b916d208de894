#[cfg(test)]
mod tests {
    use crate::config::EncounterPreset;
    use crate::types::*;

    #[test]
    fn test_normalize_deg_in_range() {
        for raw in [-720.0, -361.0, -180.0, -0.0001, 0.0, 359.9, 360.0, 725.0] {
            let n = normalize_deg(raw);
            assert!((0.0..360.0).contains(&n), "normalize_deg({raw}) = {n}");
        }
    }

    #[test]
    fn test_normalize_deg_identity_in_range() {
        assert_eq!(normalize_deg(0.0), 0.0);
        assert_eq!(normalize_deg(359.0), 359.0);
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(450.0), 90.0);
    }

    #[test]
    fn test_delta_deg_shortest_path() {
        assert_eq!(delta_deg(10.0, 30.0), 20.0);
        assert_eq!(delta_deg(350.0, 10.0), 20.0);
        assert_eq!(delta_deg(10.0, 350.0), -20.0);
        // Antipodal resolves to the positive half-turn
        assert_eq!(delta_deg(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_vec_from_deg_cardinals() {
        let right = vec_from_deg(0.0);
        assert!((right.x - 1.0).abs() < 1e-12 && right.y.abs() < 1e-12);

        let up = vec_from_deg(90.0);
        assert!(up.x.abs() < 1e-12 && (up.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deg_from_vec_roundtrip() {
        for deg in [0.0, 45.0, 90.0, 133.7, 270.0, 359.0] {
            let back = deg_from_vec(vec_from_deg(deg), -1.0);
            assert!((back - deg).abs() < 1e-9, "roundtrip {deg} -> {back}");
        }
    }

    #[test]
    fn test_deg_from_vec_zero_uses_fallback() {
        assert_eq!(deg_from_vec(Vec2::ZERO, 42.0), 42.0);
        // Fallback is normalized too
        assert_eq!(deg_from_vec(Vec2::ZERO, -90.0), 270.0);
    }

    #[test]
    fn test_move_towards_no_overshoot() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(10.0, 0.0);
        assert_eq!(move_towards(from, to, 3.0), Vec2::new(3.0, 0.0));
        assert_eq!(move_towards(from, to, 100.0), to);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..crate::constants::TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, crate::constants::TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_preset_json_roundtrip() {
        let preset = EncounterPreset::default();
        let json = preset.to_json().unwrap();
        let back = EncounterPreset::from_json(&json).unwrap();
        assert_eq!(
            back.director.attacks.len(),
            preset.director.attacks.len()
        );
        assert_eq!(back.spawner.groups.len(), preset.spawner.groups.len());
    }

    #[test]
    fn test_preset_partial_json_uses_defaults() {
        // Sparse documents fill the rest from defaults
        let preset = EncounterPreset::from_json(r#"{"director":{"detection_delay":0.5}}"#).unwrap();
        assert_eq!(preset.director.detection_delay, 0.5);
        assert_eq!(preset.director.lost_delay, 2.0);
        assert!(preset.spawner.groups.is_empty());
    }
}
