//! Autonomous actors: villain wandering/wobble/glow/drips and NPC idle motion

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, Role};
use crate::consts::*;
use crate::settings::Settings;
use crate::{rgb, wave};

/// Glow intensity in [0, 1]
pub fn villain_glow(time_ms: f64) -> f32 {
    0.5 + 0.5 * wave(time_ms, VILLAIN_GLOW_RATE_MS, 0.0)
}

/// Red stays constant, green and blue follow the glow
pub fn glow_tint(glow: f32) -> u32 {
    let gb = (glow.clamp(0.0, 1.0) * 255.0).round() as u8;
    rgb(0xff, gb, gb)
}

/// Random velocity with both axes uniform in the villain range
pub fn random_villain_velocity<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(-VILLAIN_MAX_AXIS_SPEED..=VILLAIN_MAX_AXIS_SPEED),
        rng.random_range(-VILLAIN_MAX_AXIS_SPEED..=VILLAIN_MAX_AXIS_SPEED),
    )
}

/// Re-randomize both axes if either has stalled; returns true if it did
pub fn apply_anti_stall<R: Rng>(vel: &mut Vec2, rng: &mut R) -> bool {
    if vel.x.abs() < VILLAIN_MIN_AXIS_SPEED || vel.y.abs() < VILLAIN_MIN_AXIS_SPEED {
        *vel = random_villain_velocity(rng);
        true
    } else {
        false
    }
}

/// Per-tick villain update. Returns a drip spawn position if one dropped this tick.
pub fn update_villain<R: Rng>(
    villain: &mut Actor,
    time_ms: f64,
    settings: &Settings,
    rng: &mut R,
) -> Option<Vec2> {
    let Role::Villain(state) = &mut villain.role else {
        return None;
    };

    if settings.villain_glow {
        state.glow = villain_glow(time_ms);
        villain.visual.tint = glow_tint(state.glow);
    }

    apply_anti_stall(&mut villain.body.vel, rng);

    villain.visual.rotation =
        (settings.villain_wobble_deg * wave(time_ms, VILLAIN_WOBBLE_RATE_MS, 0.0)).to_radians();

    if settings.villain_pulse {
        let s = VILLAIN_PULSE_AMPLITUDE * wave(time_ms, VILLAIN_PULSE_RATE_MS, 0.0);
        villain.visual.set_relative_scale(Vec2::new(1.0 + s, 1.0 - s));
    }

    if settings.villain_drips && rng.random_bool(DRIP_CHANCE) {
        let dx = rng.random_range(-DRIP_SPREAD..=DRIP_SPREAD);
        Some(villain.body.pos + Vec2::new(dx, DRIP_DROP))
    } else {
        None
    }
}

/// Per-tick NPC idle motion; inactive members are skipped
pub fn update_npc(npc: &mut Actor, time_ms: f64) {
    if !npc.active || !npc.role.is_collectible() {
        return;
    }
    let phase = npc.body.pos.x / NPC_PHASE_SCALE;
    npc.visual.rotation = NPC_SWAY_RADIANS * wave(time_ms, NPC_SWAY_RATE_MS, phase);
    npc.visual.offset.y = NPC_BOB_PIXELS * wave(time_ms, NPC_BOB_RATE_MS, phase);
    let breath = 1.0 + NPC_BREATH_AMPLITUDE * wave(time_ms, NPC_BREATH_RATE_MS, phase);
    npc.visual.set_relative_scale(Vec2::splat(breath));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use crate::sim::actor::CollectibleKind;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    #[test]
    fn test_glow_range_and_tint() {
        for t in 0..200 {
            let g = villain_glow(t as f64 * 16.6);
            assert!((0.0..=1.0).contains(&g));
        }
        assert_eq!(glow_tint(0.0), 0xff0000);
        assert_eq!(glow_tint(1.0), 0xffffff);
    }

    #[test]
    fn test_anti_stall_thousand_trials() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..1000 {
            let stalled_axis = rng.random_range(-49.9f32..49.9);
            let other = rng.random_range(-400.0f32..400.0);
            let mut vel = if rng.random_bool(0.5) {
                Vec2::new(stalled_axis, other)
            } else {
                Vec2::new(other, stalled_axis)
            };
            assert!(apply_anti_stall(&mut vel, &mut rng));
            assert!((-200.0..=200.0).contains(&vel.x));
            assert!((-200.0..=200.0).contains(&vel.y));
        }
    }

    #[test]
    fn test_fast_villain_keeps_velocity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut vel = Vec2::new(120.0, -80.0);
        assert!(!apply_anti_stall(&mut vel, &mut rng));
        assert_eq!(vel, Vec2::new(120.0, -80.0));
    }

    #[test]
    fn test_villain_wobble_and_pulse() {
        let settings = Settings::from_preset(Variant::Rescue);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut villain = Actor::villain(1, Vec2::new(400.0, 100.0), Vec2::new(100.0, 100.0));
        // sin(t/200) = 1 at t = 100π
        let t = 100.0 * std::f64::consts::PI;
        update_villain(&mut villain, t, &settings, &mut rng);
        assert!((villain.visual.rotation - 5f32.to_radians()).abs() < 1e-4);
        let rel = villain.visual.relative_scale();
        assert!((rel.x + rel.y - 2.0).abs() < 1e-5);
        assert!(rel.x <= 1.1 + 1e-5 && rel.x >= 0.9 - 1e-5);
    }

    #[test]
    fn test_drip_rate_is_roughly_two_percent() {
        let settings = Settings::from_preset(Variant::Shapes);
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut villain = Actor::villain(1, Vec2::new(400.0, 100.0), Vec2::new(100.0, 100.0));
        let drips = (0..10_000)
            .filter_map(|t| update_villain(&mut villain, t as f64 * 16.6, &settings, &mut rng))
            .inspect(|pos| {
                assert!((pos.y - 140.0).abs() < 1e-3);
                assert!((pos.x - 400.0).abs() <= DRIP_SPREAD);
            })
            .count();
        assert!((100..=300).contains(&drips), "drips = {drips}");
    }

    #[test]
    fn test_npc_phase_depends_on_x() {
        let mut a = Actor::collectible(1, CollectibleKind::Rescue, Vec2::new(100.0, 0.0));
        let mut b = Actor::collectible(2, CollectibleKind::Rescue, Vec2::new(400.0, 0.0));
        update_npc(&mut a, 1000.0);
        update_npc(&mut b, 1000.0);
        assert_ne!(a.visual.rotation, b.visual.rotation);
        assert!(a.visual.offset.y.abs() <= NPC_BOB_PIXELS);
        let breath = a.visual.relative_scale().x;
        assert!((0.9 - 1e-5..=1.1 + 1e-5).contains(&breath));
    }

    #[test]
    fn test_inactive_npc_untouched() {
        let mut npc = Actor::collectible(1, CollectibleKind::Rescue, Vec2::new(100.0, 0.0));
        npc.deactivate();
        update_npc(&mut npc, 1234.0);
        assert_eq!(npc.visual.rotation, 0.0);
        assert_eq!(npc.visual.offset, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_anti_stall_range(vx in -49.0f32..49.0, vy in -500.0f32..500.0, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut vel = Vec2::new(vx, vy);
            prop_assert!(apply_anti_stall(&mut vel, &mut rng));
            prop_assert!(vel.x.abs() <= 200.0 && vel.y.abs() <= 200.0);
        }
    }
}
