//! Deterministic scale tweens
//!
//! A tween is a plain record owned by the actor it animates. Starting a new
//! tween on an actor replaces the one in flight, so re-triggering never
//! accumulates handles, and a destroyed actor takes its tween with it.
//! Scales are multipliers of the actor's original scale.

use glam::Vec2;
use serde::Serialize;

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Easing {
    Linear,
    QuadOut,
    SineInOut,
    /// Jump to the end value immediately
    Instant,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::SineInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
            Easing::Instant => 1.0,
        }
    }
}

/// What a tween is for (lets the animation machine tell its own tweens apart)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TweenKind {
    Reset,
    Jump,
    Fall,
    Land,
}

/// What happens to the scale when the tween finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Completion {
    /// Keep the final value
    Hold,
    /// Snap exactly back to the original scale
    SnapToOriginal,
}

/// An in-flight scale animation
#[derive(Debug, Clone, Serialize)]
pub struct Tween {
    pub kind: TweenKind,
    pub from: Vec2,
    pub to: Vec2,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    /// Play forward then back
    pub yoyo: bool,
    /// Extra cycles after the first
    pub repeat: u32,
    pub completion: Completion,
}

/// Result of sampling a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Running(Vec2),
    Done(Vec2),
}

impl Tween {
    pub fn new(kind: TweenKind, from: Vec2, to: Vec2, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            kind,
            from,
            to,
            start_ms,
            duration_ms,
            easing: Easing::QuadOut,
            yoyo: false,
            repeat: 0,
            completion: Completion::Hold,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    /// Length of one forward (+ back, when yoyo) cycle
    fn cycle_ms(&self) -> f64 {
        if self.yoyo {
            self.duration_ms * 2.0
        } else {
            self.duration_ms
        }
    }

    /// Total running time including repeats
    pub fn total_ms(&self) -> f64 {
        self.cycle_ms() * (self.repeat as f64 + 1.0)
    }

    /// Relative scale at `now_ms`
    pub fn sample(&self, now_ms: f64) -> Sample {
        let elapsed = (now_ms - self.start_ms).max(0.0);
        if self.duration_ms <= 0.0 || elapsed >= self.total_ms() {
            let end = match (self.completion, self.yoyo) {
                (Completion::SnapToOriginal, _) => Vec2::ONE,
                (Completion::Hold, true) => self.from,
                (Completion::Hold, false) => self.to,
            };
            return Sample::Done(end);
        }

        let in_cycle = elapsed % self.cycle_ms();
        let t = if self.yoyo && in_cycle > self.duration_ms {
            1.0 - (in_cycle - self.duration_ms) / self.duration_ms
        } else {
            in_cycle / self.duration_ms
        };
        let eased = self.easing.apply(t as f32);
        Sample::Running(self.from.lerp(self.to, eased))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::QuadOut, Easing::SineInOut] {
            assert!(easing.apply(0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert_eq!(Easing::Instant.apply(0.0), 1.0);
    }

    #[test]
    fn test_yoyo_peaks_midway_and_returns() {
        let tween = Tween::new(TweenKind::Jump, Vec2::ONE, Vec2::new(0.8, 1.2), 0.0, 100.0)
            .easing(Easing::Linear)
            .yoyo();
        match tween.sample(100.0) {
            Sample::Running(v) => assert!((v - Vec2::new(0.8, 1.2)).length() < 1e-4),
            other => panic!("expected running, got {other:?}"),
        }
        match tween.sample(150.0) {
            Sample::Running(v) => assert!((v - Vec2::new(0.9, 1.1)).length() < 1e-4),
            other => panic!("expected running, got {other:?}"),
        }
        assert_eq!(tween.sample(200.0), Sample::Done(Vec2::ONE));
    }

    #[test]
    fn test_repeat_extends_total() {
        let tween = Tween::new(TweenKind::Land, Vec2::ONE, Vec2::splat(2.0), 10.0, 50.0)
            .yoyo()
            .repeat(2);
        assert_eq!(tween.total_ms(), 300.0);
        assert!(matches!(tween.sample(250.0), Sample::Running(_)));
        assert!(matches!(tween.sample(310.0), Sample::Done(_)));
    }

    #[test]
    fn test_hold_keeps_target() {
        let tween = Tween::new(TweenKind::Fall, Vec2::ONE, Vec2::new(1.2, 0.8), 0.0, 120.0);
        assert_eq!(tween.sample(500.0), Sample::Done(Vec2::new(1.2, 0.8)));
    }

    proptest! {
        #[test]
        fn prop_snap_completion_returns_exactly_to_original(
            tx in 0.3f32..2.0,
            ty in 0.3f32..2.0,
            duration in 1.0f64..500.0,
            yoyo in any::<bool>(),
        ) {
            let mut tween = Tween::new(TweenKind::Land, Vec2::ONE, Vec2::new(tx, ty), 0.0, duration)
                .completion(Completion::SnapToOriginal);
            if yoyo {
                tween = tween.yoyo();
            }
            prop_assert_eq!(tween.sample(tween.total_ms() + 1.0), Sample::Done(Vec2::ONE));
        }
    }
}
