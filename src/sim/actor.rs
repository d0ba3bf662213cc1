//! Actor entities
//!
//! Actors are plain data tagged with a role. Components operate on them with
//! free functions rather than through per-kind behaviour.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tween::{Sample, Tween};
use crate::consts::*;

/// Entity identifier, allocated monotonically by the game state
pub type ActorId = u32;

/// Collectible flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// A pickup item
    #[default]
    Simple,
    /// A villager to rescue
    Rescue,
}

impl CollectibleKind {
    pub fn reward(self) -> u64 {
        match self {
            CollectibleKind::Simple => SIMPLE_REWARD,
            CollectibleKind::Rescue => RESCUE_REWARD,
        }
    }
}

/// Visual squash/stretch state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walking,
    Jumping,
    Falling,
    Landing,
}

/// Player-only state
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerState {
    pub is_jumping: bool,
    pub is_falling: bool,
    /// Airborne after bouncing off the ground (not a fall)
    pub rebounding: bool,
    pub anim: AnimState,
}

/// Villain-only state
#[derive(Debug, Clone, Default, Serialize)]
pub struct VillainState {
    /// Cosmetic glow intensity in [0, 1]
    pub glow: f32,
}

/// Role tag for an actor
#[derive(Debug, Clone, Serialize)]
pub enum Role {
    Player(PlayerState),
    Villain(VillainState),
    Collectible(CollectibleKind),
    Drip,
}

impl Role {
    pub fn is_player(&self) -> bool {
        matches!(self, Role::Player(_))
    }

    pub fn is_villain(&self) -> bool {
        matches!(self, Role::Villain(_))
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self, Role::Collectible(_))
    }

    pub fn is_drip(&self) -> bool {
        matches!(self, Role::Drip)
    }
}

/// Physics body as seen by the simulation
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    pub bounce: f32,
    pub collide_world_bounds: bool,
    /// Let the body leave one horizontal edge and re-enter at the other
    pub wrap_x: bool,
    /// Resting on a platform or the field floor after the last physics step
    pub touching_down: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_extents: size / 2.0,
            bounce: 0.0,
            collide_world_bounds: true,
            wrap_x: false,
            touching_down: false,
        }
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_world_bounds(mut self, collide: bool) -> Self {
        self.collide_world_bounds = collide;
        self
    }
}

/// Renderable state
#[derive(Debug, Clone, Serialize)]
pub struct Visual {
    /// Captured at creation, never changed
    original_scale: Vec2,
    pub scale: Vec2,
    /// Radians
    pub rotation: f32,
    pub flip_x: bool,
    /// 0xRRGGBB
    pub tint: u32,
    pub alpha: f32,
    pub visible: bool,
    /// Render-only offset from the body position (bobbing)
    pub offset: Vec2,
    /// At most one tween in flight
    pub tween: Option<Tween>,
}

impl Visual {
    pub fn new(original_scale: Vec2, tint: u32) -> Self {
        Self {
            original_scale,
            scale: original_scale,
            rotation: 0.0,
            flip_x: false,
            tint,
            alpha: 1.0,
            visible: true,
            offset: Vec2::ZERO,
            tween: None,
        }
    }

    pub fn original_scale(&self) -> Vec2 {
        self.original_scale
    }

    /// Set scale as a multiplier of the original scale
    pub fn set_relative_scale(&mut self, factor: Vec2) {
        self.scale = self.original_scale * factor;
    }

    /// Current scale as a multiplier of the original scale
    pub fn relative_scale(&self) -> Vec2 {
        self.scale / self.original_scale
    }

    pub fn reset_scale(&mut self) {
        self.scale = self.original_scale;
    }

    /// Start a tween, replacing any in flight
    pub fn play(&mut self, tween: Tween) {
        self.tween = Some(tween);
    }

    pub fn cancel_tween(&mut self) {
        self.tween = None;
    }

    pub fn tween_running(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance the tween in flight; returns true if it finished this call
    pub fn advance_tween(&mut self, now_ms: f64) -> bool {
        let Some(tween) = &self.tween else {
            return false;
        };
        match tween.sample(now_ms) {
            Sample::Running(factor) => {
                self.set_relative_scale(factor);
                false
            }
            Sample::Done(factor) => {
                if factor == Vec2::ONE {
                    self.reset_scale();
                } else {
                    self.set_relative_scale(factor);
                }
                self.tween = None;
                true
            }
        }
    }
}

/// A simulated entity
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
    pub body: Body,
    pub visual: Visual,
    /// False once collected, until respawned
    pub active: bool,
}

impl Actor {
    pub fn new(id: ActorId, role: Role, body: Body, visual: Visual) -> Self {
        Self {
            id,
            role,
            body,
            visual,
            active: true,
        }
    }

    pub fn player(id: ActorId) -> Self {
        let (x, y) = PLAYER_START;
        Self::new(
            id,
            Role::Player(PlayerState::default()),
            Body::new(Vec2::new(x, y), Vec2::splat(PLAYER_SIZE)).with_bounce(PLAYER_BOUNCE),
            Visual::new(Vec2::ONE, NEUTRAL_TINT),
        )
    }

    pub fn villain(id: ActorId, pos: Vec2, vel: Vec2) -> Self {
        let (w, h) = VILLAIN_SIZE;
        Self::new(
            id,
            Role::Villain(VillainState::default()),
            Body::new(pos, Vec2::new(w, h))
                .with_bounce(VILLAIN_BOUNCE)
                .with_velocity(vel),
            Visual::new(Vec2::ONE, 0x6f4e37),
        )
    }

    pub fn collectible(id: ActorId, kind: CollectibleKind, pos: Vec2) -> Self {
        let (w, h) = COLLECTIBLE_SIZE;
        let tint = match kind {
            CollectibleKind::Simple => 0xff0000,
            CollectibleKind::Rescue => NEUTRAL_TINT,
        };
        Self::new(
            id,
            Role::Collectible(kind),
            Body::new(pos, Vec2::new(w, h)).with_bounce(COLLECTIBLE_BOUNCE),
            Visual::new(Vec2::ONE, tint),
        )
    }

    pub fn drip(id: ActorId, pos: Vec2) -> Self {
        Self::new(
            id,
            Role::Drip,
            Body::new(pos, Vec2::splat(DRIP_RADIUS * 2.0))
                .with_velocity(Vec2::new(0.0, DRIP_SPEED))
                .with_world_bounds(false),
            Visual::new(Vec2::ONE, 0x6f4e37),
        )
    }

    /// Hide and disable
    pub fn deactivate(&mut self) {
        self.active = false;
        self.visual.visible = false;
        self.visual.cancel_tween();
        self.body.vel = Vec2::ZERO;
    }

    /// Show and enable at a new position
    pub fn reactivate(&mut self, pos: Vec2) {
        self.active = true;
        self.visual.visible = true;
        self.visual.reset_scale();
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.role {
            Role::Player(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tween::{Completion, TweenKind};

    #[test]
    fn test_relative_scale_uses_original() {
        let mut visual = Visual::new(Vec2::new(0.5, 0.25), NEUTRAL_TINT);
        visual.set_relative_scale(Vec2::new(2.0, 4.0));
        assert_eq!(visual.scale, Vec2::ONE);
        assert_eq!(visual.original_scale(), Vec2::new(0.5, 0.25));
        assert_eq!(visual.relative_scale(), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_play_replaces_in_flight_tween() {
        let mut visual = Visual::new(Vec2::ONE, NEUTRAL_TINT);
        visual.play(Tween::new(TweenKind::Jump, Vec2::ONE, Vec2::splat(2.0), 0.0, 100.0));
        visual.play(Tween::new(TweenKind::Fall, Vec2::ONE, Vec2::splat(3.0), 0.0, 100.0));
        assert_eq!(visual.tween.as_ref().map(|t| t.kind), Some(TweenKind::Fall));
    }

    #[test]
    fn test_advance_tween_snaps_to_original_exactly() {
        let original = Vec2::new(0.37, 0.91);
        let mut visual = Visual::new(original, NEUTRAL_TINT);
        visual.play(
            Tween::new(TweenKind::Land, Vec2::ONE, Vec2::new(1.4, 0.6), 0.0, 100.0)
                .completion(Completion::SnapToOriginal),
        );
        assert!(!visual.advance_tween(50.0));
        assert_ne!(visual.scale, original);
        assert!(visual.advance_tween(100.0));
        assert_eq!(visual.scale, original);
        assert!(!visual.tween_running());
    }

    #[test]
    fn test_deactivate_then_reactivate() {
        let mut actor = Actor::collectible(3, CollectibleKind::Rescue, Vec2::new(10.0, 10.0));
        actor.body.vel = Vec2::new(5.0, 5.0);
        actor.deactivate();
        assert!(!actor.active);
        assert!(!actor.visual.visible);
        assert_eq!(actor.body.vel, Vec2::ZERO);

        actor.reactivate(Vec2::new(100.0, 0.0));
        assert!(actor.active);
        assert!(actor.visual.visible);
        assert_eq!(actor.body.pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_rewards() {
        assert_eq!(CollectibleKind::Simple.reward(), 10);
        assert_eq!(CollectibleKind::Rescue.reward(), 50);
    }
}
