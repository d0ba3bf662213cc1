//! Physics substrate
//!
//! The rules only need a body integrator that reports platform contacts and
//! actor pairs. `Substrate` is that contract; `ArcadePhysics` is a small
//! gravity + AABB implementation of it used by the native runner and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, Role};
use crate::boxes_overlap;
use crate::consts::*;

/// A static, axis-aligned platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            half_extents: Vec2::new(w, h) / 2.0,
        }
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half_extents.y
    }
}

/// Platforms of the demo scene (ground is the 2x-scaled one)
pub fn default_platforms() -> Vec<Platform> {
    vec![
        Platform::new(400.0, 568.0, 800.0, 64.0),
        Platform::new(600.0, 400.0, 400.0, 32.0),
        Platform::new(50.0, 250.0, 400.0, 32.0),
        Platform::new(750.0, 220.0, 400.0, 32.0),
    ]
}

/// Physical response between two actors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContactKind {
    /// Solid contact
    Collision,
    /// Trigger region, no response
    Overlap,
}

/// A contact reported by one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Contact {
    Platform { actor: ActorId, platform: usize },
    Actors { a: ActorId, b: ActorId, kind: ContactKind },
}

/// Which actor pairs the rules care about, and how
pub fn pair_kind(a: &Role, b: &Role) -> Option<ContactKind> {
    match (a, b) {
        (Role::Player(_), Role::Villain(_)) | (Role::Villain(_), Role::Player(_)) => {
            Some(ContactKind::Collision)
        }
        (Role::Player(_), Role::Collectible(_)) | (Role::Collectible(_), Role::Player(_)) => {
            Some(ContactKind::Overlap)
        }
        _ => None,
    }
}

/// Body integration and broad-phase contact reporting
pub trait Substrate {
    /// Advance every active body by `dt`, appending contacts in stable order
    fn step(
        &mut self,
        actors: &mut [Actor],
        platforms: &[Platform],
        dt: f32,
        contacts: &mut Vec<Contact>,
    );
}

/// Gravity, platform blocking and world bounds on axis-aligned boxes
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    pub gravity: f32,
    pub bounds: Vec2,
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounds: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        }
    }
}

impl ArcadePhysics {
    /// Rebounds slower than this settle to rest (two ticks of gravity)
    fn rest_speed(&self, dt: f32) -> f32 {
        self.gravity * dt * 2.0
    }

    fn resolve_platforms(
        &self,
        actor: &mut Actor,
        platforms: &[Platform],
        dt: f32,
        contacts: &mut Vec<Contact>,
    ) {
        let rest = self.rest_speed(dt);
        let body = &mut actor.body;
        for (index, platform) in platforms.iter().enumerate() {
            if !boxes_overlap(body.pos, body.half_extents, platform.center, platform.half_extents) {
                continue;
            }
            let delta = body.pos - platform.center;
            let overlap = body.half_extents + platform.half_extents - delta.abs();

            if overlap.y <= overlap.x {
                if delta.y < 0.0 {
                    // Landed on top
                    body.pos.y = platform.top() - body.half_extents.y;
                    if body.vel.y > 0.0 {
                        body.vel.y = bounce(body.vel.y, body.bounce, rest);
                    }
                    body.touching_down = true;
                } else {
                    body.pos.y = platform.bottom() + body.half_extents.y;
                    if body.vel.y < 0.0 {
                        body.vel.y = bounce(body.vel.y, body.bounce, rest);
                    }
                }
            } else {
                let sign = delta.x.signum();
                body.pos.x += sign * overlap.x;
                if body.vel.x * sign < 0.0 {
                    body.vel.x = -body.vel.x * body.bounce;
                }
            }
            contacts.push(Contact::Platform {
                actor: actor.id,
                platform: index,
            });
        }
    }

    fn resolve_bounds(&self, actor: &mut Actor, dt: f32) {
        let rest = self.rest_speed(dt);
        let bounds = self.bounds;
        let body = &mut actor.body;

        if body.wrap_x {
            if body.pos.x < 0.0 {
                body.pos.x += bounds.x;
            } else if body.pos.x >= bounds.x {
                body.pos.x -= bounds.x;
            }
        }

        if !body.collide_world_bounds {
            return;
        }
        let half = body.half_extents;
        if !body.wrap_x {
            if body.pos.x - half.x < 0.0 {
                body.pos.x = half.x;
                if body.vel.x < 0.0 {
                    body.vel.x = -body.vel.x * body.bounce;
                }
            } else if body.pos.x + half.x > bounds.x {
                body.pos.x = bounds.x - half.x;
                if body.vel.x > 0.0 {
                    body.vel.x = -body.vel.x * body.bounce;
                }
            }
        }
        if body.pos.y - half.y < 0.0 {
            body.pos.y = half.y;
            if body.vel.y < 0.0 {
                body.vel.y = bounce(body.vel.y, body.bounce, rest);
            }
        } else if body.pos.y + half.y >= bounds.y {
            body.pos.y = bounds.y - half.y;
            if body.vel.y > 0.0 {
                body.vel.y = bounce(body.vel.y, body.bounce, rest);
            }
            body.touching_down = true;
        }
    }
}

/// Reflect one velocity component with restitution; tiny rebounds stop
fn bounce(v: f32, restitution: f32, rest: f32) -> f32 {
    let out = -v * restitution;
    if out.abs() < rest { 0.0 } else { out }
}

impl Substrate for ArcadePhysics {
    fn step(
        &mut self,
        actors: &mut [Actor],
        platforms: &[Platform],
        dt: f32,
        contacts: &mut Vec<Contact>,
    ) {
        for actor in actors.iter_mut().filter(|a| a.active) {
            let body = &mut actor.body;
            body.touching_down = false;
            body.vel.y += self.gravity * dt;
            body.pos += body.vel * dt;

            self.resolve_platforms(actor, platforms, dt, contacts);
            self.resolve_bounds(actor, dt);
        }

        for i in 0..actors.len() {
            for j in (i + 1)..actors.len() {
                let (a, b) = (&actors[i], &actors[j]);
                if !a.active || !b.active {
                    continue;
                }
                let Some(kind) = pair_kind(&a.role, &b.role) else {
                    continue;
                };
                if boxes_overlap(a.body.pos, a.body.half_extents, b.body.pos, b.body.half_extents) {
                    contacts.push(Contact::Actors {
                        a: a.id,
                        b: b.id,
                        kind,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::CollectibleKind;

    fn run(
        physics: &mut ArcadePhysics,
        actors: &mut [Actor],
        platforms: &[Platform],
        ticks: usize,
    ) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for _ in 0..ticks {
            contacts.clear();
            physics.step(actors, platforms, SIM_DT, &mut contacts);
        }
        contacts
    }

    #[test]
    fn test_player_settles_on_ground() {
        let mut physics = ArcadePhysics::default();
        let mut actors = vec![Actor::player(1)];
        let contacts = run(&mut physics, &mut actors, &default_platforms(), 240);

        let body = &actors[0].body;
        assert!(body.touching_down);
        assert!((body.pos.y - (536.0 - 30.0)).abs() < 0.01);
        assert!(contacts.contains(&Contact::Platform { actor: 1, platform: 0 }));
    }

    #[test]
    fn test_villain_bounces_off_walls() {
        let mut physics = ArcadePhysics::default();
        let mut actors = vec![Actor::villain(1, Vec2::new(760.0, 100.0), Vec2::new(200.0, 0.0))];
        let mut contacts = Vec::new();
        physics.step(&mut actors, &[], 0.2, &mut contacts);
        assert!(actors[0].body.pos.x <= FIELD_WIDTH - 30.0);
        assert!(actors[0].body.vel.x < 0.0);
    }

    #[test]
    fn test_wraparound() {
        let mut physics = ArcadePhysics::default();
        let mut player = Actor::player(1);
        player.body.wrap_x = true;
        player.body.pos = Vec2::new(5.0, 506.0);
        player.body.vel = Vec2::new(-600.0, 0.0);
        let mut actors = vec![player];
        let mut contacts = Vec::new();
        physics.step(&mut actors, &default_platforms(), SIM_DT, &mut contacts);
        assert!(actors[0].body.pos.x > FIELD_WIDTH - 10.0);
    }

    #[test]
    fn test_pair_contacts() {
        let mut physics = ArcadePhysics { gravity: 0.0, ..Default::default() };
        let pos = Vec2::new(300.0, 300.0);
        let mut player = Actor::player(1);
        player.body.pos = pos;
        let villain = Actor::villain(2, pos, Vec2::ZERO);
        let item = Actor::collectible(3, CollectibleKind::Simple, pos);
        let mut hidden = Actor::collectible(4, CollectibleKind::Simple, pos);
        hidden.deactivate();
        let drip = Actor::drip(5, pos);
        let mut actors = vec![player, villain, item, hidden, drip];

        let mut contacts = Vec::new();
        physics.step(&mut actors, &[], 0.0, &mut contacts);
        assert_eq!(
            contacts,
            vec![
                Contact::Actors { a: 1, b: 2, kind: ContactKind::Collision },
                Contact::Actors { a: 1, b: 3, kind: ContactKind::Overlap },
            ]
        );
    }

    #[test]
    fn test_drip_ignores_world_bounds() {
        let mut physics = ArcadePhysics::default();
        let mut actors = vec![Actor::drip(1, Vec2::new(400.0, 590.0))];
        let mut contacts = Vec::new();
        physics.step(&mut actors, &[], 0.5, &mut contacts);
        assert!(actors[0].body.pos.y > FIELD_HEIGHT);
    }
}
