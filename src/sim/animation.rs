//! Player movement and squash-and-stretch state machine
//!
//! Transitions are evaluated in a fixed order every tick:
//! walk/idle (grounded), jump, apex, falling, landing, grounded clean-up.
//! Apex and landing are edge-triggered off the jumping/falling flags so each
//! fires once per jump arc. Any other descent (walking off a ledge) enters
//! falling directly; small hops after bouncing off the ground do not.

use glam::Vec2;

use super::actor::{Actor, AnimState, Role, Visual};
use super::input::Intent;
use super::state::GameEvent;
use super::tween::{Completion, Easing, Tween, TweenKind};
use crate::consts::*;
use crate::settings::Settings;
use crate::wave;

fn pair(v: (f32, f32)) -> Vec2 {
    Vec2::new(v.0, v.1)
}

/// Apply horizontal intent to the body and facing
fn apply_movement(player: &mut Actor, intent: &Intent) {
    let vel_x = match *intent {
        Intent::Discrete { move_x, .. } => move_x as f32 * WALK_SPEED,
        Intent::Drag { vel_x } => vel_x,
        Intent::Released => 0.0,
    };
    player.body.vel.x = vel_x;
    if vel_x < 0.0 {
        player.visual.flip_x = true;
    } else if vel_x > 0.0 {
        player.visual.flip_x = false;
    }
}

/// Scale factor of the walk cycle at `time_ms`
pub fn walk_factor(time_ms: f64) -> Vec2 {
    let s = WALK_AMPLITUDE * wave(time_ms, WALK_RATE_MS, 0.0);
    Vec2::new(1.0 - s, 1.0 + s)
}

/// Play a tween, or jump straight to its end value when easing is off
fn play(visual: &mut Visual, tween: Tween, eased: bool) {
    if eased {
        visual.play(tween);
        return;
    }
    visual.cancel_tween();
    match tween.kind {
        TweenKind::Reset => visual.reset_scale(),
        // Without easing the pose holds until the next transition
        _ => visual.set_relative_scale(tween.to),
    }
}

fn landing_in_progress(visual: &Visual) -> bool {
    visual
        .tween
        .as_ref()
        .is_some_and(|t| t.kind == TweenKind::Land)
}

/// Per-tick player update from intent and last step's grounded flag
pub fn update_player(
    player: &mut Actor,
    intent: &Intent,
    time_ms: f64,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) {
    let grounded = player.body.touching_down;
    let eased = settings.eased_tweens;
    apply_movement(player, intent);

    let Role::Player(state) = &mut player.role else {
        return;
    };
    let visual = &mut player.visual;
    let body = &mut player.body;
    let moving = intent.move_x() != 0;

    if grounded {
        state.rebounding = false;
    } else if body.vel.y < 0.0 && !state.is_jumping {
        state.rebounding = true;
    }

    // 1-2. Grounded: walk or idle (a landing squash plays out first)
    if grounded && !(state.anim == AnimState::Landing && landing_in_progress(visual)) {
        if moving {
            if state.anim != AnimState::Walking {
                visual.cancel_tween();
                state.anim = AnimState::Walking;
            }
        } else if state.anim != AnimState::Idle {
            state.anim = AnimState::Idle;
            let from = visual.relative_scale();
            play(
                visual,
                Tween::new(TweenKind::Reset, from, Vec2::ONE, time_ms, IDLE_RESET_MS)
                    .easing(Easing::SineInOut)
                    .completion(Completion::SnapToOriginal),
                eased,
            );
        }
    }

    // 3. Jump from the ground
    if intent.jump() && grounded {
        body.vel.y = -JUMP_IMPULSE;
        state.is_jumping = true;
        state.is_falling = false;
        state.anim = AnimState::Jumping;
        play(
            visual,
            Tween::new(
                TweenKind::Jump,
                Vec2::ONE,
                pair(JUMP_STRETCH),
                time_ms,
                JUMP_TWEEN_MS / 2.0,
            )
            .yoyo()
            .completion(Completion::SnapToOriginal),
            eased,
        );
        events.push(GameEvent::Jumped);
    // 4. Apex: rising turned into falling
    } else if state.is_jumping && body.vel.y >= 0.0 {
        state.is_jumping = false;
        state.is_falling = true;
        events.push(GameEvent::Apex);
    // Walked off a ledge
    } else if !grounded
        && !state.is_jumping
        && !state.is_falling
        && !state.rebounding
        && body.vel.y > 0.0
    {
        state.is_falling = true;
    }

    if state.is_falling && !grounded {
        // 5. Airborne on the way down
        if state.anim != AnimState::Falling {
            state.anim = AnimState::Falling;
            let from = visual.relative_scale();
            play(
                visual,
                Tween::new(TweenKind::Fall, from, pair(FALL_SQUASH), time_ms, FALL_TWEEN_MS),
                eased,
            );
        }
    } else if state.is_falling && grounded {
        // 6. Touchdown
        state.is_falling = false;
        if settings.landing_squash {
            state.anim = AnimState::Landing;
            let squash = pair(LAND_SQUASH);
            play(
                visual,
                Tween::new(TweenKind::Land, squash, squash, time_ms, LAND_TWEEN_MS)
                    .easing(Easing::Linear)
                    .completion(Completion::SnapToOriginal),
                eased,
            );
        } else {
            state.anim = if moving { AnimState::Walking } else { AnimState::Idle };
            visual.cancel_tween();
            visual.reset_scale();
        }
        events.push(GameEvent::Landed);
        log::debug!("Player landed at ({:.0}, {:.0})", body.pos.x, body.pos.y);
    } else if grounded {
        // 7. Safety net
        state.is_falling = false;
    }

    // Visuals: a tween owns the scale while it runs, otherwise the walk cycle does
    visual.advance_tween(time_ms);
    if state.anim == AnimState::Walking && !visual.tween_running() {
        visual.set_relative_scale(walk_factor(time_ms));
        if settings.walk_bob {
            visual.offset.y = -WALK_BOB_PIXELS * wave(time_ms, WALK_BOB_RATE_MS, 0.0).abs();
        }
    } else {
        visual.offset = Vec2::ZERO;
    }
}
