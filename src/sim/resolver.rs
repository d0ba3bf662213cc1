//! Contact resolution
//!
//! Reacts to the contacts a physics step reported: player-villain collision
//! ends the round, player-collectible overlap scores, drips die on platforms.
//! Contacts repeat every step while bodies touch, so every handler checks
//! `active` before acting and deactivates before scoring.

use glam::Vec2;
use rand::Rng;

use super::actor::{ActorId, Role};
use super::physics::{Contact, ContactKind};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Apply every contact from one physics step, in order
pub fn resolve_contacts(state: &mut GameState, contacts: &[Contact]) {
    let mut spent_drips: Vec<ActorId> = Vec::new();

    for contact in contacts {
        if state.is_game_over() {
            break;
        }
        match *contact {
            Contact::Platform { actor, .. } => {
                let Some(a) = state.actor(actor) else {
                    continue;
                };
                if a.role.is_drip() && !spent_drips.contains(&actor) {
                    spent_drips.push(actor);
                }
            }
            Contact::Actors { a, b, kind } => {
                let (Some(first), Some(second)) = (state.actor(a), state.actor(b)) else {
                    continue;
                };
                let (player, other) = if first.role.is_player() {
                    (first, second)
                } else {
                    (second, first)
                };
                if !player.role.is_player() {
                    continue;
                }
                let other_id = other.id;
                let hit_villain = kind == ContactKind::Collision && other.role.is_villain();
                let reached_collectible = kind == ContactKind::Overlap && other.role.is_collectible();
                if hit_villain {
                    enter_game_over(state);
                } else if reached_collectible {
                    collect(state, other_id);
                }
            }
        }
    }

    for id in spent_drips {
        if let Some(drip) = state.remove_actor(id) {
            state.events.push(GameEvent::Splash { pos: drip.body.pos });
        }
    }
}

/// Terminal transition; only fires from `Playing`
pub fn enter_game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.message = Some(format!("Game Over! Score: {}", state.score));
    if let Some(player) = state.player_mut() {
        player.visual.tint = DEFEAT_TINT;
        player.visual.cancel_tween();
    }
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!("Game over at tick {} with score {}", state.time_ticks, state.score);
}

/// Collect one group member; triggers a respawn wave when the group empties.
/// Without scoring the group is scenery and overlaps do nothing.
pub fn collect(state: &mut GameState, id: ActorId) {
    if state.is_game_over() || !state.settings.scoring {
        return;
    }
    let Some(actor) = state.actor_mut(id) else {
        return;
    };
    if !actor.active {
        return;
    }
    let Role::Collectible(kind) = actor.role else {
        return;
    };
    actor.deactivate();

    let reward = kind.reward();
    state.score += reward;
    state.events.push(GameEvent::Collected {
        id,
        reward,
        score: state.score,
    });

    if state.active_count() == 0 {
        respawn_wave(state);
    }
}

/// Reactivate the whole group along the top edge and add one villain
pub fn respawn_wave(state: &mut GameState) {
    let player_x = state.player().map_or(FIELD_WIDTH / 2.0, |p| p.body.pos.x);

    let ids: Vec<ActorId> = state
        .actors
        .iter()
        .filter(|a| a.role.is_collectible())
        .map(|a| a.id)
        .collect();
    for (i, id) in ids.into_iter().enumerate() {
        let x = (RESPAWN_MARGIN_X + i as f32 * RESPAWN_STEP_X) % FIELD_WIDTH;
        let jitter = state.rng().random_range(0.0..=COLLECTIBLE_SIZE.1);
        if let Some(actor) = state.actor_mut(id) {
            actor.reactivate(Vec2::new(x, jitter));
        }
    }

    state.wave_index += 1;
    state.events.push(GameEvent::WaveRespawned {
        wave: state.wave_index,
    });
    state.spawn_villain_opposite(player_x);
    log::info!(
        "Wave {} respawned; {} villains on the field",
        state.wave_index,
        state.villain_count()
    );
}
