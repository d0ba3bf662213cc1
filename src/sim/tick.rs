//! Fixed timestep simulation tick
//!
//! Per tick: drain input into an intent, update the player, run the
//! autonomous actors, step physics, then resolve the contacts it reported.
//! Resolver mutations are visible from the next tick on.

use glam::Vec2;

use super::animation::update_player;
use super::autonomous::{update_npc, update_villain};
use super::input::InputEvent;
use super::physics::{Contact, Substrate};
use super::resolver::resolve_contacts;
use super::state::GameState;
use crate::consts::*;

/// Input events for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl Into<Vec<InputEvent>>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<P: Substrate>(state: &mut GameState, physics: &mut P, input: &TickInput, dt: f32) {
    // Terminal: physics frozen, input ignored
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;
    let time_ms = state.time_ms();

    let mode = state.settings.input_mode;
    let intent = state.controls.resolve(&input.events, mode);

    // Player first (lowest id), then the autonomous actors
    let mut drips: Vec<Vec2> = Vec::new();
    {
        let (actors, settings, rng, events) = state.parts_mut();
        for actor in actors.iter_mut().filter(|a| a.active) {
            if actor.role.is_player() {
                update_player(actor, &intent, time_ms, settings, events);
            } else if actor.role.is_villain() {
                if let Some(pos) = update_villain(actor, time_ms, settings, rng) {
                    drips.push(pos);
                }
            } else if actor.role.is_collectible() && settings.npc_idle_motion {
                update_npc(actor, time_ms);
            }
        }
    }
    for pos in drips {
        let id = state.add_drip(pos);
        log::debug!("Drip {} at ({:.0}, {:.0})", id, pos.x, pos.y);
    }

    let mut contacts: Vec<Contact> = Vec::new();
    physics.step(&mut state.actors, &state.platforms, dt, &mut contacts);
    resolve_contacts(state, &contacts);

    // Drips that missed every platform
    state
        .actors
        .retain(|a| !(a.role.is_drip() && a.body.pos.y > FIELD_HEIGHT + DRIP_RADIUS));
}
