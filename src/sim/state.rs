//! Game state and round bookkeeping
//!
//! Everything the tick reads or writes lives in `GameState`; there is no
//! module-level mutable state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::actor::{Actor, ActorId, CollectibleKind};
use super::autonomous::random_villain_velocity;
use super::input::Controls;
use super::physics::{Platform, default_platforms};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Playing,
    /// Terminal: physics frozen, ticks are no-ops
    GameOver,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Jumped,
    /// Jump arc turned from rising to falling
    Apex,
    Landed,
    Collected { id: ActorId, reward: u64, score: u64 },
    WaveRespawned { wave: u32 },
    VillainSpawned { id: ActorId, pos: Vec2 },
    DripSpawned { id: ActorId },
    Splash { pos: Vec2 },
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable as a snapshot)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub settings: Settings,
    /// Score (never decreases)
    pub score: u64,
    /// Respawn waves completed
    pub wave_index: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// End-of-round banner
    pub message: Option<String>,
    pub platforms: Vec<Platform>,
    /// All actors, sorted by id
    pub actors: Vec<Actor>,
    pub controls: Controls,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    rng: Pcg32,
    player_id: ActorId,
    next_id: ActorId,
}

impl GameState {
    /// Create the initial scene for the given settings
    pub fn new(settings: Settings) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            score: 0,
            wave_index: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            message: None,
            platforms: default_platforms(),
            actors: Vec::new(),
            controls: Controls::default(),
            events: Vec::new(),
            player_id: 0,
            next_id: 1,
        };

        let id = state.next_entity_id();
        let mut player = Actor::player(id);
        player.body.wrap_x = state.settings.wraparound;
        state.player_id = id;
        state.actors.push(player);

        let (x, y) = VILLAIN_START;
        let vel = Vec2::new(
            state
                .rng
                .random_range(-VILLAIN_MAX_AXIS_SPEED..=VILLAIN_MAX_AXIS_SPEED),
            VILLAIN_START_VY,
        );
        state.add_villain(Vec2::new(x, y), vel);

        let kind = state.settings.collectible_kind;
        for _ in 0..state.settings.collectible_count {
            let pos = Vec2::new(
                state.rng.random_range(0.0..=FIELD_WIDTH),
                state.rng.random_range(0.0..=FIELD_HEIGHT),
            );
            state.add_collectible(kind, pos);
        }

        log::debug!(
            "New {} round: {} actors, seed {}",
            state.settings.variant.as_str(),
            state.actors.len(),
            state.settings.seed
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Disjoint borrows for the per-actor update pass
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut [Actor], &Settings, &mut Pcg32, &mut Vec<GameEvent>) {
        (
            self.actors.as_mut_slice(),
            &self.settings,
            &mut self.rng,
            &mut self.events,
        )
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn player_id(&self) -> ActorId {
        self.player_id
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actor(self.player_id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actor_mut(self.player_id)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Simulation clock in milliseconds
    pub fn time_ms(&self) -> f64 {
        self.time_ticks as f64 * SIM_DT as f64 * 1000.0
    }

    fn index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.binary_search_by_key(&id, |a| a.id).ok()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.index_of(id).map(|i| &self.actors[i])
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.index_of(id).map(move |i| &mut self.actors[i])
    }

    /// Remove an actor (drips only; everything else is deactivated instead)
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.index_of(id).map(|i| self.actors.remove(i))
    }

    pub fn add_villain(&mut self, pos: Vec2, vel: Vec2) -> ActorId {
        let id = self.next_entity_id();
        self.actors.push(Actor::villain(id, pos, vel));
        id
    }

    pub fn add_collectible(&mut self, kind: CollectibleKind, pos: Vec2) -> ActorId {
        let id = self.next_entity_id();
        self.actors.push(Actor::collectible(id, kind, pos));
        id
    }

    pub fn add_drip(&mut self, pos: Vec2) -> ActorId {
        let id = self.next_entity_id();
        self.actors.push(Actor::drip(id, pos));
        self.events.push(GameEvent::DripSpawned { id });
        id
    }

    /// Active members of the collectible group
    pub fn active_count(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| a.role.is_collectible() && a.active)
            .count()
    }

    pub fn group_size(&self) -> usize {
        self.actors.iter().filter(|a| a.role.is_collectible()).count()
    }

    pub fn villain_count(&self) -> usize {
        self.actors.iter().filter(|a| a.role.is_villain()).count()
    }

    /// Spawn a villain on the horizontal half opposite `player_x`
    pub fn spawn_villain_opposite(&mut self, player_x: f32) -> ActorId {
        let half = FIELD_WIDTH / 2.0;
        let x = if player_x < half {
            self.rng.random_range(half..=FIELD_WIDTH)
        } else {
            self.rng.random_range(0.0..=half)
        };
        let pos = Vec2::new(x, VILLAIN_SPAWN_Y);
        let vel = random_villain_velocity(&mut self.rng);
        let id = self.add_villain(pos, vel);
        self.events.push(GameEvent::VillainSpawned { id, pos });
        log::debug!("Villain {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
