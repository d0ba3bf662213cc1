//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by actor ID)
//! - No rendering or platform dependencies

pub mod actor;
pub mod animation;
pub mod autonomous;
pub mod input;
pub mod physics;
pub mod resolver;
pub mod state;
pub mod tick;
pub mod tween;

pub use actor::{Actor, ActorId, AnimState, Body, CollectibleKind, PlayerState, Role, Visual};
pub use input::{Button, Controls, InputEvent, Intent, PointerPhase};
pub use physics::{ArcadePhysics, Contact, ContactKind, Platform, Substrate};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use tween::{Completion, Easing, Tween, TweenKind};
