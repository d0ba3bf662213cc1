//! Game settings and variant presets
//!
//! Every demo variant is a subset of the richest one; a preset just toggles
//! which rules and effects are live. Settings can be overridden from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::actor::CollectibleKind;

/// Demo variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Primitive shapes, no scoring, instant scale snaps
    Shapes,
    /// Sprites with eased squash/stretch tweens
    Sprites,
    /// Collect simple items for points, respawn waves
    Scoring,
    /// Rescue villagers, landing squash, villain glow and pulse
    #[default]
    Rescue,
    /// Drag-to-move input with screen wraparound
    Drag,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Shapes => "Shapes",
            Variant::Sprites => "Sprites",
            Variant::Scoring => "Scoring",
            Variant::Rescue => "Rescue",
            Variant::Drag => "Drag",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shapes" | "classic" => Some(Variant::Shapes),
            "sprites" => Some(Variant::Sprites),
            "scoring" | "collect" => Some(Variant::Scoring),
            "rescue" => Some(Variant::Rescue),
            "drag" => Some(Variant::Drag),
            _ => None,
        }
    }
}

/// How movement intent is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// Keyboard arrows ORed with touch buttons
    #[default]
    Discrete,
    /// Horizontal velocity follows a pointer drag
    Drag,
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    pub input_mode: InputMode,
    /// Seed for the simulation RNG
    pub seed: u64,

    // === Round ===
    pub collectible_kind: CollectibleKind,
    pub collectible_count: usize,
    /// Award points and run respawn waves
    pub scoring: bool,

    // === Animation ===
    /// Ease between scales (false = instant snaps)
    pub eased_tweens: bool,
    /// Exaggerated squash on touchdown
    pub landing_squash: bool,
    /// Vertical bob layered on the walk cycle
    pub walk_bob: bool,

    // === Villain ===
    /// Wobble amplitude in degrees
    pub villain_wobble_deg: f32,
    pub villain_glow: bool,
    pub villain_pulse: bool,
    pub villain_drips: bool,

    // === NPCs ===
    pub npc_idle_motion: bool,

    // === Field ===
    /// Player re-enters from the opposite horizontal edge
    pub wraparound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Variant::default())
    }
}

impl Settings {
    /// Create settings from a variant preset
    pub fn from_preset(variant: Variant) -> Self {
        let mut settings = Self {
            variant,
            input_mode: InputMode::Discrete,
            seed: 0x5eed,
            collectible_kind: CollectibleKind::Simple,
            collectible_count: 12,
            scoring: false,
            eased_tweens: false,
            landing_squash: false,
            walk_bob: false,
            villain_wobble_deg: 15.0,
            villain_glow: false,
            villain_pulse: false,
            villain_drips: true,
            npc_idle_motion: false,
            wraparound: false,
        };
        settings.apply_preset(variant);
        settings
    }

    /// Apply a variant preset on top of the current settings
    pub fn apply_preset(&mut self, variant: Variant) {
        self.variant = variant;
        match variant {
            Variant::Shapes => {}
            Variant::Sprites => {
                self.eased_tweens = true;
                self.walk_bob = true;
            }
            Variant::Scoring => {
                self.eased_tweens = true;
                self.scoring = true;
                self.collectible_kind = CollectibleKind::Simple;
                self.villain_wobble_deg = 10.0;
            }
            Variant::Rescue => {
                self.eased_tweens = true;
                self.walk_bob = true;
                self.scoring = true;
                self.landing_squash = true;
                self.collectible_kind = CollectibleKind::Rescue;
                self.villain_wobble_deg = 5.0;
                self.villain_glow = true;
                self.villain_pulse = true;
                self.npc_idle_motion = true;
            }
            Variant::Drag => {
                self.input_mode = InputMode::Drag;
                self.eased_tweens = true;
                self.scoring = true;
                self.wraparound = true;
                self.villain_wobble_deg = 10.0;
            }
        }
    }

    /// Parse settings from JSON. The named `variant` preset (default Rescue)
    /// supplies every field the JSON leaves out.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let Some(fields) = overrides.as_object() else {
            return serde_json::from_value(overrides);
        };
        let variant = match fields.get("variant") {
            Some(name) => serde_json::from_value(name.clone())?,
            None => Variant::default(),
        };

        let mut merged = serde_json::to_value(Self::from_preset(variant))?;
        if let Some(base) = merged.as_object_mut() {
            for (key, value) in fields {
                base.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(merged)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!(
                        "Loaded settings from {} (variant {})",
                        path.display(),
                        settings.variant.as_str()
                    );
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read settings {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_round_trip_names() {
        for v in [
            Variant::Shapes,
            Variant::Sprites,
            Variant::Scoring,
            Variant::Rescue,
            Variant::Drag,
        ] {
            assert_eq!(Variant::from_str(v.as_str()), Some(v));
        }
        assert_eq!(Variant::from_str("nope"), None);
    }

    #[test]
    fn test_presets() {
        let shapes = Settings::from_preset(Variant::Shapes);
        assert!(!shapes.scoring);
        assert!(!shapes.eased_tweens);
        assert_eq!(shapes.villain_wobble_deg, 15.0);

        let rescue = Settings::from_preset(Variant::Rescue);
        assert!(rescue.landing_squash);
        assert_eq!(rescue.collectible_kind, CollectibleKind::Rescue);

        let scoring = Settings::from_preset(Variant::Scoring);
        assert_eq!(scoring.collectible_kind, CollectibleKind::Simple);

        let drag = Settings::from_preset(Variant::Drag);
        assert_eq!(drag.input_mode, InputMode::Drag);
        assert!(drag.wraparound);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "wraparound": true }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert!(settings.wraparound);
        assert_eq!(settings.variant, Variant::Rescue);
        assert_eq!(settings.collectible_count, 12);
    }

    #[test]
    fn test_json_variant_selects_preset() {
        let shapes = Settings::from_json(r#"{ "variant": "Shapes" }"#).unwrap();
        assert_eq!(shapes.variant, Variant::Shapes);
        assert!(!shapes.eased_tweens);
        assert!(!shapes.scoring);
        assert!(!shapes.villain_glow);
        assert_eq!(shapes.collectible_kind, CollectibleKind::Simple);
        assert_eq!(shapes.villain_wobble_deg, 15.0);

        let tuned = Settings::from_json(r#"{ "variant": "Shapes", "scoring": true }"#).unwrap();
        assert!(tuned.scoring);
        assert!(!tuned.eased_tweens);

        assert!(Settings::from_json(r#"{ "variant": "Mystery" }"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings.variant, Variant::default());
    }
}
