//! Difficulty tables and the optional `skyraid.toml` configuration file.
//!
//! The compiled defaults are authoritative; the TOML file overrides any
//! subset of them.  A missing file, a malformed file, or an unknown
//! difficulty string all fall back to the defaults — configuration can
//! degrade but never abort a session.

use std::path::Path;

use serde::Deserialize;

// ── Difficulty ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Starting enemy spawn cadence in milliseconds.
    pub fn base_spawn_interval_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 2600,
            Difficulty::Normal => 2000,
            Difficulty::Hard => 1400,
        }
    }

    /// Boss hit-points at stage 1; later stages add 50 per stage cleared.
    pub fn base_boss_hp(&self) -> i32 {
        match self {
            Difficulty::Easy => 80,
            Difficulty::Normal => 100,
            Difficulty::Hard => 150,
        }
    }

    /// Unknown strings map to `Normal` rather than failing.
    pub fn parse_or_default(s: &str) -> Difficulty {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }
}

// ── Stage progression constants ──────────────────────────────────────────────

/// Spawn cadence shrinks by this much at every stage transition…
pub const SPAWN_INTERVAL_STEP_MS: u32 = 300;
/// …but never below this.
pub const SPAWN_INTERVAL_FLOOR_MS: u32 = 500;

// ── Session tuning ───────────────────────────────────────────────────────────

/// Difficulty-independent knobs fixed at session start and carried by the
/// session state.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub spawn_floor_ms: u32,
    pub item_interval_ms: u32,
    pub boss_countdown_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            spawn_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            item_interval_ms: crate::entities::ITEM_SPAWN_INTERVAL_MS,
            boss_countdown_ms: crate::entities::BOSS_COUNTDOWN_MS,
        }
    }
}

// ── On-disk configuration ────────────────────────────────────────────────────

/// Runtime-tunable settings read from `skyraid.toml` next to the binary.
///
/// Every field defaults to the compiled constant, so a minimal file can
/// override just the values you care about.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pre-selected menu difficulty: "easy", "normal" or "hard".
    pub difficulty: String,
    pub spawn_interval_floor_ms: u32,
    pub item_spawn_interval_ms: u32,
    pub boss_countdown_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            difficulty: "normal".to_string(),
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            item_spawn_interval_ms: crate::entities::ITEM_SPAWN_INTERVAL_MS,
            boss_countdown_secs: crate::entities::BOSS_COUNTDOWN_MS / 1000,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Config {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse_or_default(&self.difficulty)
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            spawn_floor_ms: self.spawn_interval_floor_ms.max(1),
            item_interval_ms: self.item_spawn_interval_ms.max(crate::entities::TICK_MS),
            boss_countdown_ms: self.boss_countdown_secs.max(1) * 1000,
        }
    }
}
