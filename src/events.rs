/// Discrete cues the core surfaces to the rendering/audio side.
///
/// The simulation never draws or beeps; it pushes an event and the frontend
/// decides what that looks or sounds like.  Events are rebuilt on every tick
/// and drained by the caller, so a cue fires exactly once.

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    GameStart,
    ItemCollected,
    /// Barrier came up with full charges (power reached 5, or re-armed).
    BarrierActivated,
    StageAdvanced { stage: u32 },
    /// Countdown expired; a boss is entering the field.
    BossWarning,
    /// The boss is winding up a shot.
    BossTelegraph,
    BossDefeated,
    PlayerDied,
}
