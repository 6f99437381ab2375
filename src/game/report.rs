use super::pattern::ScanStep;
use super::state::RoundOutcome;

/// Complete read-only view of the game, enough to draw a whole frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub level: u32,
    /// Total score banked across completed rounds.
    pub score: u32,
    pub operations_used: u32,
    pub time_left_secs: u32,
    /// False once the round has been won or lost.
    pub active: bool,
    pub target_pattern: Vec<u8>,
    pub slots: Vec<Option<u8>>,
}

/// Result of a sequence-mutating operation (insert, delete, sequence reset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReport {
    pub slots: Vec<Option<u8>>,
    pub operations_used: u32,
    pub live_score: u32,
    /// Set when this edit ended the round.
    pub outcome: Option<RoundOutcome>,
}

/// Result of a player-initiated pattern search.
///
/// The search itself is instantaneous; `steps` is the precomputed trace a
/// presentation layer can replay with its own timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub found: bool,
    /// Offset of the first match in the compacted view.
    pub at_index: Option<usize>,
    /// Every attempted offset in order, up to and including the first match.
    pub steps: Vec<ScanStep>,
    pub operations_used: u32,
    pub live_score: u32,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub time_left_secs: u32,
    pub round_ended: bool,
    pub outcome: Option<RoundOutcome>,
    /// True while the round is active and the clock is at or below the
    /// warning threshold.
    pub low_time: bool,
}

/// End-of-round details for the summary screen. Available only once the
/// round has been won or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    pub level: u32,
    /// Seconds shown as "time taken", measured against a fixed 60-second
    /// reference regardless of the round budget. Negative when more than a
    /// minute was left on the clock; kept as-is from the original scoreboard.
    pub time_taken_secs: i64,
    pub operations_used: u32,
    /// Round score including the level bonus, won or lost.
    pub final_score: u32,
    pub can_advance: bool,
}

/// A typed request from the presentation layer.
///
/// Translating raw input into commands is the caller's job; the engine only
/// ever sees well-formed requests and answers with an [`Update`] or a
/// validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { index: i32, value: i32 },
    Delete { index: i32 },
    Search { pattern: Vec<i32> },
    Tick,
    Advance,
    Restart,
    ResetSequence,
}

/// A typed answer to a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Edited(EditReport),
    Searched(SearchReport),
    Ticked(TickReport),
    NewRound(Snapshot),
}
