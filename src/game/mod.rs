//! Core game engine: slot sequence editing, target pattern generation and
//! matching, scoring, and the round state machine with validated transitions.

mod pattern;
mod report;
mod score;
mod sequence;
mod state;

pub use pattern::{find, scan, target_len, ScanStep, MAX_TARGET_LEN};
pub use report::{
    Command, EditReport, RoundSummary, SearchReport, Snapshot, TickReport, Update,
};
pub use score::round_score;
pub use sequence::{DigitRange, SlotSequence};
pub use state::{Game, GameConfig, RoundOutcome, LOW_TIME_WARNING_SECS};
