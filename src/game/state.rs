use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::GameError;

use super::pattern;
use super::report::{Command, EditReport, RoundSummary, SearchReport, Snapshot, TickReport, Update};
use super::score;
use super::sequence::{DigitRange, SlotSequence};

/// Ticks at or below this many remaining seconds set `TickReport::low_time`.
pub const LOW_TIME_WARNING_SECS: u32 = 10;

/// Reference point for the summary's "time taken" figure.
const TIME_TAKEN_REFERENCE_SECS: i64 = 60;

/// Tunable game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of slots in the sequence.
    pub capacity: usize,
    /// Countdown budget for every round, in seconds.
    pub time_budget_secs: u32,
    /// Highest level; winning it leaves restart as the only exit.
    pub max_level: u32,
    /// Inclusive range of digit values slots and patterns may hold.
    pub value_range: DigitRange,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            capacity: 8,
            time_budget_secs: 300,
            max_level: 3,
            value_range: DigitRange::default(),
        }
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The target pattern appeared contiguously in the compacted sequence.
    Won,
    /// The countdown reached zero first.
    Lost,
}

/// The playable game: one round at a time, levels 1 through `max_level`.
///
/// A round is active while `outcome` is `None`. Insert, delete, search, and
/// sequence reset require an active round; winning freezes the clock and the
/// sequence until the caller advances or restarts. All mutating operations
/// validate first and leave the state untouched on error.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    sequence: SlotSequence,
    target: Vec<u8>,
    level: u32,
    score: u32,
    operations_used: u32,
    time_left_secs: u32,
    outcome: Option<RoundOutcome>,
    rng: StdRng,
}

impl Game {
    /// Start a new game at level 1 with OS-seeded randomness.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Start a new game with a fixed seed, for reproducible target patterns.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let target = pattern::generate_target(&mut rng, 1, config.value_range);
        Game {
            sequence: SlotSequence::new(config.capacity, config.value_range),
            target,
            level: 1,
            score: 0,
            operations_used: 0,
            time_left_secs: config.time_budget_secs,
            outcome: None,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    pub fn sequence(&self) -> &SlotSequence {
        &self.sequence
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    /// Score the round would settle at if it ended now, without the level
    /// bonus.
    pub fn live_score(&self) -> u32 {
        score::round_score(self.time_left_secs, self.operations_used, None)
    }

    /// Insert `value` at slot `index`. Counts one operation and re-checks the
    /// win condition on success.
    pub fn apply_insert(&mut self, index: i32, value: i32) -> Result<EditReport, GameError> {
        self.require_active()?;
        self.sequence.insert(index, value)?;
        Ok(self.after_edit())
    }

    /// Delete the digit at slot `index`. Counts one operation and re-checks
    /// the win condition on success.
    pub fn apply_delete(&mut self, index: i32) -> Result<EditReport, GameError> {
        self.require_active()?;
        self.sequence.delete(index)?;
        Ok(self.after_edit())
    }

    /// Search the compacted sequence for `pattern`.
    ///
    /// Counts one operation whether or not the pattern is found. A successful
    /// search never ends the round; only insert and delete can win.
    pub fn apply_search(&mut self, pattern_digits: &[i32]) -> Result<SearchReport, GameError> {
        self.require_active()?;
        let needle = self.validate_pattern(pattern_digits)?;
        self.operations_used += 1;
        let (steps, at_index) = pattern::scan(&self.sequence, &needle);
        Ok(SearchReport {
            found: at_index.is_some(),
            at_index,
            steps,
            operations_used: self.operations_used,
            live_score: self.live_score(),
        })
    }

    /// Advance the countdown by one second. Once the round has ended this is
    /// a no-op; the clock freezes at whatever was left.
    pub fn tick(&mut self) -> TickReport {
        if self.outcome.is_none() {
            self.time_left_secs = self.time_left_secs.saturating_sub(1);
            if self.time_left_secs == 0 {
                self.outcome = Some(RoundOutcome::Lost);
            }
        }
        TickReport {
            time_left_secs: self.time_left_secs,
            round_ended: self.outcome.is_some(),
            outcome: self.outcome,
            low_time: self.outcome.is_none() && self.time_left_secs <= LOW_TIME_WARNING_SECS,
        }
    }

    /// Bank the won round's score and start the next level with a fresh
    /// sequence, target, timer, and operation count.
    pub fn advance_level(&mut self) -> Result<Snapshot, GameError> {
        if self.outcome != Some(RoundOutcome::Won) || self.level >= self.config.max_level {
            return Err(GameError::CannotAdvance);
        }
        self.score += score::round_score(
            self.time_left_secs,
            self.operations_used,
            Some(self.level),
        );
        self.level += 1;
        self.begin_round();
        Ok(self.snapshot())
    }

    /// Drop back to level 1 with a zero score. Allowed at any point, mid-round
    /// included.
    pub fn restart(&mut self) -> Snapshot {
        self.level = 1;
        self.score = 0;
        self.begin_round();
        self.snapshot()
    }

    /// Empty the sequence and zero the operation counter without ending the
    /// round. The timer, target pattern, level, and banked score stay put.
    pub fn reset_sequence(&mut self) -> Result<EditReport, GameError> {
        self.require_active()?;
        self.sequence.reset();
        self.operations_used = 0;
        Ok(EditReport {
            slots: self.sequence.slots().to_vec(),
            operations_used: self.operations_used,
            live_score: self.live_score(),
            outcome: self.outcome,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level: self.level,
            score: self.score,
            operations_used: self.operations_used,
            time_left_secs: self.time_left_secs,
            active: self.outcome.is_none(),
            target_pattern: self.target.clone(),
            slots: self.sequence.slots().to_vec(),
        }
    }

    /// End-of-round details, or `None` while the round is active.
    pub fn round_summary(&self) -> Option<RoundSummary> {
        let outcome = self.outcome?;
        Some(RoundSummary {
            outcome,
            level: self.level,
            time_taken_secs: TIME_TAKEN_REFERENCE_SECS - i64::from(self.time_left_secs),
            operations_used: self.operations_used,
            final_score: score::round_score(
                self.time_left_secs,
                self.operations_used,
                Some(self.level),
            ),
            can_advance: outcome == RoundOutcome::Won && self.level < self.config.max_level,
        })
    }

    /// Uniform dispatch for callers that route typed commands.
    pub fn apply(&mut self, command: &Command) -> Result<Update, GameError> {
        match command {
            Command::Insert { index, value } => {
                self.apply_insert(*index, *value).map(Update::Edited)
            }
            Command::Delete { index } => self.apply_delete(*index).map(Update::Edited),
            Command::Search { pattern } => self.apply_search(pattern).map(Update::Searched),
            Command::Tick => Ok(Update::Ticked(self.tick())),
            Command::Advance => self.advance_level().map(Update::NewRound),
            Command::Restart => Ok(Update::NewRound(self.restart())),
            Command::ResetSequence => self.reset_sequence().map(Update::Edited),
        }
    }

    fn require_active(&self) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::RoundOver);
        }
        Ok(())
    }

    /// Count the operation, refresh the win check, and describe the result.
    fn after_edit(&mut self) -> EditReport {
        self.operations_used += 1;
        if pattern::find(&self.sequence.compact(), &self.target).is_some() {
            self.outcome = Some(RoundOutcome::Won);
        }
        EditReport {
            slots: self.sequence.slots().to_vec(),
            operations_used: self.operations_used,
            live_score: self.live_score(),
            outcome: self.outcome,
        }
    }

    fn validate_pattern(&self, digits: &[i32]) -> Result<Vec<u8>, GameError> {
        if digits.is_empty() {
            return Err(GameError::InvalidPattern("pattern is empty".to_string()));
        }
        let range = self.config.value_range;
        digits
            .iter()
            .map(|&digit| {
                if !range.contains(digit) {
                    return Err(GameError::InvalidPattern(format!(
                        "digit {} is outside the range {}-{}",
                        digit, range.min, range.max
                    )));
                }
                Ok(digit as u8)
            })
            .collect()
    }

    fn begin_round(&mut self) {
        self.sequence.reset();
        self.target = pattern::generate_target(&mut self.rng, self.level, self.config.value_range);
        self.operations_used = 0;
        self.time_left_secs = self.config.time_budget_secs;
        self.outcome = None;
    }
}
