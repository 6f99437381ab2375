/// Points granted per second left on the clock.
const TIME_BONUS_PER_SEC: i64 = 10;
/// Points deducted per operation used.
const OPERATION_PENALTY: i64 = 5;
/// Points granted per level in the end-of-round bonus.
const LEVEL_BONUS_PER_LEVEL: i64 = 100;

/// Score for a round given remaining time and operations spent.
///
/// The base is `time_left_secs * 10 - operations_used * 5`, floored at zero
/// before any bonus so heavy operation use can never push the total negative.
/// Pass `Some(level)` for the end-of-round score, which adds `level * 100`;
/// `None` computes the live in-round score.
pub fn round_score(time_left_secs: u32, operations_used: u32, level_bonus: Option<u32>) -> u32 {
    let base = (i64::from(time_left_secs) * TIME_BONUS_PER_SEC
        - i64::from(operations_used) * OPERATION_PENALTY)
        .max(0);
    let bonus = level_bonus.map_or(0, |level| i64::from(level) * LEVEL_BONUS_PER_LEVEL);
    (base + bonus) as u32
}
