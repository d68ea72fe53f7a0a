//! Scoring module - placement bonus, line-clear points and levels
//!
//! Every successful placement earns a flat bonus; each cleared row or column
//! adds `LINE_CLEAR_POINTS`. Level is derived from the total score alone and
//! is never stepped on its own.

use crate::types::{GameConfig, LEVEL_SCORE_STEP, LINE_CLEAR_POINTS, PLACEMENT_BONUS};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points from cleared lines.
    pub line_clear_score: u32,
    /// Flat placement bonus.
    pub placement_bonus: u32,
    /// Total score after this placement.
    pub score: u32,
    /// Level for the new total.
    pub level: u32,
}

impl ScoreResult {
    /// Points gained by this placement
    pub fn delta(&self) -> u32 {
        self.line_clear_score.saturating_add(self.placement_bonus)
    }
}

/// Scoring constants, normally taken from [`GameConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    pub placement_bonus: u32,
    pub line_clear_points: u32,
    pub level_step: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            placement_bonus: PLACEMENT_BONUS,
            line_clear_points: LINE_CLEAR_POINTS,
            level_step: LEVEL_SCORE_STEP,
        }
    }
}

impl From<&GameConfig> for ScoringRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            placement_bonus: config.placement_bonus,
            line_clear_points: config.line_clear_points,
            level_step: config.level_step,
        }
    }
}

impl ScoringRules {
    /// Points for `lines` cleared rows/columns
    pub fn line_clear_score(&self, lines: u32) -> u32 {
        lines.saturating_mul(self.line_clear_points)
    }

    /// Level for a total score (1-based)
    pub fn level(&self, score: u32) -> u32 {
        score / self.level_step.max(1) + 1
    }

    /// Add the placement bonus and line-clear points to `current`
    pub fn apply_placement(&self, current: u32, line_clear_score: u32) -> ScoreResult {
        let score = current
            .saturating_add(line_clear_score)
            .saturating_add(self.placement_bonus);
        ScoreResult {
            line_clear_score,
            placement_bonus: self.placement_bonus,
            score,
            level: self.level(score),
        }
    }
}

/// Level for a total score with the default rules
pub fn calculate_level(score: u32) -> u32 {
    ScoringRules::default().level(score)
}

/// Score after one placement with the default rules
///
/// ```
/// use block_blast_core::apply_placement_score;
///
/// let result = apply_placement_score(490, 0);
/// assert_eq!((result.score, result.level), (500, 2));
/// ```
pub fn apply_placement_score(current: u32, line_clear_score: u32) -> ScoreResult {
    ScoringRules::default().apply_placement(current, line_clear_score)
}
