use std::time::Duration;

use thiserror::Error;

use crate::session::ScoringRules;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("hit points must be > 0")]
    InvalidHitPoints,

    #[error("drag threshold must be a positive number of pixels, got {0}")]
    InvalidDragThreshold(f64),

    #[error("preview threshold must be >= 0 and below the drag threshold, got {0}")]
    InvalidPreviewThreshold(f64),

    #[error("fly-out distance must be a positive number of pixels, got {0}")]
    InvalidFlyOutDistance(f64),

    #[error("settle delay must be between 1 and 10000 ms, got {0}")]
    InvalidSettleDelay(u64),

    #[error("history capacity must be > 0")]
    InvalidHistoryCapacity,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tuning knobs of the quiz arena.
///
/// None of these are product rules; they are the values that "feel right" for
/// the swipe interaction and can be overridden at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    hit_points: u32,
    miss_penalty: u32,
    drag_threshold_px: f64,
    preview_threshold_px: f64,
    fly_out_distance_px: f64,
    settle_delay_ms: u64,
    history_capacity: usize,
    upcoming_cards: usize,
    hot_streak: u32,
}

impl QuizSettings {
    /// Default arcade tuning:
    /// - +2 per correct answer, -1 per miss (score floored at zero)
    /// - 120 px drag to commit, live preview past 60 px
    /// - 240 ms settle delay before the next card
    /// - last 5 answers kept, 2 cards stacked behind the active one
    #[must_use]
    pub fn default_arcade() -> Self {
        Self {
            hit_points: 2,
            miss_penalty: 1,
            drag_threshold_px: 120.0,
            preview_threshold_px: 60.0,
            fly_out_distance_px: 520.0,
            settle_delay_ms: 240,
            history_capacity: 5,
            upcoming_cards: 2,
            hot_streak: 3,
        }
    }

    /// # Errors
    ///
    /// Returns the first `SettingsError` describing an out-of-range value.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hit_points: u32,
        miss_penalty: u32,
        drag_threshold_px: f64,
        preview_threshold_px: f64,
        fly_out_distance_px: f64,
        settle_delay_ms: u64,
        history_capacity: usize,
        upcoming_cards: usize,
        hot_streak: u32,
    ) -> Result<Self, SettingsError> {
        if hit_points == 0 {
            return Err(SettingsError::InvalidHitPoints);
        }
        if !drag_threshold_px.is_finite() || drag_threshold_px <= 0.0 {
            return Err(SettingsError::InvalidDragThreshold(drag_threshold_px));
        }
        if !preview_threshold_px.is_finite()
            || preview_threshold_px < 0.0
            || preview_threshold_px >= drag_threshold_px
        {
            return Err(SettingsError::InvalidPreviewThreshold(preview_threshold_px));
        }
        if !fly_out_distance_px.is_finite() || fly_out_distance_px <= 0.0 {
            return Err(SettingsError::InvalidFlyOutDistance(fly_out_distance_px));
        }
        if !(1..=10_000).contains(&settle_delay_ms) {
            return Err(SettingsError::InvalidSettleDelay(settle_delay_ms));
        }
        if history_capacity == 0 {
            return Err(SettingsError::InvalidHistoryCapacity);
        }

        Ok(Self {
            hit_points,
            miss_penalty,
            drag_threshold_px,
            preview_threshold_px,
            fly_out_distance_px,
            settle_delay_ms,
            history_capacity,
            upcoming_cards,
            hot_streak,
        })
    }

    /// Returns a copy with a different settle delay.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSettleDelay` when out of range.
    pub fn with_settle_delay_ms(self, settle_delay_ms: u64) -> Result<Self, SettingsError> {
        Self::new(
            self.hit_points,
            self.miss_penalty,
            self.drag_threshold_px,
            self.preview_threshold_px,
            self.fly_out_distance_px,
            settle_delay_ms,
            self.history_capacity,
            self.upcoming_cards,
            self.hot_streak,
        )
    }

    /// Returns a copy with a different drag threshold. The preview threshold is
    /// kept at half the drag threshold.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidDragThreshold` for non-positive values.
    pub fn with_drag_threshold_px(self, drag_threshold_px: f64) -> Result<Self, SettingsError> {
        Self::new(
            self.hit_points,
            self.miss_penalty,
            drag_threshold_px,
            drag_threshold_px / 2.0,
            self.fly_out_distance_px,
            self.settle_delay_ms,
            self.history_capacity,
            self.upcoming_cards,
            self.hot_streak,
        )
    }

    #[must_use]
    pub fn scoring(&self) -> ScoringRules {
        ScoringRules::new(self.hit_points, self.miss_penalty)
    }

    #[must_use]
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    #[must_use]
    pub fn miss_penalty(&self) -> u32 {
        self.miss_penalty
    }

    #[must_use]
    pub fn drag_threshold_px(&self) -> f64 {
        self.drag_threshold_px
    }

    #[must_use]
    pub fn preview_threshold_px(&self) -> f64 {
        self.preview_threshold_px
    }

    #[must_use]
    pub fn fly_out_distance_px(&self) -> f64 {
        self.fly_out_distance_px
    }

    #[must_use]
    pub fn settle_delay_ms(&self) -> u64 {
        self.settle_delay_ms
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    #[must_use]
    pub fn upcoming_cards(&self) -> usize {
        self.upcoming_cards
    }

    /// Streak length from which the HUD celebrates.
    #[must_use]
    pub fn hot_streak(&self) -> u32 {
        self.hot_streak
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::default_arcade()
    }
}
