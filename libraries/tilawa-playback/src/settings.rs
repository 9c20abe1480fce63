//! Repeat settings validation
//!
//! The settings surface submits raw numbers (possibly fractional) as a
//! [`RepeatDraft`]. Explicit applies reject anything that is not a whole
//! number instead of rounding it; contexts that may auto-adjust (first open
//! of the repeat dialog) clamp the range with [`adjust_range`].

use crate::error::ConfigError;
use crate::types::{RepeatConfiguration, RepeatMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Raw repeat settings as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatDraft {
    pub mode: RepeatMode,
    pub start: f64,
    pub end: f64,
    pub play_count: f64,
    pub repeat_each: f64,
    pub delay_ms: f64,
}

impl From<RepeatConfiguration> for RepeatDraft {
    fn from(config: RepeatConfiguration) -> Self {
        Self {
            mode: config.mode,
            start: f64::from(config.start),
            end: f64::from(config.end),
            play_count: f64::from(config.play_count),
            repeat_each: f64::from(config.repeat_each),
            delay_ms: f64::from(config.delay_ms),
        }
    }
}

impl Default for RepeatDraft {
    fn default() -> Self {
        RepeatConfiguration::default().into()
    }
}

impl RepeatDraft {
    /// Clamp the range for auto-adjusting contexts
    ///
    /// Returns the adjusted draft and whether anything changed. When
    /// `verse_count` is known both ends are also bounded by it.
    pub fn adjusted(self, verse_count: Option<u32>) -> (Self, bool) {
        let mut range = adjust_range(self.start as i64, self.end as i64);
        if let Some(count) = verse_count {
            range = clamp_to_verse_count(range, count);
        }

        let adjusted = range.adjusted
            || f64::from(range.start) != self.start
            || f64::from(range.end) != self.end;

        (
            Self {
                start: f64::from(range.start),
                end: f64::from(range.end),
                ..self
            },
            adjusted,
        )
    }
}

/// Result of clamping a verse range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeAdjustment {
    pub start: u32,
    pub end: u32,
    /// Whether either end had to change
    pub adjusted: bool,
}

/// Whether any numeric field of the draft is fractional or non-finite
pub fn has_non_integer_values(draft: &RepeatDraft) -> bool {
    [
        draft.start,
        draft.end,
        draft.play_count,
        draft.repeat_each,
        draft.delay_ms,
    ]
    .iter()
    .any(|value| !value.is_finite() || value.fract() != 0.0)
}

/// Clamp a range to `start >= 1`, `end >= start`
pub fn adjust_range(start: i64, end: i64) -> RangeAdjustment {
    let clamped_start = start.clamp(1, i64::from(u32::MAX));
    let clamped_end = end.clamp(clamped_start, i64::from(u32::MAX));

    RangeAdjustment {
        start: clamped_start as u32,
        end: clamped_end as u32,
        adjusted: clamped_start != start || clamped_end != end,
    }
}

/// Additionally bound both ends of a range by the surah's verse count
pub fn clamp_to_verse_count(range: RangeAdjustment, verse_count: u32) -> RangeAdjustment {
    let count = verse_count.max(1);
    let start = range.start.min(count);
    let end = range.end.clamp(start, count);

    RangeAdjustment {
        start,
        end,
        adjusted: range.adjusted || start != range.start || end != range.end,
    }
}

/// Validate a draft into a configuration, rejecting instead of adjusting
pub fn validate(draft: &RepeatDraft) -> Result<RepeatConfiguration, ConfigError> {
    if has_non_integer_values(draft) {
        return Err(ConfigError::NonInteger);
    }

    let start = whole("start", draft.start, 1)?;
    let end = whole("end", draft.end, 1)?;
    let play_count = whole("play_count", draft.play_count, 1)?;
    let repeat_each = whole("repeat_each", draft.repeat_each, 1)?;
    let delay_ms = whole("delay_ms", draft.delay_ms, 0)?;

    if start > end {
        return Err(ConfigError::InvalidRange { start, end });
    }

    Ok(RepeatConfiguration {
        mode: draft.mode,
        start,
        end,
        play_count,
        repeat_each,
        delay_ms,
    })
}

fn whole(field: &'static str, value: f64, min: u32) -> Result<u32, ConfigError> {
    if value < f64::from(min) || value > f64::from(u32::MAX) {
        return Err(ConfigError::OutOfRange { field, min, value });
    }
    Ok(value as u32)
}

/// Validated repeat settings store
///
/// Single writer: the settings surface. Invalid input keeps the last valid
/// configuration active and records the rejection for inline display.
#[derive(Debug, Clone, Default)]
pub struct RepeatSettings {
    current: RepeatConfiguration,
    error: Option<ConfigError>,
}

impl RepeatSettings {
    /// Create settings starting from the given configuration
    pub fn new(current: RepeatConfiguration) -> Self {
        Self {
            current,
            error: None,
        }
    }

    /// Current valid configuration
    pub fn current(&self) -> &RepeatConfiguration {
        &self.current
    }

    /// Last rejection, if the most recent apply failed
    pub fn error(&self) -> Option<&ConfigError> {
        self.error.as_ref()
    }

    /// Apply a draft
    pub fn apply(&mut self, draft: &RepeatDraft) -> Result<RepeatConfiguration, ConfigError> {
        match validate(draft) {
            Ok(config) => {
                debug!(?config, "Repeat configuration applied");
                self.current = config;
                self.error = None;
                Ok(config)
            }
            Err(e) => {
                warn!(error = %e, ?draft, "Repeat configuration rejected");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Apply the draft produced by `updater` from the current configuration
    pub fn update<F>(&mut self, updater: F) -> Result<RepeatConfiguration, ConfigError>
    where
        F: FnOnce(&RepeatConfiguration) -> RepeatDraft,
    {
        let draft = updater(&self.current);
        self.apply(&draft)
    }

    /// Draft to prefill the settings surface with, range auto-adjusted
    pub fn open_draft(&self, verse_count: Option<u32>) -> (RepeatDraft, bool) {
        RepeatDraft::from(self.current).adjusted(verse_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WHOLE_NUMBERS_ONLY;

    fn draft(start: f64, end: f64) -> RepeatDraft {
        RepeatDraft {
            mode: RepeatMode::Range,
            start,
            end,
            ..RepeatDraft::default()
        }
    }

    #[test]
    fn detects_fractional_values() {
        assert!(has_non_integer_values(&draft(1.5, 3.0)));
        assert!(!has_non_integer_values(&draft(1.0, 3.0)));

        let mut d = draft(1.0, 3.0);
        d.delay_ms = 250.25;
        assert!(has_non_integer_values(&d));

        d.delay_ms = f64::NAN;
        assert!(has_non_integer_values(&d));
    }

    #[test]
    fn adjust_range_clamps_to_one() {
        assert_eq!(
            adjust_range(-1, 0),
            RangeAdjustment {
                start: 1,
                end: 1,
                adjusted: true
            }
        );
    }

    #[test]
    fn adjust_range_raises_end_to_start() {
        let range = adjust_range(5, 2);
        assert_eq!((range.start, range.end, range.adjusted), (5, 5, true));

        let untouched = adjust_range(2, 5);
        assert_eq!((untouched.start, untouched.end, untouched.adjusted), (2, 5, false));
    }

    #[test]
    fn clamp_to_verse_count_bounds_both_ends() {
        let range = clamp_to_verse_count(adjust_range(10, 20), 7);
        assert_eq!((range.start, range.end, range.adjusted), (7, 7, true));

        let range = clamp_to_verse_count(adjust_range(2, 20), 7);
        assert_eq!((range.start, range.end), (2, 7));
    }

    #[test]
    fn validate_rejects_fractional_input_with_message() {
        let err = validate(&draft(1.5, 3.0)).unwrap_err();
        assert_eq!(err, ConfigError::NonInteger);
        assert_eq!(err.to_string(), WHOLE_NUMBERS_ONLY);
    }

    #[test]
    fn validate_rejects_reversed_range() {
        assert_eq!(
            validate(&draft(4.0, 2.0)),
            Err(ConfigError::InvalidRange { start: 4, end: 2 })
        );
    }

    #[test]
    fn validate_rejects_zero_counts() {
        let mut d = draft(1.0, 3.0);
        d.play_count = 0.0;
        assert!(matches!(
            validate(&d),
            Err(ConfigError::OutOfRange {
                field: "play_count",
                ..
            })
        ));

        let mut d = draft(1.0, 3.0);
        d.delay_ms = -1.0;
        assert!(matches!(
            validate(&d),
            Err(ConfigError::OutOfRange {
                field: "delay_ms",
                ..
            })
        ));
    }

    #[test]
    fn rejected_apply_keeps_previous_configuration() {
        let mut settings = RepeatSettings::default();
        let applied = settings.apply(&draft(2.0, 4.0)).unwrap();
        assert_eq!((applied.start, applied.end), (2, 4));

        assert!(settings.apply(&draft(2.5, 4.0)).is_err());
        assert_eq!(settings.current().start, 2);
        assert_eq!(settings.error(), Some(&ConfigError::NonInteger));

        settings
            .update(|current| RepeatDraft {
                end: 6.0,
                ..RepeatDraft::from(*current)
            })
            .unwrap();
        assert_eq!(settings.current().end, 6);
        assert!(settings.error().is_none());
    }

    #[test]
    fn open_draft_auto_adjusts_range() {
        let settings = RepeatSettings::new(RepeatConfiguration {
            start: 3,
            end: 12,
            ..RepeatConfiguration::default()
        });

        let (draft, adjusted) = settings.open_draft(Some(7));
        assert!(adjusted);
        assert_eq!((draft.start, draft.end), (3.0, 7.0));

        let (_, adjusted) = settings.open_draft(None);
        assert!(!adjusted);
    }
}
