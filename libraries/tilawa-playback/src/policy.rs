//! Repeat policy
//!
//! Pure decision functions consulted each time a verse finishes. They take
//! the current configuration and progress counters by value and return the
//! action to execute together with the updated counters, so they can be
//! tested without media elements or timers.
//!
//! Counters use "remaining" semantics: a value of 1 means the current play
//! (or cycle) is the last one.

use crate::types::{Direction, RepeatConfiguration, RepeatMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Progress through the configured repeat unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatProgress {
    /// Plays left for the current verse in this cycle (including the current one)
    pub verses_remaining_in_cycle: u32,

    /// Cycles left (including the current one)
    pub cycles_remaining: u32,
}

impl RepeatProgress {
    /// Fresh counters for a configuration
    pub fn initial(config: &RepeatConfiguration) -> Self {
        Self {
            verses_remaining_in_cycle: config.repeat_each,
            cycles_remaining: config.play_count,
        }
    }
}

/// Action the controller executes after a verse ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RepeatAction {
    /// Seek to 0 and play the same verse again
    Replay,

    /// Move to the adjacent verse
    Advance { direction: Direction },

    /// After `delay`, move back `steps` verses and resume
    Wrap { steps: u32, delay: Duration },

    /// No more repeats
    Stop,
}

/// Policy output: action plus updated counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatDecision {
    pub action: RepeatAction,
    pub progress: RepeatProgress,
}

impl RepeatDecision {
    fn new(action: RepeatAction, progress: RepeatProgress) -> Self {
        Self { action, progress }
    }
}

/// Inclusive verse range repeated in range mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub start: u32,
    pub end: u32,
}

/// Repeat the current verse `repeat_each` times per cycle
pub fn handle_single_repeat(progress: RepeatProgress, repeat_each: u32) -> RepeatDecision {
    let mut next = progress;

    if progress.verses_remaining_in_cycle > 1 {
        next.verses_remaining_in_cycle -= 1;
        return RepeatDecision::new(RepeatAction::Replay, next);
    }

    if progress.cycles_remaining > 1 {
        next.cycles_remaining -= 1;
        next.verses_remaining_in_cycle = repeat_each;
        return RepeatDecision::new(RepeatAction::Replay, next);
    }

    RepeatDecision::new(RepeatAction::Stop, next)
}

/// Traverse `bounds`, wrapping back to its start after `delay` between cycles
///
/// A position past `end` (the user navigated out of the range) is treated
/// as exhausting the range; the wrap then walks back to `start` from there.
pub fn handle_range_repeat(
    progress: RepeatProgress,
    bounds: RangeBounds,
    current_position: u32,
    repeat_each: u32,
    delay: Duration,
) -> RepeatDecision {
    let mut next = progress;

    if progress.verses_remaining_in_cycle > 1 {
        next.verses_remaining_in_cycle -= 1;
        return RepeatDecision::new(RepeatAction::Replay, next);
    }

    next.verses_remaining_in_cycle = repeat_each;

    if current_position < bounds.end {
        return RepeatDecision::new(
            RepeatAction::Advance {
                direction: Direction::Next,
            },
            next,
        );
    }

    if progress.cycles_remaining > 1 {
        next.cycles_remaining -= 1;
        let steps = current_position.saturating_sub(bounds.start);
        return RepeatDecision::new(RepeatAction::Wrap { steps, delay }, next);
    }

    RepeatDecision::new(RepeatAction::Stop, next)
}

/// Traverse the whole surah via navigation only
///
/// The surah's bounds are unknown here: the controller advances until
/// `on_next` reports `false` and then consults [`handle_surah_boundary`].
pub fn handle_surah_repeat(progress: RepeatProgress, repeat_each: u32) -> RepeatDecision {
    let mut next = progress;

    if progress.verses_remaining_in_cycle > 1 {
        next.verses_remaining_in_cycle -= 1;
        return RepeatDecision::new(RepeatAction::Replay, next);
    }

    next.verses_remaining_in_cycle = repeat_each;
    RepeatDecision::new(
        RepeatAction::Advance {
            direction: Direction::Next,
        },
        next,
    )
}

/// Decide what happens once navigation reports the end of the surah
///
/// `current_position` is the ayah that ended the surah. The wrap walks back
/// to verse 1 wherever the session started.
pub fn handle_surah_boundary(
    progress: RepeatProgress,
    current_position: u32,
    delay: Duration,
) -> RepeatDecision {
    let mut next = progress;

    if progress.cycles_remaining > 1 {
        next.cycles_remaining -= 1;
        return RepeatDecision::new(
            RepeatAction::Wrap {
                steps: current_position.saturating_sub(1),
                delay,
            },
            next,
        );
    }

    RepeatDecision::new(RepeatAction::Stop, next)
}

/// Repeat off: keep reciting forward until navigation is exhausted
pub fn handle_continuous_play(progress: RepeatProgress) -> RepeatDecision {
    RepeatDecision::new(
        RepeatAction::Advance {
            direction: Direction::Next,
        },
        progress,
    )
}

/// Dispatch to the procedure for `config.mode`
///
/// `current_position` is the ayah number of the verse that just ended.
pub fn decide(
    config: &RepeatConfiguration,
    progress: RepeatProgress,
    current_position: u32,
) -> RepeatDecision {
    match config.mode {
        RepeatMode::Off => handle_continuous_play(progress),
        RepeatMode::Single => handle_single_repeat(progress, config.repeat_each),
        RepeatMode::Range => handle_range_repeat(
            progress,
            RangeBounds {
                start: config.start,
                end: config.end,
            },
            current_position,
            config.repeat_each,
            config.delay(),
        ),
        RepeatMode::Surah => handle_surah_repeat(progress, config.repeat_each),
    }
}
