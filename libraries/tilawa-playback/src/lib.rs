//! Tilawa Player - Playback
//!
//! Platform-agnostic verse playback with repeat modes.
//!
//! The controller owns a [`MediaElement`] and reacts to its lifecycle
//! events. After each verse ends it consults the repeat policy and either
//! replays the verse, advances through the [`NavigationHost`], wraps back to
//! the start of the repeated unit after a delay, or stops. Delays go through
//! a host [`Scheduler`]; stale timers are recognized by their ticket and
//! ignored.
//!
//! # Repeat modes
//!
//! - `Off`: recite forward until navigation is exhausted
//! - `Single`: the current verse, `repeat_each` times per cycle
//! - `Range`: verses `start..=end` of the surah
//! - `Surah`: the whole surah
//!
//! Each mode repeats its unit `play_count` times.
//!
//! # Example
//!
//! ```rust
//! use tilawa_playback::policy::{decide, RepeatAction, RepeatProgress};
//! use tilawa_playback::{RepeatConfiguration, RepeatMode};
//!
//! let config = RepeatConfiguration {
//!     mode: RepeatMode::Single,
//!     repeat_each: 2,
//!     ..RepeatConfiguration::default()
//! };
//!
//! let progress = RepeatProgress::initial(&config);
//! let decision = decide(&config, progress, 1);
//! assert_eq!(decision.action, RepeatAction::Replay);
//!
//! let decision = decide(&config, decision.progress, 1);
//! assert_eq!(decision.action, RepeatAction::Stop);
//! ```

pub mod controller;
pub mod error;
pub mod events;
pub mod media;
pub mod navigation;
pub mod player;
pub mod policy;
pub mod scheduler;
pub mod settings;
pub mod timing;
pub mod types;
pub mod visibility;

pub use controller::{PlaybackController, DEFAULT_ADVANCE_TIMEOUT};
pub use error::{ConfigError, MediaError, PlaybackError, Result, WHOLE_NUMBERS_ONLY};
pub use events::{FinishReason, PlayerEvent};
pub use media::{MediaElement, MediaEvent};
pub use navigation::{FixedTrack, NavigationHost};
pub use player::AudioPlayer;
pub use policy::{RepeatAction, RepeatDecision, RepeatProgress};
pub use scheduler::{Scheduler, TimerKind, TimerTicket};
pub use settings::{RepeatDraft, RepeatSettings};
pub use timing::{format_time, NowPlaying, TimingEngine, TimingSnapshot};
pub use types::{Direction, PlaybackState, RepeatConfiguration, RepeatMode};
pub use visibility::PlayerVisibility;
