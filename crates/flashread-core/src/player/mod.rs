//! Tick-driven playback state machine for an extracted word sequence.

use heapless::Deque;
use log::{debug, warn};

use crate::{
    content::{ContentRegion, PageNavigator},
    extract::{ExtractError, SourceRef, WordSequence, WordToken, extract_visible},
    orp::orp_char_index,
    settings::PersistedSettings,
    timing::{WPM_MAX, WPM_MIN, word_delay_ms},
};

/// Words a skip command jumps by default.
pub const DEFAULT_SKIP_WORDS: usize = 10;
/// Training mode raises the rate on this cadence while playing.
pub const TRAINING_INTERVAL_MS: u64 = 10_000;
pub const TRAINING_STEP_WPM: u16 = 10;

const WPM_STEP: u16 = 10;
const EVENT_QUEUE_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Playback notifications, drained by the host with
/// [`RsvpPlayer::pop_event`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackEvent {
    WordChanged { index: usize },
    /// Auto-paused just before an image; carries the last word's source so
    /// the host can highlight where reading stopped. `None` when the page
    /// opens directly on the boundary and there is no last word.
    BoundaryHalted { source: Option<SourceRef> },
    Finished,
    /// Mode exit; the host applies a transient highlight at this position.
    /// `None` when nothing was loaded.
    ClosedAtPosition { source: Option<SourceRef> },
    /// The reader chose to continue past a boundary and the navigator
    /// accepted the page advance.
    PageAdvanceRequested,
}

/// Deadlines live inside `Playing`, so replacing the phase is the timer
/// cancellation: no tick can fire for a torn-down state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Idle,
    /// A zero-word sequence was loaded. Reportable ("no readable text"),
    /// distinct from `Idle`; playback commands no-op here.
    Empty,
    Ready,
    Playing {
        next_word_ms: u64,
        next_accel_ms: Option<u64>,
    },
    HaltedAtBoundary,
    Finished,
}

/// RSVP playback over one extracted [`WordSequence`].
///
/// Owns the navigation half of the rendering collaborator; the host drives
/// it with commands plus a monotonic `tick(now_ms)` and pulls display state
/// through [`RsvpPlayer::display_word`].
pub struct RsvpPlayer<N: PageNavigator> {
    nav: N,
    sequence: WordSequence,
    current_index: usize,
    wpm: u16,
    training_enabled: bool,
    phase: Phase,
    events: Deque<PlaybackEvent, EVENT_QUEUE_DEPTH>,
}

include!("commands.rs");
include!("runtime.rs");
include!("view.rs");

#[cfg(test)]
mod tests;
