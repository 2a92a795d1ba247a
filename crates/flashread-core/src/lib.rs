//! RSVP reading engine for a rendered-page host.
//!
//! The host (a browser-side renderer, or the demo binary) mounts a styled
//! content tree and exposes it through [`content::ContentRegion`] plus the
//! navigation surface in [`content::PageNavigator`]. This crate walks the
//! visible slice of that tree into an ordered [`extract::WordSequence`],
//! times each word from a words-per-minute rate, and drives playback through
//! the tick-based state machine in [`player`].
//!
//! Nothing here owns a timer or a thread: the host calls
//! [`player::RsvpPlayer::tick`] with a monotonic millisecond clock and all
//! deadlines live inside the playback phase, so tearing the player down
//! cannot leave a stray tick behind.

#![cfg_attr(not(test), no_std)]

pub mod content;
pub mod extract;
pub mod orp;
pub mod player;
pub mod settings;
pub mod timing;

pub use content::{Bounds, ContentRegion, DocId, NodeId, NodeKind, PageNavigator, ResolvedMarker};
pub use extract::{ExtractError, SourceRef, WordSequence, WordToken, extract_visible};
pub use player::{DisplayWord, PlaybackEvent, RsvpPlayer, TickResult};
pub use timing::{WPM_MAX, WPM_MIN, WPM_UI_MAX, word_delay_ms};
