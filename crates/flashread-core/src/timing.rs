//! Per-word display timing derived from a words-per-minute rate.

/// Hard lower bound for the playback rate.
pub const WPM_MIN: u16 = 100;
/// Hard upper bound; only training mode climbs this high.
pub const WPM_MAX: u16 = 1_500;
/// Ceiling hosts should give the user-facing rate slider.
pub const WPM_UI_MAX: u16 = 1_000;

const LONG_WORD_CHARS: usize = 8;

/// Milliseconds the given word stays on screen at `wpm`.
///
/// Base delay is `round(60000 / wpm)`; the first matching modifier wins:
/// sentence-ending punctuation ×2.5, clause punctuation ×1.5, long word
/// ×1.2. Always at least 1 ms.
pub fn word_delay_ms(word: &str, wpm: u16) -> u32 {
    let wpm = wpm.clamp(WPM_MIN, WPM_MAX) as u32;
    let base = (60_000 + wpm / 2) / wpm;

    // Modifier in tenths so the math stays integral.
    let tenths = if word.ends_with(['.', '?', '!']) {
        25
    } else if word.ends_with([',', ';', ':']) {
        15
    } else if word.chars().count() >= LONG_WORD_CHARS {
        12
    } else {
        10
    };

    ((base * tenths + 5) / 10).max(1)
}
