//! Optimal Recognition Point placement for single-word display.

/// Char index the host should pin at the fixation point.
///
/// Buckets by letter count, skipping punctuation when choosing the target
/// letter; a word with no letters anchors at its middle char. Purely
/// presentational: playback and timing never consult this.
pub fn orp_char_index(word: &str) -> usize {
    let total_chars = word.chars().count();
    if total_chars == 0 {
        return 0;
    }

    let letter_chars = word.chars().filter(|c| is_orp_letter(*c)).count();
    if letter_chars == 0 {
        return (total_chars - 1) / 2;
    }

    let target_letter = orp_letter_index(letter_chars).min(letter_chars - 1);
    let mut seen_letters = 0usize;
    for (char_index, ch) in word.chars().enumerate() {
        if is_orp_letter(ch) {
            if seen_letters == target_letter {
                return char_index;
            }
            seen_letters += 1;
        }
    }
    0
}

fn orp_letter_index(letter_count: usize) -> usize {
    match letter_count {
        0..=1 => 0,
        2..=3 => 1,
        4..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

fn is_orp_letter(c: char) -> bool {
    c.is_alphanumeric()
}
