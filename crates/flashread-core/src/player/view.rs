/// Pull-style view of the word under the reader's eyes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayWord<'a> {
    pub text: &'a str,
    /// Char index to pin at the fixation point.
    pub orp_index: usize,
    pub index: usize,
    pub total: usize,
}

impl<N: PageNavigator> RsvpPlayer<N> {
    pub fn display_word(&self) -> Option<DisplayWord<'_>> {
        let token = self.sequence.get(self.current_index)?;
        Some(DisplayWord {
            text: token.text.as_str(),
            orp_index: orp_char_index(token.text.as_str()),
            index: self.current_index,
            total: self.sequence.len(),
        })
    }

    pub fn current_token(&self) -> Option<&WordToken> {
        self.sequence.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    pub fn training_enabled(&self) -> bool {
        self.training_enabled
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing { .. })
    }

    pub fn halted_at_boundary(&self) -> bool {
        matches!(self.phase, Phase::HaltedAtBoundary)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Whether the last load produced zero words ("no readable text").
    pub fn loaded_empty(&self) -> bool {
        matches!(self.phase, Phase::Empty)
    }

    pub fn navigator(&self) -> &N {
        &self.nav
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.nav
    }
}
