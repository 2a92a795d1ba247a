impl<N: PageNavigator> RsvpPlayer<N> {
    pub fn new(nav: N, settings: PersistedSettings) -> Self {
        let settings = settings.clamped();
        Self {
            nav,
            sequence: WordSequence::new(),
            current_index: 0,
            wpm: settings.wpm,
            training_enabled: settings.training_enabled,
            phase: Phase::Idle,
            events: Deque::new(),
        }
    }

    /// Replaces the loaded sequence wholesale. Any armed deadline dies with
    /// the previous phase.
    pub fn load(&mut self, sequence: WordSequence) {
        self.sequence = sequence;
        self.current_index = 0;
        self.events.clear();
        if self.sequence.is_empty() {
            if self.sequence.stop_index().is_some() {
                // The page opens directly on an illustration: halt so the
                // continue-past affordance still reaches the navigator.
                debug!("rsvp-play: loaded boundary-only page");
                self.phase = Phase::HaltedAtBoundary;
                self.push_event(PlaybackEvent::BoundaryHalted { source: None });
            } else {
                debug!("rsvp-play: loaded empty sequence");
                self.phase = Phase::Empty;
            }
        } else {
            debug!(
                "rsvp-play: loaded words={} stop={:?}",
                self.sequence.len(),
                self.sequence.stop_index()
            );
            self.phase = Phase::Ready;
            self.push_event(PlaybackEvent::WordChanged { index: 0 });
        }
    }

    /// Extracts the host's visible words and loads them. On failure the
    /// previous playback state is left untouched.
    pub fn load_visible<R: ContentRegion>(&mut self, regions: &[R]) -> Result<(), ExtractError> {
        let sequence = extract_visible(&self.nav, regions)?;
        self.load(sequence);
        Ok(())
    }

    pub fn play(&mut self, now_ms: u64) {
        match self.phase {
            Phase::Idle | Phase::Empty => {
                debug!("rsvp-play: play ignored, nothing to read");
            }
            Phase::HaltedAtBoundary => {
                debug!("rsvp-play: play refused at boundary idx={}", self.current_index);
            }
            Phase::Playing { .. } => {}
            Phase::Ready | Phase::Finished => {
                let last = self.sequence.len().saturating_sub(1);
                if self.current_index >= last && self.current_index != 0 {
                    // Replay from the top when play is pressed at the end.
                    self.current_index = 0;
                    self.push_event(PlaybackEvent::WordChanged { index: 0 });
                }
                let next_accel_ms = self
                    .training_enabled
                    .then_some(now_ms + TRAINING_INTERVAL_MS);
                self.phase = Phase::Playing {
                    next_word_ms: now_ms + self.current_delay_ms() as u64,
                    next_accel_ms,
                };
                debug!(
                    "rsvp-play: playing idx={} wpm={} training={}",
                    self.current_index, self.wpm, self.training_enabled
                );
            }
        }
    }

    /// Idempotent; also disarms the training cadence.
    pub fn pause(&mut self) {
        if matches!(self.phase, Phase::Playing { .. }) {
            self.phase = Phase::Ready;
            debug!("rsvp-play: paused idx={}", self.current_index);
        }
    }

    pub fn skip_back(&mut self, words: usize, now_ms: u64) {
        if !self.has_words() {
            return;
        }
        self.move_to(self.current_index.saturating_sub(words), now_ms);
    }

    /// Never advances past the word before an image boundary.
    pub fn skip_forward(&mut self, words: usize, now_ms: u64) {
        if !self.has_words() {
            return;
        }
        let max = self.sequence.last_playable_index().unwrap_or(0);
        self.move_to(self.current_index.saturating_add(words).min(max), now_ms);
    }

    /// Direct scrub, clamped to the sequence.
    pub fn seek(&mut self, index: usize, now_ms: u64) {
        if !self.has_words() {
            return;
        }
        // A boundary-only page halts with zero words; nothing to scrub.
        let Some(last) = self.sequence.len().checked_sub(1) else {
            return;
        };
        self.move_to(index.min(last), now_ms);
    }

    pub fn restart(&mut self) {
        if !self.has_words() {
            return;
        }
        self.current_index = 0;
        self.phase = Phase::Ready;
        self.push_event(PlaybackEvent::WordChanged { index: 0 });
        debug!("rsvp-play: restarted");
    }

    /// Clamped to the hard range; a change takes effect on the next word,
    /// never retroactively.
    pub fn set_wpm(&mut self, wpm: u16) {
        self.wpm = wpm.clamp(WPM_MIN, WPM_MAX);
    }

    /// Steps the rate by one notch. Returns whether it changed.
    pub fn step_wpm(&mut self, increase: bool) -> bool {
        let next = if increase {
            self.wpm.saturating_add(WPM_STEP).min(WPM_MAX)
        } else {
            self.wpm.saturating_sub(WPM_STEP).max(WPM_MIN)
        };
        if next != self.wpm {
            self.wpm = next;
            true
        } else {
            false
        }
    }

    pub fn set_training(&mut self, enabled: bool, now_ms: u64) {
        self.training_enabled = enabled;
        if let Phase::Playing { next_word_ms, next_accel_ms } = self.phase {
            let next_accel_ms = match (enabled, next_accel_ms) {
                (true, None) => Some(now_ms + TRAINING_INTERVAL_MS),
                (true, armed) => armed,
                (false, _) => None,
            };
            self.phase = Phase::Playing {
                next_word_ms,
                next_accel_ms,
            };
        }
    }

    /// Override after a boundary halt: asks the navigator to advance the
    /// page, then tears down. Playback never resumes into the skipped
    /// boundary.
    pub fn continue_past_boundary(&mut self) {
        if !matches!(self.phase, Phase::HaltedAtBoundary) {
            return;
        }
        match self.nav.request_advance_page() {
            Ok(()) => {
                self.push_event(PlaybackEvent::PageAdvanceRequested);
                self.sequence = WordSequence::new();
                self.current_index = 0;
                self.phase = Phase::Idle;
                debug!("rsvp-play: advancing past boundary");
            }
            Err(_) => {
                warn!("rsvp-play: page advance refused, staying halted");
            }
        }
    }

    /// Mode exit. Emits the final position for a transient highlight and
    /// drops every deadline with the phase.
    pub fn close(&mut self) {
        if matches!(self.phase, Phase::Idle) {
            return;
        }
        let source = self.sequence.get(self.current_index).map(|token| token.source);
        self.push_event(PlaybackEvent::ClosedAtPosition { source });
        self.sequence = WordSequence::new();
        self.current_index = 0;
        self.phase = Phase::Idle;
        debug!("rsvp-play: closed");
    }

    /// Drains one queued notification. Event payloads are positions, not
    /// tokens: a host that lets several `WordChanged` events queue up can
    /// only pull the token for the current index, so tokens should be
    /// pulled via [`RsvpPlayer::current_token`] or
    /// [`RsvpPlayer::display_word`] as each event is drained.
    pub fn pop_event(&mut self) -> Option<PlaybackEvent> {
        self.events.pop_front()
    }

    fn push_event(&mut self, event: PlaybackEvent) {
        if self.events.push_back(event).is_err() {
            // Oldest notification gives way; display state is pull-based
            // so nothing is lost beyond the notification itself.
            let _ = self.events.pop_front();
            let _ = self.events.push_back(event);
        }
    }

    fn has_words(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::Empty)
    }

    fn move_to(&mut self, target: usize, now_ms: u64) {
        if target == self.current_index {
            return;
        }
        self.current_index = target;
        self.push_event(PlaybackEvent::WordChanged { index: target });
        match self.phase {
            Phase::Playing { next_accel_ms, .. } => {
                // The new word gets its own full display window.
                self.phase = Phase::Playing {
                    next_word_ms: now_ms + self.current_delay_ms() as u64,
                    next_accel_ms,
                };
            }
            Phase::Finished => self.phase = Phase::Ready,
            _ => {}
        }
    }
}
