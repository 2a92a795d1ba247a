impl<N: PageNavigator> RsvpPlayer<N> {
    /// Advances playback against a monotonic millisecond clock. Cheap to
    /// call at any cadence; everything outside `Playing` is a no-op.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let Phase::Playing {
            next_word_ms,
            mut next_accel_ms,
        } = self.phase
        else {
            return TickResult::NoRender;
        };

        if self.training_enabled
            && let Some(accel_at) = next_accel_ms
            && now_ms >= accel_at
        {
            let next = self.wpm.saturating_add(TRAINING_STEP_WPM).min(WPM_MAX);
            if next != self.wpm {
                self.wpm = next;
                debug!("rsvp-train: wpm={}", next);
            }
            next_accel_ms = Some(accel_at + TRAINING_INTERVAL_MS);
        }

        if now_ms < next_word_ms {
            self.phase = Phase::Playing {
                next_word_ms,
                next_accel_ms,
            };
            return TickResult::NoRender;
        }

        // Halt on the word before the image, before considering an advance.
        if let Some(stop) = self.sequence.stop_index()
            && self.current_index + 1 >= stop
        {
            self.phase = Phase::HaltedAtBoundary;
            let source = self
                .sequence
                .get(self.current_index)
                .map(|token| token.source);
            self.push_event(PlaybackEvent::BoundaryHalted { source });
            debug!("rsvp-play: boundary halt idx={}", self.current_index);
            return TickResult::RenderRequested;
        }

        let last = self.sequence.len().saturating_sub(1);
        if self.current_index >= last {
            self.phase = Phase::Finished;
            self.push_event(PlaybackEvent::Finished);
            debug!("rsvp-play: finished words={}", self.sequence.len());
            return TickResult::RenderRequested;
        }

        self.current_index += 1;
        self.push_event(PlaybackEvent::WordChanged {
            index: self.current_index,
        });
        // Delay is recomputed per word, so a mid-playback WPM change takes
        // effect on the next word, not retroactively.
        self.phase = Phase::Playing {
            next_word_ms: now_ms + self.current_delay_ms() as u64,
            next_accel_ms,
        };
        TickResult::RenderRequested
    }

    fn current_delay_ms(&self) -> u32 {
        let word = self
            .sequence
            .get(self.current_index)
            .map(|token| token.text.as_str())
            .unwrap_or("");
        word_delay_ms(word, self.wpm)
    }
}
