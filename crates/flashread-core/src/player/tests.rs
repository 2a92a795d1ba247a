use super::*;
use crate::content::{ArenaRegion, Bounds, DocId, NodeKind, ResolvedMarker};
use crate::extract::{ScanScope, scan};

struct CountingNav {
    advances: usize,
    refuse_advance: bool,
}

impl CountingNav {
    fn new() -> Self {
        Self {
            advances: 0,
            refuse_advance: false,
        }
    }
}

impl PageNavigator for CountingNav {
    type Error = ();
    type Marker = ();

    fn is_paginated(&self) -> bool {
        true
    }

    fn current_range(&self) -> Option<((), ())> {
        None
    }

    fn resolve_marker(&self, _: &()) -> Option<ResolvedMarker> {
        None
    }

    fn visible_span(&self) -> Option<Bounds> {
        None
    }

    fn request_advance_page(&mut self) -> Result<(), ()> {
        if self.refuse_advance {
            return Err(());
        }
        self.advances += 1;
        Ok(())
    }
}

fn sequence_from(text: &'static str) -> WordSequence {
    let mut region = ArenaRegion::new(DocId(1));
    let p = region.push_element(region.root(), NodeKind::Block).unwrap();
    region.push_text(p, text).unwrap();
    scan(&region, &ScanScope::Full).unwrap()
}

/// A sequence of `words` four-letter words (no timing modifiers apply).
fn long_sequence(words: usize) -> WordSequence {
    let text: &'static str = Box::leak("word ".repeat(words).into_boxed_str());
    sequence_from(text)
}

fn sequence_with_boundary(before: &'static str) -> WordSequence {
    let mut region = ArenaRegion::new(DocId(1));
    let p = region.push_element(region.root(), NodeKind::Block).unwrap();
    region.push_text(p, before).unwrap();
    region
        .push_element(region.root(), NodeKind::Image)
        .unwrap();
    let after = region.push_element(region.root(), NodeKind::Block).unwrap();
    region.push_text(after, "unreachable").unwrap();
    scan(&region, &ScanScope::Full).unwrap()
}

fn player() -> RsvpPlayer<CountingNav> {
    RsvpPlayer::new(CountingNav::new(), PersistedSettings::default())
}

fn drain(player: &mut RsvpPlayer<CountingNav>) -> std::vec::Vec<PlaybackEvent> {
    let mut events = std::vec::Vec::new();
    while let Some(event) = player.pop_event() {
        events.push(event);
    }
    events
}

/// Walks the clock forward in small steps, ticking as a host would.
fn run_until(player: &mut RsvpPlayer<CountingNav>, from_ms: u64, to_ms: u64) {
    let mut now = from_ms;
    while now <= to_ms {
        player.tick(now);
        now += 10;
    }
}

#[test]
fn load_resets_position_and_announces_first_word() {
    let mut player = player();
    player.load(sequence_from("alpha beta"));
    assert_eq!(player.current_index(), 0);
    assert!(!player.is_playing());
    assert_eq!(drain(&mut player), [PlaybackEvent::WordChanged { index: 0 }]);
}

#[test]
fn empty_load_is_reportable_and_refuses_commands() {
    let mut player = player();
    player.load(WordSequence::new());
    assert!(player.loaded_empty());

    player.play(0);
    assert!(!player.is_playing());
    player.skip_forward(DEFAULT_SKIP_WORDS, 0);
    player.seek(3, 0);
    assert_eq!(player.current_index(), 0);
    assert!(drain(&mut player).is_empty());
}

#[test]
fn single_word_sequence_finishes_after_exactly_one_tick() {
    let mut player = player();
    player.load(sequence_from("Hello"));
    player.play(0);
    drain(&mut player);

    // "Hello" at 300 wpm holds for 200 ms.
    assert_eq!(player.tick(199), TickResult::NoRender);
    assert!(player.is_playing());

    assert_eq!(player.tick(200), TickResult::RenderRequested);
    assert!(player.is_finished());
    assert!(!player.is_playing());
    assert_eq!(player.current_index(), 0);
    assert_eq!(drain(&mut player), [PlaybackEvent::Finished]);
}

#[test]
fn words_advance_on_their_own_delays() {
    let mut player = player();
    player.load(sequence_from("one two three"));
    player.play(0);

    run_until(&mut player, 0, 200);
    assert_eq!(player.current_index(), 1);
    run_until(&mut player, 210, 400);
    assert_eq!(player.current_index(), 2);
    assert!(player.is_playing());

    run_until(&mut player, 410, 1_000);
    assert!(player.is_finished());
    assert_eq!(player.current_index(), 2);
}

#[test]
fn wpm_change_applies_to_the_next_word_not_retroactively() {
    let mut player = player();
    player.load(sequence_from("one two three four"));
    player.play(0);

    // Doubling the rate mid-word leaves the armed deadline alone...
    player.set_wpm(600);
    assert_eq!(player.tick(199), TickResult::NoRender);
    assert_eq!(player.tick(200), TickResult::RenderRequested);
    assert_eq!(player.current_index(), 1);

    // ...but the next word holds for only 100 ms.
    assert_eq!(player.tick(299), TickResult::NoRender);
    assert_eq!(player.tick(300), TickResult::RenderRequested);
    assert_eq!(player.current_index(), 2);
}

#[test]
fn pause_is_idempotent_and_freezes_the_clock() {
    let mut player = player();
    player.load(sequence_from("one two three"));
    player.play(0);
    player.pause();
    player.pause();
    assert!(!player.is_playing());

    // No amount of elapsed time advances a paused player.
    assert_eq!(player.tick(60_000), TickResult::NoRender);
    assert_eq!(player.current_index(), 0);
}

#[test]
fn replay_after_finish_restarts_from_the_top() {
    let mut player = player();
    player.load(sequence_from("one two"));
    player.play(0);
    run_until(&mut player, 0, 1_000);
    assert!(player.is_finished());
    assert_eq!(player.current_index(), 1);

    player.play(2_000);
    assert!(player.is_playing());
    assert_eq!(player.current_index(), 0);
}

#[test]
fn skip_forward_clamps_to_the_last_word() {
    let mut player = player();
    player.load(sequence_from("a b c d e"));
    player.skip_forward(DEFAULT_SKIP_WORDS, 0);
    assert_eq!(player.current_index(), 4);

    // Clamped again, no panic, no movement.
    player.skip_forward(DEFAULT_SKIP_WORDS, 0);
    assert_eq!(player.current_index(), 4);
}

#[test]
fn skip_forward_never_crosses_a_boundary() {
    let mut player = player();
    player.load(sequence_with_boundary("one two three"));
    player.skip_forward(DEFAULT_SKIP_WORDS, 0);
    // stop_index is 3; the furthest reachable word is index 2.
    assert_eq!(player.current_index(), 2);
}

#[test]
fn skip_back_saturates_at_zero_and_keeps_play_state() {
    let mut player = player();
    player.load(sequence_from("one two three"));
    player.play(0);
    player.tick(200);
    assert_eq!(player.current_index(), 1);

    player.skip_back(DEFAULT_SKIP_WORDS, 250);
    assert_eq!(player.current_index(), 0);
    assert!(player.is_playing());
}

#[test]
fn seek_clamps_to_sequence_bounds() {
    let mut player = player();
    player.load(sequence_from("one two three"));
    player.seek(100, 0);
    assert_eq!(player.current_index(), 2);
    player.seek(1, 0);
    assert_eq!(player.current_index(), 1);
}

#[test]
fn playback_halts_at_the_word_before_an_image() {
    let mut player = player();
    player.load(sequence_with_boundary("one two three"));
    player.play(0);
    run_until(&mut player, 0, 2_000);

    assert!(player.halted_at_boundary());
    assert!(!player.is_playing());
    assert_eq!(player.current_index(), 2);

    let halt_source = player.current_token().unwrap().source;
    let events = drain(&mut player);
    assert!(events.contains(&PlaybackEvent::BoundaryHalted {
        source: Some(halt_source)
    }));
}

#[test]
fn full_page_illustration_halts_for_continue_instead_of_empty() {
    let mut region = ArenaRegion::new(DocId(1));
    region
        .push_element(region.root(), NodeKind::Image)
        .unwrap();
    let sequence = scan(&region, &ScanScope::Full).unwrap();
    assert!(sequence.is_empty());
    assert_eq!(sequence.stop_index(), Some(0));

    let mut player = player();
    player.load(sequence);
    assert!(player.halted_at_boundary());
    assert!(!player.loaded_empty());
    assert_eq!(
        drain(&mut player),
        [PlaybackEvent::BoundaryHalted { source: None }]
    );

    // Scrubbing a zero-word page moves nothing and never panics.
    player.seek(3, 0);
    player.skip_forward(DEFAULT_SKIP_WORDS, 0);
    assert_eq!(player.current_index(), 0);

    player.continue_past_boundary();
    assert_eq!(player.navigator().advances, 1);
    assert!(!player.halted_at_boundary());
    assert_eq!(drain(&mut player), [PlaybackEvent::PageAdvanceRequested]);
}

#[test]
fn play_is_refused_while_halted_until_restart() {
    let mut player = player();
    player.load(sequence_with_boundary("one two three"));
    player.play(0);
    run_until(&mut player, 0, 2_000);
    assert!(player.halted_at_boundary());
    drain(&mut player);

    player.play(3_000);
    assert!(!player.is_playing());
    assert!(player.halted_at_boundary());
    assert_eq!(player.current_index(), 2);
    assert!(drain(&mut player).is_empty());

    player.restart();
    assert!(!player.halted_at_boundary());
    assert_eq!(player.current_index(), 0);
    player.play(4_000);
    assert!(player.is_playing());
}

#[test]
fn continue_past_boundary_requests_page_advance_and_tears_down() {
    let mut player = player();
    player.load(sequence_with_boundary("one two three"));
    player.play(0);
    run_until(&mut player, 0, 2_000);
    assert!(player.halted_at_boundary());
    drain(&mut player);

    player.continue_past_boundary();
    assert_eq!(player.navigator().advances, 1);
    assert!(!player.halted_at_boundary());
    assert!(!player.is_playing());
    assert_eq!(player.len(), 0);
    assert_eq!(drain(&mut player), [PlaybackEvent::PageAdvanceRequested]);

    // Torn down: time passing changes nothing.
    assert_eq!(player.tick(1_000_000), TickResult::NoRender);
}

#[test]
fn refused_page_advance_stays_halted() {
    let mut player = player();
    player.load(sequence_with_boundary("one two three"));
    player.play(0);
    run_until(&mut player, 0, 2_000);
    player.navigator_mut().refuse_advance = true;
    drain(&mut player);

    player.continue_past_boundary();
    assert!(player.halted_at_boundary());
    assert_eq!(player.navigator().advances, 0);
    assert!(drain(&mut player).is_empty());
}

#[test]
fn restart_returns_to_initial_state_from_anywhere() {
    let mut player = player();
    player.load(sequence_from("one two three"));
    player.play(0);
    player.tick(200);
    player.restart();
    assert_eq!(player.current_index(), 0);
    assert!(!player.is_playing());
    assert!(!player.halted_at_boundary());
}

#[test]
fn set_wpm_clamps_to_hard_range() {
    let mut player = player();
    player.set_wpm(10);
    assert_eq!(player.wpm(), WPM_MIN);
    player.set_wpm(9_999);
    assert_eq!(player.wpm(), WPM_MAX);
}

#[test]
fn step_wpm_reports_no_change_at_the_edges() {
    let mut player = player();
    player.set_wpm(WPM_MAX);
    assert!(!player.step_wpm(true));
    player.set_wpm(WPM_MIN);
    assert!(!player.step_wpm(false));
    assert!(player.step_wpm(true));
    assert_eq!(player.wpm(), WPM_MIN + 10);
}

#[test]
fn training_raises_wpm_on_cadence_while_playing() {
    let mut player = player();
    // 200 words at ~300 wpm outlast two training cadences.
    player.load(long_sequence(200));
    player.set_training(true, 0);
    player.play(0);

    run_until(&mut player, 0, TRAINING_INTERVAL_MS);
    assert_eq!(player.wpm(), 310);
    run_until(
        &mut player,
        TRAINING_INTERVAL_MS + 10,
        2 * TRAINING_INTERVAL_MS,
    );
    assert_eq!(player.wpm(), 320);
}

#[test]
fn training_never_exceeds_the_hard_ceiling() {
    let mut player = player();
    player.load(long_sequence(400));
    player.set_wpm(1_495);
    player.set_training(true, 0);
    player.play(0);

    run_until(&mut player, 0, TRAINING_INTERVAL_MS);
    assert_eq!(player.wpm(), WPM_MAX);
    run_until(&mut player, TRAINING_INTERVAL_MS + 10, 14_000);
    assert_eq!(player.wpm(), WPM_MAX);
}

#[test]
fn training_pauses_with_playback_and_rearms_on_play() {
    let mut player = player();
    player.load(long_sequence(200));
    player.set_training(true, 0);
    player.play(0);
    run_until(&mut player, 0, 5_000);
    player.pause();

    // Paused: no background acceleration, ever.
    run_until(&mut player, 5_010, 60_000);
    assert_eq!(player.wpm(), 300);

    // The cadence restarts from the resume point, not the old deadline.
    player.play(60_000);
    run_until(&mut player, 60_000, 60_000 + TRAINING_INTERVAL_MS - 10);
    assert_eq!(player.wpm(), 300);
    player.tick(60_000 + TRAINING_INTERVAL_MS);
    assert_eq!(player.wpm(), 310);
}

#[test]
fn wpm_is_frozen_after_close_even_with_training_armed() {
    let mut player = player();
    player.load(long_sequence(50));
    player.set_training(true, 0);
    player.play(0);
    run_until(&mut player, 0, 1_000);
    player.close();

    let wpm_at_close = player.wpm();
    // Simulated time marches well past several cadences.
    run_until(&mut player, 1_010, 120_000);
    assert_eq!(player.wpm(), wpm_at_close);
}

#[test]
fn close_reports_final_position_for_highlighting() {
    let mut player = player();
    let sequence = sequence_from("one two three");
    let expected = sequence.get(0).unwrap().source;
    player.load(sequence);
    drain(&mut player);

    player.close();
    assert_eq!(
        drain(&mut player),
        [PlaybackEvent::ClosedAtPosition {
            source: Some(expected)
        }]
    );
    assert_eq!(player.len(), 0);
    assert!(!player.is_playing());

    // Closing again is a no-op.
    player.close();
    assert!(drain(&mut player).is_empty());
}

#[test]
fn display_word_carries_orp_and_progress() {
    let mut player = player();
    player.load(sequence_from("reading words"));
    let display = player.display_word().unwrap();
    assert_eq!(display.text, "reading");
    assert_eq!(display.orp_index, 2);
    assert_eq!(display.index, 0);
    assert_eq!(display.total, 2);
}
