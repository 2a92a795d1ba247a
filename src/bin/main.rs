//! Terminal demo: plays a built-in sample page through the RSVP engine.
//!
//! Stands in for the browser host: it mounts a small content tree (two
//! paragraphs split by an illustration), extracts the visible words, and
//! drives the player off the wall clock, printing each word with its ORP
//! letter aligned to a fixed column.

use std::thread;
use std::time::{Duration, Instant};

use flashread_core::content::ArenaRegion;
use flashread_core::ContentRegion;
use flashread_core::settings::PersistedSettings;
use flashread_core::{
    Bounds, DocId, NodeKind, PageNavigator, PlaybackEvent, ResolvedMarker, RsvpPlayer,
};
use log::info;

const ORP_COLUMN: usize = 20;

const OPENING: &str = "Call me Ishmael. Some years ago, never mind how long precisely, \
having little or no money in my purse, and nothing particular to interest me on shore, \
I thought I would sail about a little and see the watery part of the world.";

const CLOSING: &str = "It is a way I have of driving off the spleen and regulating the \
circulation.";

/// Continuous-scroll host view: no pagination, no range markers, whole
/// region visible.
struct ScrollView;

impl PageNavigator for ScrollView {
    type Error = ();
    type Marker = ();

    fn is_paginated(&self) -> bool {
        false
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
        info!("host: page advance requested");
        Ok(())
    }
}

fn front_page() -> ArenaRegion<'static> {
    let mut region = ArenaRegion::new(DocId(1));
    let root = region.root();
    let p1 = region.push_element(root, NodeKind::Block).expect("arena");
    region.push_text(p1, OPENING).expect("arena");
    region.push_element(root, NodeKind::Image).expect("arena");
    let p2 = region.push_element(root, NodeKind::Block).expect("arena");
    region.push_text(p2, CLOSING).expect("arena");
    region
}

/// What the host would mount after scrolling past the illustration.
fn back_page() -> ArenaRegion<'static> {
    let mut region = ArenaRegion::new(DocId(2));
    let root = region.root();
    let p = region.push_element(root, NodeKind::Block).expect("arena");
    region.push_text(p, CLOSING).expect("arena");
    region
}

fn print_word(text: &str, orp_index: usize) {
    let pad = ORP_COLUMN.saturating_sub(orp_index);
    println!("{:pad$}{text}", "");
}

fn main() {
    env_logger::init();

    let mut player = RsvpPlayer::new(ScrollView, PersistedSettings::new(350, false));
    if let Err(err) = player.load_visible(&[front_page()]) {
        eprintln!("nothing to read: {err:?}");
        return;
    }

    let started = Instant::now();
    player.play(0);

    loop {
        let now_ms = started.elapsed().as_millis() as u64;
        player.tick(now_ms);

        while let Some(event) = player.pop_event() {
            match event {
                PlaybackEvent::WordChanged { .. } => {
                    if let Some(word) = player.display_word() {
                        print_word(word.text, word.orp_index);
                    }
                }
                PlaybackEvent::BoundaryHalted { .. } => {
                    println!("--- illustration: continuing to the next page ---");
                    player.continue_past_boundary();
                }
                PlaybackEvent::PageAdvanceRequested => {
                    // The navigator accepted the advance; mount the next
                    // page and resume, as a browser host would.
                    if player.load_visible(&[back_page()]).is_ok() {
                        player.play(started.elapsed().as_millis() as u64);
                    }
                }
                PlaybackEvent::Finished => {
                    println!("--- end of page ---");
                }
                PlaybackEvent::ClosedAtPosition { .. } => {}
            }
        }

        if !player.is_playing() {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }
}
