//! Word extraction: walks a rendered content region into an ordered,
//! source-linked word sequence.

mod scope;


use heapless::{String, Vec};
use log::{debug, warn};

use crate::content::{Bounds, ContentRegion, NodeId, NodeKind, PageNavigator};

pub use scope::{ResolvedRange, ScanScope, resolve_range};

/// Capacity of one stored word, cleaned or original, in bytes.
pub const WORD_TEXT_BYTES: usize = 48;
/// Most words a single extraction keeps; beyond this the sequence is marked
/// truncated.
pub const MAX_SEQUENCE_WORDS: usize = 512;

const WALK_STACK_DEPTH: usize = 64;

const BASIC_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '—', '–', '-', '\u{2018}', '\u{2019}',
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtractError {
    /// The host reported no visible content region.
    NoContent,
    /// Extraction completed but found zero words. User-facing and
    /// retryable; distinct from a walk failure.
    NoReadableText,
    /// The region degraded mid-walk (stale node handles, pathological
    /// nesting). Surfaced with a retry affordance.
    WalkFailed,
}

/// Back-reference from a word to where it came from.
///
/// Weak handles into the mounted region, kept only so the host can flash a
/// highlight at the reader's position; stale handles must no-op.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourceRef {
    pub text_node: NodeId,
    pub element: NodeId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordToken {
    /// Cleaned word: alphanumerics, `_`, and basic punctuation only.
    /// Never empty.
    pub text: String<WORD_TEXT_BYTES>,
    /// The word as it appeared in the source.
    pub original: String<WORD_TEXT_BYTES>,
    pub source: SourceRef,
}

/// Ordered word list for one extraction, replaced wholesale whenever the
/// visible content changes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordSequence {
    words: Vec<WordToken, MAX_SEQUENCE_WORDS>,
    stop_index: Option<usize>,
    truncated: bool,
}

impl WordSequence {
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            stop_index: None,
            truncated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordToken> {
        self.words.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, WordToken> {
        self.words.iter()
    }

    /// Sequence length at the point an image boundary halted extraction;
    /// `None` when no boundary was hit.
    pub fn stop_index(&self) -> Option<usize> {
        self.stop_index
    }

    /// Whether a capacity limit cut words or word text short.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Highest index playback may reach: the word before the boundary when
    /// one exists, else the last word.
    pub fn last_playable_index(&self) -> Option<usize> {
        if self.words.is_empty() {
            return None;
        }
        let last = self.words.len() - 1;
        match self.stop_index {
            Some(stop) => Some(last.min(stop.saturating_sub(1))),
            None => Some(last),
        }
    }
}

/// Extracts the host's currently visible words.
///
/// Strategy pick per the layout mode: paginated with a resolvable range
/// scans just that range; otherwise every region is scanned against the
/// visible viewport span, concatenated in order. A range that cannot be
/// resolved, or that resolves to nodes this region never yields, falls back
/// to a full scan of the page region. The fallback is silent by design.
pub fn extract_visible<N, R>(nav: &N, regions: &[R]) -> Result<WordSequence, ExtractError>
where
    N: PageNavigator,
    R: ContentRegion,
{
    if regions.is_empty() {
        return Err(ExtractError::NoContent);
    }

    let mut sequence = WordSequence::new();

    if nav.is_paginated() {
        // One region per page in paginated mode.
        let region = &regions[0];
        match resolve_range(nav, region) {
            Some(range) => {
                let progress = scan_into(region, &ScanScope::Range(range), &mut sequence)?;
                if sequence.is_empty()
                    && sequence.stop_index.is_none()
                    && progress == RangeProgress::Before
                {
                    // Stale markers: the range start never showed up in the
                    // walk. A range that was entered but held no words is
                    // an empty page, not a reason to read other pages.
                    debug!("rsvp-extract: range never entered, retrying full");
                    scan_into(region, &ScanScope::Full, &mut sequence)?;
                }
            }
            None => {
                scan_into(region, &ScanScope::Full, &mut sequence)?;
            }
        }
    } else {
        let scope = match nav.visible_span() {
            Some(span) => ScanScope::Viewport(span),
            None => ScanScope::Full,
        };
        for region in regions {
            scan_into(region, &scope, &mut sequence)?;
            if sequence.stop_index.is_some() || sequence.truncated {
                break;
            }
        }
    }

    if sequence.is_empty() && sequence.stop_index.is_none() {
        return Err(ExtractError::NoReadableText);
    }

    debug!(
        "rsvp-extract: done words={} stop={:?} truncated={}",
        sequence.len(),
        sequence.stop_index,
        sequence.truncated
    );
    Ok(sequence)
}

/// Scans a single region under an explicit scope.
pub fn scan<R: ContentRegion>(
    region: &R,
    scope: &ScanScope,
) -> Result<WordSequence, ExtractError> {
    let mut sequence = WordSequence::new();
    scan_into(region, scope, &mut sequence)?;
    Ok(sequence)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RangeProgress {
    Before,
    Inside,
}

/// Iterative pre-order walk. The stack holds at most one pending sibling
/// per level, so its depth bounds the tree depth, not the node count.
///
/// Returns the final range progress: `Before` means a range scope's start
/// container was never encountered, which tells the caller the markers were
/// stale rather than the range empty.
fn scan_into<R: ContentRegion>(
    region: &R,
    scope: &ScanScope,
    sequence: &mut WordSequence,
) -> Result<RangeProgress, ExtractError> {
    let root = region.root();
    let mut stack: Vec<NodeId, WALK_STACK_DEPTH> = Vec::new();
    stack.push(root).map_err(|_| ExtractError::WalkFailed)?;

    let mut progress = match scope {
        ScanScope::Range(_) => RangeProgress::Before,
        _ => RangeProgress::Inside,
    };

    while let Some(id) = stack.pop() {
        let Some(kind) = region.kind(id) else {
            warn!("rsvp-extract: node vanished mid-walk id={}", id.0);
            return Err(ExtractError::WalkFailed);
        };

        let mut descend = false;
        match kind {
            NodeKind::NonRendering => {}
            NodeKind::Image => {
                let in_scope = match scope {
                    ScanScope::Full => true,
                    ScanScope::Range(_) => progress == RangeProgress::Inside,
                    ScanScope::Viewport(span) => node_on_screen(region, id, span),
                };
                if in_scope {
                    sequence.stop_index = Some(sequence.len());
                    debug!(
                        "rsvp-extract: image boundary node={} words={}",
                        id.0,
                        sequence.len()
                    );
                    return Ok(progress);
                }
            }
            NodeKind::Text => {
                let Some(text) = region.text(id) else {
                    return Err(ExtractError::WalkFailed);
                };
                let (slice, done) = visible_slice(text, id, scope, &mut progress);
                if let Some(slice) = slice {
                    let in_scope = match scope {
                        ScanScope::Viewport(span) => node_on_screen(region, id, span),
                        _ => true,
                    };
                    if in_scope && !emit_words(sequence, slice, id, element_of(region, id)) {
                        return Ok(progress);
                    }
                }
                if done {
                    return Ok(progress);
                }
            }
            NodeKind::Inline | NodeKind::Block => {
                if let ScanScope::Range(range) = scope {
                    // Degenerate case: markers resolving to elements rather
                    // than text nodes. A start element brings its subtree in
                    // range; an end element ends the range before its
                    // subtree.
                    if id == range.end_node {
                        return Ok(progress);
                    }
                    if id == range.start_node {
                        progress = RangeProgress::Inside;
                    }
                }
                descend = true;
            }
        }

        if id != root
            && let Some(sibling) = region.next_sibling(id)
        {
            stack.push(sibling).map_err(|_| ExtractError::WalkFailed)?;
        }
        if descend && let Some(child) = region.first_child(id) {
            stack.push(child).map_err(|_| ExtractError::WalkFailed)?;
        }
    }

    Ok(progress)
}

/// Portion of a text node that falls inside the scope's range, plus whether
/// the walk is finished after this node.
fn visible_slice<'t>(
    text: &'t str,
    id: NodeId,
    scope: &ScanScope,
    progress: &mut RangeProgress,
) -> (Option<&'t str>, bool) {
    let ScanScope::Range(range) = scope else {
        return (Some(text), false);
    };

    match *progress {
        RangeProgress::Before => {
            if id == range.start_node {
                *progress = RangeProgress::Inside;
                // Truncate by start offset first, end offset second.
                let start = clamp_char_boundary(text, range.start_offset);
                if id == range.end_node {
                    let end = clamp_char_boundary(text, range.end_offset).max(start);
                    return (Some(&text[start..end]), true);
                }
                return (Some(&text[start..]), false);
            }
            if id == range.end_node {
                // End container reached before the start: nothing in range.
                return (None, true);
            }
            (None, false)
        }
        RangeProgress::Inside => {
            if id == range.end_node {
                let end = clamp_char_boundary(text, range.end_offset);
                return (Some(&text[..end]), true);
            }
            (Some(text), false)
        }
    }
}

fn clamp_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Whether a node's nearest laid-out ancestor intersects the visible span.
/// Nodes without layout information are kept.
fn node_on_screen<R: ContentRegion>(region: &R, id: NodeId, span: &Bounds) -> bool {
    let mut current = Some(id);
    let mut hops = 0;
    while let Some(node) = current
        && hops < WALK_STACK_DEPTH
    {
        if let Some(bounds) = region.bounds(node) {
            return bounds.intersects(span);
        }
        current = region.parent(node);
        hops += 1;
    }
    true
}

fn element_of<R: ContentRegion>(region: &R, text_node: NodeId) -> NodeId {
    region.parent(text_node).unwrap_or_else(|| region.root())
}

/// Splits, cleans, and appends one text slice. Returns `false` once the
/// sequence is out of capacity.
fn emit_words(
    sequence: &mut WordSequence,
    slice: &str,
    text_node: NodeId,
    element: NodeId,
) -> bool {
    for raw in slice.split_whitespace() {
        let mut text: String<WORD_TEXT_BYTES> = String::new();
        let mut cut = false;
        for ch in raw.chars() {
            if !(ch.is_alphanumeric() || ch == '_' || BASIC_PUNCTUATION.contains(&ch)) {
                continue;
            }
            if text.push(ch).is_err() {
                cut = true;
                break;
            }
        }
        // Words that clean down to nothing are discarded, never stored.
        if text.is_empty() {
            continue;
        }

        let mut original: String<WORD_TEXT_BYTES> = String::new();
        for ch in raw.chars() {
            if original.push(ch).is_err() {
                cut = true;
                break;
            }
        }
        if cut {
            sequence.truncated = true;
        }

        let token = WordToken {
            text,
            original,
            source: SourceRef { text_node, element },
        };
        if sequence.words.push(token).is_err() {
            sequence.truncated = true;
            warn!(
                "rsvp-extract: sequence capacity reached words={}",
                sequence.words.len()
            );
            return false;
        }
    }
    true
}
