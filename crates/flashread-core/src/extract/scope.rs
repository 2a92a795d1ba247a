use log::debug;

use crate::content::{Bounds, ContentRegion, NodeId, PageNavigator};

/// Strategy a scan runs under. Selected by capability check, never by
/// catching a failure mid-walk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanScope {
    /// Every rendered text node in the region.
    Full,
    /// Only the slice between two resolved markers (paginated mode).
    Range(ResolvedRange),
    /// Only nodes whose on-screen box intersects the visible vertical span
    /// (continuous-scroll mode).
    Viewport(Bounds),
}

/// Resolved bounds of the currently visible content.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolvedRange {
    pub start_node: NodeId,
    pub start_offset: usize,
    pub end_node: NodeId,
    pub end_offset: usize,
}

/// Narrows extraction to the host's current visible range.
///
/// Requires paginated layout and both markers resolving into the same
/// document as `region`; anything else returns `None` and the caller falls
/// back to a broader scan. That fallback is expected behavior, so failures
/// here are logged at debug and never surfaced.
pub fn resolve_range<N, R>(nav: &N, region: &R) -> Option<ResolvedRange>
where
    N: PageNavigator,
    R: ContentRegion,
{
    if !nav.is_paginated() {
        return None;
    }

    let (start_marker, end_marker) = nav.current_range()?;
    let Some(start) = nav.resolve_marker(&start_marker) else {
        debug!("rsvp-range: start marker unresolvable");
        return None;
    };
    let Some(end) = nav.resolve_marker(&end_marker) else {
        debug!("rsvp-range: end marker unresolvable");
        return None;
    };

    if start.doc != end.doc || start.doc != region.doc_id() {
        debug!(
            "rsvp-range: cross-document markers start_doc={} end_doc={} region_doc={}",
            start.doc.0,
            end.doc.0,
            region.doc_id().0
        );
        return None;
    }

    Some(ResolvedRange {
        start_node: start.node,
        start_offset: start.offset,
        end_node: end.node,
        end_offset: end.offset,
    })
}
