//! Content-region and navigation surfaces supplied by the rendering host.

mod arena;

pub use arena::{ARENA_MAX_NODES, ArenaRegion};

/// Identity of the document a region was rendered from. Range markers are
/// only meaningful when both endpoints resolve into the same document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DocId(pub u32);

/// Handle to one node of a mounted content region.
///
/// Weak by design: it stays valid only while the region it came from is
/// mounted, and every consumer must treat a failed lookup as a no-op rather
/// than an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeId(pub u32);

/// Coarse node classification the host maps its element vocabulary onto.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// Leaf text node; [`ContentRegion::text`] returns its contents.
    Text,
    /// Inline element (span, emphasis, anchor...).
    Inline,
    /// Block element (paragraph, heading, div...).
    Block,
    /// Image-like element: img, svg, picture. A hard boundary for
    /// extraction.
    Image,
    /// Non-rendering element (script, style, head): the whole subtree is
    /// excluded from extraction.
    NonRendering,
}

/// Vertical on-screen extent of an element, in the host's pixel space.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bounds {
    pub top: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.top < other.bottom && other.top < self.bottom
    }
}

/// Concrete node/offset pair a location marker resolved to.
///
/// `offset` is a byte offset into the node's text (hosts convert from their
/// native units); it is clamped to a char boundary before use.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolvedMarker {
    pub doc: DocId,
    pub node: NodeId,
    pub offset: usize,
}

/// Read-only tree surface of one rendered document fragment.
///
/// Traversal uses first-child/next-sibling links in document order. The
/// root's `next_sibling` must be `None`. All lookups are fallible so a
/// region that unmounts mid-walk degrades into an extraction error instead
/// of a panic.
pub trait ContentRegion {
    fn doc_id(&self) -> DocId;
    fn root(&self) -> NodeId;
    fn kind(&self, id: NodeId) -> Option<NodeKind>;
    /// Text contents; `None` for non-text nodes.
    fn text(&self, id: NodeId) -> Option<&str>;
    fn first_child(&self, id: NodeId) -> Option<NodeId>;
    fn next_sibling(&self, id: NodeId) -> Option<NodeId>;
    fn parent(&self, id: NodeId) -> Option<NodeId>;
    /// On-screen extent, used by the viewport scan. `None` when the host
    /// has no layout information for the node; such nodes are kept.
    fn bounds(&self, id: NodeId) -> Option<Bounds>;
}

/// Navigation half of the rendering collaborator.
pub trait PageNavigator {
    type Error;
    /// Opaque location marker, e.g. a CFI in an EPUB host.
    type Marker;

    /// Whether the content is laid out in discrete pages. Range-based
    /// extraction only applies in this mode.
    fn is_paginated(&self) -> bool;

    /// Markers bounding the currently visible content, when the host can
    /// produce them.
    fn current_range(&self) -> Option<(Self::Marker, Self::Marker)>;

    /// Resolve a marker to a concrete node/offset. `None` when the marker
    /// does not address currently mounted content.
    fn resolve_marker(&self, marker: &Self::Marker) -> Option<ResolvedMarker>;

    /// Visible vertical span, for the continuous-scroll scan strategy.
    fn visible_span(&self) -> Option<Bounds>;

    /// Ask the host to advance to the next page. Used when the reader
    /// chooses to continue past an image boundary.
    fn request_advance_page(&mut self) -> Result<(), Self::Error>;
}
