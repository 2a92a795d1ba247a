use heapless::Vec;

use super::{Bounds, ContentRegion, DocId, NodeId, NodeKind};

pub const ARENA_MAX_NODES: usize = 256;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArenaFull;

#[derive(Clone, Copy, Debug)]
struct ArenaNode<'a> {
    kind: NodeKind,
    text: Option<&'a str>,
    bounds: Option<Bounds>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// In-memory [`ContentRegion`] built node by node.
///
/// Hosts that already hold a rendered tree implement [`ContentRegion`]
/// directly; this arena exists for the demo binary and tests.
#[derive(Clone, Debug)]
pub struct ArenaRegion<'a> {
    doc: DocId,
    nodes: Vec<ArenaNode<'a>, ARENA_MAX_NODES>,
}

impl<'a> ArenaRegion<'a> {
    /// Creates a region whose root is a `Block` element.
    pub fn new(doc: DocId) -> Self {
        let mut nodes = Vec::new();
        let _ = nodes.push(ArenaNode {
            kind: NodeKind::Block,
            text: None,
            bounds: None,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        });
        Self { doc, nodes }
    }

    pub fn push_element(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, ArenaFull> {
        self.push_node(parent, kind, None)
    }

    pub fn push_text(&mut self, parent: NodeId, text: &'a str) -> Result<NodeId, ArenaFull> {
        self.push_node(parent, NodeKind::Text, Some(text))
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: Bounds) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize) {
            node.bounds = Some(bounds);
        }
    }

    fn push_node(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        text: Option<&'a str>,
    ) -> Result<NodeId, ArenaFull> {
        if parent.0 as usize >= self.nodes.len() {
            return Err(ArenaFull);
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(ArenaNode {
                kind,
                text,
                bounds: None,
                parent: Some(parent),
                first_child: None,
                last_child: None,
                next_sibling: None,
            })
            .map_err(|_| ArenaFull)?;

        let parent_node = &mut self.nodes[parent.0 as usize];
        match parent_node.last_child.replace(id) {
            None => parent_node.first_child = Some(id),
            Some(prev) => self.nodes[prev.0 as usize].next_sibling = Some(id),
        }

        Ok(id)
    }

    fn node(&self, id: NodeId) -> Option<&ArenaNode<'a>> {
        self.nodes.get(id.0 as usize)
    }
}

impl ContentRegion for ArenaRegion<'_> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|node| node.kind)
    }

    fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|node| node.text)
    }

    fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.first_child)
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.next_sibling)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    fn bounds(&self, id: NodeId) -> Option<Bounds> {
        self.node(id).and_then(|node| node.bounds)
    }
}
