//! The document tree.
//!
//! An arena of nodes addressed by [`NodeId`]. Each node keeps first-child /
//! last-child / sibling / parent links, so traversal order over children is
//! insertion order and parent lookups are cheap. The tree is append-only:
//! the parser builds it once and the renderer reads it.

/// Column alignment for a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// No explicit alignment was given in the separator row.
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// Payload of a [`NodeKind::List`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListData {
    /// Ordered (numbered) list rather than a bullet list.
    pub ordered: bool,
    /// Tight lists render items without blank-line separation.
    pub tight: bool,
}

/// Payload of a [`NodeKind::CodeBlock`] node. The code text itself lives in
/// the node's literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeBlockData {
    /// The raw info string following the opening fence, e.g. `rust,no_run`.
    pub info: String,
}

/// Payload of [`NodeKind::Link`] and [`NodeKind::Image`] nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkData {
    pub destination: String,
    pub title: String,
}

/// Payload of a [`NodeKind::TableCell`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellData {
    /// Cell belongs to the header row.
    pub header: bool,
    pub alignment: Alignment,
}

/// The kind of a document node, with per-kind payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    BlockQuote,
    List(ListData),
    Item,
    Paragraph,
    /// Heading with level 1-6.
    Heading(u8),
    HorizontalRule,
    /// Fenced or indented code; literal holds the code text.
    CodeBlock(CodeBlockData),
    /// Raw block-level HTML; literal holds the markup.
    HtmlBlock,
    Table,
    TableHead,
    TableRow,
    TableCell(CellData),
    Emphasis,
    Strong,
    Strikethrough,
    Link(LinkData),
    Image(LinkData),
    /// A run of literal text.
    Text,
    /// Inline code span; literal holds the code.
    Code,
    /// Raw inline HTML; literal holds the markup.
    HtmlSpan,
    Softbreak,
    Hardbreak,
    /// Footnote reference; literal holds the label. Rendering is a fixed
    /// placeholder (footnote output is intentionally unimplemented).
    FootnoteRef,
}

impl NodeKind {
    /// Container kinds receive a post-order visit; leaves do not.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::BlockQuote
                | NodeKind::List(_)
                | NodeKind::Item
                | NodeKind::Paragraph
                | NodeKind::Heading(_)
                | NodeKind::Table
                | NodeKind::TableHead
                | NodeKind::TableRow
                | NodeKind::TableCell(_)
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Strikethrough
                | NodeKind::Link(_)
                | NodeKind::Image(_)
        )
    }
}

/// Identifier of a node within its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single node: kind, literal payload, and arena links.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Literal content for text-bearing leaves; empty otherwise.
    pub literal: String,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// Arena-backed document tree rooted at a [`NodeKind::Document`] node.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree containing only the document root.
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node {
                kind: NodeKind::Document,
                literal: String::new(),
                parent: None,
                first_child: None,
                last_child: None,
                prev_sibling: None,
                next_sibling: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev = self.nodes[parent.0].last_child;
        self.nodes.push(Node {
            kind,
            literal: String::new(),
            parent: Some(parent),
            first_child: None,
            last_child: None,
            prev_sibling: prev,
            next_sibling: None,
        });
        match prev {
            Some(p) => self.nodes[p.0].next_sibling = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].prev_sibling
    }

    /// Iterate over the direct children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's direct children.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.next_sibling(id);
        Some(id)
    }
}

/// Signal returned by a walk visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into children (and deliver the post-order visit).
    Continue,
    /// Do not descend; the visitor rendered the subtree itself. The
    /// post-order visit is skipped as well.
    SkipChildren,
}

/// Depth-first traversal of the subtree rooted at `id`.
///
/// The visitor is called with `entering = true` before a node's children
/// and, for container kinds, with `entering = false` after them. Returning
/// [`Walk::SkipChildren`] from the entering call suppresses both the
/// descent and the closing call.
pub fn walk<F>(tree: &Tree, id: NodeId, visit: &mut F)
where
    F: FnMut(NodeId, bool) -> Walk,
{
    if visit(id, true) == Walk::SkipChildren {
        return;
    }
    let mut child = tree.first_child(id);
    while let Some(c) = child {
        child = tree.next_sibling(c);
        walk(tree, c, visit);
    }
    if tree.node(id).kind.is_container() {
        visit(id, false);
    }
}
