//! Mdcanon Parser
//!
//! Adapts the pulldown-cmark event stream into the typed document tree the
//! renderer consumes. Tables and strikethrough are enabled on top of
//! CommonMark.
//!
//! The adapter normalizes a few event-stream shapes into the tree shape the
//! renderer's spacing bookkeeping relies on:
//! - soft line breaks become `"\n"` text runs, which the renderer's
//!   whitespace collapsing turns into single spaces;
//! - tight list items, whose inline content arrives without a paragraph
//!   wrapper, get a synthetic Paragraph node;
//! - a list is marked loose when any of its items carries an explicit
//!   paragraph.
//!
//! Consecutive text events are deliberately kept as separate Text nodes:
//! backslash escapes and entity references surface as their own
//! single-character runs, which is exactly what the renderer's escaping
//! policy keys on.
//!
//! # Example
//!
//! ```
//! use mdcanon_core::NodeKind;
//! use mdcanon_parser::parse;
//!
//! let tree = parse("# Hello");
//! let heading = tree.children(tree.root()).next().unwrap();
//! assert_eq!(tree.node(heading).kind, NodeKind::Heading(1));
//! ```

use mdcanon_core::{
    Alignment, CellData, CodeBlockData, LinkData, ListData, NodeId, NodeKind, Tree,
};
use pulldown_cmark::{
    Alignment as MdAlignment, CodeBlockKind, Event, HeadingLevel, Options as MdOptions, Parser,
    Tag,
};

/// Parse Markdown text into a document tree.
///
/// Parsing is total: any input produces a tree.
pub fn parse(text: &str) -> Tree {
    let options = MdOptions::ENABLE_TABLES | MdOptions::ENABLE_STRIKETHROUGH;
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(text, options) {
        builder.event(event);
    }
    builder.finish()
}

struct TreeBuilder {
    tree: Tree,
    cur: NodeId,
    /// Paragraph synthesized around bare inline content in a tight item;
    /// `Some` exactly while that paragraph is the open node.
    synthetic_para: Option<NodeId>,
    table_aligns: Vec<Alignment>,
    in_table_head: bool,
    cell_index: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        let tree = Tree::new();
        let cur = tree.root();
        TreeBuilder {
            tree,
            cur,
            synthetic_para: None,
            table_aligns: Vec::new(),
            in_table_head: false,
            cell_index: 0,
        }
    }

    fn finish(self) -> Tree {
        self.tree
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                if matches!(self.tree.node(self.cur).kind, NodeKind::CodeBlock(_)) {
                    self.tree.node_mut(self.cur).literal.push_str(&text);
                } else {
                    self.text(&text);
                }
            }
            Event::Code(code) => {
                self.ensure_inline();
                let id = self.append(NodeKind::Code);
                self.tree.node_mut(id).literal.push_str(&code);
            }
            Event::Html(html) => {
                if matches!(self.tree.node(self.cur).kind, NodeKind::HtmlBlock) {
                    self.tree.node_mut(self.cur).literal.push_str(&html);
                } else {
                    self.close_synthetic();
                    let id = self.append(NodeKind::HtmlBlock);
                    self.tree.node_mut(id).literal.push_str(&html);
                }
            }
            Event::InlineHtml(html) => {
                self.ensure_inline();
                let id = self.append(NodeKind::HtmlSpan);
                self.tree.node_mut(id).literal.push_str(&html);
            }
            Event::FootnoteReference(label) => {
                self.ensure_inline();
                let id = self.append(NodeKind::FootnoteRef);
                self.tree.node_mut(id).literal.push_str(&label);
            }
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => {
                self.ensure_inline();
                self.append(NodeKind::Hardbreak);
            }
            Event::Rule => {
                self.close_synthetic();
                self.append(NodeKind::HorizontalRule);
            }
            // Task lists, math, and metadata are not enabled.
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                self.close_synthetic();
                if matches!(self.tree.node(self.cur).kind, NodeKind::Item) {
                    self.mark_list_loose();
                }
                self.open(NodeKind::Paragraph);
            }
            Tag::Heading { level, .. } => {
                self.close_synthetic();
                self.open(NodeKind::Heading(heading_level(level)));
            }
            Tag::BlockQuote(_) => {
                self.close_synthetic();
                self.open(NodeKind::BlockQuote);
            }
            Tag::CodeBlock(kind) => {
                self.close_synthetic();
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.into_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.open(NodeKind::CodeBlock(CodeBlockData { info }));
            }
            Tag::HtmlBlock => {
                self.close_synthetic();
                self.open(NodeKind::HtmlBlock);
            }
            Tag::List(start) => {
                self.close_synthetic();
                self.open(NodeKind::List(ListData {
                    ordered: start.is_some(),
                    tight: true,
                }));
            }
            Tag::Item => {
                self.open(NodeKind::Item);
            }
            Tag::Table(aligns) => {
                self.close_synthetic();
                self.table_aligns = aligns.iter().map(alignment).collect();
                self.open(NodeKind::Table);
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell_index = 0;
                self.open(NodeKind::TableHead);
            }
            Tag::TableRow => {
                self.cell_index = 0;
                self.open(NodeKind::TableRow);
            }
            Tag::TableCell => {
                let alignment = self
                    .table_aligns
                    .get(self.cell_index)
                    .copied()
                    .unwrap_or_default();
                self.cell_index += 1;
                self.open(NodeKind::TableCell(CellData {
                    header: self.in_table_head,
                    alignment,
                }));
            }
            Tag::Emphasis => {
                self.ensure_inline();
                self.open(NodeKind::Emphasis);
            }
            Tag::Strong => {
                self.ensure_inline();
                self.open(NodeKind::Strong);
            }
            Tag::Strikethrough => {
                self.ensure_inline();
                self.open(NodeKind::Strikethrough);
            }
            Tag::Link {
                dest_url, title, ..
            } => {
                self.ensure_inline();
                self.open(NodeKind::Link(LinkData {
                    destination: dest_url.into_string(),
                    title: title.into_string(),
                }));
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.ensure_inline();
                self.open(NodeKind::Image(LinkData {
                    destination: dest_url.into_string(),
                    title: title.into_string(),
                }));
            }
            // Containers for extensions we do not enable; parsed
            // transparently so their End events stay balanced.
            _ => {
                self.close_synthetic();
                self.open(NodeKind::Document);
            }
        }
    }

    fn end(&mut self) {
        if self.synthetic_para == Some(self.cur) {
            // The End event belongs to the item wrapping the synthetic
            // paragraph, so close the paragraph first.
            self.pop();
            self.synthetic_para = None;
        }
        self.pop();
    }

    fn text(&mut self, text: &str) {
        self.ensure_inline();
        let id = self.append(NodeKind::Text);
        self.tree.node_mut(id).literal.push_str(text);
    }

    /// Wrap bare inline content of a tight list item in a paragraph.
    fn ensure_inline(&mut self) {
        if matches!(self.tree.node(self.cur).kind, NodeKind::Item) {
            let id = self.open(NodeKind::Paragraph);
            self.synthetic_para = Some(id);
        }
    }

    fn close_synthetic(&mut self) {
        if let Some(id) = self.synthetic_para.take() {
            if self.cur == id {
                self.pop();
            }
        }
    }

    fn mark_list_loose(&mut self) {
        if let Some(list) = self.tree.parent(self.cur) {
            if let NodeKind::List(ref mut data) = self.tree.node_mut(list).kind {
                data.tight = false;
            }
        }
    }

    fn append(&mut self, kind: NodeKind) -> NodeId {
        self.tree.append_child(self.cur, kind)
    }

    fn open(&mut self, kind: NodeKind) -> NodeId {
        let id = self.append(kind);
        self.cur = id;
        id
    }

    fn pop(&mut self) {
        if matches!(self.tree.node(self.cur).kind, NodeKind::TableHead) {
            self.in_table_head = false;
        }
        if let Some(parent) = self.tree.parent(self.cur) {
            self.cur = parent;
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn alignment(align: &MdAlignment) -> Alignment {
    match align {
        MdAlignment::None => Alignment::None,
        MdAlignment::Left => Alignment::Left,
        MdAlignment::Center => Alignment::Center,
        MdAlignment::Right => Alignment::Right,
    }
}
