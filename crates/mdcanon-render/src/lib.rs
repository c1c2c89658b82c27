//! Mdcanon Render
//!
//! The canonical-form rendering engine: a depth-first walk over the
//! document tree that emits exactly one normalized textual form for every
//! construct, whatever syntax the source used.
//!
//! Canonical choices:
//! - Setext headings for levels 1-2 (underline sized to the content's
//!   visual width), ATX markers for levels 3-6
//! - `-` bullets; ordered lists renumbered from 1, marker followed by a tab
//! - tables padded to per-column visual width with `:` alignment markers
//! - exactly one blank line between top-level blocks
//! - whitespace collapsed inside paragraphs; hard breaks as two trailing
//!   spaces
//! - lone reserved characters backslash-escaped so the output re-parses to
//!   the same tree
//!
//! # Example
//!
//! ```
//! use mdcanon_core::Options;
//! use mdcanon_render::process;
//!
//! let out = process("Title\n=====\n\n5. item\n6. item", &Options::default());
//! assert_eq!(out, "Title\n=====\n\n1.\titem\n2.\titem\n");
//! ```

pub mod code;
pub mod list;
pub mod table;
pub mod text;

pub use code::{language_token, CodeFormatter, DefaultCodeFormatter};
pub use list::{ListLevel, ListStack};
pub use table::TableAccum;

use mdcanon_ansi::{display_width, visible_width, BOLD_ON, RESET};
use mdcanon_core::{
    walk, CellData, LinkData, ListData, NodeId, NodeKind, Options, Result, Tree, Walk,
};

/// Render Markdown text to its canonical form.
pub fn process(input: &str, opts: &Options) -> String {
    let tree = mdcanon_parser::parse(input);
    Renderer::new(opts.clone()).render(&tree)
}

/// Render Markdown bytes to canonical bytes.
///
/// Invalid UTF-8 aborts immediately with no partial output.
pub fn process_bytes(input: &[u8], opts: &Options) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(input)?;
    Ok(process(text, opts).into_bytes())
}

/// Stateful canonical-form renderer.
///
/// One instance per render: list nesting, ordered counters, table buffers,
/// and last-text tracking are all instance-local, so independent renders
/// may run on separate threads.
pub struct Renderer {
    opts: Options,
    lists: ListStack,
    table: TableAccum,
    last_text: String,
    formatter: Box<dyn CodeFormatter>,
}

impl Renderer {
    /// Create a renderer with the built-in code formatter.
    pub fn new(opts: Options) -> Self {
        Self::with_formatter(opts, Box::new(DefaultCodeFormatter))
    }

    /// Create a renderer with a custom code formatter.
    pub fn with_formatter(opts: Options, formatter: Box<dyn CodeFormatter>) -> Self {
        Renderer {
            opts,
            lists: ListStack::new(),
            table: TableAccum::new(),
            last_text: String::new(),
            formatter,
        }
    }

    /// Render the whole tree to its canonical form.
    pub fn render(&mut self, tree: &Tree) -> String {
        let mut out = String::new();
        self.render_subtree(&mut out, tree, tree.root());
        out
    }

    fn render_subtree(&mut self, out: &mut String, tree: &Tree, id: NodeId) {
        walk(tree, id, &mut |node, entering| {
            self.render_node(out, tree, node, entering)
        });
    }

    /// Render a node's children into a private buffer, for handlers that
    /// need to measure or post-process content before placing it.
    fn render_children(&mut self, tree: &Tree, id: NodeId) -> String {
        let mut buf = String::new();
        let mut child = tree.first_child(id);
        while let Some(c) = child {
            child = tree.next_sibling(c);
            self.render_subtree(&mut buf, tree, c);
        }
        buf
    }

    fn string_width(&self, s: &str) -> usize {
        if self.opts.terminal {
            visible_width(s)
        } else {
            display_width(s)
        }
    }

    fn render_node(&mut self, out: &mut String, tree: &Tree, id: NodeId, entering: bool) -> Walk {
        match &tree.node(id).kind {
            NodeKind::Document | NodeKind::TableHead | NodeKind::TableRow | NodeKind::Softbreak => {
            }
            NodeKind::BlockQuote => {
                self.block_quote(out, tree, id);
                return Walk::SkipChildren;
            }
            NodeKind::List(data) => self.list(out, tree, id, *data, entering),
            NodeKind::Item => {
                self.list_item(out, tree, id);
                return Walk::SkipChildren;
            }
            NodeKind::Paragraph => self.paragraph(out, entering),
            NodeKind::Heading(level) => return self.heading(out, tree, id, *level, entering),
            NodeKind::HorizontalRule => self.horizontal_rule(out),
            NodeKind::CodeBlock(data) => self.code_block(out, &data.info, &tree.node(id).literal),
            NodeKind::HtmlBlock => self.html_block(out, &tree.node(id).literal),
            NodeKind::Table => {
                if !entering {
                    self.table(out);
                }
            }
            NodeKind::TableCell(cell) => {
                self.table_cell(tree, id, *cell);
                return Walk::SkipChildren;
            }
            NodeKind::Emphasis => out.push('*'),
            NodeKind::Strong => self.strong(out, entering),
            NodeKind::Strikethrough => out.push_str("~~"),
            NodeKind::Link(data) => {
                self.link(out, tree, id, data);
                return Walk::SkipChildren;
            }
            NodeKind::Image(data) => self.image(out, data, entering),
            NodeKind::Text => self.normal_text(out, &tree.node(id).literal),
            NodeKind::Code => {
                out.push('`');
                out.push_str(&tree.node(id).literal);
                out.push('`');
            }
            NodeKind::HtmlSpan => out.push_str(&tree.node(id).literal),
            NodeKind::Hardbreak => out.push_str("  \n"),
            NodeKind::FootnoteRef => out.push_str("<FootnoteRef: not implemented>"),
        }
        Walk::Continue
    }

    // Block-level handlers.

    fn paragraph(&mut self, out: &mut String, entering: bool) {
        if entering {
            double_space(out);
        } else {
            out.push('\n');
        }
    }

    fn heading(
        &mut self,
        out: &mut String,
        tree: &Tree,
        id: NodeId,
        level: u8,
        entering: bool,
    ) -> Walk {
        if entering {
            double_space(out);
        }
        if level >= 3 {
            if entering {
                for _ in 0..level {
                    out.push('#');
                }
                out.push(' ');
            } else {
                out.push('\n');
            }
            return Walk::Continue;
        }

        // Setext form: render the inline content in place, then underline it
        // to exactly its visual width.
        let marker = out.len();
        let mut child = tree.first_child(id);
        while let Some(c) = child {
            child = tree.next_sibling(c);
            self.render_subtree(out, tree, c);
        }
        let width = self.string_width(&out[marker..]);
        out.push('\n');
        let underline = if level == 1 { '=' } else { '-' };
        for _ in 0..width {
            out.push(underline);
        }
        out.push('\n');
        Walk::SkipChildren
    }

    fn block_quote(&mut self, out: &mut String, tree: &Tree, id: NodeId) {
        double_space(out);
        let buf = self.render_children(tree, id);
        for line in buf.lines() {
            if line.is_empty() {
                out.push_str(">\n");
            } else {
                out.push_str("> ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    fn list(&mut self, out: &mut String, tree: &Tree, id: NodeId, data: ListData, entering: bool) {
        if entering {
            let in_item = tree
                .parent(id)
                .is_some_and(|p| matches!(tree.node(p).kind, NodeKind::Item));
            // A list opening an item's content sits directly after the
            // marker; only loose lists get the separating blank line there.
            if !in_item || !data.tight {
                double_space(out);
            }
            self.lists.push(data.ordered, !data.tight);
        } else {
            self.lists.pop();
        }
    }

    fn list_item(&mut self, out: &mut String, tree: &Tree, id: NodeId) {
        let (ordered, loose) = match self.lists.current() {
            Some(level) => (level.ordered, level.loose),
            None => (false, false),
        };
        if loose && tree.prev_sibling(id).is_some() {
            out.push('\n');
        }
        if ordered {
            let n = self.lists.take_number();
            out.push_str(&n.to_string());
            out.push('.');
        } else {
            out.push('-');
        }
        let buf = self.render_children(tree, id);
        list::write_indented(out, &buf);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    fn horizontal_rule(&mut self, out: &mut String) {
        double_space(out);
        out.push_str("---\n");
    }

    fn code_block(&mut self, out: &mut String, info: &str, literal: &str) {
        double_space(out);
        let token = code::language_token(info);
        out.push_str("```");
        if let Some(token) = token {
            out.push_str(token);
        }
        out.push('\n');
        match token.and_then(|t| self.formatter.format(t, literal)) {
            Some(formatted) => out.push_str(&formatted),
            None => out.push_str(literal),
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n");
    }

    fn html_block(&mut self, out: &mut String, literal: &str) {
        double_space(out);
        out.push_str(literal.trim_end_matches('\n'));
        out.push('\n');
    }

    fn table(&mut self, out: &mut String) {
        double_space(out);
        self.table.emit(out);
    }

    fn table_cell(&mut self, tree: &Tree, id: NodeId, cell: CellData) {
        let buf = self.render_children(tree, id);
        let width = self.string_width(&buf);
        if cell.header {
            self.table.push_header(buf, width, cell.alignment);
        } else {
            self.table.push_cell(buf, width);
        }
    }

    // Span-level handlers.

    fn strong(&mut self, out: &mut String, entering: bool) {
        if entering && self.opts.terminal {
            out.push_str(BOLD_ON);
        }
        out.push_str("**");
        if !entering && self.opts.terminal {
            out.push_str(RESET);
        }
    }

    fn link(&mut self, out: &mut String, tree: &Tree, id: NodeId, data: &LinkData) {
        let buf = self.render_children(tree, id);

        // No title and the content equals the destination: autolink
        // shorthand.
        if data.title.is_empty() && data.destination == buf {
            out.push_str(&text::escape_destination(&data.destination));
            return;
        }

        out.push('[');
        out.push_str(&buf);
        out.push_str("](");
        out.push_str(&text::escape_destination(&data.destination));
        if !data.title.is_empty() {
            out.push_str(" \"");
            out.push_str(&data.title);
            out.push('"');
        }
        out.push(')');
    }

    fn image(&mut self, out: &mut String, data: &LinkData, entering: bool) {
        if entering {
            out.push_str("![");
        } else {
            out.push_str("](");
            out.push_str(&text::escape_destination(&data.destination));
            if !data.title.is_empty() {
                out.push_str(" \"");
                out.push_str(&data.title);
                out.push('"');
            }
            out.push(')');
        }
    }

    fn normal_text(&mut self, out: &mut String, raw: &str) {
        let escaped = text::needs_escaping(raw, &self.last_text);
        self.last_text = raw.to_string();

        let mut clean = text::clean_without_trim(raw);
        if escaped {
            clean.insert(0, '\\');
        }
        if clean.is_empty() {
            return;
        }
        // A collapsed leading space after an already-emitted space would
        // double the separator across adjacent inline runs.
        if clean.starts_with(' ') && out.ends_with(' ') {
            clean.remove(0);
        }
        out.push_str(&clean);
    }
}

/// Exactly one blank line before a block, and none at the very start.
fn double_space(out: &mut String) {
    if !out.is_empty() {
        out.push('\n');
    }
}
