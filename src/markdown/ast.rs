//! Abstract markdown tree
//!
//! One structural parse shared by every presentation. Built from pulldown-cmark
//! events with a frame stack. The GitHub extensions providers emit (tables,
//! strikethrough, task lists) are parsed; footnotes, images and raw HTML
//! degrade to their text content.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

/// URL schemes a link may point at
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Column alignment of a table cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl CellAlign {
    /// Value for the `align` attribute, if any
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            CellAlign::None => None,
            CellAlign::Left => Some("left"),
            CellAlign::Center => Some("center"),
            CellAlign::Right => Some("right"),
        }
    }
}

impl From<Alignment> for CellAlign {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::None => CellAlign::None,
            Alignment::Left => CellAlign::Left,
            Alignment::Center => CellAlign::Center,
            Alignment::Right => CellAlign::Right,
        }
    }
}

/// Table cells, one inline run per cell
pub type Row = Vec<Vec<Inline>>;

/// Block-level node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Inline run without a paragraph wrapper (tight list items)
    Plain(Vec<Inline>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    CodeBlock { language: Option<String>, code: String },
    BlockQuote(Vec<Block>),
    Table {
        alignments: Vec<CellAlign>,
        head: Row,
        rows: Vec<Row>,
    },
    Rule,
}

/// Inline node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Code(String),
    Link { href: String, content: Vec<Inline> },
    /// Checkbox opening a task list item
    TaskMarker(bool),
    LineBreak,
}

impl Inline {
    /// Plain text content, markup dropped
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) | Inline::Code(text) => text.clone(),
            Inline::Strong(content)
            | Inline::Emphasis(content)
            | Inline::Strikethrough(content) => plain_text(content),
            Inline::Link { content, .. } => plain_text(content),
            Inline::TaskMarker(_) => String::new(),
            Inline::LineBreak => "\n".to_string(),
        }
    }
}

pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

/// Whether a link target may be emitted as an `href`
///
/// Relative targets are allowed, as are the schemes in [`SAFE_SCHEMES`]. A
/// colon after the first `/`, `?` or `#` belongs to a relative path.
pub fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    let Some(colon) = href.find(':') else {
        return true;
    };
    if href[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = &href[..colon];
    SAFE_SCHEMES
        .iter()
        .any(|safe| scheme.eq_ignore_ascii_case(safe))
}

enum Frame {
    Root(Vec<Block>),
    Paragraph(Vec<Inline>),
    Heading(u8, Vec<Inline>),
    BlockQuote(Vec<Block>),
    List(Option<u64>, Vec<Vec<Block>>),
    Item(Vec<Block>, Vec<Inline>),
    CodeBlock(Option<String>, String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link(String, Vec<Inline>),
    Table(Vec<CellAlign>, Row, Vec<Row>),
    TableHead(Row),
    TableRow(Row),
    TableCell(Vec<Inline>),
    /// Unsupported container; children flow into the enclosing frame
    Transparent,
}

struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Root(Vec::new())],
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph | Tag::HtmlBlock => Frame::Paragraph(Vec::new()),
            Tag::Heading { level, .. } => Frame::Heading(heading_level(level), Vec::new()),
            Tag::BlockQuote(_) => Frame::BlockQuote(Vec::new()),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                };
                Frame::CodeBlock(language, String::new())
            }
            Tag::List(start) => Frame::List(start, Vec::new()),
            Tag::Item => Frame::Item(Vec::new(), Vec::new()),
            Tag::Strong => Frame::Strong(Vec::new()),
            Tag::Emphasis => Frame::Emphasis(Vec::new()),
            Tag::Strikethrough => Frame::Strikethrough(Vec::new()),
            Tag::Table(alignments) => Frame::Table(
                alignments.into_iter().map(CellAlign::from).collect(),
                Vec::new(),
                Vec::new(),
            ),
            Tag::TableHead => Frame::TableHead(Vec::new()),
            Tag::TableRow => Frame::TableRow(Vec::new()),
            Tag::TableCell => Frame::TableCell(Vec::new()),
            Tag::Link { dest_url, .. } => Frame::Link(dest_url.to_string(), Vec::new()),
            _ => Frame::Transparent,
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Root(blocks) => {
                // Unbalanced end event; keep the root in place
                self.stack.push(Frame::Root(blocks));
            }
            Frame::Paragraph(content) => self.push_block(Block::Paragraph(content)),
            Frame::Heading(level, content) => self.push_block(Block::Heading { level, content }),
            Frame::BlockQuote(blocks) => self.push_block(Block::BlockQuote(blocks)),
            Frame::List(start, items) => self.push_block(Block::List { start, items }),
            Frame::Item(mut blocks, pending) => {
                if !pending.is_empty() {
                    blocks.push(Block::Plain(pending));
                }
                if let Some(Frame::List(_, items)) = self.stack.last_mut() {
                    items.push(blocks);
                } else {
                    for block in blocks {
                        self.push_block(block);
                    }
                }
            }
            Frame::CodeBlock(language, code) => self.push_block(Block::CodeBlock { language, code }),
            Frame::Strong(content) => self.push_inline(Inline::Strong(content)),
            Frame::Emphasis(content) => self.push_inline(Inline::Emphasis(content)),
            Frame::Strikethrough(content) => self.push_inline(Inline::Strikethrough(content)),
            Frame::Link(href, content) if is_safe_href(&href) => {
                self.push_inline(Inline::Link { href, content })
            }
            Frame::Link(href, content) => {
                tracing::debug!(%href, "dropped link with unsafe target");
                for inline in content {
                    self.push_inline(inline);
                }
            }
            Frame::Table(alignments, head, rows) => self.push_block(Block::Table {
                alignments,
                head,
                rows,
            }),
            Frame::TableHead(cells) => {
                if let Some(Frame::Table(_, head, _)) = self.stack.last_mut() {
                    *head = cells;
                }
            }
            Frame::TableRow(cells) => match self.stack.last_mut() {
                Some(Frame::Table(_, _, rows)) => rows.push(cells),
                Some(Frame::TableHead(head)) => *head = cells,
                _ => {}
            },
            Frame::TableCell(content) => match self.stack.last_mut() {
                Some(Frame::TableHead(cells) | Frame::TableRow(cells)) => cells.push(content),
                _ => {
                    for inline in content {
                        self.push_inline(inline);
                    }
                }
            },
            Frame::Transparent => {}
        }
    }

    fn push_block(&mut self, block: Block) {
        let index = self.target_index();
        match &mut self.stack[index] {
            Frame::Root(blocks) | Frame::BlockQuote(blocks) => blocks.push(block),
            Frame::Item(blocks, pending) => {
                if !pending.is_empty() {
                    blocks.push(Block::Plain(std::mem::take(pending)));
                }
                blocks.push(block);
            }
            Frame::List(_, items) => items.push(vec![block]),
            // A block inside an inline container only happens for malformed
            // event streams; fold it into the inline run.
            Frame::Paragraph(content)
            | Frame::Heading(_, content)
            | Frame::Strong(content)
            | Frame::Emphasis(content)
            | Frame::Strikethrough(content)
            | Frame::Link(_, content)
            | Frame::TableCell(content) => content.extend(block_to_inlines(block)),
            Frame::CodeBlock(_, code) => code.push_str(&plain_text(&block_to_inlines(block))),
            Frame::Table(..) | Frame::TableHead(_) | Frame::TableRow(_) | Frame::Transparent => {}
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        let index = self.target_index();
        match &mut self.stack[index] {
            Frame::Paragraph(content)
            | Frame::Heading(_, content)
            | Frame::Strong(content)
            | Frame::Emphasis(content)
            | Frame::Strikethrough(content)
            | Frame::Link(_, content)
            | Frame::TableCell(content)
            | Frame::Item(_, content) => append_inline(content, inline),
            Frame::CodeBlock(_, code) => code.push_str(&inline.plain_text()),
            Frame::Root(blocks) | Frame::BlockQuote(blocks) => {
                if let Some(Block::Paragraph(content)) = blocks.last_mut() {
                    append_inline(content, inline);
                } else {
                    blocks.push(Block::Paragraph(vec![inline]));
                }
            }
            Frame::List(_, items) => items.push(vec![Block::Plain(vec![inline])]),
            Frame::Table(..) | Frame::TableHead(_) | Frame::TableRow(_) | Frame::Transparent => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        let index = self.target_index();
        if let Frame::CodeBlock(_, code) = &mut self.stack[index] {
            code.push_str(text);
            return;
        }
        self.push_inline(Inline::Text(text.to_string()));
    }

    /// Innermost frame that is not transparent
    fn target_index(&self) -> usize {
        self.stack
            .iter()
            .rposition(|frame| !matches!(frame, Frame::Transparent))
            .unwrap_or(0)
    }

    fn finish(mut self) -> Vec<Block> {
        while self.stack.len() > 1 {
            self.end();
        }
        match self.stack.pop() {
            Some(Frame::Root(blocks)) => blocks,
            _ => Vec::new(),
        }
    }
}

/// Push an inline, merging adjacent text runs
fn append_inline(content: &mut Vec<Inline>, inline: Inline) {
    if let (Some(Inline::Text(last)), Inline::Text(next)) = (content.last_mut(), &inline) {
        last.push_str(next);
        return;
    }
    content.push(inline);
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

/// Flatten a block into its inline content
pub fn block_to_inlines(block: Block) -> Vec<Inline> {
    match block {
        Block::Heading { content, .. } | Block::Paragraph(content) | Block::Plain(content) => {
            content
        }
        Block::CodeBlock { code, .. } => vec![Inline::Code(code.trim_end().to_string())],
        Block::BlockQuote(blocks) => join_blocks(blocks),
        Block::List { items, .. } => join_blocks(items.into_iter().flatten().collect()),
        Block::Table { head, rows, .. } => {
            let cells = std::iter::once(head).chain(rows).flatten();
            join_blocks(cells.map(Block::Plain).collect())
        }
        Block::Rule => Vec::new(),
    }
}

/// Flatten blocks into one inline run, separated by single spaces
pub fn join_blocks(blocks: Vec<Block>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for block in blocks {
        let content = block_to_inlines(block);
        if content.is_empty() {
            continue;
        }
        if !inlines.is_empty() {
            inlines.push(Inline::Text(" ".to_string()));
        }
        inlines.extend(content);
    }
    inlines
}

/// Parse already-normalized markdown into a block tree
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut builder = TreeBuilder::new();
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(_) => builder.end(),
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                builder.push_text(&text)
            }
            Event::Code(code) => builder.push_inline(Inline::Code(code.to_string())),
            Event::SoftBreak => builder.push_text("\n"),
            Event::HardBreak => builder.push_inline(Inline::LineBreak),
            Event::Rule => builder.push_block(Block::Rule),
            Event::TaskListMarker(checked) => builder.push_inline(Inline::TaskMarker(checked)),
            _ => {}
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Inline {
        Inline::Text(value.to_string())
    }

    #[test]
    fn test_parse_paragraph_with_emphasis() {
        let blocks = parse("Dit is **vet** en *schuin*.");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                text("Dit is "),
                Inline::Strong(vec![text("vet")]),
                text(" en "),
                Inline::Emphasis(vec![text("schuin")]),
                text("."),
            ])]
        );
    }

    #[test]
    fn test_parse_headings() {
        let blocks = parse("# Een\n\n#### Vier\n\n###### Zes");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, content: vec![text("Een")] },
                Block::Heading { level: 4, content: vec![text("Vier")] },
                Block::Heading { level: 6, content: vec![text("Zes")] },
            ]
        );
    }

    #[test]
    fn test_parse_tight_list() {
        let blocks = parse("- een\n- twee");
        assert_eq!(
            blocks,
            vec![Block::List {
                start: None,
                items: vec![
                    vec![Block::Plain(vec![text("een")])],
                    vec![Block::Plain(vec![text("twee")])],
                ],
            }]
        );
    }

    #[test]
    fn test_parse_ordered_list_start() {
        let blocks = parse("3. drie\n4. vier");
        match &blocks[0] {
            Block::List { start, items } => {
                assert_eq!(*start, Some(3));
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_code_block_language() {
        let blocks = parse("```json\n{\"a\": 1}\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: Some("json".to_string()),
                code: "{\"a\": 1}\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_link_and_inline_code() {
        let blocks = parse("Zie [n8n](https://n8n.io) en `Webhook`");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                text("Zie "),
                Inline::Link {
                    href: "https://n8n.io".to_string(),
                    content: vec![text("n8n")],
                },
                text(" en "),
                Inline::Code("Webhook".to_string()),
            ])]
        );
    }

    #[test]
    fn test_parse_blockquote_and_rule() {
        let blocks = parse("> citaat\n\n---");
        assert_eq!(
            blocks,
            vec![
                Block::BlockQuote(vec![Block::Paragraph(vec![text("citaat")])]),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn test_image_degrades_to_alt_text() {
        let blocks = parse("![logo](x.png)");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("logo")])]);
    }

    #[test]
    fn test_safe_href() {
        assert!(is_safe_href("https://n8n.io"));
        assert!(is_safe_href("HTTP://n8n.io"));
        assert!(is_safe_href("mailto:info@example.nl"));
        assert!(is_safe_href("/prijzen"));
        assert!(is_safe_href("#prijzen"));
        assert!(is_safe_href("docs/a:b"));
        assert!(!is_safe_href("javascript:alert(1)"));
        assert!(!is_safe_href("JavaScript:alert(1)"));
        assert!(!is_safe_href("data:text/html,x"));
        assert!(!is_safe_href("vbscript:x"));
    }

    #[test]
    fn test_unsafe_link_becomes_text() {
        let blocks = parse("Zie [klik](javascript:alert(1)) hier");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("Zie klik hier")])]);
    }

    #[test]
    fn test_parse_table() {
        let blocks = parse("| A | B |\n|---|:-:|\n| 1 | *2* |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                alignments: vec![CellAlign::None, CellAlign::Center],
                head: vec![vec![text("A")], vec![text("B")]],
                rows: vec![vec![vec![text("1")], vec![Inline::Emphasis(vec![text("2")])]]],
            }]
        );
    }

    #[test]
    fn test_parse_strikethrough_and_task_marker() {
        let blocks = parse("- [x] ~~weg~~");
        assert_eq!(
            blocks,
            vec![Block::List {
                start: None,
                items: vec![vec![Block::Plain(vec![
                    Inline::TaskMarker(true),
                    Inline::Strikethrough(vec![text("weg")]),
                ])]],
            }]
        );
    }

    #[test]
    fn test_join_blocks_flattens() {
        let inlines = join_blocks(parse("# Kop\n\nAlinea\n\n- punt"));
        assert_eq!(plain_text(&inlines), "Kop Alinea punt");

        let inlines = join_blocks(parse("| A | B |\n|---|---|\n| 1 | 2 |"));
        assert_eq!(plain_text(&inlines), "A B 1 2");
    }
}
