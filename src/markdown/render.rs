//! Markdown-to-presentation renderer
//!
//! Turns a parsed block tree into a styled node tree for one variant. The
//! structure is identical for both variants; only the style lookups differ.

use super::ast::{self, Block, CellAlign, Inline};
use super::normalize::normalize;
use super::theme::{Element, RenderVariant, Style, Theme};

/// One node of the styled output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(StyledNode),
    Text(String),
}

/// An element with its resolved style, attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledNode {
    pub element: Element,
    pub style: Style,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl StyledNode {
    fn new(theme: &dyn Theme, element: Element, children: Vec<Node>) -> Self {
        Self {
            element,
            style: theme.style(element),
            attrs: Vec::new(),
            children,
        }
    }

    fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Concatenated text of the subtree
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Depth-first iterator over every element in the subtree, self included
    pub fn elements(&self) -> Vec<&StyledNode> {
        let mut out = vec![self];
        for child in &self.children {
            if let Node::Element(node) = child {
                out.extend(node.elements());
            }
        }
        out
    }

    /// Serialize as an HTML fragment
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let tag = self.element.tag();
        out.push('<');
        out.push_str(tag);
        if let Some(class) = self.style.class {
            push_attr(out, "class", class);
        }
        if let Some(css) = self.style.css {
            push_attr(out, "style", css);
        }
        for (name, value) in &self.attrs {
            push_attr(out, name, value);
        }
        if self.element.is_void() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(node) => node.write_html(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
            }
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render text as block-structured markup
///
/// The input is normalized here; callers pass raw text. Returns `None` when
/// nothing is left to show.
pub fn render_block(text: &str, variant: RenderVariant) -> Option<StyledNode> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    let theme = variant.theme();
    let blocks = ast::parse(&normalized);
    let children = blocks.iter().map(|block| render_block_node(theme, block)).collect();
    Some(StyledNode::new(theme, Element::Container, children))
}

/// Render text as one flat inline run
///
/// Block structure (paragraphs, lists, headings) is flattened away; emphasis,
/// code and links are kept.
pub fn render_inline(text: &str, variant: RenderVariant) -> Option<StyledNode> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    let theme = variant.theme();
    let inlines = ast::join_blocks(ast::parse(&normalized));
    let run = StyledNode::new(
        theme,
        Element::InlineRun,
        render_inlines(theme, &inlines, InlineMode::Flat),
    );
    Some(StyledNode::new(
        theme,
        Element::InlineRoot,
        vec![Node::Element(run)],
    ))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum InlineMode {
    Block,
    Flat,
}

fn render_block_node(theme: &dyn Theme, block: &Block) -> Node {
    let node = match block {
        Block::Heading { level, content } => StyledNode::new(
            theme,
            Element::Heading((*level).clamp(1, 4)),
            render_inlines(theme, content, InlineMode::Block),
        ),
        Block::Paragraph(content) => StyledNode::new(
            theme,
            Element::Paragraph,
            render_inlines(theme, content, InlineMode::Block),
        ),
        Block::Plain(content) => {
            // Only reachable at top level through malformed input; wrap like a paragraph
            StyledNode::new(
                theme,
                Element::Paragraph,
                render_inlines(theme, content, InlineMode::Block),
            )
        }
        Block::List { start, items } => {
            let element = if start.is_some() {
                Element::OrderedList
            } else {
                Element::UnorderedList
            };
            let children = items
                .iter()
                .map(|item| Node::Element(render_list_item(theme, item)))
                .collect();
            let list = StyledNode::new(theme, element, children);
            match start {
                Some(n) if *n != 1 => list.with_attr("start", n.to_string()),
                _ => list,
            }
        }
        Block::CodeBlock { language, code } => {
            let code_node = StyledNode::new(
                theme,
                Element::CodeBlock,
                vec![Node::Text(code.clone())],
            );
            let code_node = match language {
                Some(lang) => code_node.with_attr("data-language", lang.clone()),
                None => code_node,
            };
            StyledNode::new(theme, Element::Pre, vec![Node::Element(code_node)])
        }
        Block::BlockQuote(blocks) => StyledNode::new(
            theme,
            Element::BlockQuote,
            blocks.iter().map(|b| render_block_node(theme, b)).collect(),
        ),
        Block::Table {
            alignments,
            head,
            rows,
        } => {
            let head_row = render_table_row(theme, Element::TableHeaderCell, alignments, head);
            let body = rows
                .iter()
                .map(|row| Node::Element(render_table_row(theme, Element::TableCell, alignments, row)))
                .collect();
            StyledNode::new(
                theme,
                Element::Table,
                vec![
                    Node::Element(StyledNode::new(
                        theme,
                        Element::TableHead,
                        vec![Node::Element(head_row)],
                    )),
                    Node::Element(StyledNode::new(theme, Element::TableBody, body)),
                ],
            )
        }
        Block::Rule => StyledNode::new(theme, Element::Rule, Vec::new()),
    };
    Node::Element(node)
}

fn render_table_row(
    theme: &dyn Theme,
    cell: Element,
    alignments: &[CellAlign],
    cells: &[Vec<Inline>],
) -> StyledNode {
    let children = cells
        .iter()
        .enumerate()
        .map(|(index, content)| {
            let node = StyledNode::new(theme, cell, render_inlines(theme, content, InlineMode::Block));
            match alignments.get(index).and_then(|align| align.as_attr()) {
                Some(align) => Node::Element(node.with_attr("align", align)),
                None => Node::Element(node),
            }
        })
        .collect();
    StyledNode::new(theme, Element::TableRow, children)
}

fn render_list_item(theme: &dyn Theme, blocks: &[Block]) -> StyledNode {
    let mut body = Vec::new();
    for block in blocks {
        match block {
            Block::Plain(content) => body.extend(render_inlines(theme, content, InlineMode::Block)),
            other => body.push(render_block_node(theme, other)),
        }
    }

    let bullet = StyledNode::new(theme, Element::Bullet, Vec::new());
    let body = StyledNode::new(theme, Element::ListItemBody, body);
    StyledNode::new(
        theme,
        Element::ListItem,
        vec![Node::Element(bullet), Node::Element(body)],
    )
}

fn render_inlines(theme: &dyn Theme, inlines: &[Inline], mode: InlineMode) -> Vec<Node> {
    inlines
        .iter()
        .map(|inline| render_inline_node(theme, inline, mode))
        .collect()
}

fn render_inline_node(theme: &dyn Theme, inline: &Inline, mode: InlineMode) -> Node {
    let flat = mode == InlineMode::Flat;
    let node = match inline {
        Inline::Text(text) => return Node::Text(text.clone()),
        Inline::Strong(content) => StyledNode::new(
            theme,
            if flat { Element::InlineStrong } else { Element::Strong },
            render_inlines(theme, content, mode),
        ),
        Inline::Emphasis(content) => StyledNode::new(
            theme,
            if flat { Element::InlineEmphasis } else { Element::Emphasis },
            render_inlines(theme, content, mode),
        ),
        Inline::Strikethrough(content) => StyledNode::new(
            theme,
            if flat { Element::InlineStrikethrough } else { Element::Strikethrough },
            render_inlines(theme, content, mode),
        ),
        Inline::TaskMarker(checked) if flat => {
            return Node::Text(if *checked { "☑ " } else { "☐ " }.to_string())
        }
        Inline::TaskMarker(checked) => {
            let checkbox = StyledNode::new(theme, Element::Checkbox, Vec::new())
                .with_attr("type", "checkbox")
                .with_attr("disabled", "disabled");
            if *checked {
                checkbox.with_attr("checked", "checked")
            } else {
                checkbox
            }
        }
        Inline::Code(code) => StyledNode::new(
            theme,
            if flat { Element::InlineCode } else { Element::Code },
            vec![Node::Text(code.clone())],
        ),
        Inline::Link { href, content } => StyledNode::new(
            theme,
            if flat { Element::InlineLink } else { Element::Link },
            render_inlines(theme, content, mode),
        )
        .with_attr("href", href.clone())
        .with_attr("target", "_blank")
        .with_attr("rel", "noopener noreferrer"),
        Inline::LineBreak => StyledNode::new(theme, Element::LineBreak, Vec::new()),
    };
    Node::Element(node)
}
