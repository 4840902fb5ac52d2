//! Word-compatible export
//!
//! Word opens HTML saved with a `.doc` extension when the Office namespaces
//! are declared. Word's HTML engine ignores most CSS, so markdown fields go
//! through a small line-based converter with inline styles instead of the
//! presentation renderer.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::document::{Accent, Document, Metric, Part, Section, Tone, BRAND};
use crate::markdown::ast::{is_safe_href, CellAlign};
use crate::markdown::{escape_html, normalize};

const PARAGRAPH_OPEN: &str = "<p style=\"margin:10px 0;\">";
const UNORDERED_OPEN: &str = "<ul style=\"margin:10px 0 10px 20px;padding-left:0;\">";
const ORDERED_OPEN: &str = "<ol style=\"margin:10px 0 10px 20px;padding-left:0;\">";
const ITEM_OPEN: &str = "<li style=\"margin:5px 0;\">";
const CODE_OPEN: &str = "<code style=\"background:#f0f0f0;padding:2px 4px;border-radius:3px;font-family:monospace;\">";
const TABLE_OPEN: &str = "<table style=\"border-collapse:collapse;margin:10px 0;\">";
const CELL_STYLE: &str = "border:1px solid #ccc;padding:4px 8px;";

const DOCUMENT_STYLE: &str = "body { font-family: 'Arial', sans-serif; line-height: 1.5; color: #333; }
h1 { font-size: 24pt; color: #1e3a8a; border-bottom: 2px solid #ccc; padding-bottom: 10px; margin-bottom: 20px; }
h2 { font-size: 18pt; color: #1e3a8a; margin-top: 30px; margin-bottom: 10px; }
h3 { font-size: 14pt; color: #333; font-weight: bold; margin-top: 20px; margin-bottom: 5px; }
p, li { font-size: 11pt; margin-bottom: 10px; }
.box { border: 1px solid #ccc; background-color: #f9f9f9; padding: 15px; margin-bottom: 20px; }
table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }
td { padding: 10px; vertical-align: top; }
.label { font-size: 9pt; color: #666; text-transform: uppercase; font-weight: bold; }
.value { font-size: 12pt; font-weight: bold; color: #000; }";

fn code_span_regex() -> &'static Regex {
    static CODE_SPAN_RE: OnceLock<Regex> = OnceLock::new();
    CODE_SPAN_RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("code span regex must compile"))
}

fn strong_regex() -> &'static Regex {
    static STRONG_RE: OnceLock<Regex> = OnceLock::new();
    STRONG_RE.get_or_init(|| {
        Regex::new(r"\*\*(\S(?:.*?\S)?)\*\*").expect("strong regex must compile")
    })
}

fn underscore_strong_regex() -> &'static Regex {
    static UNDERSCORE_STRONG_RE: OnceLock<Regex> = OnceLock::new();
    UNDERSCORE_STRONG_RE.get_or_init(|| {
        Regex::new(r"__(\S(?:.*?\S)?)__").expect("underscore strong regex must compile")
    })
}

fn emphasis_regex() -> &'static Regex {
    static EMPHASIS_RE: OnceLock<Regex> = OnceLock::new();
    EMPHASIS_RE.get_or_init(|| {
        Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("emphasis regex must compile")
    })
}

fn underscore_emphasis_regex() -> &'static Regex {
    static UNDERSCORE_EMPHASIS_RE: OnceLock<Regex> = OnceLock::new();
    UNDERSCORE_EMPHASIS_RE.get_or_init(|| {
        Regex::new(r"_([^_\s](?:[^_]*[^_\s])?)_").expect("underscore emphasis regex must compile")
    })
}

fn strikethrough_regex() -> &'static Regex {
    static STRIKETHROUGH_RE: OnceLock<Regex> = OnceLock::new();
    STRIKETHROUGH_RE.get_or_init(|| {
        Regex::new(r"~~(\S(?:.*?\S)?)~~").expect("strikethrough regex must compile")
    })
}

fn link_regex() -> &'static Regex {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    LINK_RE.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)").expect("link regex must compile")
    })
}

fn table_delimiter_regex() -> &'static Regex {
    static TABLE_DELIMITER_RE: OnceLock<Regex> = OnceLock::new();
    TABLE_DELIMITER_RE.get_or_init(|| {
        Regex::new(r"^\s*\|?\s*:?-+:?\s*(?:\|\s*:?-+:?\s*)*\|?\s*$")
            .expect("table delimiter regex must compile")
    })
}

fn task_marker_regex() -> &'static Regex {
    static TASK_MARKER_RE: OnceLock<Regex> = OnceLock::new();
    TASK_MARKER_RE.get_or_init(|| {
        Regex::new(r"^\[([ xX])\]\s+(.*)$").expect("task marker regex must compile")
    })
}

fn heading_regex() -> &'static Regex {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    HEADING_RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?[ \t]*$").expect("heading regex must compile")
    })
}

fn list_item_regex() -> &'static Regex {
    static LIST_ITEM_RE: OnceLock<Regex> = OnceLock::new();
    LIST_ITEM_RE.get_or_init(|| {
        Regex::new(r"^\s*(?:([*+-])|([0-9]{1,9})[.)])\s+(.*)$").expect("list item regex must compile")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Wrap underscore-delimited spans in `tag`
///
/// Underscores inside a word never delimit, so the character before the
/// opener and after the closer must not be alphanumeric.
fn replace_underscore_spans(text: &str, re: &Regex, tag: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = 0;
    while let Some(caps) = re.captures_at(text, search) {
        let Some(span) = caps.get(0) else { break };
        let before = text[..span.start()].chars().next_back();
        let after = text[span.end()..].chars().next();
        if before.is_some_and(char::is_alphanumeric) || after.is_some_and(char::is_alphanumeric) {
            // The opener is an ASCII underscore, so one byte on is a char boundary
            search = span.start() + 1;
            continue;
        }
        output.push_str(&text[cursor..span.start()]);
        output.push_str(&format!("<{tag}>{}</{tag}>", &caps[1]));
        cursor = span.end();
        search = cursor;
    }
    output.push_str(&text[cursor..]);
    output
}

/// Emphasis, code spans and links for one escaped line
fn apply_emphasis(escaped: &str) -> String {
    let strong = strong_regex().replace_all(escaped, "<strong>${1}</strong>");
    let strong = replace_underscore_spans(&strong, underscore_strong_regex(), "strong");
    let struck = strikethrough_regex().replace_all(&strong, "<del>${1}</del>");
    let emphasis = emphasis_regex().replace_all(&struck, "<em>${1}</em>");
    let emphasis = replace_underscore_spans(&emphasis, underscore_emphasis_regex(), "em");
    link_regex()
        .replace_all(&emphasis, |caps: &Captures| {
            if is_safe_href(&caps[2]) {
                format!("<a href=\"{}\">{}</a>", &caps[2], &caps[1])
            } else {
                caps[1].to_string()
            }
        })
        .into_owned()
}

/// Inline markup for one line of already-normalized text
fn inline_markup(line: &str) -> String {
    let mut output = String::new();
    let mut cursor = 0;
    for caps in code_span_regex().captures_iter(line) {
        let Some(span) = caps.get(0) else { continue };
        output.push_str(&apply_emphasis(&escape_html(&line[cursor..span.start()])));
        output.push_str(CODE_OPEN);
        output.push_str(&escape_html(caps[1].trim()));
        output.push_str("</code>");
        cursor = span.end();
    }
    output.push_str(&apply_emphasis(&escape_html(&line[cursor..])));
    output
}

/// Checkbox glyph in front of a `[ ]` or `[x]` list item
fn task_item_text(text: &str) -> String {
    match task_marker_regex().captures(text) {
        Some(caps) => {
            let glyph = if &caps[1] == " " { '☐' } else { '☑' };
            format!("{} {}", glyph, &caps[2])
        }
        None => text.to_string(),
    }
}

/// Cells of one table line, outer pipes dropped and `\|` unescaped
fn split_table_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

fn cell_align(delimiter: &str) -> CellAlign {
    match (delimiter.starts_with(':'), delimiter.ends_with(':')) {
        (true, true) => CellAlign::Center,
        (true, false) => CellAlign::Left,
        (false, true) => CellAlign::Right,
        (false, false) => CellAlign::None,
    }
}

/// A pipe table found at the start of a run of lines
struct Table {
    alignments: Vec<CellAlign>,
    head: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse a table from `lines[0]`, returning it with the number of lines used
    ///
    /// The header and delimiter rows must have the same number of cells. Body
    /// rows are padded or cut to that width.
    fn parse(lines: &[&str]) -> Option<(Table, usize)> {
        let (header, delimiter) = match lines {
            [header, delimiter, ..] => (*header, *delimiter),
            _ => return None,
        };
        if !header.contains('|') || !table_delimiter_regex().is_match(delimiter) {
            return None;
        }

        let head = split_table_row(header);
        let alignments: Vec<CellAlign> = split_table_row(delimiter)
            .iter()
            .map(|cell| cell_align(cell))
            .collect();
        if head.len() != alignments.len() {
            return None;
        }

        let rows: Vec<Vec<String>> = lines[2..]
            .iter()
            .take_while(|line| !line.trim().is_empty() && line.contains('|'))
            .map(|line| {
                let mut cells = split_table_row(line);
                cells.resize(head.len(), String::new());
                cells
            })
            .collect();
        let consumed = 2 + rows.len();
        Some((
            Table {
                alignments,
                head,
                rows,
            },
            consumed,
        ))
    }

    fn row_markup(&self, cells: &[String], tag: &str) -> String {
        let mut output = String::from("<tr>");
        for (cell, align) in cells.iter().zip(&self.alignments) {
            let align = align
                .as_attr()
                .map(|value| format!(" align=\"{}\"", value))
                .unwrap_or_default();
            output.push_str(&format!(
                "<{tag} style=\"{CELL_STYLE}\"{align}>{}</{tag}>",
                inline_markup(cell)
            ));
        }
        output.push_str("</tr>");
        output
    }

    fn to_markup(&self) -> String {
        let mut output = String::from(TABLE_OPEN);
        output.push_str(&self.row_markup(&self.head, "th"));
        for row in &self.rows {
            output.push_str(&self.row_markup(row, "td"));
        }
        output.push_str("</table>");
        output
    }
}

fn heading_markup(level: usize, content: &str) -> String {
    let (tag, size, margin) = match level {
        1 => ("h2", "16pt", "20px 0 10px 0"),
        2 => ("h3", "14pt", "15px 0 5px 0"),
        _ => ("h4", "12pt", "10px 0 5px 0"),
    };
    format!(
        "<{tag} style=\"font-size:{size};font-weight:bold;margin:{margin};\">{}</{tag}>",
        inline_markup(content)
    )
}

/// Accumulates open paragraph and list state while walking lines
#[derive(Default)]
struct MarkupBuilder {
    output: String,
    paragraph: Vec<String>,
    list: Option<(ListKind, Vec<String>)>,
}

impl MarkupBuilder {
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let lines: Vec<String> = self.paragraph.drain(..).map(|l| inline_markup(&l)).collect();
        self.output.push_str(PARAGRAPH_OPEN);
        self.output.push_str(&lines.join("<br/>"));
        self.output.push_str("</p>");
    }

    fn flush_list(&mut self) {
        let Some((kind, items)) = self.list.take() else {
            return;
        };
        let (open, close) = match kind {
            ListKind::Unordered => (UNORDERED_OPEN, "</ul>"),
            ListKind::Ordered => (ORDERED_OPEN, "</ol>"),
        };
        self.output.push_str(open);
        for item in items {
            self.output.push_str(ITEM_OPEN);
            self.output.push_str(&inline_markup(&item));
            self.output.push_str("</li>");
        }
        self.output.push_str(close);
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    fn push_item(&mut self, kind: ListKind, text: &str) {
        self.flush_paragraph();
        if self.list.as_ref().is_some_and(|(open, _)| *open != kind) {
            self.flush_list();
        }
        self.list
            .get_or_insert_with(|| (kind, Vec::new()))
            .1
            .push(task_item_text(text));
    }

    fn push_line(&mut self, line: &str) {
        // Lazy continuation of the open list item
        if let Some((_, items)) = self.list.as_mut() {
            if let Some(last) = items.last_mut() {
                last.push(' ');
                last.push_str(line.trim());
                return;
            }
        }
        self.paragraph.push(line.trim().to_string());
    }

    fn finish(mut self) -> String {
        self.flush();
        self.output
    }
}

/// Convert a markdown field to Word-friendly markup
///
/// The field is normalized first, so it sees the same text the presentation
/// renderer does.
pub fn markdown_to_markup(text: &str) -> String {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = normalized.lines().collect();
    let mut builder = MarkupBuilder::default();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        if let Some((table, consumed)) = Table::parse(&lines[index..]) {
            builder.flush();
            builder.output.push_str(&table.to_markup());
            index += consumed;
            continue;
        }
        index += 1;

        if line.trim().is_empty() {
            builder.flush();
            continue;
        }

        if let Some(caps) = heading_regex().captures(line) {
            builder.flush();
            let content = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            builder
                .output
                .push_str(&heading_markup(caps[1].len(), content));
            continue;
        }

        if let Some(caps) = list_item_regex().captures(line) {
            let kind = if caps.get(1).is_some() {
                ListKind::Unordered
            } else {
                ListKind::Ordered
            };
            builder.push_item(kind, &caps[3]);
            continue;
        }

        builder.push_line(line);
    }

    builder.finish()
}

/// Convert a short markdown phrase to inline-only markup
///
/// Line structure and list or heading markers are flattened into one run.
pub fn markdown_to_inline_markup(text: &str) -> String {
    let normalized = normalize(text);
    let words: Vec<String> = normalized
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if let Some(caps) = heading_regex().captures(line) {
                caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string()
            } else if let Some(caps) = list_item_regex().captures(line) {
                task_item_text(&caps[3])
            } else {
                line.trim().to_string()
            }
        })
        .collect();
    inline_markup(&words.join(" "))
}

fn accent_color(accent: Accent) -> Option<&'static str> {
    match accent {
        Accent::Positive => Some("#059669"),
        Accent::Brand => Some("#2563eb"),
        Accent::Neutral => None,
    }
}

fn render_metric(metric: &Metric) -> String {
    let style = accent_color(metric.accent)
        .map(|color| format!(" style=\"color:{};\"", color))
        .unwrap_or_default();
    format!(
        "<td style=\"background:#f0f9ff; border:1px solid #e0e0e0;\">\n<div class=\"label\">{}</div>\n<div class=\"value\"{}>{}</div>\n</td>\n",
        metric.label,
        style,
        escape_html(&metric.value)
    )
}

fn render_part(part: &Part) -> String {
    match part {
        Part::Text {
            heading,
            body,
            tone,
        } => {
            let inner = format!(
                "<h3>{}</h3>\n{}\n",
                escape_html(heading),
                markdown_to_markup(body)
            );
            if *tone == Tone::Panel {
                format!("<div class=\"box\">\n{}</div>\n", inner)
            } else {
                inner
            }
        }
        Part::Bullets { heading, items } => {
            let mut output = format!("<h3>{}</h3>\n<ul>\n", escape_html(heading));
            for item in items {
                output.push_str(&format!("<li>{}</li>\n", markdown_to_inline_markup(item)));
            }
            output.push_str("</ul>\n");
            output
        }
        Part::Tags { heading, items } => {
            let joined: Vec<String> = items.iter().map(|item| escape_html(item)).collect();
            format!(
                "<p><strong>{}:</strong> {}</p>\n",
                escape_html(heading),
                joined.join(", ")
            )
        }
    }
}

fn render_section(section: &Section) -> String {
    let mut output = format!("<h2>{}</h2>\n", escape_html(&section.heading()));
    for part in &section.parts {
        output.push_str(&render_part(part));
    }
    output
}

/// Serialize a document as Word-compatible HTML
pub fn to_html(doc: &Document) -> String {
    let mut output = String::new();

    output.push_str("<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>\n");
    output.push_str("<head>\n<meta charset=\"utf-8\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(&doc.title)));
    output.push_str(&format!("<style>\n{}\n</style>\n</head>\n<body>\n", DOCUMENT_STYLE));

    output.push_str(&format!(
        "<h1>{} {}</h1>\n",
        escape_html(&doc.emoji),
        escape_html(&doc.title)
    ));
    output.push_str(&format!(
        "<p style=\"font-size: 14pt; font-style: italic;\">{}</p>\n",
        escape_html(&doc.one_liner)
    ));

    output.push_str("<table>\n<tr>\n");
    for metric in &doc.metrics {
        output.push_str(&render_metric(metric));
    }
    output.push_str("</tr>\n</table>\n");

    for section in &doc.sections {
        output.push_str(&render_section(section));
    }

    output.push_str(&format!(
        "<br/><br/>\n<p style=\"font-size:9pt; color:#999; text-align:center;\">Gegenereerd met {}</p>\n",
        BRAND
    ));
    output.push_str("</body>\n</html>\n");
    output
}
