//! Style tables for the two render variants
//!
//! The dark table targets the interactive screen and uses utility classes.
//! The light table targets print/export and uses literal inline CSS, so the
//! output does not depend on any stylesheet being present.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which visual theme to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderVariant {
    #[default]
    Dark,
    Light,
}

impl RenderVariant {
    pub fn theme(self) -> &'static dyn Theme {
        match self {
            RenderVariant::Dark => &DarkTheme,
            RenderVariant::Light => &LightTheme,
        }
    }
}

impl fmt::Display for RenderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderVariant::Dark => write!(f, "dark"),
            RenderVariant::Light => write!(f, "light"),
        }
    }
}

impl FromStr for RenderVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(RenderVariant::Dark),
            "light" => Ok(RenderVariant::Light),
            other => Err(format!("unknown render variant '{}' (expected dark or light)", other)),
        }
    }
}

/// Every styled element the renderer can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Block-mode wrapper
    Container,
    /// Heading, level clamped to 1..=4
    Heading(u8),
    Paragraph,
    Strong,
    Emphasis,
    UnorderedList,
    OrderedList,
    ListItem,
    /// Dot drawn in front of every list item
    Bullet,
    ListItemBody,
    Code,
    CodeBlock,
    Pre,
    Link,
    BlockQuote,
    Rule,
    LineBreak,
    Strikethrough,
    /// Disabled checkbox of a task list item
    Checkbox,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    /// Inline-mode wrapper
    InlineRoot,
    /// Paragraph content in inline mode
    InlineRun,
    InlineStrong,
    InlineEmphasis,
    InlineCode,
    InlineLink,
    InlineStrikethrough,
}

impl Element {
    pub fn tag(&self) -> &'static str {
        match self {
            Element::Container | Element::Bullet => "div",
            Element::Heading(1) => "h1",
            Element::Heading(2) => "h2",
            Element::Heading(3) => "h3",
            Element::Heading(_) => "h4",
            Element::Paragraph => "p",
            Element::Strong | Element::InlineStrong => "strong",
            Element::Emphasis | Element::InlineEmphasis => "em",
            Element::UnorderedList => "ul",
            Element::OrderedList => "ol",
            Element::ListItem => "li",
            Element::ListItemBody | Element::InlineRoot | Element::InlineRun => "span",
            Element::Code | Element::CodeBlock | Element::InlineCode => "code",
            Element::Pre => "pre",
            Element::Link | Element::InlineLink => "a",
            Element::BlockQuote => "blockquote",
            Element::Rule => "hr",
            Element::LineBreak => "br",
            Element::Strikethrough | Element::InlineStrikethrough => "del",
            Element::Checkbox => "input",
            Element::Table => "table",
            Element::TableHead => "thead",
            Element::TableBody => "tbody",
            Element::TableRow => "tr",
            Element::TableHeaderCell => "th",
            Element::TableCell => "td",
        }
    }

    /// Elements rendered without children or a closing tag
    pub fn is_void(&self) -> bool {
        matches!(self, Element::Rule | Element::LineBreak | Element::Checkbox)
    }

    /// Elements allowed in inline-only output
    pub fn is_inline_mode(&self) -> bool {
        matches!(
            self,
            Element::InlineRoot
                | Element::InlineRun
                | Element::InlineStrong
                | Element::InlineEmphasis
                | Element::InlineCode
                | Element::InlineLink
                | Element::InlineStrikethrough
                | Element::LineBreak
        )
    }
}

/// Presentation attached to one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    /// Utility class list
    pub class: Option<&'static str>,
    /// Literal inline CSS declarations
    pub css: Option<&'static str>,
}

impl Style {
    pub const NONE: Style = Style {
        class: None,
        css: None,
    };

    pub const fn class(class: &'static str) -> Self {
        Style {
            class: Some(class),
            css: None,
        }
    }

    pub const fn css(css: &'static str) -> Self {
        Style {
            class: None,
            css: Some(css),
        }
    }
}

/// Style lookup strategy, one implementation per variant
pub trait Theme: Sync {
    fn variant(&self) -> RenderVariant;
    fn style(&self, element: Element) -> Style;
}

pub struct DarkTheme;

impl Theme for DarkTheme {
    fn variant(&self) -> RenderVariant {
        RenderVariant::Dark
    }

    fn style(&self, element: Element) -> Style {
        match element {
            Element::Container => Style::class(
                "prose prose-invert prose-slate max-w-none prose-ul:list-none prose-ul:pl-0 prose-li:pl-0 prose-li:my-0",
            ),
            Element::Heading(1) => Style::class("text-2xl font-bold text-white mb-4 mt-6 first:mt-0"),
            Element::Heading(2) => Style::class("text-xl font-bold text-white mb-3 mt-5 first:mt-0"),
            Element::Heading(3) => Style::class("text-lg font-semibold text-white mb-2 mt-4 first:mt-0"),
            Element::Heading(_) => {
                Style::class("text-base font-semibold text-slate-200 mb-2 mt-3 first:mt-0")
            }
            Element::Paragraph => Style::class("text-slate-300 leading-relaxed mb-3 last:mb-0"),
            Element::Strong | Element::InlineStrong => Style::class("font-bold text-white"),
            Element::Emphasis | Element::InlineEmphasis => Style::class("italic text-slate-200"),
            Element::UnorderedList => Style::class("list-none space-y-2 mb-4 pl-0"),
            Element::OrderedList => {
                Style::class("list-decimal list-inside space-y-2 mb-4 pl-0 marker:text-slate-400")
            }
            Element::ListItem => Style::class("text-slate-300 leading-relaxed flex items-start gap-2"),
            Element::Bullet => Style {
                class: Some("mt-2 w-1.5 h-1.5 rounded-full bg-indigo-400 flex-shrink-0"),
                css: Some("background-color:#818cf8;min-width:6px;min-height:6px"),
            },
            Element::ListItemBody => Style::NONE,
            Element::Code => {
                Style::class("bg-slate-800 text-indigo-300 px-1.5 py-0.5 rounded text-sm font-mono")
            }
            Element::CodeBlock => Style::class(
                "bg-slate-800 text-indigo-300 px-1.5 py-0.5 rounded text-sm font-mono block",
            ),
            Element::Pre => {
                Style::class("bg-slate-900 border border-slate-700 rounded-lg p-4 overflow-x-auto mb-4")
            }
            Element::Link => Style::class("text-indigo-400 hover:text-indigo-300 underline"),
            Element::BlockQuote => {
                Style::class("border-l-4 border-indigo-500 pl-4 italic text-slate-400 my-4")
            }
            Element::Rule => Style::class("border-slate-700 my-6"),
            Element::LineBreak => Style::NONE,
            Element::InlineRoot | Element::InlineRun => Style::class("text-slate-300"),
            Element::InlineCode => {
                Style::class("bg-slate-800 text-indigo-300 px-1 py-0.5 rounded text-sm font-mono")
            }
            Element::InlineLink => Style::class("text-indigo-400 hover:underline"),
            Element::Strikethrough | Element::InlineStrikethrough => {
                Style::class("line-through text-slate-500")
            }
            Element::Checkbox => Style::class("mr-2 accent-indigo-500 align-middle"),
            Element::Table => Style::class("w-full border-collapse text-sm mb-4"),
            Element::TableHead => Style::class("bg-slate-800"),
            Element::TableBody => Style::NONE,
            Element::TableRow => Style::class("border-b border-slate-700"),
            Element::TableHeaderCell => Style::class("px-3 py-2 font-semibold text-white"),
            Element::TableCell => Style::class("px-3 py-2 text-slate-300 align-top"),
        }
    }
}

pub struct LightTheme;

impl Theme for LightTheme {
    fn variant(&self) -> RenderVariant {
        RenderVariant::Light
    }

    fn style(&self, element: Element) -> Style {
        match element {
            Element::Container => Style::css("color:#1e293b;max-width:none"),
            Element::Heading(1) => Style::css(
                "font-size:1.5rem;font-weight:bold;color:#0f172a;margin-bottom:1rem;margin-top:1.5rem",
            ),
            Element::Heading(2) => Style::css(
                "font-size:1.25rem;font-weight:bold;color:#0f172a;margin-bottom:0.75rem;margin-top:1.25rem",
            ),
            Element::Heading(3) => Style::css(
                "font-size:1.125rem;font-weight:600;color:#1e293b;margin-bottom:0.5rem;margin-top:1rem",
            ),
            Element::Heading(_) => Style::css(
                "font-size:1rem;font-weight:600;color:#1e293b;margin-bottom:0.5rem;margin-top:0.75rem",
            ),
            Element::Paragraph => Style::css("color:#1e293b;line-height:1.625;margin-bottom:0.75rem"),
            Element::Strong | Element::InlineStrong => Style::css("font-weight:bold;color:#0f172a"),
            Element::Emphasis | Element::InlineEmphasis => {
                Style::css("font-style:italic;color:#1e293b")
            }
            Element::UnorderedList => {
                Style::css("list-style:none;margin:0;padding:0;margin-bottom:1rem")
            }
            Element::OrderedList => Style::css(
                "list-style-type:decimal;list-style-position:inside;margin-bottom:1rem;padding:0",
            ),
            Element::ListItem => Style::css(
                "color:#1e293b;line-height:1.625;display:flex;align-items:flex-start;gap:0.5rem;margin-bottom:0.5rem",
            ),
            Element::Bullet => Style::css(
                "margin-top:0.5rem;width:6px;height:6px;border-radius:50%;background-color:#4f46e5;flex-shrink:0",
            ),
            Element::ListItemBody | Element::InlineRoot | Element::InlineRun => {
                Style::css("color:#1e293b")
            }
            Element::Code => Style::css(
                "background-color:#f1f5f9;color:#4338ca;padding:0.125rem 0.375rem;border-radius:0.25rem;font-size:0.875rem;font-family:monospace",
            ),
            Element::CodeBlock => Style::css(
                "background-color:#f1f5f9;color:#4338ca;padding:0.125rem 0.375rem;border-radius:0.25rem;font-size:0.875rem;font-family:monospace;display:block",
            ),
            Element::Pre => Style::css(
                "background-color:#f8fafc;border:1px solid #e2e8f0;border-radius:0.5rem;padding:1rem;overflow:auto;margin-bottom:1rem",
            ),
            Element::Link => Style::css("color:#4f46e5;text-decoration:underline"),
            Element::BlockQuote => Style::css(
                "border-left:4px solid #6366f1;padding-left:1rem;font-style:italic;color:#475569;margin:1rem 0",
            ),
            Element::Rule => Style::css("border-color:#cbd5e1;margin:1.5rem 0"),
            Element::LineBreak => Style::NONE,
            Element::InlineCode => Style::css(
                "background-color:#f1f5f9;color:#4338ca;padding:0.125rem 0.25rem;border-radius:0.25rem;font-size:0.875rem;font-family:monospace",
            ),
            Element::InlineLink => Style::css("color:#4f46e5;text-decoration:underline"),
            Element::Strikethrough | Element::InlineStrikethrough => {
                Style::css("text-decoration:line-through;color:#64748b")
            }
            Element::Checkbox => Style::css("margin-right:0.5rem;vertical-align:middle"),
            Element::Table => Style::css(
                "width:100%;border-collapse:collapse;font-size:0.875rem;margin-bottom:1rem",
            ),
            Element::TableHead => Style::css("background-color:#f1f5f9"),
            Element::TableBody => Style::NONE,
            Element::TableRow => Style::css("border-bottom:1px solid #e2e8f0"),
            Element::TableHeaderCell => Style::css(
                "padding:0.5rem 0.75rem;font-weight:600;color:#0f172a;border:1px solid #e2e8f0",
            ),
            Element::TableCell => Style::css(
                "padding:0.5rem 0.75rem;color:#1e293b;vertical-align:top;border:1px solid #e2e8f0",
            ),
        }
    }
}
