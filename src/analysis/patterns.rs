//! Header precedence table for the analysis sections
//!
//! Each section lists its acceptable header forms in preference order. The
//! first form that matches anywhere in the text wins; forms are never compared
//! by position. New phrasings go here, not in the extraction code.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// The three analysis sections, in their logical sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Activity,
    Audience,
    Tasks,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [SectionKind::Activity, SectionKind::Audience, SectionKind::Tasks];

    /// Sequence number a header for this section may carry
    pub fn position(self) -> u8 {
        match self {
            SectionKind::Activity => 1,
            SectionKind::Audience => 2,
            SectionKind::Tasks => 3,
        }
    }

    /// Heading shown above the section in rendered output
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Activity => "Kernactiviteit",
            SectionKind::Audience => "Doelgroep",
            SectionKind::Tasks => "Kansen & Taken",
        }
    }

    pub fn header_patterns(self) -> &'static [HeaderPattern] {
        match self {
            SectionKind::Activity => ACTIVITY_HEADERS,
            SectionKind::Audience => AUDIENCE_HEADERS,
            SectionKind::Tasks => TASKS_HEADERS,
        }
    }

    fn index(self) -> usize {
        self.position() as usize - 1
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Activity => write!(f, "activity"),
            SectionKind::Audience => write!(f, "audience"),
            SectionKind::Tasks => write!(f, "tasks"),
        }
    }
}

/// One acceptable header form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPattern {
    /// Requires the section's sequence number in front of the keyword
    pub numbered: bool,
    /// Case-insensitive regex fragment for the header words
    pub keyword: &'static str,
}

const fn numbered(keyword: &'static str) -> HeaderPattern {
    HeaderPattern {
        numbered: true,
        keyword,
    }
}

const fn unnumbered(keyword: &'static str) -> HeaderPattern {
    HeaderPattern {
        numbered: false,
        keyword,
    }
}

pub const ACTIVITY_HEADERS: &[HeaderPattern] = &[
    numbered("kernactiviteit"),
    unnumbered("kernactiviteit"),
    numbered("activiteit"),
];

pub const AUDIENCE_HEADERS: &[HeaderPattern] = &[
    numbered("doelgroep"),
    unnumbered("doelgroep"),
    numbered("klanten"),
];

pub const TASKS_HEADERS: &[HeaderPattern] = &[
    numbered(r"(?:repeterende\s*)?taken"),
    unnumbered(r"(?:repeterende\s*)?taken"),
    numbered(r"(?:automatisering\s*)?kansen"),
    numbered("processen"),
];

impl HeaderPattern {
    /// Full header regex: line start, optional number, optional bold markers,
    /// the keyword and an optional colon, plus any whitespace after it
    ///
    /// `^` is multi-line, so a search resumed mid-text only matches at a real
    /// line start.
    pub fn regex_source(&self, position: u8) -> String {
        let number = if self.numbered {
            format!(r"{}\.?\s*", position)
        } else {
            String::new()
        };
        format!(
            r"(?im)^\s*{}\*?\*?\s*{}\s*\*?\*?\s*:?\s*",
            number, self.keyword
        )
    }
}

/// Compiled header regexes for a section, in preference order
pub fn header_regexes(kind: SectionKind) -> &'static [Regex] {
    static HEADER_RES: OnceLock<[Vec<Regex>; 3]> = OnceLock::new();
    let all = HEADER_RES.get_or_init(|| {
        SectionKind::ALL.map(|kind| {
            kind.header_patterns()
                .iter()
                .map(|pattern| {
                    Regex::new(&pattern.regex_source(kind.position()))
                        .expect("section header regex must compile")
                })
                .collect()
        })
    });
    &all[kind.index()]
}
