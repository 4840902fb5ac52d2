//! Export document model
//!
//! One assembled structure feeds both export targets, so section order and
//! numbering cannot drift between the print and Word documents.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::analysis::SectionKind;
use crate::models::{AnalysisSections, Idea};

/// Brand line printed in document headers and footers
pub const BRAND: &str = "n8n SaaS Architect";

/// Export target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Light-themed page handed to a rasterizer for PDF output
    #[default]
    Print,
    /// Word-compatible markup document
    Word,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Print => "html",
            ExportFormat::Word => "doc",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Print => write!(f, "print"),
            ExportFormat::Word => write!(f, "word"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "print" | "pdf" => Ok(ExportFormat::Print),
            "word" | "doc" => Ok(ExportFormat::Word),
            other => Err(format!("unknown export format '{}' (expected print or word)", other)),
        }
    }
}

/// Color role of a metric value; each target maps it to its own palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Positive,
    Brand,
    Neutral,
}

/// Visual framing of a text part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Plain,
    Alert,
    Positive,
    Panel,
}

/// One key figure shown under the title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    pub accent: Accent,
}

/// Content unit inside a numbered section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    /// Markdown body under a subheading
    Text {
        heading: &'static str,
        body: String,
        tone: Tone,
    },
    /// Short markdown phrases shown as a bullet list
    Bullets {
        heading: &'static str,
        items: Vec<String>,
    },
    /// Literal names shown as tags
    Tags {
        heading: &'static str,
        items: Vec<String>,
    },
}

/// A numbered top-level section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub number: usize,
    pub title: &'static str,
    /// Start this section on a fresh page in paginated output
    pub page_break_before: bool,
    pub parts: Vec<Part>,
}

impl Section {
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }
}

/// Fully assembled export document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub emoji: String,
    pub one_liner: String,
    pub metrics: Vec<Metric>,
    pub sections: Vec<Section>,
}

fn whitespace_run_regex() -> &'static Regex {
    static WHITESPACE_RUN_RE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RUN_RE
        .get_or_init(|| Regex::new(r"\s+").expect("whitespace run regex must compile"))
}

impl Document {
    /// Download name, e.g. `Blueprint-Factuur-Robot.doc`
    pub fn file_name(&self, format: ExportFormat) -> String {
        let title = self.title.trim().replace(['/', '\\'], "-");
        let stem = whitespace_run_regex().replace_all(&title, "-");
        if stem.is_empty() {
            format!("Blueprint.{}", format.extension())
        } else {
            format!("Blueprint-{}.{}", stem, format.extension())
        }
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

pub const ANALYSIS_TITLE: &str = "Bedrijfsanalyse";
pub const CONCEPT_TITLE: &str = "Het SaaS Concept";
pub const TECHNOLOGY_TITLE: &str = "De Techniek";
pub const EXPERIENCE_TITLE: &str = "User Experience";

fn analysis_parts(sections: &AnalysisSections) -> Vec<Part> {
    [
        (SectionKind::Activity, &sections.activity),
        (SectionKind::Audience, &sections.audience),
        (SectionKind::Tasks, &sections.tasks),
    ]
    .into_iter()
    .filter(|(_, body)| !body.is_empty())
    .map(|(kind, body)| Part::Text {
        heading: kind.title(),
        body: body.clone(),
        tone: Tone::Panel,
    })
    .collect()
}

/// Assemble the export document for one idea
///
/// The business analysis section is only present when at least one analysis
/// field is non-empty; every later section number shifts accordingly.
pub fn assemble(idea: &Idea, analysis: Option<&AnalysisSections>) -> Document {
    let blueprint = &idea.blueprint;

    let metrics = vec![
        Metric {
            label: "Prijs Strategie",
            value: blueprint.pricing_strategy.clone(),
            accent: Accent::Positive,
        },
        Metric {
            label: "Bouwtijd",
            value: blueprint.speed_to_launch.clone(),
            accent: Accent::Brand,
        },
        Metric {
            label: "Complexiteit",
            value: format!("{}/100", blueprint.difficulty_rating),
            accent: Accent::Neutral,
        },
    ];

    let mut bodies: Vec<(&'static str, bool, Vec<Part>)> = Vec::new();

    if let Some(sections) = analysis.filter(|s| !s.is_empty()) {
        bodies.push((ANALYSIS_TITLE, false, analysis_parts(sections)));
    }

    bodies.push((
        CONCEPT_TITLE,
        false,
        vec![
            Part::Text {
                heading: "Het Pijnpunt",
                body: blueprint.pain_point.clone(),
                tone: Tone::Alert,
            },
            Part::Text {
                heading: "De Oplossing & Timing",
                body: blueprint.why_now.clone(),
                tone: Tone::Positive,
            },
            Part::Bullets {
                heading: "MVP Features",
                items: blueprint.mvp_features.clone(),
            },
        ],
    ));

    bodies.push((
        TECHNOLOGY_TITLE,
        true,
        vec![
            Part::Text {
                heading: "Automatisering Workflow (n8n)",
                body: blueprint.automation.clone(),
                tone: Tone::Panel,
            },
            Part::Tags {
                heading: "Benodigde n8n Nodes",
                items: blueprint.workflow_nodes.clone(),
            },
            Part::Tags {
                heading: "Tech Stack",
                items: blueprint.tech_stack.clone(),
            },
            Part::Bullets {
                heading: "Marketing Kanalen",
                items: blueprint.marketing_channels.clone(),
            },
        ],
    ));

    bodies.push((
        EXPERIENCE_TITLE,
        false,
        vec![
            Part::Text {
                heading: "Abstractie",
                body: blueprint.abstraction.clone(),
                tone: Tone::Plain,
            },
            Part::Text {
                heading: "Eindproduct (Polish)",
                body: blueprint.polish.clone(),
                tone: Tone::Plain,
            },
        ],
    ));

    let sections = bodies
        .into_iter()
        .enumerate()
        .map(|(index, (title, page_break_before, parts))| Section {
            number: index + 1,
            title,
            page_break_before,
            parts,
        })
        .collect();

    Document {
        title: idea.title.clone(),
        emoji: idea.emoji.clone(),
        one_liner: idea.one_liner.clone(),
        metrics,
        sections,
    }
}
