use serde::{Deserialize, Serialize};

use crate::analysis::SectionKind;

/// The three named sections extracted from a business analysis text
///
/// Fields hold body content only, never the header that introduced it.
/// All three empty means no header was recognized and the caller should
/// display the original text unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSections {
    /// What the business does
    pub activity: String,
    /// Who the customers are
    pub audience: String,
    /// Recurring tasks and automation opportunities
    pub tasks: String,
}

impl AnalysisSections {
    /// True when no section was recognized (fallback signal)
    pub fn is_empty(&self) -> bool {
        self.activity.is_empty() && self.audience.is_empty() && self.tasks.is_empty()
    }

    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Activity => &self.activity,
            SectionKind::Audience => &self.audience,
            SectionKind::Tasks => &self.tasks,
        }
    }
}
