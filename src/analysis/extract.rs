//! Section extraction over freeform analysis text

use regex::Regex;
use std::sync::OnceLock;

use super::patterns::{header_regexes, SectionKind};
use crate::models::AnalysisSections;

fn leading_list_punctuation_regex() -> &'static Regex {
    static LEADING_PUNCT_RE: OnceLock<Regex> = OnceLock::new();
    LEADING_PUNCT_RE.get_or_init(|| {
        Regex::new(r"^[0-9.)\-\s]+").expect("leading punctuation regex must compile")
    })
}

/// Byte span of a matched header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderMatch {
    start: usize,
    end: usize,
}

/// First header of `kind` at or after `from`, trying forms in preference order
fn find_header(text: &str, kind: SectionKind, from: usize) -> Option<HeaderMatch> {
    header_regexes(kind)
        .iter()
        .enumerate()
        .find_map(|(index, re)| re.find_at(text, from).map(|m| (index, m)))
        .map(|(index, m)| {
            tracing::debug!(section = %kind, pattern = index, offset = m.start(), "section header matched");
            HeaderMatch {
                start: m.start(),
                end: m.end(),
            }
        })
}

/// Body of one section, or empty when its header is absent
///
/// The body ends at the nearest header of any other section found after this
/// header, so sections may appear in any order.
fn find_section(text: &str, kind: SectionKind) -> String {
    let Some(header) = find_header(text, kind, 0) else {
        return String::new();
    };

    let end = SectionKind::ALL
        .iter()
        .filter(|other| **other != kind)
        .filter_map(|other| find_header(text, *other, header.end))
        .map(|next| next.start)
        .min()
        .unwrap_or(text.len());

    clean_body(&text[header.end..end])
}

/// Strip leftover list numbering and stray bold markers around a body
fn clean_body(body: &str) -> String {
    let body = body.trim();
    let body = leading_list_punctuation_regex().replace(body, "");
    let body = body.strip_prefix("**").unwrap_or(&body);
    let body = body.strip_suffix("**").unwrap_or(body);
    body.trim().to_string()
}

/// Split an analysis text into its three named sections
///
/// Never fails. When no header is recognized all fields are empty and the
/// caller should show the whole text instead.
pub fn extract_sections(text: &str) -> AnalysisSections {
    if text.trim().is_empty() {
        return AnalysisSections::default();
    }

    let sections = AnalysisSections {
        activity: find_section(text, SectionKind::Activity),
        audience: find_section(text, SectionKind::Audience),
        tasks: find_section(text, SectionKind::Tasks),
    };

    if sections.is_empty() {
        tracing::debug!(len = text.len(), "no section headers recognized, falling back to full text");
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_bold_headers() {
        let text = "1. **Kernactiviteit:** Doet X\n2. **Doelgroep:** Zakelijke klanten\n3. **Taken:** Facturatie, rapportage";
        let sections = extract_sections(text);
        assert_eq!(sections.activity, "Doet X");
        assert_eq!(sections.audience, "Zakelijke klanten");
        assert_eq!(sections.tasks, "Facturatie, rapportage");
    }

    #[test]
    fn test_reversed_order() {
        let sections = extract_sections("2. Doelgroep: A\n1. Kernactiviteit: B");
        assert_eq!(sections.activity, "B");
        assert_eq!(sections.audience, "A");
        assert_eq!(sections.tasks, "");
    }

    #[test]
    fn test_plain_prose_falls_back() {
        let sections = extract_sections(
            "Dit bedrijf verkoopt ambachtelijk brood in Utrecht.\nZe hebben drie winkels en een webshop.",
        );
        assert!(sections.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_sections("").is_empty());
        assert!(extract_sections("  \n ").is_empty());
    }

    #[test]
    fn test_matched_header_without_body() {
        let sections =
            extract_sections("1. Kernactiviteit:\n2. Doelgroep: Gezinnen\n3. Taken: Bestellingen");
        assert_eq!(sections.activity, "");
        assert_eq!(sections.audience, "Gezinnen");
        assert_eq!(sections.tasks, "Bestellingen");
        assert!(!sections.is_empty());
    }

    #[test]
    fn test_nonstandard_colon_spacing() {
        let sections = extract_sections(
            "1. Kernactiviteit :   Bakkerij\n2. **Doelgroep** : Gezinnen\n3. Taken:Bestellingen",
        );
        assert_eq!(sections.activity, "Bakkerij");
        assert_eq!(sections.audience, "Gezinnen");
        assert_eq!(sections.tasks, "Bestellingen");
    }

    #[test]
    fn test_citations_survive_extraction() {
        let sections = extract_sections(
            "1. Kernactiviteit: Bakkerij[1] in Utrecht[2]\n2. Doelgroep: Gezinnen[3]",
        );
        assert_eq!(sections.activity, "Bakkerij[1] in Utrecht[2]");
        assert_eq!(sections.audience, "Gezinnen[3]");
    }

    #[test]
    fn test_tasks_via_automation_opportunities() {
        let sections = extract_sections(
            "1. Kernactiviteit: Bakkerij\n2. Doelgroep: Gezinnen\n3. **Automatisering Kansen:** Voorraadbeheer en facturen",
        );
        assert_eq!(sections.audience, "Gezinnen");
        assert_eq!(sections.tasks, "Voorraadbeheer en facturen");
    }

    #[test]
    fn test_repeterende_taken_header() {
        let sections = extract_sections(
            "**Kernactiviteit:** Bakkerij\n**Doelgroep:** Gezinnen\n3. **Repeterende taken:**\n- Bestellingen\n- Facturen",
        );
        assert_eq!(sections.activity, "Bakkerij");
        assert_eq!(sections.audience, "Gezinnen");
        assert_eq!(sections.tasks, "Bestellingen\n- Facturen");
    }

    #[test]
    fn test_numbered_form_preferred_over_earlier_unnumbered() {
        let text = "Doelgroep: eerst genoemd\n1. Kernactiviteit: Bakkerij\n2. Doelgroep: Gezinnen";
        let sections = extract_sections(text);
        assert_eq!(sections.audience, "Gezinnen");
    }

    #[test]
    fn test_intro_before_first_header_is_ignored() {
        let text = "Hier is de analyse van de website.\n\n1. **Kernactiviteit:** Bakkerij";
        let sections = extract_sections(text);
        assert_eq!(sections.activity, "Bakkerij");
        assert_eq!(sections.audience, "");
    }

    #[test]
    fn test_body_starting_with_keyword_is_not_a_header() {
        let text = "1. Kernactiviteit: Taken overnemen van de boekhouder\n2. Doelgroep: Zzp'ers";
        let sections = extract_sections(text);
        assert_eq!(sections.activity, "Taken overnemen van de boekhouder");
        assert_eq!(sections.audience, "Zzp'ers");
        assert_eq!(sections.tasks, "");
    }

    #[test]
    fn test_empty_body_followed_by_unnumbered_header() {
        let sections = extract_sections("**Kernactiviteit:**\n**Doelgroep:** Gezinnen");
        assert_eq!(sections.activity, "");
        assert_eq!(sections.audience, "Gezinnen");
    }

    #[test]
    fn test_multiline_section_body() {
        let text = "1. Kernactiviteit:\nBakkerij met drie winkels.\n\nOok catering.\n2. Doelgroep: Gezinnen";
        let sections = extract_sections(text);
        assert_eq!(sections.activity, "Bakkerij met drie winkels.\n\nOok catering.");
    }
}
