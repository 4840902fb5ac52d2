//! Print-ready page
//!
//! A standalone light-themed HTML page sized for A4. Every style is inline so
//! a rasterizer sees the same colors a browser does.

use super::document::{Accent, Document, Metric, Part, Section, Tone, BRAND};
use crate::markdown::{escape_html, render_block, render_inline, RenderVariant};

const PAGE_STYLE: &str = "@page { size: A4; margin: 0; } \
body { margin: 0; background-color: #e2e8f0; font-family: Arial, Helvetica, sans-serif; } \
.avoid-break { break-inside: avoid; page-break-inside: avoid; } \
.page-break { break-before: page; page-break-before: always; }";

/// Print page serializer
pub struct PrintPage<'a> {
    doc: &'a Document,
}

impl<'a> PrintPage<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// Render the full page
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str("<!DOCTYPE html>\n<html lang=\"nl\">\n<head>\n<meta charset=\"utf-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(&self.doc.title)));
        output.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", PAGE_STYLE));
        output.push_str(
            "<div id=\"print-area\" style=\"background-color:#ffffff;color:#0f172a;max-width:210mm;min-height:297mm;padding:15mm;margin:0 auto;box-sizing:border-box\">\n",
        );

        output.push_str(&self.render_header());
        output.push_str(&self.render_metrics());
        for section in &self.doc.sections {
            output.push_str(&self.render_section(section));
        }

        output.push_str("</div>\n</body>\n</html>\n");
        output
    }

    fn render_header(&self) -> String {
        let mut output = String::new();
        output.push_str(
            "<div style=\"display:flex;justify-content:space-between;align-items:flex-start;padding-bottom:24px;margin-bottom:32px;border-bottom:2px solid #e2e8f0\">\n<div>\n",
        );
        output.push_str(&format!(
            "<h1 style=\"font-size:30px;font-weight:bold;margin:0 0 8px 0;color:#0f172a\"><span>{}</span> {}</h1>\n",
            escape_html(&self.doc.emoji),
            escape_html(&self.doc.title)
        ));
        output.push_str(&format!(
            "<p style=\"font-size:16px;font-weight:500;margin:0;color:#475569\">{}</p>\n",
            escape_html(&self.doc.one_liner)
        ));
        output.push_str("</div>\n<div style=\"text-align:right\">\n");
        output.push_str(
            "<div style=\"font-size:10px;text-transform:uppercase;letter-spacing:0.05em;font-weight:bold;margin-bottom:4px;color:#64748b\">Created with</div>\n",
        );
        output.push_str(&format!(
            "<div style=\"font-size:18px;font-weight:bold;color:#4f46e5\">{}</div>\n",
            BRAND
        ));
        output.push_str("</div>\n</div>\n");
        output
    }

    fn render_metrics(&self) -> String {
        let mut output = String::new();
        output.push_str(
            "<div style=\"display:grid;grid-template-columns:repeat(3,1fr);gap:24px;margin-bottom:40px\">\n",
        );
        for metric in &self.doc.metrics {
            output.push_str(&render_metric(metric));
        }
        output.push_str("</div>\n");
        output
    }

    fn render_section(&self, section: &Section) -> String {
        let mut output = String::new();

        if section.page_break_before {
            output.push_str("<div class=\"page-break\"></div>\n");
        }
        output.push_str("<div class=\"avoid-break\" style=\"margin-bottom:40px\">\n");
        output.push_str(&format!(
            "<h2 style=\"font-size:20px;font-weight:bold;margin:0 0 24px 0;padding-bottom:8px;color:#312e81;border-bottom:1px solid #e0e7ff\">{}</h2>\n",
            escape_html(&section.heading())
        ));
        for part in &section.parts {
            output.push_str(&render_part(part));
        }
        output.push_str("</div>\n");

        output
    }
}

/// Serialize a document as a print-ready HTML page
pub fn to_html(doc: &Document) -> String {
    PrintPage::new(doc).render()
}

fn accent_color(accent: Accent) -> &'static str {
    match accent {
        Accent::Positive => "#16a34a",
        Accent::Brand => "#4f46e5",
        Accent::Neutral => "#1e293b",
    }
}

/// Box background, border and heading color for a tone
fn tone_colors(tone: Tone) -> Option<(&'static str, &'static str, &'static str)> {
    match tone {
        Tone::Plain => None,
        Tone::Alert => Some(("#fef2f2", "#fecaca", "#991b1b")),
        Tone::Positive => Some(("#f0fdf4", "#bbf7d0", "#166534")),
        Tone::Panel => Some(("#f8fafc", "#e2e8f0", "#312e81")),
    }
}

fn render_metric(metric: &Metric) -> String {
    format!(
        "<div style=\"padding:16px;border-radius:12px;background-color:#f8fafc;border:1px solid #e2e8f0\">\
<div style=\"font-size:11px;text-transform:uppercase;font-weight:bold;margin-bottom:4px;color:#64748b\">{}</div>\
<div style=\"font-size:18px;font-weight:bold;color:{}\">{}</div></div>\n",
        metric.label,
        accent_color(metric.accent),
        escape_html(&metric.value)
    )
}

fn block_html(text: &str) -> String {
    render_block(text, RenderVariant::Light)
        .map(|node| node.to_html())
        .unwrap_or_default()
}

fn inline_html(text: &str) -> String {
    render_inline(text, RenderVariant::Light)
        .map(|node| node.to_html())
        .unwrap_or_default()
}

fn render_part(part: &Part) -> String {
    match part {
        Part::Text {
            heading,
            body,
            tone,
        } => match tone_colors(*tone) {
            Some((background, border, color)) => format!(
                "<div style=\"padding:20px;border-radius:8px;margin-bottom:24px;background-color:{};border:1px solid {}\">\
<h3 style=\"font-size:14px;font-weight:bold;text-transform:uppercase;letter-spacing:0.025em;margin:0 0 8px 0;color:{}\">{}</h3>\
<div style=\"font-size:14px\">{}</div></div>\n",
                background,
                border,
                color,
                escape_html(heading),
                block_html(body)
            ),
            None => format!(
                "<div style=\"margin-bottom:24px\">\
<h3 style=\"font-size:16px;font-weight:bold;margin:0;color:#0f172a\">{}</h3>\
<div style=\"font-size:14px;margin-top:4px;color:#1e293b\">{}</div></div>\n",
                escape_html(heading),
                block_html(body)
            ),
        },
        Part::Bullets { heading, items } => {
            let mut output = format!(
                "<div style=\"margin-bottom:32px\">\
<h3 style=\"font-size:14px;font-weight:bold;text-transform:uppercase;padding-bottom:8px;margin:0 0 16px 0;color:#0f172a;border-bottom:1px solid #e2e8f0\">{}</h3>\n",
                escape_html(heading)
            );
            for item in items {
                output.push_str(&format!(
                    "<div style=\"display:flex;align-items:flex-start;gap:12px;margin-bottom:8px;font-size:14px;color:#1e293b\">\
<div style=\"margin-top:6px;width:6px;height:6px;border-radius:50%;flex-shrink:0;background-color:#4f46e5\"></div>\
<span style=\"flex:1\">{}</span></div>\n",
                    inline_html(item)
                ));
            }
            output.push_str("</div>\n");
            output
        }
        Part::Tags { heading, items } => {
            let mut output = format!(
                "<div style=\"margin-bottom:24px\">\
<div style=\"font-size:12px;font-weight:bold;text-transform:uppercase;margin-bottom:8px;color:#334155\">{}</div>\
<div style=\"display:flex;flex-wrap:wrap;gap:8px\">",
                escape_html(heading)
            );
            for item in items {
                output.push_str(&format!(
                    "<span style=\"padding:4px 12px;font-size:12px;border-radius:4px;font-family:monospace;background-color:#ffffff;border:1px solid #cbd5e1;color:#1e293b\">{}</span>",
                    escape_html(item)
                ));
            }
            output.push_str("</div></div>\n");
            output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::assemble;
    use crate::export::document::tests::{sample_idea, sample_sections};

    #[test]
    fn test_page_is_standalone_and_light() {
        let html = to_html(&assemble(&sample_idea(), None));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Factuur  Robot</title>"));
        assert!(html.contains("background-color:#ffffff"));
        assert!(!html.contains("class=\"text-"));
    }

    #[test]
    fn test_section_headings_follow_numbering() {
        let sections = sample_sections();
        let with = to_html(&assemble(&sample_idea(), Some(&sections)));
        assert!(with.contains(">1. Bedrijfsanalyse</h2>"));
        assert!(with.contains(">2. Het SaaS Concept</h2>"));

        let without = to_html(&assemble(&sample_idea(), None));
        assert!(!without.contains("Bedrijfsanalyse"));
        assert!(without.contains(">1. Het SaaS Concept</h2>"));
        assert!(without.contains(">2. De Techniek</h2>"));
    }

    #[test]
    fn test_markdown_fields_are_rendered() {
        let html = to_html(&assemble(&sample_idea(), None));
        assert!(html.contains("<strong style=\"font-weight:bold;color:#0f172a\">uren</strong>"));
        assert!(html.contains("E-facturatie wordt verplicht."));
        assert!(!html.contains("[1]"));
    }

    #[test]
    fn test_metrics_and_tags() {
        let html = to_html(&assemble(&sample_idea(), None));
        assert!(html.contains("€29 p/m"));
        assert!(html.contains("35/100"));
        assert!(html.contains(">HTTP Request</span>"));
        assert!(html.contains("class=\"page-break\""));
    }

    #[test]
    fn test_output_is_deterministic() {
        let doc = assemble(&sample_idea(), Some(&sample_sections()));
        assert_eq!(to_html(&doc), to_html(&doc));
    }
}
