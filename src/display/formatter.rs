//! Markdown terminal formatting using termimad

use termimad::{gray, MadSkin};

use crate::analysis::SectionKind;
use crate::config::ColorChoice;
use crate::display::terminal::should_use_colors;
use crate::markdown::normalize;
use crate::models::AnalysisSections;

/// Shown above the raw text when no section header was recognized
pub const FALLBACK_NOTICE: &str =
    "Geen secties herkend in de analyse; de volledige tekst wordt getoond.";

/// Print markdown to terminal with rich formatting (or plain fallback)
pub fn print_markdown(markdown: &str, color: ColorChoice) {
    if should_use_colors(color) {
        if let Err(e) = print_rich(markdown) {
            tracing::warn!(error = %e, "terminal rendering failed, using plain output");
            print_plain(markdown);
        }
    } else {
        print_plain(markdown);
    }
}

/// Markdown for the three analysis sections, skipping empty ones
///
/// Returns `None` when every section is empty.
pub fn analysis_markdown(sections: &AnalysisSections) -> Option<String> {
    if sections.is_empty() {
        return None;
    }

    let blocks: Vec<String> = SectionKind::ALL
        .iter()
        .filter_map(|kind| {
            let body = normalize(sections.get(*kind));
            if body.is_empty() {
                None
            } else {
                Some(format!("## {}\n\n{}", kind.title(), body))
            }
        })
        .collect();

    Some(blocks.join("\n\n"))
}

/// Print extracted sections, or the whole normalized text with a notice
pub fn print_analysis(sections: &AnalysisSections, raw: &str, color: ColorChoice) {
    match analysis_markdown(sections) {
        Some(markdown) => print_markdown(&markdown, color),
        None => {
            eprintln!("{}", FALLBACK_NOTICE);
            print_markdown(&normalize(raw), color);
        }
    }
}

/// Print with termimad styling
fn print_rich(markdown: &str) -> Result<(), termimad::Error> {
    let mut skin = MadSkin::default();
    customize_skin(&mut skin);
    skin.print_text(markdown);
    Ok(())
}

/// Dark-variant palette: indigo headings, slate body, indigo bullets
fn customize_skin(skin: &mut MadSkin) {
    use termimad::crossterm::style::{Attribute, Color};

    let indigo = Color::Rgb {
        r: 0x81,
        g: 0x8c,
        b: 0xf8,
    };
    let slate = Color::Rgb {
        r: 0xcb,
        g: 0xd5,
        b: 0xe1,
    };

    skin.paragraph.set_fg(slate);

    skin.headers[0].set_fg(Color::White);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(indigo);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.headers[2].set_fg(indigo);

    skin.code_block.set_bg(gray(2));
    skin.code_block.set_fg(indigo);
    skin.inline_code.set_fg(indigo);

    skin.bold.set_fg(Color::White);
    skin.bold.add_attr(Attribute::Bold);
    skin.italic.add_attr(Attribute::Italic);

    skin.bullet.set_fg(indigo);
    skin.quote_mark.set_fg(indigo);
}

fn print_plain(markdown: &str) {
    println!("{}", markdown);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_print_markdown_plain_fallback() {
        std::env::set_var("NO_COLOR", "1");
        print_markdown("# Test\n\nHello **world**", ColorChoice::Auto);
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    fn test_customize_skin_sets_bold_color() {
        use termimad::crossterm::style::Color;

        let mut skin = MadSkin::default();
        customize_skin(&mut skin);
        assert_eq!(skin.bold.object_style.foreground_color, Some(Color::White));
    }

    #[test]
    fn test_analysis_markdown_skips_empty_sections() {
        let sections = AnalysisSections {
            activity: "Bakkerij[1]".to_string(),
            audience: String::new(),
            tasks: "- Bestellingen".to_string(),
        };
        assert_eq!(
            analysis_markdown(&sections).unwrap(),
            "## Kernactiviteit\n\nBakkerij\n\n## Kansen & Taken\n\n- Bestellingen"
        );
    }

    #[test]
    fn test_analysis_markdown_none_when_empty() {
        assert!(analysis_markdown(&AnalysisSections::default()).is_none());
    }
}
