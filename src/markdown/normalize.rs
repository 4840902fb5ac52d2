//! Repairs for common artifacts in AI-generated markdown
//!
//! Runs before any structural parsing. The emphasis repair only targets the
//! observed shapes (a lone opener at the very start, a lone closer at the very
//! end); text with several unbalanced markers is passed through as-is.

use regex::Regex;
use std::sync::OnceLock;

const BOLD: &str = "**";

/// Upper bound on repair passes; real input settles after one or two
const MAX_PASSES: usize = 8;

fn citation_regex() -> &'static Regex {
    static CITATION_RE: OnceLock<Regex> = OnceLock::new();
    CITATION_RE.get_or_init(|| Regex::new(r"\[[0-9]+\]").expect("citation regex must compile"))
}

fn space_run_regex() -> &'static Regex {
    static SPACE_RUN_RE: OnceLock<Regex> = OnceLock::new();
    SPACE_RUN_RE.get_or_init(|| Regex::new(r" {2,}").expect("space run regex must compile"))
}

fn empty_bold_regex() -> &'static Regex {
    static EMPTY_BOLD_RE: OnceLock<Regex> = OnceLock::new();
    EMPTY_BOLD_RE.get_or_init(|| Regex::new(r"\*\*\*\*").expect("empty bold regex must compile"))
}

fn run_on_bullet_regex() -> &'static Regex {
    static RUN_ON_BULLET_RE: OnceLock<Regex> = OnceLock::new();
    RUN_ON_BULLET_RE.get_or_init(|| {
        Regex::new(r"([.!?])\s*([•\-*]\s)").expect("run-on bullet regex must compile")
    })
}

fn run_on_number_regex() -> &'static Regex {
    static RUN_ON_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    RUN_ON_NUMBER_RE.get_or_init(|| {
        Regex::new(r"([.!?])\s+([0-9]+\.)\s").expect("run-on number regex must compile")
    })
}

/// Remove every `[<digits>]` citation marker
///
/// Repeats until none is left, so nested shapes like `[1[2]]` cannot leave a
/// marker behind.
pub fn strip_citations(text: &str) -> String {
    let mut result = citation_regex().replace_all(text, "").into_owned();
    while citation_regex().is_match(&result) {
        result = citation_regex().replace_all(&result, "").into_owned();
    }
    result
}

/// Drop spaces and tabs just inside each `**` pair
///
/// Markers pair up left to right; a trailing odd marker is left alone. A pair
/// holding only whitespace collapses to `****`.
fn tighten_bold_pairs(text: &str) -> String {
    let markers: Vec<usize> = text.match_indices(BOLD).map(|(i, _)| i).collect();
    let mut cuts: Vec<(usize, usize)> = Vec::new();

    for pair in markers.chunks_exact(2) {
        let (open, close) = (pair[0] + BOLD.len(), pair[1]);
        let inner = &text[open..close];
        if inner.is_empty() {
            continue;
        }
        let lead = inner.len() - inner.trim_start_matches([' ', '\t']).len();
        if lead == inner.len() {
            cuts.push((open, close));
            continue;
        }
        let trail = inner.len() - inner.trim_end_matches([' ', '\t']).len();
        if lead > 0 {
            cuts.push((open, open + lead));
        }
        if trail > 0 {
            cuts.push((close - trail, close));
        }
    }

    if cuts.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in cuts {
        out.push_str(&text[cursor..start]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// One pass of every repair, in order
fn repair(text: &str) -> String {
    let stripped = strip_citations(text);
    let collapsed = space_run_regex().replace_all(&stripped, " ");
    let mut result = collapsed.trim().to_string();

    // Opened at the very start, never closed
    if let Some(rest) = result.strip_prefix(BOLD) {
        if !rest.contains(BOLD) {
            result = rest.trim().to_string();
        }
    }

    // Closed at the very end, never opened
    if result.ends_with(BOLD) && result.find(BOLD) == Some(result.len() - BOLD.len()) {
        result = result[..result.len() - BOLD.len()].trim().to_string();
    }

    let result = tighten_bold_pairs(&result);
    let result = empty_bold_regex().replace_all(&result, "");
    // A removed empty span can leave its two neighbouring spaces touching
    let result = space_run_regex().replace_all(result.trim(), " ");
    let result = run_on_bullet_regex().replace_all(&result, "${1}\n\n${2}");
    let result = run_on_number_regex().replace_all(&result, "${1}\n\n${2} ");
    result.into_owned()
}

/// Normalize raw provider text into markdown safe for structural parsing
///
/// Repairs run until the text stops changing, so a removal that exposes a new
/// artifact (`[****1]`, `******`) is cleaned as well and the result is stable
/// under a second call.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = repair(text);
    for _ in 1..MAX_PASSES {
        let next = repair(&result);
        if next == result {
            break;
        }
        result = next;
    }

    tracing::trace!(
        input_len = text.len(),
        output_len = result.len(),
        "normalized markdown"
    );

    result
}
