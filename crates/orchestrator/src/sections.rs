//! Best-effort splitting of model prose into titled sections.

use indexmap::IndexMap;

/// Split `text` into `header -> body` pairs, in order of appearance.
///
/// A header is a trimmed line that ends in `:` and whose letters are all
/// uppercase (`"KEY POINTS:"`, `"1. TITLE:"`). Body lines are trimmed and
/// blank ones dropped. Text before the first header is discarded, and a
/// repeated header replaces the earlier body.
///
/// This is a lossy heuristic over free text. Callers must not treat the
/// result as a schema; the unparsed text should always travel with it.
pub fn parse_sections(text: &str) -> IndexMap<String, String> {
    let mut sections = IndexMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines().map(str::trim) {
        if is_header(line) {
            if let Some((header, body)) = current.take() {
                sections.insert(header, body.join("\n"));
            }
            let header = line.trim_end_matches(':').trim_end().to_string();
            current = Some((header, Vec::new()));
        } else if !line.is_empty() {
            if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }
    }

    if let Some((header, body)) = current {
        sections.insert(header, body.join("\n"));
    }

    sections
}

fn is_header(line: &str) -> bool {
    line.ends_with(':')
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_ordered_sections() {
        let text = "Intro line that is dropped\n\
                    TITLE:\n\
                    Quarterly Review\n\
                    \n\
                    KEY POINTS:\n\
                    - Revenue up\n  \
                    - Costs down  \n\
                    CONCLUSION:\n\
                    Solid quarter.";

        let sections = parse_sections(text);

        let headers: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(headers, vec!["TITLE", "KEY POINTS", "CONCLUSION"]);
        assert_eq!(sections["TITLE"], "Quarterly Review");
        assert_eq!(sections["KEY POINTS"], "- Revenue up\n- Costs down");
        assert_eq!(sections["CONCLUSION"], "Solid quarter.");
    }

    #[test]
    fn test_header_detection() {
        assert!(is_header("EXECUTIVE SUMMARY:"));
        assert!(is_header("1. TITLE:"));
        assert!(!is_header("Key Points:"));
        assert!(!is_header("TITLE: Inline value"));
        assert!(!is_header("123:"));
        assert!(!is_header(":"));
    }

    #[test]
    fn test_inline_headers_are_not_sections() {
        // Headers with values on the same line are lost; the heuristic is lossy
        let sections = parse_sections("TITLE: Quarterly Review\nSome text");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_empty_section_and_repeats() {
        let sections = parse_sections("NOTES:\nDETAILS:\nfirst\nDETAILS:\nsecond");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections["NOTES"], "");
        assert_eq!(sections["DETAILS"], "second");
    }
}
