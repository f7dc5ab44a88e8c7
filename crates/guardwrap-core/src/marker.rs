//! Region markers and span location.

use regex::Regex;
use std::ops::Range;

/// A compiled start or end marker.
#[derive(Debug, Clone)]
pub struct Marker {
    re: Regex,
}

impl Marker {
    /// Match `text` verbatim.
    pub fn literal(text: &str) -> Self {
        Self::any_of(&[text])
    }

    /// Match whichever of `texts` occurs first. `texts` must not be empty.
    pub fn any_of(texts: &[&str]) -> Self {
        debug_assert!(!texts.is_empty(), "marker needs at least one alternative");
        let alternation = texts
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        // Escaped literals always form a valid pattern.
        let re = Regex::new(&alternation).unwrap();
        Self { re }
    }

    /// Raw regular expression; `.` spans newlines.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        let re = Regex::new(&format!("(?s){}", pattern))?;
        Ok(Self { re })
    }

    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }

    fn find_from(&self, text: &str, start: usize) -> Option<Range<usize>> {
        self.re.find_at(text, start).map(|m| m.range())
    }
}

/// Byte range of a matched region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn text<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.end]
    }

    /// Replace the span, leaving every other byte of `doc` intact.
    pub fn splice(&self, doc: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(doc.len() + replacement.len());
        out.push_str(&doc[..self.start]);
        out.push_str(replacement);
        out.push_str(&doc[self.end..]);
        out
    }
}

/// First `start` match, extended to the nearest `end` match after it.
pub fn locate(doc: &str, start: &Marker, end: &Marker) -> Option<Span> {
    let head = start.find_from(doc, 0)?;
    let tail = end.find_from(doc, head.end)?;
    Some(Span {
        start: head.start,
        end: tail.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_end_wins() {
        let doc = "a START x END y END z";
        let span = locate(doc, &Marker::literal("START"), &Marker::literal("END")).unwrap();
        assert_eq!(span.text(doc), "START x END");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least one alternative")]
    fn any_of_rejects_empty_alternatives() {
        let _ = Marker::any_of(&[]);
    }

    #[test]
    fn any_of_picks_first_occurrence() {
        let doc = "{/* KPI Cards */}\n  a\n) : null}\n</PermissionGuard>";
        let end = Marker::any_of(&["</PermissionGuard>", ": null}"]);
        let span = locate(doc, &Marker::literal("{/* KPI Cards */}"), &end).unwrap();
        assert!(span.text(doc).ends_with(": null}"));
    }

    #[test]
    fn end_before_start_is_ignored() {
        let doc = "END then START only";
        assert!(locate(doc, &Marker::literal("START"), &Marker::literal("END")).is_none());
    }

    #[test]
    fn literal_escapes_regex_syntax() {
        let m = Marker::literal("{/* KPI Cards */}");
        let doc = "x {/* KPI Cards */} y";
        let span = locate(doc, &m, &Marker::literal("y")).unwrap();
        assert_eq!(span.start, 2);
    }

    #[test]
    fn pattern_spans_lines() {
        let start = Marker::pattern(r"<section\s+id=.kpi.>").unwrap();
        let doc = "<section\n  id=\"kpi\">\nbody\n</section>";
        let span = locate(doc, &start, &Marker::literal("</section>")).unwrap();
        assert_eq!(span.text(doc), doc);
    }

    #[test]
    fn splice_preserves_surroundings() {
        let doc = "head [mid] tail";
        let span = Span { start: 5, end: 10 };
        assert_eq!(span.splice(doc, "<x>"), "head <x> tail");
    }
}
