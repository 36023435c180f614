//! Scanner for `var(--name, fallback)` references.
//!
//! The fallback runs from the comma to the first `)` at the top level. A `(`
//! at the top level opens a group that is closed by the next `)`; parentheses
//! are not tracked any deeper than that, so `rgb(255, 0, 0)` is a valid
//! fallback while `a(b(c))` closes the reference one parenthesis early.

use crate::constants::VAR_OPEN;

/// One `var(--name, fallback)` occurrence in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarReference<'a> {
    /// Byte offset of the `v` in `var(`
    pub start: usize,
    /// Byte offset one past the closing `)`
    pub end: usize,
    /// Variable name without the leading `--`
    pub name: &'a str,
    /// Full matched text
    pub raw: &'a str,
    /// Fallback with surrounding whitespace trimmed, possibly empty
    pub fallback: &'a str,
}

/// Iterator over the non-overlapping references of a document, left to right.
#[derive(Debug, Clone)]
pub struct References<'a> {
    document: &'a str,
    pos: usize,
}

/// Scan `document` for variable references.
pub fn find_references(document: &str) -> References<'_> {
    References { document, pos: 0 }
}

/// Number of references in `document`.
pub fn count_references(document: &str) -> usize {
    find_references(document).count()
}

impl<'a> Iterator for References<'a> {
    type Item = VarReference<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.document.len() {
            let start = self.pos + self.document[self.pos..].find(VAR_OPEN)?;
            if let Some(reference) = match_at(self.document, start) {
                self.pos = reference.end;
                return Some(reference);
            }
            // `v` is ASCII, so the next byte is a char boundary.
            self.pos = start + 1;
        }
        None
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Try to match a reference whose `var(--` begins at `start`.
fn match_at(document: &str, start: usize) -> Option<VarReference<'_>> {
    let name_start = start + VAR_OPEN.len();
    let rest = &document[name_start..];
    let name_len = rest
        .char_indices()
        .find(|&(_, c)| !is_name_char(c))
        .map_or(rest.len(), |(i, _)| i);
    if name_len == 0 || !rest[name_len..].starts_with(',') {
        return None;
    }

    let fallback_start = name_start + name_len + 1;
    let close = closing_paren(document.as_bytes(), fallback_start)?;
    let end = close + 1;

    Some(VarReference {
        start,
        end,
        name: &rest[..name_len],
        raw: &document[start..end],
        fallback: document[fallback_start..close].trim(),
    })
}

/// Byte offset of the `)` closing the reference, if any.
///
/// Parentheses are ASCII, so walking bytes never lands inside a multi-byte
/// character.
fn closing_paren(bytes: &[u8], from: usize) -> Option<usize> {
    let mut in_group = false;
    for (offset, &byte) in bytes[from..].iter().enumerate() {
        match byte {
            b'(' => in_group = true,
            b')' if in_group => in_group = false,
            b')' => return Some(from + offset),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallbacks(document: &str) -> Vec<&str> {
        find_references(document).map(|r| r.fallback).collect()
    }

    #[test]
    fn test_simple_hex_fallback() {
        let doc = r#"<path fill="var(--fill-0, #FBC343)"/>"#;
        let refs: Vec<_> = find_references(doc).collect();
        assert_eq!(refs.len(), 1);
        let r = refs[0];
        assert_eq!(r.name, "fill-0");
        assert_eq!(r.fallback, "#FBC343");
        assert_eq!(r.raw, "var(--fill-0, #FBC343)");
        assert_eq!(&doc[r.start..r.end], r.raw);
    }

    #[test]
    fn test_function_fallbacks() {
        let doc = "var(--a, rgb(255, 0, 0)) var(--b, hsl(200, 100%, 50%))";
        assert_eq!(fallbacks(doc), ["rgb(255, 0, 0)", "hsl(200, 100%, 50%)"]);
    }

    #[test]
    fn test_nested_reference_is_one_match() {
        let doc = "var(--fill-2, var(--nested, #000))";
        let refs: Vec<_> = find_references(doc).collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].fallback, "var(--nested, #000)");
        assert_eq!(refs[0].end, doc.len());
    }

    #[test]
    fn test_empty_fallbacks() {
        assert_eq!(fallbacks("var(--fill-1, )"), [""]);
        assert_eq!(fallbacks("var(--fill-1,)"), [""]);
        assert_eq!(fallbacks("var(--fill-1,\n\t )"), [""]);
    }

    #[test]
    fn test_second_level_nesting_closes_early() {
        let doc = "var(--x, a(b(c))) tail";
        let refs: Vec<_> = find_references(doc).collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "var(--x, a(b(c))");
        assert_eq!(&doc[refs[0].end..], ") tail");
    }

    #[test]
    fn test_group_may_start_the_fallback() {
        assert_eq!(fallbacks("var(--x, (1) 2)"), ["(1) 2"]);
    }

    #[test]
    fn test_unclosed_candidate_does_not_match() {
        assert_eq!(count_references("var(--x, rgb(1, 2, 3"), 0);
        assert_eq!(count_references("var(--x, red"), 0);
    }

    #[test]
    fn test_unclosed_candidate_does_not_hide_later_match() {
        // The first candidate never closes at the top level; scanning
        // resumes inside it and finds the second reference.
        let doc = "var(--a, (var(--b, red)";
        let refs: Vec<_> = find_references(doc).collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "b");
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(count_references("var(--, red)"), 0);
        assert_eq!(count_references("var(--a b, red)"), 0);
        assert_eq!(count_references("var(-a, red)"), 0);
        assert_eq!(count_references("var(--fill_1-x, red)"), 1);
        assert_eq!(count_references("var(--couleur-é, red)"), 1);
    }

    #[test]
    fn test_no_references() {
        assert_eq!(count_references(""), 0);
        assert_eq!(count_references("<svg><rect fill=\"#fff\"/></svg>"), 0);
        assert_eq!(count_references("var"), 0);
    }

    #[test]
    fn test_offsets_with_multibyte_prefix() {
        let doc = "<!-- é --><rect fill=\"var(--x, red)\"/>";
        let r = find_references(doc).next().unwrap();
        assert_eq!(&doc[r.start..r.end], "var(--x, red)");
    }
}
