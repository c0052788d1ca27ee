//! The gamestring scanner and the span list it produces.

use std::ops::Range;

mod scanner;
mod span;

pub use self::scanner::{scan, ParsedSpans};
pub use self::span::{SpanKind, TextSpan};

// Byte range of the tag-type name inside a tag's text, e.g. 1..2 for
// `<c val="...">` and 2..3 for `</c>`.
pub(crate) fn tag_name_range(tag: &str) -> Range<usize> {
    let bytes = tag.as_bytes();
    let start = if bytes.len() > 1 && bytes[1] == b'/' { 2 } else { 1 };
    let mut end = start;

    while end < bytes.len() && !matches!(bytes[end], b' ' | b'/' | b'>') {
        end += 1;
    }

    start..end
}

pub(crate) fn tag_name(tag: &str) -> &str {
    &tag[tag_name_range(tag)]
}

pub(crate) fn tags_match(start_tag: &str, end_tag: &str) -> bool {
    tag_name(start_tag).eq_ignore_ascii_case(tag_name(end_tag))
}

// Byte range of the value of a `val="..."` attribute inside a tag's text.
// `None` when the attribute or its closing quote is absent.
pub(crate) fn val_attribute(tag: &str) -> Option<Range<usize>> {
    let bytes = tag.as_bytes();
    let mut pos = 0;

    let value_start = loop {
        let offset = memchr::memchr2(b'v', b'V', &bytes[pos..])?;
        let at = pos + offset;

        if at + 5 <= bytes.len()
            && bytes[at + 1].eq_ignore_ascii_case(&b'a')
            && bytes[at + 2].eq_ignore_ascii_case(&b'l')
            && bytes[at + 3] == b'='
            && bytes[at + 4] == b'"'
        {
            break at + 5;
        }

        pos = at + 1;
    };

    let closing_quote = memchr::memchr(b'"', &bytes[value_start..])?;

    Some(value_start..value_start + closing_quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names() {
        assert_eq!(tag_name("<c val=\"FF8000\">"), "c");
        assert_eq!(tag_name("</c>"), "c");
        assert_eq!(tag_name("<img path=\"x\"/>"), "img");
        assert_eq!(tag_name("<w>"), "w");
    }

    #[test]
    fn tag_matching_is_case_insensitive() {
        assert!(tags_match("<C val=\"FF8000\">", "</c>"));
        assert!(tags_match("<w>", "</W>"));
        assert!(!tags_match("<w>", "</c>"));
    }

    #[test]
    fn val_attribute_value() {
        let tag = "<c val=\"#TooltipNumbers\">";
        let range = val_attribute(tag).unwrap();
        assert_eq!(&tag[range], "#TooltipNumbers");

        let upper = "<c VAL=\"x\">";
        assert_eq!(&upper[val_attribute(upper).unwrap()], "x");
        assert_eq!(val_attribute("<w>"), None);
        // no closing quote, no value
        assert_eq!(val_attribute("<c val=\"#ColorViolet »>"), None);
    }
}
