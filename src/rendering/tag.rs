//! Tag normalization and `val` attribute substitution.

use super::Sink;
use crate::font_values::{FontTagType, FontValueReplacements};
use crate::parser::{tag_name, tag_name_range, val_attribute};

// Normalizes a start or end tag and applies any registered substitution,
// then writes it out.
pub(super) fn write_tag<S: Sink>(raw: &str, replacements: &FontValueReplacements, out: &mut S) {
    let mut tag = clean_tag(raw);

    substitute_font_value(&mut tag, replacements);
    out.write(&tag);
}

// Synthesizes the `</name>` for an unclosed start tag.
pub(super) fn write_missing_end<S: Sink>(start_tag: &str, out: &mut S) {
    let name = tag_name(start_tag);
    let mut end_tag = String::with_capacity(name.len() + 3);

    end_tag.push_str("</");
    for ch in name.chars() {
        end_tag.push(ch.to_ascii_lowercase());
    }
    end_tag.push('>');

    out.write(&end_tag);
}

// Collapses runs of spaces outside of quoted attribute values and
// lower-cases the tag-type name. Attribute values stay untouched.
fn clean_tag(raw: &str) -> String {
    let mut tag = String::with_capacity(raw.len());
    let mut in_quotes = false;
    let mut last_was_space = false;

    for ch in raw.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        }

        if ch == ' ' && !in_quotes {
            if last_was_space {
                continue;
            }
            last_was_space = true;
        } else {
            last_was_space = false;
        }

        tag.push(ch);
    }

    let range = tag_name_range(&tag);

    if let Some(name) = tag.get_mut(range) {
        name.make_ascii_lowercase();
    }

    tag
}

fn substitute_font_value(tag: &mut String, replacements: &FontValueReplacements) {
    if replacements.is_empty() {
        return;
    }

    let Some(tag_type) = FontTagType::from_tag_name(tag_name(tag)) else {
        return;
    };

    let Some(range) = val_attribute(tag) else {
        return;
    };

    let Some(replacement) = replacements.get(tag_type, &tag[range.clone()]) else {
        return;
    };

    let original = tag[range.clone()].to_string();
    let value = replacement.value.clone();
    let preserve = replacement.preserve;

    tag.replace_range(range.clone(), &value);

    if preserve {
        // right after the value's closing quote
        let insert_at = range.start + value.len() + 1;

        tag.insert_str(insert_at, &format!(" hlt-name=\"{original}\""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(raw: &str) -> String {
        clean_tag(raw)
    }

    #[test]
    fn extra_spaces_are_collapsed_outside_quotes() {
        assert_eq!(
            cleaned("<C  val=\"#TooltipNumbers\">"),
            "<c val=\"#TooltipNumbers\">"
        );
        assert_eq!(
            cleaned("<c   val=\"a  b\">"),
            "<c val=\"a  b\">"
        );
    }

    #[test]
    fn tag_name_is_lowercased_but_not_the_value() {
        assert_eq!(cleaned("<C val=\"FF8000\">"), "<c val=\"FF8000\">");
        assert_eq!(cleaned("</C>"), "</c>");
    }

    #[test]
    fn substitution_rewrites_the_value() {
        let mut replacements = FontValueReplacements::new();
        replacements.insert(FontTagType::Constant, "#TooltipNumbers", "123456", false);

        let mut tag = clean_tag("<c val=\"#TooltipNumbers\">");
        substitute_font_value(&mut tag, &replacements);

        assert_eq!(tag, "<c val=\"123456\">");
    }

    #[test]
    fn substitution_with_preserve_keeps_the_original() {
        let mut replacements = FontValueReplacements::new();
        replacements.insert(FontTagType::Constant, "#TooltipNumbers", "123456", true);

        let mut tag = clean_tag("<c val=\"#TooltipNumbers\">");
        substitute_font_value(&mut tag, &replacements);

        assert_eq!(tag, "<c val=\"123456\" hlt-name=\"#TooltipNumbers\">");
    }

    #[test]
    fn substitution_is_scoped_to_the_tag_type() {
        let mut replacements = FontValueReplacements::new();
        replacements.insert(FontTagType::Style, "#TooltipNumbers", "123456", false);

        let mut tag = clean_tag("<c val=\"#TooltipNumbers\">");
        substitute_font_value(&mut tag, &replacements);

        assert_eq!(tag, "<c val=\"#TooltipNumbers\">");
    }

    #[test]
    fn missing_end_is_synthesized_from_the_start_tag() {
        let mut out = String::new();
        write_missing_end("<W>", &mut out);
        assert_eq!(out, "</w>");

        out.clear();
        write_missing_end("<c val=\"FF8000\">", &mut out);
        assert_eq!(out, "</c>");
    }
}
