use memchr::{memchr, memchr2, memchr3};

use super::span::{SpanKind, TextSpan};
use super::{tag_name, tags_match, val_attribute};
use crate::font_values::{FontTagType, FontValues};

/// Recursion cap for nested start tags. Start tags below a frame at this
/// depth are dropped rather than opening another frame.
const MAX_TAG_NESTING: usize = 32;

const ERROR_TAG: &[u8] = b"##ERROR##";

/// The result of scanning a gamestring: the ordered span list, plus the
/// font values collected from `<c>`/`<s>` tags when extraction was enabled.
#[derive(Debug)]
pub struct ParsedSpans {
    spans: Vec<TextSpan>,
    font_values: Option<FontValues>,
}

impl ParsedSpans {
    /// The spans in render order.
    #[inline]
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// The extracted font values, `None` when extraction was disabled.
    #[inline]
    pub fn font_values(&self) -> Option<&FontValues> {
        self.font_values.as_ref()
    }

    #[inline]
    pub(crate) fn font_values_mut(&mut self) -> Option<&mut FontValues> {
        self.font_values.as_mut()
    }
}

/// Scans a gamestring into its span list.
///
/// The scan normalizes nesting as it goes: a nested start tag closes the
/// enclosing tag before it (with its real end tag if one exists ahead,
/// otherwise a [`SpanKind::MissingEndTag`]) and re-opens it after the nested
/// frame, so the resulting list reads as non-overlapping sibling pairs.
/// Newline tags inside a tag body are lifted out of it the same way.
pub fn scan(input: &str, extract_font_values: bool) -> ParsedSpans {
    let mut scanner = Scanner {
        input,
        bytes: input.as_bytes(),
        pos: 0,
        text_start: 0,
        spans: Vec::new(),
        font_values: extract_font_values.then(FontValues::default),
    };

    scanner.scan_body(None, 0);

    ParsedSpans {
        spans: scanner.spans,
        font_values: scanner.font_values,
    }
}

enum TagShape {
    Start,
    End,
    SelfClose,
    Newline,
    Space,
    /// `<li/>`, dropped from the output.
    Unsupported,
}

struct Scanner<'i> {
    input: &'i str,
    bytes: &'i [u8],
    pos: usize,
    text_start: usize,
    spans: Vec<TextSpan>,
    font_values: Option<FontValues>,
}

impl Scanner<'_> {
    // One frame: the top level, or the body of `enclosing`. Returns when the
    // frame's end tag is found or the input runs out.
    fn scan_body(&mut self, enclosing: Option<TextSpan>, depth: usize) {
        while let Some(offset) = memchr3(b'<', b'~', b'#', &self.bytes[self.pos..]) {
            self.pos += offset;

            match self.bytes[self.pos] {
                b'<' => {
                    if self.pos + 1 >= self.bytes.len() || self.bytes[self.pos + 1] == b' ' {
                        // `<` followed by a space or nothing is text
                        self.pos += 1;
                        continue;
                    }

                    let tag_start = self.pos;

                    if let Some(shape) = self.parse_tag() {
                        if self.handle_tag(tag_start, shape, enclosing, depth) {
                            return;
                        }
                    }
                }
                b'~' => self.scan_scaling_tag(),
                b'#' => self.scan_error_tag(),
                _ => unreachable!(),
            }
        }

        self.pos = self.bytes.len();
        self.flush_text_to(self.pos);

        if let Some(open) = enclosing {
            self.spans
                .push(TextSpan::new(open.start(), open.end(), SpanKind::MissingEndTag));
        }
    }

    // Tries to read a complete tag at `pos` (which points at `<`). On
    // success `pos` lands one past the closing `>`. On failure the text run
    // keeps going and `pos` lands where scanning should resume: at the next
    // `<` if one cut the tag short, else one past the current `<`.
    fn parse_tag(&mut self) -> Option<TagShape> {
        let start = self.pos;

        match memchr2(b'>', b'<', &self.bytes[start + 1..]) {
            Some(offset) if self.bytes[start + 1 + offset] == b'>' => {
                self.pos = start + offset + 2;
                Some(classify_tag(&self.input[start..self.pos]))
            }
            Some(offset) => {
                self.pos = start + 1 + offset;
                None
            }
            None => {
                self.pos = start + 1;
                None
            }
        }
    }

    // Emits the spans for a parsed tag. Returns `true` when the tag closed
    // the current frame.
    fn handle_tag(
        &mut self,
        start: usize,
        shape: TagShape,
        enclosing: Option<TextSpan>,
        depth: usize,
    ) -> bool {
        let end = self.pos;

        self.flush_text_to(start);

        match shape {
            TagShape::Start => {
                if depth < MAX_TAG_NESTING {
                    if let Some(open) = enclosing {
                        self.close_enclosing(open);
                    }

                    let tag = TextSpan::new(start, end, SpanKind::StartTag);

                    self.capture_font_value(tag);
                    self.spans.push(tag);
                    self.text_start = self.pos;
                    self.scan_body(Some(tag), depth + 1);

                    if let Some(open) = enclosing {
                        self.spans
                            .push(TextSpan::new(open.start(), open.end(), SpanKind::StartTag));
                    }
                }
            }
            TagShape::Newline => {
                // a newline inside a tag body is lifted out of the tag
                if let Some(open) = enclosing {
                    if let Some((s, e)) = self.find_end_tag(open) {
                        self.spans.push(TextSpan::new(s, e, SpanKind::EndTag));
                    } else {
                        self.spans
                            .push(TextSpan::new(open.start(), open.end(), SpanKind::MissingEndTag));
                    }

                    self.spans.push(TextSpan::new(start, end, SpanKind::Newline));
                    self.spans
                        .push(TextSpan::new(open.start(), open.end(), SpanKind::StartTag));
                } else {
                    self.spans.push(TextSpan::new(start, end, SpanKind::Newline));
                }
            }
            TagShape::End => {
                if let Some(open) = enclosing {
                    if tags_match(open.text(self.input), &self.input[start..end]) {
                        self.spans.push(TextSpan::new(start, end, SpanKind::EndTag));
                        self.text_start = self.pos;
                        return true;
                    }
                }
                // stray end tags are dropped
            }
            TagShape::SelfClose => {
                self.spans
                    .push(TextSpan::new(start, end, SpanKind::SelfCloseTag));
            }
            TagShape::Space => {
                self.spans.push(TextSpan::new(start, end, SpanKind::SpaceTag));
            }
            TagShape::Unsupported => {}
        }

        self.text_start = self.pos;
        false
    }

    // Closes `open` ahead of a nested start tag: with its real end tag when
    // one exists further in the input, otherwise synthesized.
    fn close_enclosing(&mut self, open: TextSpan) {
        match self.find_end_tag(open) {
            Some((s, e)) => self.spans.push(TextSpan::new(s, e, SpanKind::EndTag)),
            None => self
                .spans
                .push(TextSpan::new(open.start(), open.end(), SpanKind::MissingEndTag)),
        }
    }

    // Looks ahead from the cursor for the literal `</name>` of `open`.
    fn find_end_tag(&self, open: TextSpan) -> Option<(usize, usize)> {
        let name = tag_name(open.text(self.input));
        let needle_len = name.len() + 3;
        let mut pos = self.pos;

        while pos + needle_len <= self.bytes.len() {
            let offset = memchr(b'<', &self.bytes[pos..])?;
            let at = pos + offset;

            if at + needle_len <= self.bytes.len()
                && self.bytes[at + 1] == b'/'
                && self.bytes[at + needle_len - 1] == b'>'
                && self.input[at + 2..at + needle_len - 1].eq_ignore_ascii_case(name)
            {
                return Some((at, at + needle_len));
            }

            pos = at + 1;
        }

        None
    }

    fn scan_scaling_tag(&mut self) {
        let start = self.pos;

        if self.bytes.get(start + 1) != Some(&b'~') {
            self.pos = start + 1;
            return;
        }

        if let Some(close) = self.find_scaling_close(start + 2) {
            if is_scaling_value(&self.bytes[start + 2..close]) {
                self.flush_text_to(start);
                self.spans
                    .push(TextSpan::new(start, close + 2, SpanKind::ScalingTag));
                self.pos = close + 2;
                self.text_start = self.pos;
                return;
            }
        }

        // the opening delimiter stays text and the rest is re-scanned
        self.pos = start + 2;
    }

    fn find_scaling_close(&self, from: usize) -> Option<usize> {
        let mut pos = from;

        loop {
            let offset = memchr(b'~', &self.bytes[pos..])?;
            let at = pos + offset;

            if self.bytes.get(at + 1) == Some(&b'~') {
                return Some(at);
            }

            pos = at + 1;
        }
    }

    fn scan_error_tag(&mut self) {
        let start = self.pos;
        let end = start + ERROR_TAG.len();

        if end <= self.bytes.len() && self.bytes[start..end].eq_ignore_ascii_case(ERROR_TAG) {
            self.flush_text_to(start);
            self.spans.push(TextSpan::new(start, end, SpanKind::ErrorTag));
            self.pos = end;
            self.text_start = self.pos;
        } else {
            self.pos = start + 1;
        }
    }

    fn capture_font_value(&mut self, tag: TextSpan) {
        let Some(values) = self.font_values.as_mut() else {
            return;
        };

        let text = tag.text(self.input);

        let Some(tag_type) = FontTagType::from_tag_name(tag_name(text)) else {
            return;
        };

        if let Some(range) = val_attribute(text) {
            values.insert(tag_type, &text[range]);
        }
    }

    fn flush_text_to(&mut self, upto: usize) {
        if upto > self.text_start {
            self.spans
                .push(TextSpan::new(self.text_start, upto, SpanKind::Text));
        }
    }
}

fn classify_tag(tag: &str) -> TagShape {
    if tag.eq_ignore_ascii_case("<n/>") || tag.eq_ignore_ascii_case("</n>") {
        TagShape::Newline
    } else if tag.eq_ignore_ascii_case("<sp/>") {
        TagShape::Space
    } else if tag.eq_ignore_ascii_case("<li/>") {
        TagShape::Unsupported
    } else {
        let bytes = tag.as_bytes();

        if bytes[1] == b'/' {
            TagShape::End
        } else if bytes.len() > 3 && bytes[bytes.len() - 2] == b'/' {
            TagShape::SelfClose
        } else {
            TagShape::Start
        }
    }
}

// digits with at most one dot, at least one digit
fn is_scaling_value(value: &[u8]) -> bool {
    let mut digits = 0;
    let mut dots = 0;

    for &byte in value {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }

    digits > 0 && dots <= 1
}
