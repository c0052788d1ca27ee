/// The classification of a scanned region of a gamestring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Plain text, always emitted verbatim.
    Text,
    /// A start tag, e.g. `<c val="#TooltipNumbers">`.
    StartTag,
    /// An end tag, e.g. `</c>`.
    EndTag,
    /// A self-closing tag, e.g. `<img path="foo"/>`.
    SelfCloseTag,
    /// A newline tag, `<n/>` (or its `</n>` spelling).
    Newline,
    /// A space tag, `<sp/>`.
    SpaceTag,
    /// A scaling tag, `~~number~~`.
    ScalingTag,
    /// The literal `##ERROR##` marker.
    ErrorTag,
    /// An end tag that is absent from the input and must be synthesized
    /// from the start tag the range points at.
    MissingEndTag,
}

/// A classified byte range into the original gamestring.
///
/// Spans are ordered by render position, not by byte position: the nesting
/// rewrite re-emits an enclosing start tag after a nested tag, so ranges may
/// repeat and go backwards.
#[derive(Debug, Clone, Copy)]
pub struct TextSpan {
    start: usize,
    end: usize,
    kind: SpanKind,
}

impl TextSpan {
    #[inline]
    pub(crate) const fn new(start: usize, end: usize, kind: SpanKind) -> Self {
        Self { start, end, kind }
    }

    /// Start byte offset, inclusive.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End byte offset, exclusive.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// The slice of `input` this span covers. For [`SpanKind::MissingEndTag`]
    /// this is the start tag the synthesized end tag is derived from.
    #[inline]
    pub fn text<'i>(&self, input: &'i str) -> &'i str {
        &input[self.start..self.end]
    }
}
