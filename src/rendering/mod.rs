//! Rendering of a span list into one of the output flavors.

mod tag;

use crate::font_values::FontValueReplacements;
use crate::locale::StormLocale;
use crate::parser::{SpanKind, TextSpan};

/// How a render pass treats one category of tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFlag {
    /// Emit the tag verbatim (normalized, for start/end tags).
    Include,
    /// Emit what the tag evaluates to.
    Evaluate,
    /// Emit nothing.
    Omit,
}

/// Per-category flags defining an output flavor.
#[derive(Debug, Clone, Copy)]
pub struct RenderFlags {
    /// Start, end and self-closing tags. `Evaluate` behaves as `Include`.
    pub color_tags: TagFlag,
    /// `~~number~~`; `Evaluate` expands to the localized per-level phrase.
    pub scaling_tag: TagFlag,
    /// `<n/>`; `Evaluate` expands to a space.
    pub newline_tag: TagFlag,
    /// `##ERROR##`; anything but `Include` drops it.
    pub error_tag: TagFlag,
    /// `<sp/>`; `Evaluate` expands to a space.
    pub space_tag: TagFlag,
}

impl RenderFlags {
    /// The normalized verbatim flavor: everything kept.
    pub const fn raw() -> Self {
        Self {
            color_tags: TagFlag::Include,
            scaling_tag: TagFlag::Include,
            newline_tag: TagFlag::Include,
            error_tag: TagFlag::Include,
            space_tag: TagFlag::Include,
        }
    }

    /// A plain-text flavor: no color tags, no error marker, spaces for
    /// space tags. Newlines are kept as `<n/>` or turned into spaces, and
    /// scaling tags are evaluated or dropped.
    pub const fn plain(include_newlines: bool, evaluate_scaling: bool) -> Self {
        Self {
            color_tags: TagFlag::Omit,
            scaling_tag: if evaluate_scaling {
                TagFlag::Evaluate
            } else {
                TagFlag::Omit
            },
            newline_tag: if include_newlines {
                TagFlag::Include
            } else {
                TagFlag::Evaluate
            },
            error_tag: TagFlag::Omit,
            space_tag: TagFlag::Evaluate,
        }
    }

    /// A colored flavor: color tags and newlines kept, no error marker,
    /// spaces for space tags. Scaling tags are evaluated or dropped.
    pub const fn colored(evaluate_scaling: bool) -> Self {
        Self {
            color_tags: TagFlag::Include,
            scaling_tag: if evaluate_scaling {
                TagFlag::Evaluate
            } else {
                TagFlag::Omit
            },
            newline_tag: TagFlag::Include,
            error_tag: TagFlag::Omit,
            space_tag: TagFlag::Evaluate,
        }
    }
}

// Output target of a render walk. Implemented by `String` and by a byte
// tally so the sizing pass and the writing pass share one dispatch.
pub(crate) trait Sink {
    fn write(&mut self, text: &str);
}

impl Sink for String {
    #[inline]
    fn write(&mut self, text: &str) {
        self.push_str(text);
    }
}

#[derive(Default)]
struct SizeTally(usize);

impl Sink for SizeTally {
    #[inline]
    fn write(&mut self, text: &str) {
        self.0 += text.len();
    }
}

/// Renders `spans` over `input` into a new string, sized exactly by a
/// preliminary tally pass.
pub fn render(
    input: &str,
    spans: &[TextSpan],
    flags: RenderFlags,
    locale: StormLocale,
    replacements: &FontValueReplacements,
) -> String {
    let size = rendered_size(input, spans, flags, locale, replacements);
    let mut out = String::with_capacity(size);

    render_into(input, spans, flags, locale, replacements, &mut out);

    out
}

/// The exact byte length [`render`] would produce.
pub fn rendered_size(
    input: &str,
    spans: &[TextSpan],
    flags: RenderFlags,
    locale: StormLocale,
    replacements: &FontValueReplacements,
) -> usize {
    let mut tally = SizeTally::default();

    render_into(input, spans, flags, locale, replacements, &mut tally);

    tally.0
}

// A start tag is held back until something renders inside it; a pair with
// nothing in between vanishes, as does a trailing start tag.
fn render_into<S: Sink>(
    input: &str,
    spans: &[TextSpan],
    flags: RenderFlags,
    locale: StormLocale,
    replacements: &FontValueReplacements,
    out: &mut S,
) {
    let mut pending: Option<TextSpan> = None;

    for &span in spans {
        match span.kind() {
            SpanKind::Text => {
                flush_pending(&mut pending, input, replacements, out);
                out.write(span.text(input));
            }
            SpanKind::SelfCloseTag => {
                if !matches!(flags.color_tags, TagFlag::Omit) {
                    flush_pending(&mut pending, input, replacements, out);
                    out.write(span.text(input));
                }
            }
            SpanKind::Newline => match flags.newline_tag {
                TagFlag::Include => {
                    flush_pending(&mut pending, input, replacements, out);
                    out.write("<n/>");
                }
                TagFlag::Evaluate => {
                    flush_pending(&mut pending, input, replacements, out);
                    out.write(" ");
                }
                TagFlag::Omit => {}
            },
            SpanKind::SpaceTag => match flags.space_tag {
                TagFlag::Include => {
                    flush_pending(&mut pending, input, replacements, out);
                    out.write(span.text(input));
                }
                TagFlag::Evaluate => {
                    flush_pending(&mut pending, input, replacements, out);
                    out.write(" ");
                }
                TagFlag::Omit => {}
            },
            SpanKind::ScalingTag => match flags.scaling_tag {
                TagFlag::Include => {
                    flush_pending(&mut pending, input, replacements, out);
                    out.write(span.text(input));
                }
                TagFlag::Evaluate => {
                    flush_pending(&mut pending, input, replacements, out);

                    let text = span.text(input);
                    let value = &text[2..text.len() - 2];

                    match value.parse::<f64>() {
                        Ok(growth) => out.write(&locale.per_level_phrase(growth * 100.0)),
                        Err(_) => out.write(text),
                    }
                }
                TagFlag::Omit => {}
            },
            SpanKind::ErrorTag => {
                if matches!(flags.error_tag, TagFlag::Include) {
                    flush_pending(&mut pending, input, replacements, out);
                    out.write(span.text(input));
                }
            }
            SpanKind::StartTag => {
                if !matches!(flags.color_tags, TagFlag::Omit) {
                    flush_pending(&mut pending, input, replacements, out);
                    pending = Some(span);
                }
            }
            SpanKind::EndTag => {
                if !matches!(flags.color_tags, TagFlag::Omit) && pending.take().is_none() {
                    tag::write_tag(span.text(input), replacements, out);
                }
            }
            SpanKind::MissingEndTag => {
                if !matches!(flags.color_tags, TagFlag::Omit) && pending.take().is_none() {
                    tag::write_missing_end(span.text(input), out);
                }
            }
        }
    }
}

fn flush_pending<S: Sink>(
    pending: &mut Option<TextSpan>,
    input: &str,
    replacements: &FontValueReplacements,
    out: &mut S,
) {
    if let Some(span) = pending.take() {
        tag::write_tag(span.text(input), replacements, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scan;

    fn render_flavor(input: &str, flags: RenderFlags) -> String {
        let parsed = scan(input, false);

        render(
            input,
            parsed.spans(),
            flags,
            StormLocale::EnUs,
            &FontValueReplacements::new(),
        )
    }

    #[test]
    fn sizing_pass_matches_output_length() {
        let inputs = [
            "<c val=\"#TooltipNumbers\">120~~0.04~~</c><n/> damage",
            "Max Health Bonus: <c val=\"#TooltipNumbers\"0%</c> previous <w>test<a>location.< ~~no-scale~~ ##ERROR## 100~~0.045~~",
        ];
        let replacements = FontValueReplacements::new();

        for input in inputs {
            let parsed = scan(input, false);

            for flags in [
                RenderFlags::raw(),
                RenderFlags::plain(false, false),
                RenderFlags::plain(true, true),
                RenderFlags::colored(true),
            ] {
                for locale in [StormLocale::EnUs, StormLocale::KoKr] {
                    let out = render(input, parsed.spans(), flags, locale, &replacements);
                    let size = rendered_size(input, parsed.spans(), flags, locale, &replacements);

                    assert_eq!(out.len(), size, "{input}");
                }
            }
        }
    }

    #[test]
    fn empty_pair_is_elided_per_flavor() {
        // the pair only empties out when the scaling tag is dropped
        let input = "<c val=\"FF8000\">~~0.04~~</c>";

        assert_eq!(render_flavor(input, RenderFlags::raw()), input);
        assert_eq!(render_flavor(input, RenderFlags::colored(false)), "");
        assert_eq!(
            render_flavor(input, RenderFlags::colored(true)),
            "<c val=\"FF8000\"> (+4% per level)</c>"
        );
    }

    #[test]
    fn trailing_start_tag_is_dropped() {
        assert_eq!(
            render_flavor("45%<c val=\"FF8000\">", RenderFlags::raw()),
            "45%"
        );
    }
}
