//! The high-level gamestring facade.

use std::cell::OnceCell;
use std::fmt;

use crate::font_values::{FontTagType, FontValueReplacements};
use crate::locale::StormLocale;
use crate::parser::{scan, ParsedSpans};
use crate::rendering::{render, RenderFlags};

/// A gamestring with lazily rendered, cached output flavors.
///
/// The input is scanned once at construction; each flavor is rendered on
/// first access and cached. Registering a font value replacement
/// invalidates the flavors that carry tags.
///
/// ```
/// use gamestring::{GameStringText, StormLocale};
///
/// let text = GameStringText::with_locale(
///     "Deals <c val=\"#TooltipNumbers\">120~~0.04~~</c> damage.",
///     StormLocale::EnUs,
/// );
///
/// assert_eq!(
///     text.plain_text_with_scaling(),
///     "Deals 120 (+4% per level) damage.",
/// );
/// assert_eq!(
///     text.colored_text(),
///     "Deals <c val=\"#TooltipNumbers\">120</c> damage.",
/// );
/// ```
#[derive(Debug)]
pub struct GameStringText {
    text: String,
    locale: StormLocale,
    parsed: ParsedSpans,
    replacements: FontValueReplacements,
    raw: OnceCell<String>,
    plain: OnceCell<String>,
    plain_with_newlines: OnceCell<String>,
    plain_with_scaling: OnceCell<String>,
    plain_with_scaling_with_newlines: OnceCell<String>,
    colored: OnceCell<String>,
    colored_with_scaling: OnceCell<String>,
}

impl GameStringText {
    /// The literal error marker, `##ERROR##`.
    pub const ERROR_TAG: &'static str = "##ERROR##";

    /// Parses `text` with the default locale ([`StormLocale::EnUs`]).
    pub fn new(text: impl Into<String>) -> Self {
        Self::build(text.into(), StormLocale::default(), false)
    }

    /// Parses `text` localized for `locale`.
    pub fn with_locale(text: impl Into<String>, locale: StormLocale) -> Self {
        Self::build(text.into(), locale, false)
    }

    /// Parses `text` and additionally collects the font values of its
    /// `<c>`/`<s>` tags.
    pub fn with_font_value_extraction(text: impl Into<String>, locale: StormLocale) -> Self {
        Self::build(text.into(), locale, true)
    }

    fn build(text: String, locale: StormLocale, extract_font_values: bool) -> Self {
        let parsed = scan(&text, extract_font_values);

        Self {
            text,
            locale,
            parsed,
            replacements: FontValueReplacements::new(),
            raw: OnceCell::new(),
            plain: OnceCell::new(),
            plain_with_newlines: OnceCell::new(),
            plain_with_scaling: OnceCell::new(),
            plain_with_scaling_with_newlines: OnceCell::new(),
            colored: OnceCell::new(),
            colored_with_scaling: OnceCell::new(),
        }
    }

    /// The unrendered input.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn locale(&self) -> StormLocale {
        self.locale
    }

    /// The parsed span list.
    pub fn parsed(&self) -> &ParsedSpans {
        &self.parsed
    }

    /// The normalized text with all tags kept verbatim.
    pub fn raw_text(&self) -> &str {
        self.raw.get_or_init(|| self.render(RenderFlags::raw()))
    }

    /// Plain text: no tags, newlines as spaces, scaling dropped.
    pub fn plain_text(&self) -> &str {
        self.plain
            .get_or_init(|| self.render(RenderFlags::plain(false, false)))
    }

    /// Plain text with `<n/>` newlines kept.
    pub fn plain_text_with_newlines(&self) -> &str {
        self.plain_with_newlines
            .get_or_init(|| self.render(RenderFlags::plain(true, false)))
    }

    /// Plain text with scaling evaluated into per-level phrases.
    pub fn plain_text_with_scaling(&self) -> &str {
        self.plain_with_scaling
            .get_or_init(|| self.render(RenderFlags::plain(false, true)))
    }

    /// Plain text with `<n/>` newlines kept and scaling evaluated.
    pub fn plain_text_with_scaling_with_newlines(&self) -> &str {
        self.plain_with_scaling_with_newlines
            .get_or_init(|| self.render(RenderFlags::plain(true, true)))
    }

    /// Colored text: color tags and newlines kept, scaling dropped.
    pub fn colored_text(&self) -> &str {
        self.colored
            .get_or_init(|| self.render(RenderFlags::colored(false)))
    }

    /// Colored text with scaling evaluated.
    pub fn colored_text_with_scaling(&self) -> &str {
        self.colored_with_scaling
            .get_or_init(|| self.render(RenderFlags::colored(true)))
    }

    /// Whether font values were collected at construction.
    pub fn is_font_values_extracted(&self) -> bool {
        self.parsed.font_values().is_some()
    }

    /// The extracted `<s>` tag values, `None` when extraction was disabled.
    pub fn font_style_values(&self) -> Option<&[String]> {
        self.parsed
            .font_values()
            .map(|values| values.values(FontTagType::Style))
    }

    /// The extracted `<c>` tag values, `None` when extraction was disabled.
    pub fn font_style_constant_values(&self) -> Option<&[String]> {
        self.parsed
            .font_values()
            .map(|values| values.values(FontTagType::Constant))
    }

    /// Registers a `val` attribute replacement for tags of `tag_type`.
    ///
    /// Already rendered tag-carrying flavors are re-rendered on next
    /// access; plain-text flavors are unaffected. The extracted font value
    /// set, if any, is updated to reflect the replacement.
    pub fn add_font_value_replacement(
        &mut self,
        original: &str,
        replacement: &str,
        tag_type: FontTagType,
        preserve_value: bool,
    ) -> &mut Self {
        self.replacements
            .insert(tag_type, original, replacement, preserve_value);

        if let Some(values) = self.parsed.font_values_mut() {
            values.apply_replacement(tag_type, original, replacement);
        }

        self.invalidate_tagged_flavors();
        self
    }

    /// Registers several replacements of the same tag type at once.
    pub fn add_font_value_replacements<I, K, V>(
        &mut self,
        tag_type: FontTagType,
        preserve_value: bool,
        replacements: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (original, replacement) in replacements {
            self.add_font_value_replacement(
                original.as_ref(),
                replacement.as_ref(),
                tag_type,
                preserve_value,
            );
        }

        self
    }

    fn invalidate_tagged_flavors(&mut self) {
        self.raw.take();
        self.colored.take();
        self.colored_with_scaling.take();
    }

    fn render(&self, flags: RenderFlags) -> String {
        render(
            &self.text,
            self.parsed.spans(),
            flags,
            self.locale,
            &self.replacements,
        )
    }
}

impl fmt::Display for GameStringText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plain_text_with_scaling())
    }
}
