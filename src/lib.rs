//! Parser and renderer for game tooltip gamestrings.
//!
//! A gamestring mixes plain text with color tags (`<c val="...">`,
//! `<s val="...">`), self-closing tags, `<n/>` newline and `<sp/>` space
//! tags, `~~number~~` scaling tags and the `##ERROR##` marker. Real-world
//! data is frequently malformed: tags overlap, end tags are missing or
//! stray, quotes go unclosed. The scanner normalizes all of that into a
//! flat span list, which renders into several output flavors, from
//! verbatim-but-normalized to plain text with scaling evaluated into
//! localized per-level phrases.
//!
//! The easiest entry point is [`GameStringText`], which caches every
//! flavor behind one parse:
//!
//! ```
//! use gamestring::{GameStringText, StormLocale};
//!
//! let text = GameStringText::with_locale(
//!     "Heal for <c val=\"#TooltipNumbers\">250~~0.045~~</c>.<n/>",
//!     StormLocale::DeDe,
//! );
//!
//! assert_eq!(text.plain_text(), "Heal for 250. ");
//! assert_eq!(
//!     text.colored_text_with_scaling(),
//!     "Heal for <c val=\"#TooltipNumbers\">250 (+4,5% pro Stufe)</c>.<n/>",
//! );
//! ```
//!
//! The lower-level pieces ([`parser::scan`], [`rendering::render`]) are
//! public for callers that want to reuse one span list across their own
//! flavor combinations.

pub mod errors;
pub mod font_values;
pub mod locale;
pub mod parser;
pub mod rendering;

mod game_string;

pub use self::errors::ParseLocaleError;
pub use self::font_values::{FontTagType, FontValueReplacements, FontValues};
pub use self::game_string::GameStringText;
pub use self::locale::StormLocale;
pub use self::rendering::{RenderFlags, TagFlag};
