//! Gamestring localizations and locale-aware number formatting.

use std::str::FromStr;

use crate::errors::ParseLocaleError;

/// The localization of a gamestring.
///
/// The locale drives the per-level phrase that an evaluated scaling tag
/// expands into, including the decimal separator of the number inside it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StormLocale {
    /// English (US)
    #[default]
    EnUs,
    /// German
    DeDe,
    /// Spanish (EU)
    EsEs,
    /// Spanish (Latin American)
    EsMx,
    /// French
    FrFr,
    /// Italian
    ItIt,
    /// Korean
    KoKr,
    /// Polish
    PlPl,
    /// Portuguese
    PtBr,
    /// Russian
    RuRu,
    /// Chinese (Simplified)
    ZhCn,
    /// Chinese (Traditional)
    ZhTw,
}

impl StormLocale {
    /// The culture code of the locale, e.g. `en-US`.
    pub fn culture_code(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::DeDe => "de-DE",
            Self::EsEs => "es-ES",
            Self::EsMx => "es-MX",
            Self::FrFr => "fr-FR",
            Self::ItIt => "it-IT",
            Self::KoKr => "ko-KR",
            Self::PlPl => "pl-PL",
            Self::PtBr => "pt-BR",
            Self::RuRu => "ru-RU",
            Self::ZhCn => "zh-CN",
            Self::ZhTw => "zh-TW",
        }
    }

    // (prefix, suffix) around the formatted percent number, leading space
    // included so the phrase can be appended directly after the base value.
    fn per_level_template(self) -> (&'static str, &'static str) {
        match self {
            Self::EnUs => (" (+", "% per level)"),
            Self::DeDe => (" (+", "% pro Stufe)"),
            Self::EsEs | Self::EsMx => (" (+", "% por nivel)"),
            Self::FrFr => (" (+", "% par niveau)"),
            Self::ItIt => (" (+", "% per livello)"),
            Self::KoKr => (" (레벨당 +", "%)"),
            Self::PlPl => (" (+", "% na poziom)"),
            Self::PtBr => (" (+", "% por nível)"),
            Self::RuRu => (" (+", "% за уровень)"),
            Self::ZhCn => (" (每级+", "%)"),
            Self::ZhTw => (" (每級+", "%)"),
        }
    }

    fn uses_decimal_comma(self) -> bool {
        matches!(
            self,
            Self::DeDe
                | Self::EsEs
                | Self::FrFr
                | Self::ItIt
                | Self::PlPl
                | Self::PtBr
                | Self::RuRu
        )
    }

    /// Builds the localized per-level phrase for a scaling growth value,
    /// given as a percentage (e.g. `4.5` for `~~0.045~~`).
    pub(crate) fn per_level_phrase(self, percent: f64) -> String {
        let (prefix, suffix) = self.per_level_template();
        let number = self.format_percent(percent);

        let mut phrase = String::with_capacity(prefix.len() + number.len() + suffix.len());
        phrase.push_str(prefix);
        phrase.push_str(&number);
        phrase.push_str(suffix);
        phrase
    }

    // "0.##" style: at most two fraction digits, trailing zeros trimmed,
    // locale decimal separator.
    fn format_percent(self, percent: f64) -> String {
        let mut number = format!("{percent:.2}");

        while number.ends_with('0') {
            number.pop();
        }
        if number.ends_with('.') {
            number.pop();
        }

        if self.uses_decimal_comma() {
            number = number.replace('.', ",");
        }

        number
    }
}

impl FromStr for StormLocale {
    type Err = ParseLocaleError;

    /// Parses a locale identifier, case-insensitively and with `-` and `_`
    /// separators ignored, e.g. `enus`, `en-US` or `de_DE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut normalized = String::with_capacity(s.len());

        for ch in s.chars() {
            if ch != '-' && ch != '_' {
                normalized.push(ch.to_ascii_lowercase());
            }
        }

        match normalized.as_str() {
            "enus" => Ok(Self::EnUs),
            "dede" => Ok(Self::DeDe),
            "eses" => Ok(Self::EsEs),
            "esmx" => Ok(Self::EsMx),
            "frfr" => Ok(Self::FrFr),
            "itit" => Ok(Self::ItIt),
            "kokr" => Ok(Self::KoKr),
            "plpl" => Ok(Self::PlPl),
            "ptbr" => Ok(Self::PtBr),
            "ruru" => Ok(Self::RuRu),
            "zhcn" => Ok(Self::ZhCn),
            "zhtw" => Ok(Self::ZhTw),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_formatting_trims_trailing_zeros() {
        assert_eq!(StormLocale::EnUs.format_percent(4.0), "4");
        assert_eq!(StormLocale::EnUs.format_percent(4.5), "4.5");
        assert_eq!(StormLocale::EnUs.format_percent(4.25), "4.25");
        assert_eq!(StormLocale::EnUs.format_percent(40.0), "40");
        assert_eq!(StormLocale::EnUs.format_percent(0.5), "0.5");
    }

    #[test]
    fn percent_formatting_uses_locale_separator() {
        assert_eq!(StormLocale::DeDe.format_percent(4.5), "4,5");
        assert_eq!(StormLocale::EsMx.format_percent(4.5), "4.5");
        assert_eq!(StormLocale::RuRu.format_percent(4.0), "4");
    }

    #[test]
    fn per_level_phrases() {
        assert_eq!(
            StormLocale::EnUs.per_level_phrase(4.0),
            " (+4% per level)"
        );
        assert_eq!(
            StormLocale::DeDe.per_level_phrase(4.5),
            " (+4,5% pro Stufe)"
        );
        assert_eq!(StormLocale::KoKr.per_level_phrase(4.5), " (레벨당 +4.5%)");
        assert_eq!(StormLocale::ZhCn.per_level_phrase(4.5), " (每级+4.5%)");
    }

    #[test]
    fn locale_from_str() {
        assert_eq!("enus".parse(), Ok(StormLocale::EnUs));
        assert_eq!("en-US".parse(), Ok(StormLocale::EnUs));
        assert_eq!("de_DE".parse(), Ok(StormLocale::DeDe));
        assert_eq!("KOKR".parse(), Ok(StormLocale::KoKr));

        assert!("en".parse::<StormLocale>().is_err());
        assert!("".parse::<StormLocale>().is_err());
    }
}
