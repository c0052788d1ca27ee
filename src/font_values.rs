//! Font value extraction sets and the replacement registry.

use hashbrown::HashMap;

/// The tag type of a font value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontTagType {
    /// A style tag, `<s val="...">`.
    Style,
    /// A style constant tag, `<c val="...">`.
    Constant,
}

impl FontTagType {
    pub(crate) fn from_tag_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("c") {
            Some(Self::Constant)
        } else if name.eq_ignore_ascii_case("s") {
            Some(Self::Style)
        } else {
            None
        }
    }
}

/// The `val` attribute values collected from `<c>` and `<s>` tags during a
/// scan, per tag type, in first-seen order and without duplicates.
#[derive(Debug, Default)]
pub struct FontValues {
    style: Vec<String>,
    constant: Vec<String>,
}

impl FontValues {
    /// The collected values for `tag_type`.
    pub fn values(&self, tag_type: FontTagType) -> &[String] {
        match tag_type {
            FontTagType::Style => &self.style,
            FontTagType::Constant => &self.constant,
        }
    }

    fn values_mut(&mut self, tag_type: FontTagType) -> &mut Vec<String> {
        match tag_type {
            FontTagType::Style => &mut self.style,
            FontTagType::Constant => &mut self.constant,
        }
    }

    pub(crate) fn insert(&mut self, tag_type: FontTagType, value: &str) {
        let values = self.values_mut(tag_type);

        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }

    // Keeps the set in sync with a registered replacement: the original
    // value gives way to the replacement, which keeps the set duplicate-free.
    pub(crate) fn apply_replacement(
        &mut self,
        tag_type: FontTagType,
        original: &str,
        replacement: &str,
    ) {
        let values = self.values_mut(tag_type);

        let Some(index) = values.iter().position(|v| v == original) else {
            return;
        };

        if values.iter().any(|v| v == replacement) {
            values.remove(index);
        } else {
            values[index] = replacement.to_string();
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Replacement {
    pub value: String,
    pub preserve: bool,
}

/// Registered `val` attribute substitutions, applied to start tags as they
/// are rendered.
#[derive(Debug, Default)]
pub struct FontValueReplacements {
    style: HashMap<String, Replacement>,
    constant: HashMap<String, Replacement>,
}

impl FontValueReplacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.constant.is_empty()
    }

    /// Registers a replacement of `original` by `replacement` for tags of
    /// `tag_type`. With `preserve` set, the rendered tag keeps the original
    /// value in an `hlt-name` attribute.
    pub fn insert(
        &mut self,
        tag_type: FontTagType,
        original: impl Into<String>,
        replacement: impl Into<String>,
        preserve: bool,
    ) {
        let map = match tag_type {
            FontTagType::Style => &mut self.style,
            FontTagType::Constant => &mut self.constant,
        };

        map.insert(
            original.into(),
            Replacement {
                value: replacement.into(),
                preserve,
            },
        );
    }

    pub(crate) fn get(&self, tag_type: FontTagType, original: &str) -> Option<&Replacement> {
        match tag_type {
            FontTagType::Style => self.style.get(original),
            FontTagType::Constant => self.constant.get(original),
        }
    }
}
