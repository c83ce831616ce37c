//! Branding registry and color/font resolution.
//!
//! Elements may declare a fill, stroke or font family as a *key* into the
//! registry instead of a literal value by tagging it with a [`BrandingMode`].
//! Resolution happens at paint time only; resolved values are never written
//! back into the scene.

use crate::shapes::{Element, ElementId, ElementKind};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Branding tag on a color or font reference.
///
/// Only `fixed` and `dynamic` bind the reference to the registry; any other
/// tag deserializes to `None` and the value is used literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandingMode {
    Fixed,
    Dynamic,
}

impl BrandingMode {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "fixed" => Some(BrandingMode::Fixed),
            "dynamic" => Some(BrandingMode::Dynamic),
            _ => None,
        }
    }
}

/// Deserialize an optional branding tag, mapping unknown tags to `None`.
pub(crate) fn lenient_branding_mode<'de, D>(deserializer: D) -> Result<Option<BrandingMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.as_deref().and_then(BrandingMode::from_tag))
}

/// Registered font family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontEntry {
    /// Family name, or file name for uploaded fonts.
    pub value: String,
    #[serde(default)]
    pub is_file: bool,
    #[serde(default = "default_variant")]
    pub variant: String,
}

fn default_variant() -> String {
    "regular".to_string()
}

/// Concrete font after branding resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    pub family: String,
    /// Registered variant; `None` when the element's own variant applies.
    pub variant: Option<String>,
    pub is_file: bool,
}

/// Color slots of an element, each with its own fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Fill,
    Stroke,
    TextBackground,
    TextColor,
    IconTint,
}

impl ColorSlot {
    /// Color used when the element carries no literal for this slot.
    pub fn default_color(self) -> &'static str {
        match self {
            ColorSlot::Fill => crate::shapes::DEFAULT_FILL,
            ColorSlot::Stroke | ColorSlot::IconTint => "#000000",
            ColorSlot::TextBackground => "#fff",
            ColorSlot::TextColor => "#000",
        }
    }
}

impl Element {
    /// Declared value for a color slot, `None` when empty or not applicable.
    pub fn color_literal(&self, slot: ColorSlot) -> Option<&str> {
        let literal = match (slot, &self.kind) {
            (ColorSlot::Fill, _) => Some(self.fill.as_str()),
            (ColorSlot::Stroke, _) => self.stroke.as_deref(),
            (ColorSlot::TextBackground, ElementKind::Text(text)) => text.background.as_deref(),
            (ColorSlot::TextColor, ElementKind::Text(_)) => Some(self.fill.as_str()),
            (ColorSlot::IconTint, ElementKind::Icon { color, .. }) => Some(color.as_str()),
            _ => None,
        };
        literal.filter(|s| !s.is_empty())
    }

    /// Branding mode governing a color slot.
    pub fn color_mode(&self, slot: ColorSlot) -> Option<BrandingMode> {
        match slot {
            ColorSlot::Fill | ColorSlot::TextBackground | ColorSlot::IconTint => {
                self.fill_branding_type
            }
            ColorSlot::Stroke => self.stroke_branding_type,
            ColorSlot::TextColor => None,
        }
    }
}

/// Seeded key/value registry of brand colors and fonts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandingRegistry {
    #[serde(default)]
    colors: BTreeMap<String, String>,
    #[serde(default, rename = "fonts", alias = "fontFamilies")]
    fonts: BTreeMap<String, FontEntry>,
    #[serde(skip)]
    revision: u64,
}

impl Default for BrandingRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.add_color("primary_colors", "#FF0000");
        registry.add_color("secondary_colors", "#00FF00");
        registry.add_color("accent_colors", "#0000FF");
        registry.add_font("primary_font", "Arial", None, None);
        registry.add_font("secondary_font", "Times New Roman", None, None);
        registry.revision = 0;
        registry
    }
}

impl BrandingRegistry {
    /// Registry with no colors or fonts.
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
            fonts: BTreeMap::new(),
            revision: 0,
        }
    }

    /// Incremented on every effective change. Adapters compare it to decide
    /// when already placed elements need re-resolving.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn colors(&self) -> &BTreeMap<String, String> {
        &self.colors
    }

    pub fn fonts(&self) -> &BTreeMap<String, FontEntry> {
        &self.fonts
    }

    pub fn color(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    pub fn font(&self, key: &str) -> Option<&FontEntry> {
        self.fonts.get(key)
    }

    /// Create or overwrite a color.
    pub fn add_color(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.colors.insert(key.into(), value.into());
        self.revision += 1;
    }

    /// Overwrite an existing color. Returns false (and does nothing) when the
    /// key is not registered.
    pub fn set_color(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.colors.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn remove_color(&mut self, key: &str) -> bool {
        let removed = self.colors.remove(key).is_some();
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Create or overwrite a font. `is_file` defaults to false and `variant`
    /// to `"regular"`.
    pub fn add_font(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        is_file: Option<bool>,
        variant: Option<&str>,
    ) {
        let entry = FontEntry {
            value: value.into(),
            is_file: is_file.unwrap_or(false),
            variant: variant.map(str::to_string).unwrap_or_else(default_variant),
        };
        self.fonts.insert(key.into(), entry);
        self.revision += 1;
    }

    /// Overwrite an existing font, keeping its variant when none is given.
    /// No-op on a missing key.
    pub fn set_font(
        &mut self,
        key: &str,
        value: impl Into<String>,
        is_file: Option<bool>,
        variant: Option<&str>,
    ) -> bool {
        let Some(entry) = self.fonts.get_mut(key) else {
            return false;
        };
        entry.value = value.into();
        entry.is_file = is_file.unwrap_or(false);
        if let Some(variant) = variant {
            entry.variant = variant.to_string();
        }
        self.revision += 1;
        true
    }

    pub fn remove_font(&mut self, key: &str) -> bool {
        let removed = self.fonts.remove(key).is_some();
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Clear both maps.
    pub fn reset(&mut self) {
        self.colors.clear();
        self.fonts.clear();
        self.revision += 1;
    }

    /// Merge another registry's entries into this one (add semantics).
    pub fn merge(&mut self, other: &BrandingRegistry) {
        for (key, value) in &other.colors {
            self.add_color(key.clone(), value.clone());
        }
        for (key, entry) in &other.fonts {
            self.add_font(key.clone(), entry.value.clone(), Some(entry.is_file), Some(&entry.variant));
        }
    }

    /// Resolve a color reference.
    ///
    /// Unbound references pass through. A bound key missing from the registry
    /// also resolves to the literal, unchanged; hex literals do so silently.
    pub fn resolve_color(&self, literal: &str, mode: Option<BrandingMode>) -> String {
        if mode.is_none() {
            return literal.to_string();
        }
        match self.colors.get(literal) {
            Some(value) => value.clone(),
            None => {
                if !literal.starts_with('#') {
                    log::warn!("Unresolved branding color key: {literal}");
                }
                literal.to_string()
            }
        }
    }

    /// Resolve a font family reference, following the same policy as
    /// [`Self::resolve_color`].
    pub fn resolve_font(&self, literal: &str, mode: Option<BrandingMode>) -> ResolvedFont {
        let passthrough = || ResolvedFont {
            family: literal.to_string(),
            variant: None,
            is_file: false,
        };
        if mode.is_none() {
            return passthrough();
        }
        match self.fonts.get(literal) {
            Some(entry) => ResolvedFont {
                family: entry.value.clone(),
                variant: Some(entry.variant.clone()),
                is_file: entry.is_file,
            },
            None => {
                log::warn!("Unresolved branding font key: {literal}");
                passthrough()
            }
        }
    }

    /// Resolve one color slot of an element, using the slot default when the
    /// element declares nothing for it.
    pub fn resolve_slot(&self, element: &Element, slot: ColorSlot) -> String {
        match element.color_literal(slot) {
            Some(literal) => self.resolve_color(literal, element.color_mode(slot)),
            None => slot.default_color().to_string(),
        }
    }

    /// Resolve a text element's font, `None` for other kinds.
    pub fn resolve_element_font(&self, element: &Element) -> Option<ResolvedFont> {
        let text = element.as_text()?;
        let mut font = self.resolve_font(&text.font_family, text.font_branding_type);
        if font.variant.is_none() {
            font.variant = Some(text.font_variant.clone());
        }
        Some(font)
    }
}

/// Ids of elements whose bound color references name `key`.
pub fn elements_using_color<'a>(elements: &'a [Element], key: &str) -> Vec<&'a ElementId> {
    elements
        .iter()
        .filter(|el| {
            [
                ColorSlot::Fill,
                ColorSlot::Stroke,
                ColorSlot::TextBackground,
                ColorSlot::IconTint,
            ]
            .into_iter()
            .any(|slot| el.color_mode(slot).is_some() && el.color_literal(slot) == Some(key))
        })
        .map(|el| &el.id)
        .collect()
}

/// Ids of text elements whose bound font family names `key`.
pub fn elements_using_font<'a>(elements: &'a [Element], key: &str) -> Vec<&'a ElementId> {
    elements
        .iter()
        .filter(|el| {
            el.as_text()
                .is_some_and(|t| t.font_branding_type.is_some() && t.font_family == key)
        })
        .map(|el| &el.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Stage;
    use crate::shapes::{ElementSpec, ElementType};

    #[test]
    fn test_seeded_registry() {
        let registry = BrandingRegistry::default();
        assert_eq!(registry.color("primary_colors"), Some("#FF0000"));
        assert_eq!(registry.font("secondary_font").unwrap().value, "Times New Roman");
        assert_eq!(registry.revision(), 0);
    }

    #[test]
    fn test_set_is_noop_on_missing_key() {
        let mut registry = BrandingRegistry::empty();
        assert!(!registry.set_color("brand", "#123456"));
        assert_eq!(registry.color("brand"), None);
        assert_eq!(registry.revision(), 0);

        registry.add_color("brand", "#111111");
        assert!(registry.set_color("brand", "#222222"));
        assert_eq!(registry.color("brand"), Some("#222222"));
        assert_eq!(registry.revision(), 2);
    }

    #[test]
    fn test_set_font_keeps_variant() {
        let mut registry = BrandingRegistry::empty();
        registry.add_font("heading", "Roboto", None, Some("700"));
        assert!(registry.set_font("heading", "Inter", None, None));
        let entry = registry.font("heading").unwrap();
        assert_eq!(entry.value, "Inter");
        assert_eq!(entry.variant, "700");
        assert!(!registry.set_font("missing", "Inter", None, None));
    }

    #[test]
    fn test_resolve_color_passthrough_and_lookup() {
        let registry = BrandingRegistry::default();
        assert_eq!(registry.resolve_color("#112233", None), "#112233");
        assert_eq!(
            registry.resolve_color("primary_colors", Some(BrandingMode::Fixed)),
            "#FF0000"
        );
        assert_eq!(
            registry.resolve_color("primary_colors", None),
            "primary_colors"
        );
    }

    #[test]
    fn test_resolve_font() {
        let registry = BrandingRegistry::default();
        let font = registry.resolve_font("primary_font", Some(BrandingMode::Dynamic));
        assert_eq!(font.family, "Arial");
        assert_eq!(font.variant.as_deref(), Some("regular"));
        let font = registry.resolve_font("Georgia", None);
        assert_eq!(font.family, "Georgia");
        assert_eq!(font.variant, None);
    }

    #[test]
    fn test_resolve_slot_defaults() {
        let registry = BrandingRegistry::default();
        let mut el =
            Element::from_spec(ElementSpec::Kind(ElementType::Frame), Stage::default()).unwrap();
        el.stroke = None;
        assert_eq!(registry.resolve_slot(&el, ColorSlot::Stroke), "#000000");
        assert_eq!(registry.resolve_slot(&el, ColorSlot::Fill), "transparent");
    }

    #[test]
    fn test_reset_clears() {
        let mut registry = BrandingRegistry::default();
        registry.reset();
        assert!(registry.colors().is_empty());
        assert!(registry.fonts().is_empty());
        assert!(registry.revision() > 0);
    }

    #[test]
    fn test_elements_using_keys() {
        let stage = Stage::default();
        let mut bound =
            Element::from_spec(ElementSpec::Kind(ElementType::Circle), stage).unwrap();
        bound.fill = "accent_colors".to_string();
        let mut unbound = bound.clone();
        unbound.id = crate::shapes::ElementId::generate();
        unbound.fill_branding_type = None;
        let mut text = Element::from_spec(
            ElementSpec::Text { text: "t".into(), labels: None },
            stage,
        )
        .unwrap();
        if let ElementKind::Text(props) = &mut text.kind {
            props.font_family = "primary_font".to_string();
        }
        let elements = vec![bound.clone(), unbound, text.clone()];
        assert_eq!(elements_using_color(&elements, "accent_colors"), vec![&bound.id]);
        assert_eq!(elements_using_font(&elements, "primary_font"), vec![&text.id]);
    }

    #[test]
    fn test_registry_serde_alias() {
        let json = r##"{"colors": {"a": "#000"}, "fontFamilies": {"f": {"value": "Arial"}}}"##;
        let registry: BrandingRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.font("f").unwrap().variant, "regular");
    }
}
