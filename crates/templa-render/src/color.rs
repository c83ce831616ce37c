//! CSS-style color strings to peniko colors.

use crate::renderer::{RenderResult, RendererError};
use peniko::Color;
use templa_core::branding::{BrandingRegistry, ColorSlot};
use templa_core::shapes::Element;

/// Named colors accepted besides hex notation, as RGBA bytes.
const NAMED: &[(&str, [u8; 4])] = &[
    ("transparent", [0, 0, 0, 0]),
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
];

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_digit(hi)? << 4 | hex_digit(lo)?)
}

/// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or a named color.
pub fn try_parse_color(value: &str) -> RenderResult<Color> {
    let trimmed = value.trim();
    let invalid = || RendererError::InvalidColor(value.to_string());

    if let Some(hex) = trimmed.strip_prefix('#') {
        let bytes = hex.as_bytes();
        let channels: Option<Vec<u8>> = match bytes.len() {
            3 | 4 => bytes.iter().map(|&c| hex_digit(c).map(|d| d * 17)).collect(),
            6 | 8 => bytes.chunks_exact(2).map(|p| hex_pair(p[0], p[1])).collect(),
            _ => None,
        };
        let channels = channels.ok_or_else(invalid)?;
        let alpha = channels.get(3).copied().unwrap_or(255);
        return Ok(Color::from_rgba8(channels[0], channels[1], channels[2], alpha));
    }

    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .map(|(_, [r, g, b, a])| Color::from_rgba8(*r, *g, *b, *a))
        .ok_or_else(invalid)
}

/// Lenient form of [`try_parse_color`].
pub fn parse_color(value: &str) -> Option<Color> {
    try_parse_color(value).ok()
}

/// Resolve and parse one color slot of an element.
///
/// A resolved value that does not parse falls back to the slot default.
pub fn slot_color(element: &Element, slot: ColorSlot, branding: &BrandingRegistry) -> Color {
    let resolved = branding.resolve_slot(element, slot);
    match try_parse_color(&resolved) {
        Ok(color) => color,
        Err(err) => {
            log::warn!("{err} on element {}, using {slot:?} default", element.id);
            parse_color(slot.default_color()).unwrap_or(Color::BLACK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use templa_core::geometry::Stage;
    use templa_core::shapes::{ElementSpec, ElementType, ElementUpdate};

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_color("#fff"), Some(Color::from_rgba8(255, 255, 255, 255)));
        assert_eq!(parse_color("#00A8E8"), Some(Color::from_rgba8(0, 168, 232, 255)));
        assert_eq!(parse_color("#00a8e880"), Some(Color::from_rgba8(0, 168, 232, 128)));
        assert_eq!(parse_color("#f008"), Some(Color::from_rgba8(255, 0, 0, 136)));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("transparent"), Some(Color::from_rgba8(0, 0, 0, 0)));
        assert_eq!(parse_color(" White "), Some(Color::from_rgba8(255, 255, 255, 255)));
    }

    #[test]
    fn test_invalid_colors() {
        assert!(parse_color("").is_none());
        assert!(parse_color("#12").is_none());
        assert!(parse_color("#zzzzzz").is_none());
        assert!(matches!(
            try_parse_color("primary_colors"),
            Err(RendererError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_slot_color_resolves_branding() {
        let mut el =
            Element::from_spec(ElementSpec::Kind(ElementType::Rectangle), Stage::default()).unwrap();
        ElementUpdate::default().fill("primary_colors").apply_to(&mut el);
        let branding = BrandingRegistry::default();
        assert_eq!(slot_color(&el, ColorSlot::Fill, &branding), Color::from_rgba8(255, 0, 0, 255));
    }

    #[test]
    fn test_slot_color_falls_back_to_default() {
        let mut el =
            Element::from_spec(ElementSpec::Kind(ElementType::Rectangle), Stage::default()).unwrap();
        ElementUpdate::default().fill("no_such_key").apply_to(&mut el);
        let branding = BrandingRegistry::empty();
        assert_eq!(slot_color(&el, ColorSlot::Fill, &branding), Color::from_rgba8(0, 168, 232, 255));
    }
}
