//! Mockup preview tinting.
//!
//! The mockup image is recolored with a CSS `hue-rotate` filter rather than
//! separate per-color photos. Only pure green and pure blue shift the hue;
//! every other swatch renders the base photo unfiltered.

#[cfg(test)]
#[path = "mockup_test.rs"]
mod mockup_test;

/// The base mockup color; no filter is applied for it.
pub const BASE_COLOR: &str = "#FFFFFF";

/// Hue rotation in degrees for a product color swatch.
#[must_use]
pub fn hue_rotation(color: &str) -> u16 {
    match color.to_ascii_uppercase().as_str() {
        "#00FF00" => 120,
        "#0000FF" => 240,
        _ => 0,
    }
}

/// CSS filter value for the mockup, or `None` when the base color is selected.
#[must_use]
pub fn mockup_filter(color: &str) -> Option<String> {
    if color.eq_ignore_ascii_case(BASE_COLOR) {
        return None;
    }
    Some(format!("hue-rotate({}deg)", hue_rotation(color)))
}
