//! Deterministic, well-spread colors for community rendering.

use serde::{Deserialize, Serialize};

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618033988749895;
const START_HUE: f64 = 0.1;

/// Hues in `[0, 1)`, spaced by the golden ratio so neighbors differ strongly.
fn hues(count: usize) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(START_HUE), |hue| Some((hue + GOLDEN_RATIO_CONJUGATE) % 1.0))
        .take(count)
}

/// `hsl(h, s%, l%)` strings, one per community.
pub fn generate_community_colors(count: usize) -> Vec<String> {
    hues(count)
        .enumerate()
        .map(|(index, hue)| {
            let hue = (hue * 360.0).round() as u32 % 360;
            let saturation = 65 + (index % 3) * 10;
            let lightness = 50 + (index % 2) * 10;
            format!("hsl({hue}, {saturation}%, {lightness}%)")
        })
        .collect()
}

/// The three paints used to draw one community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityColor {
    pub background: String,
    pub foreground: String,
    pub border: String,
}

const RGBA_SATURATION: f64 = 0.45;
const RGBA_LIGHTNESS: f64 = 0.55;

/// `rgba(...)` triples, one per community, sharing the hue sequence of
/// [`generate_community_colors`].
pub fn generate_community_colors_rgba(count: usize) -> Vec<CommunityColor> {
    hues(count)
        .map(|hue| {
            let (r, g, b) = hsl_to_rgb(hue, RGBA_SATURATION, RGBA_LIGHTNESS);
            let paint = |alpha: f64| format!("rgba({r}, {g}, {b}, {alpha})");
            CommunityColor {
                background: paint(0.15),
                foreground: paint(0.9),
                border: paint(0.5),
            }
        })
        .collect()
}

/// HSL (all components in `[0, 1]`) to 8-bit RGB.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    if saturation == 0.0 {
        let v = to_channel(lightness);
        return (v, v, v);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    (
        to_channel(hue_to_rgb(p, q, hue + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, hue)),
        to_channel(hue_to_rgb(p, q, hue - 1.0 / 3.0)),
    )
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use indexmap::IndexSet;
    use regex::Regex;

    use super::*;

    #[test]
    fn test_hsl_format_and_distinctness() {
        let pattern = Regex::new(r"^hsl\(\d+, \d+%, \d+%\)$").unwrap();
        for count in 0..=10 {
            let colors = generate_community_colors(count);
            assert_eq!(colors.len(), count);
            assert!(colors.iter().all(|c| pattern.is_match(c)), "{colors:?}");
            let unique: IndexSet<&String> = colors.iter().collect();
            assert_eq!(unique.len(), count);
        }
    }

    #[test]
    fn test_first_hue_is_fixed() {
        assert_eq!(generate_community_colors(1), vec!["hsl(36, 65%, 50%)"]);
    }

    #[test]
    fn test_rgba_alphas() {
        let colors = generate_community_colors_rgba(3);
        assert_eq!(colors.len(), 3);
        for color in colors {
            assert!(color.background.ends_with(", 0.15)"));
            assert!(color.foreground.ends_with(", 0.9)"));
            assert!(color.border.ends_with(", 0.5)"));
        }
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
    }
}
