//! Color parsing, interpolation, and easing for theme palettes
//!
//! Palette colors are written as CSS color strings. Supported formats:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `white`, `black`, `deepskyblue`, etc.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Fallback used when a configured color cannot be parsed.
///
/// A malformed theme color degrades to opaque black instead of aborting the
/// render loop.
pub const FALLBACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Parse a CSS color string into an RGBA color.
///
/// Hex strings take a fast path; everything else goes through lightningcss.
///
/// # Examples
///
/// ```
/// use starfield::color::parse_color;
///
/// let accent = parse_color("#00aeff").unwrap();
/// assert_eq!(accent, image::Rgba([0, 174, 255, 255]));
///
/// let bg = parse_color("rgba(255, 255, 255, 1)").unwrap();
/// assert_eq!(bg, image::Rgba([255, 255, 255, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    parse_css_color(s)
}

/// Parse a color string, substituting [`FALLBACK`] on failure.
///
/// This is the entry point the engine uses when resolving palettes: an
/// unparseable color is a recoverable default, never a fatal error.
pub fn parse_color_or_default(s: &str) -> Rgba<u8> {
    parse_color(s).unwrap_or(FALLBACK)
}

/// Parse the hex digits after `#` (RGB, RGBA, RRGGBB, RRGGBBAA)
fn parse_hex(hex: &str) -> Result<Rgba<u8>, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    match hex.len() {
        // Short forms double each digit: #F0A -> #FF00AA
        3 | 4 => {
            let mut channels = [255u8; 4];
            for (i, c) in hex.chars().enumerate() {
                channels[i] = c.to_digit(16).unwrap_or(0) as u8 * 17;
            }
            Ok(Rgba(channels))
        }
        6 | 8 => {
            let mut channels = [255u8; 4];
            for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
                let pair = std::str::from_utf8(pair).map_err(|_| ColorError::InvalidLength(hex.len()))?;
                channels[i] = u8::from_str_radix(pair, 16).map_err(|_| ColorError::InvalidLength(hex.len()))?;
            }
            Ok(Rgba(channels))
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

/// Convert a lightningcss CssColor to RGBA
fn css_color_to_rgba(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                let a = (rgb.alpha * 255.0).round() as u8;
                Ok(Rgba([r, g, b, a]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// Linearly interpolate between two colors.
///
/// Each channel is blended independently and rounded to the nearest integer,
/// so `blend(a, b, 0.0) == a` and `blend(a, b, 1.0) == b` exactly. Progress is
/// clamped to `[0, 1]`. Easing is the caller's responsibility; this function
/// is strictly linear.
///
/// # Examples
///
/// ```
/// use image::Rgba;
/// use starfield::color::blend;
///
/// let mid = blend(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255]), 0.5);
/// assert_eq!(mid, Rgba([128, 128, 128, 255]));
/// ```
pub fn blend(from: Rgba<u8>, to: Rgba<u8>, progress: f64) -> Rgba<u8> {
    let t = progress.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgba([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        mix(from[3], to[3]),
    ])
}

/// Cubic ease-in-out curve used to shape crossfade progress.
///
/// `ease(t) = 4t^3` below the midpoint, `1 - (-2t + 2)^3 / 2` above it.
/// Fixes `0 -> 0`, `0.5 -> 0.5`, `1 -> 1` and is monotonically non-decreasing
/// on `[0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6_digit() {
        assert_eq!(parse_color("#00aeff").unwrap(), Rgba([0, 174, 255, 255]));
        assert_eq!(parse_color("#000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_color("#FFFFFF").unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_parse_hex_8_digit() {
        assert_eq!(parse_color("#ffffffff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("#000000ff").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_color("#11223344").unwrap(), Rgba([0x11, 0x22, 0x33, 0x44]));
    }

    #[test]
    fn test_parse_hex_short_forms() {
        assert_eq!(parse_color("#F00").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("#0af").unwrap(), Rgba([0, 170, 255, 255]));
        assert_eq!(parse_color("#F00F").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("#0000").unwrap(), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_parse_functional_and_named() {
        assert_eq!(
            parse_color("rgba(0, 174, 255, 1)").unwrap(),
            Rgba([0, 174, 255, 255])
        );
        assert_eq!(parse_color("rgb(255, 0, 0)").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("white").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("black").unwrap(), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#GGHHII"), Err(ColorError::InvalidHex('G')));
        assert!(matches!(parse_color("not-a-color"), Err(ColorError::CssParse(_))));
    }

    #[test]
    fn test_parse_or_default_falls_back_to_black() {
        assert_eq!(parse_color_or_default("#zzz"), FALLBACK);
        assert_eq!(parse_color_or_default(""), FALLBACK);
        assert_eq!(parse_color_or_default("#00aeff"), Rgba([0, 174, 255, 255]));
    }

    #[test]
    fn test_blend_endpoints_exact() {
        let a = Rgba([12, 34, 56, 255]);
        let b = Rgba([200, 100, 0, 128]);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
    }

    #[test]
    fn test_blend_identity() {
        let a = Rgba([77, 88, 99, 255]);
        for i in 0..=10 {
            let p = i as f64 / 10.0;
            assert_eq!(blend(a, a, p), a, "blend(A, A, {}) should be A", p);
        }
    }

    #[test]
    fn test_blend_clamps_progress() {
        let a = Rgba([0, 0, 0, 255]);
        let b = Rgba([255, 255, 255, 255]);
        assert_eq!(blend(a, b, -0.5), a);
        assert_eq!(blend(a, b, 1.5), b);
    }

    #[test]
    fn test_blend_rounds_to_nearest() {
        let a = Rgba([0, 0, 0, 255]);
        let b = Rgba([255, 255, 255, 255]);
        // 255 * 0.5 = 127.5, rounds up to 128
        assert_eq!(blend(a, b, 0.5), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_ease_fixpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_ease_monotonic() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let t = i as f64 / 1000.0;
            let e = ease_in_out_cubic(t);
            assert!(e >= prev, "ease must be non-decreasing at t={}", t);
            prev = e;
        }
    }

    #[test]
    fn test_ease_shapes_ends() {
        // Slower than linear near the start, faster in the middle
        assert!(ease_in_out_cubic(0.1) < 0.1);
        assert!(ease_in_out_cubic(0.9) > 0.9);
    }
}
