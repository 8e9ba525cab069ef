//! Oval gradient shown behind a hovered block.
//!
//! Colours run outward from the first stop at the ellipse center and fade
//! to transparent at 70% of its radius; the result is blended toward the
//! page background by `opacity`.  Past the fade nothing is drawn.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("`{0}` is not a #rrggbb or #rgb colour")]
    Invalid(String),
}

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::Invalid(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize, len: usize| -> Result<u8, ColorError> {
            let v = u8::from_str_radix(&hex[i..i + len], 16).map_err(|_| invalid())?;
            Ok(if len == 1 { v * 17 } else { v })
        };
        match hex.len() {
            6 => Ok(Rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => Ok(Rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            _ => Err(invalid()),
        }
    }

    /// Linear blend: `t = 0` → `self`, `t = 1` → `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Side of the oval when no size is given, in virtual pixels.
pub const DEFAULT_SIZE: f64 = 400.0;
/// Fraction of the radius where the last colour has faded out.
pub const FADE_END: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct OvalGradient {
    stops: Vec<Rgb>,
    opacity: f64,
    width: f64,
    height: f64,
}

impl OvalGradient {
    pub fn new(stops: Vec<Rgb>, opacity: f64) -> Self {
        Self {
            stops,
            opacity: opacity.clamp(0.0, 1.0),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }

    /// Build from hex strings, failing on the first bad colour.
    pub fn from_hex(stops: &[&str], opacity: f64) -> Result<Self, ColorError> {
        let stops = stops
            .iter()
            .map(|s| Rgb::from_hex(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(stops, opacity))
    }

    /// Box the oval is drawn in, in virtual pixels.  Its width/height ratio
    /// is the shape of the ellipse.  Sizes below one pixel are ignored.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        if width >= 1.0 && height >= 1.0 {
            self.width = width;
            self.height = height;
        }
        self
    }

    /// Colour at (`dx`, `dy`) virtual pixels from the oval's center, blended
    /// over `background`.  `None` where the gradient is fully transparent.
    ///
    /// The ellipse reaches the corners of the box.  Stops are spread evenly
    /// from the center out to [`FADE_END`] of its radius, with the last
    /// stop fading to transparent on the way.
    pub fn sample(&self, dx: f64, dy: f64, background: Rgb) -> Option<Rgb> {
        if self.stops.is_empty() || !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        let rx = self.width / 2.0 * std::f64::consts::SQRT_2;
        let ry = self.height / 2.0 * std::f64::consts::SQRT_2;
        let r = ((dx / rx).powi(2) + (dy / ry).powi(2)).sqrt();
        if r >= FADE_END {
            return None;
        }

        // Colours sit at i/n of the way out; transparent sits at n/n.
        let n = self.stops.len();
        let pos = r / FADE_END * n as f64;
        let i = (pos.floor() as usize).min(n - 1);
        let t = pos - i as f64;
        let (color, alpha) = if i + 1 < n {
            (self.stops[i].lerp(self.stops[i + 1], t), 1.0)
        } else {
            (self.stops[n - 1], 1.0 - t)
        };
        Some(background.lerp(color, self.opacity * alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#ff7f50"), Ok(Rgb(0xff, 0x7f, 0x50)));
        assert_eq!(Rgb::from_hex("2D1810"), Ok(Rgb(0x2d, 0x18, 0x10)));
        assert_eq!(Rgb::from_hex("#fff"), Ok(Rgb::WHITE));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#12", "#gggggg", "#12345", "#ffé"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn stops_spread_over_the_inner_seventy_percent() {
        let g = OvalGradient::from_hex(&["#ff0000", "#00ff00", "#0000ff"], 1.0).unwrap();
        let rx = DEFAULT_SIZE / 2.0 * std::f64::consts::SQRT_2;
        assert_eq!(g.sample(0.0, 0.0, Rgb::WHITE), Some(Rgb(255, 0, 0)));
        // Second stop at a third of the coloured radius.
        assert_eq!(g.sample(rx * FADE_END / 3.0, 0.0, Rgb::WHITE), Some(Rgb(0, 255, 0)));
        // Third stop at two thirds, straight down this time.
        assert_eq!(g.sample(0.0, rx * FADE_END * 2.0 / 3.0 + 0.01, Rgb::WHITE), Some(Rgb(0, 0, 255)));
    }

    #[test]
    fn last_stop_fades_out_before_the_rim() {
        let g = OvalGradient::from_hex(&["#ff0000", "#0000ff"], 1.0).unwrap();
        let rx = DEFAULT_SIZE / 2.0 * std::f64::consts::SQRT_2;
        // Halfway through the fade band: half blue, half background.
        let Some(Rgb(r, g_, b)) = g.sample(rx * FADE_END * 0.75, 0.0, Rgb::WHITE) else {
            panic!("inside the fade band");
        };
        assert_eq!(b, 255);
        assert!((120..=135).contains(&r) && (120..=135).contains(&g_), "{r} {g_}");
        assert_eq!(g.sample(rx * FADE_END * 1.001, 0.0, Rgb::WHITE), None);
        // The box edge already lies past the fade.
        assert_eq!(g.sample(DEFAULT_SIZE / 2.0, 0.0, Rgb::WHITE), None);
    }

    #[test]
    fn size_sets_the_ellipse_shape() {
        let g = OvalGradient::from_hex(&["#ff7f50"], 1.0)
            .unwrap()
            .with_size(100.0, 400.0);
        assert_eq!(g.sample(60.0, 0.0, Rgb::WHITE), None);
        assert!(g.sample(0.0, 60.0, Rgb::WHITE).is_some());

        let ignored = OvalGradient::from_hex(&["#ff7f50"], 1.0).unwrap().with_size(0.0, 50.0);
        assert_eq!(ignored, OvalGradient::from_hex(&["#ff7f50"], 1.0).unwrap());
    }

    #[test]
    fn corners_of_the_block_stay_clear() {
        let g = OvalGradient::from_hex(&["#ff7f50", "#ff6bd6", "#ffe08a"], 0.9)
            .unwrap()
            .with_size(300.0, 300.0);
        assert_eq!(g.sample(-150.0, -150.0, Rgb::WHITE), None);
        assert_eq!(g.sample(150.0, 150.0, Rgb::WHITE), None);
    }

    #[test]
    fn opacity_fades_toward_background() {
        let g = OvalGradient::from_hex(&["#000000", "#000000"], 0.5).unwrap();
        assert_eq!(g.sample(0.0, 0.0, Rgb::WHITE), Some(Rgb(128, 128, 128)));
        let clear = OvalGradient::from_hex(&["#000000"], 0.0).unwrap();
        assert_eq!(clear.sample(0.0, 0.0, Rgb::WHITE), Some(Rgb::WHITE));
    }
}
