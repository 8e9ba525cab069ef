//! Seamless dot-grid background.
//!
//! Dot size and spacing are given in virtual pixels and mapped onto the
//! terminal grid with the cell size in use, so the same preset keeps its
//! density regardless of `row_px`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::gradient::Rgb;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown dot preset `{0}` (expected subtle, medium, bold, animated or none)")]
pub struct UnknownPreset(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotPreset {
    Subtle,
    #[default]
    Medium,
    Bold,
    Animated,
}

impl DotPreset {
    pub const ALL: &[DotPreset] = &[
        DotPreset::Subtle,
        DotPreset::Medium,
        DotPreset::Bold,
        DotPreset::Animated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DotPreset::Subtle => "subtle",
            DotPreset::Medium => "medium",
            DotPreset::Bold => "bold",
            DotPreset::Animated => "animated",
        }
    }

    pub fn grid(self) -> DotGrid {
        match self {
            DotPreset::Subtle => DotGrid::new(1.0, 24.0, Rgb(0xf3, 0xf4, 0xf6)),
            DotPreset::Medium => DotGrid::new(2.0, 20.0, Rgb(0xe5, 0xe7, 0xeb)),
            DotPreset::Bold => DotGrid::new(3.0, 16.0, Rgb(0xd1, 0xd5, 0xdb)),
            DotPreset::Animated => DotGrid {
                drift: true,
                ..DotGrid::new(2.0, 18.0, Rgb(0xe5, 0xe7, 0xeb))
            },
        }
    }
}

impl FromStr for DotPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DotPreset::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for DotPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dot pattern parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotGrid {
    pub dot_size: f64,
    pub spacing: f64,
    pub dot_color: Rgb,
    /// `None` = transparent (page background shows through).
    pub background: Option<Rgb>,
    /// Slide the pattern sideways over time.
    pub drift: bool,
}

impl DotGrid {
    pub fn new(dot_size: f64, spacing: f64, dot_color: Rgb) -> Self {
        Self {
            dot_size,
            spacing,
            dot_color,
            background: None,
            drift: false,
        }
    }

    /// Glyph used for one dot, by size.
    pub fn glyph(&self) -> char {
        match self.dot_size {
            s if s < 1.5 => '·',
            s if s < 2.5 => '•',
            _ => '●',
        }
    }

    /// Spacing in whole cells, never below 1.
    pub fn cell_spacing(&self, cell_px: f64) -> u32 {
        if cell_px <= 0.0 || !self.spacing.is_finite() {
            return 1;
        }
        ((self.spacing / cell_px).round() as u32).max(1)
    }

    /// Does the cell at page coordinates (`col`, `row`) carry a dot?
    ///
    /// `phase` shifts the pattern horizontally and is only honoured for
    /// drifting grids.
    pub fn is_dot(&self, col: u32, row: u32, col_px: f64, row_px: f64, phase: u32) -> bool {
        let sx = self.cell_spacing(col_px);
        let sy = self.cell_spacing(row_px);
        let shift = if self.drift { phase % sx } else { 0 };
        (col + shift) % sx == 0 && row % sy == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_parse_case_insensitively() {
        assert_eq!("Bold".parse::<DotPreset>(), Ok(DotPreset::Bold));
        assert_eq!(" subtle ".parse::<DotPreset>(), Ok(DotPreset::Subtle));
        assert!("loud".parse::<DotPreset>().is_err());
    }

    #[test]
    fn preset_parameters() {
        let g = DotPreset::Medium.grid();
        assert_eq!((g.dot_size, g.spacing), (2.0, 20.0));
        assert_eq!(g.dot_color, Rgb(0xe5, 0xe7, 0xeb));
        assert!(!g.drift);
        assert!(DotPreset::Animated.grid().drift);
        assert_eq!(DotPreset::Subtle.grid().glyph(), '·');
        assert_eq!(DotPreset::Bold.grid().glyph(), '●');
    }

    #[test]
    fn dots_repeat_every_spacing_cells() {
        // 20px spacing over 10px columns / 20px rows → every 2 cols, every row.
        let g = DotPreset::Medium.grid();
        let dots: Vec<u32> = (0..8).filter(|&c| g.is_dot(c, 0, 10.0, 20.0, 0)).collect();
        assert_eq!(dots, vec![0, 2, 4, 6]);
        assert!(g.is_dot(0, 1, 10.0, 20.0, 0));
    }

    #[test]
    fn drift_only_moves_animated_grid() {
        let still = DotPreset::Medium.grid();
        assert_eq!(
            still.is_dot(0, 0, 10.0, 20.0, 1),
            still.is_dot(0, 0, 10.0, 20.0, 0)
        );
        let moving = DotPreset::Animated.grid();
        assert!(moving.is_dot(0, 0, 9.0, 18.0, 0));
        assert!(!moving.is_dot(0, 0, 9.0, 18.0, 1));
        assert!(moving.is_dot(1, 0, 9.0, 18.0, 1));
    }

    #[test]
    fn degenerate_cells_never_divide_by_zero() {
        let g = DotGrid::new(2.0, 1.0, Rgb::WHITE);
        assert_eq!(g.cell_spacing(0.0), 1);
        assert_eq!(g.cell_spacing(16.0), 1);
    }
}
