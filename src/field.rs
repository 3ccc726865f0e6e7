//! Coulomb field sampling and arrow glyph construction.
//!
//! The field of a point charge at the origin is sampled on a regular cubic
//! lattice. Each sample becomes one [`Glyph`]: an arrow whose length is the
//! (scaled) field magnitude and whose opacity fades with it.
//!
//! ```ignore
//! let constants = FieldConstants::new(1.0, 150.0);
//! let grid = GridConfig::new(2.5, 2);
//! let glyphs = build_field(&constants, &grid, 1.2, 1.0)?;
//! ```
//!
//! # Mapping
//!
//! For a lattice point `p` at distance `r = |p|`:
//!
//! | Quantity | Value |
//! |----------|-------|
//! | magnitude | `k q / r² * visual_scale`, with `k = 1 / (4 π ε)` |
//! | direction | `p / r`, reversed for a negative charge |
//! | length | `|magnitude|` |
//! | head length | `0.2 * length` |
//! | head width | `0.5 * head length` |
//! | opacity | `min(1, length / opacity_normalizer)` |
//!
//! Points with `r < exclusion_radius` (and the origin itself) are skipped,
//! as are points so close that the magnitude overflows `f64`.

use glam::DVec3;

use crate::config::{FieldConstants, GlyphStyle, GridConfig};
use crate::error::ConfigError;
use crate::lattice::lattice_indices;

/// Head length as a fraction of the arrow length.
pub const HEAD_LENGTH_RATIO: f64 = 0.2;

/// Head width as a fraction of the head length.
pub const HEAD_WIDTH_RATIO: f64 = 0.5;

/// One arrow of the field visualization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Lattice position the arrow starts from.
    pub origin: DVec3,
    /// Unit vector along the field.
    pub direction: DVec3,
    /// Total arrow length, shaft plus head.
    pub length: f64,
    pub head_length: f64,
    pub head_width: f64,
    /// Linear RGB.
    pub color: [f32; 3],
    /// Always within `[0, 1]`.
    pub opacity: f64,
}

impl Glyph {
    /// Distance of the arrow's origin from the charge.
    pub fn distance(&self) -> f64 {
        self.origin.length()
    }

    /// Length of the shaft, excluding the head.
    pub fn shaft_length(&self) -> f64 {
        (self.length - self.head_length).max(0.0)
    }
}

/// Coulomb constant `k = 1 / (4 π ε)`.
#[inline]
pub fn coulomb_constant(permittivity: f64) -> f64 {
    1.0 / (4.0 * std::f64::consts::PI * permittivity)
}

/// Signed, scaled field magnitude at `distance` from the charge.
///
/// Positive for a positive charge. Callers must keep `distance > 0`.
#[inline]
pub fn field_magnitude(constants: &FieldConstants, distance: f64, visual_scale: f64) -> f64 {
    coulomb_constant(constants.permittivity) * constants.charge * visual_scale / distance / distance
}

/// Build the arrow glyphs for a point charge at the origin.
///
/// Uses the default opacity normalizer (1.5) and colour (red). See
/// [`build_field_styled`] to override those.
pub fn build_field(
    constants: &FieldConstants,
    grid: &GridConfig,
    exclusion_radius: f64,
    visual_scale: f64,
) -> Result<Vec<Glyph>, ConfigError> {
    let style = GlyphStyle {
        exclusion_radius,
        visual_scale,
        ..GlyphStyle::default()
    };
    build_field_styled(constants, grid, &style)
}

/// Build the arrow glyphs with explicit calibration.
///
/// The configuration is validated first; on error nothing is sampled.
/// Glyphs come out in lexicographic `(i, j, k)` lattice order, so repeated
/// calls with the same inputs return identical sequences.
pub fn build_field_styled(
    constants: &FieldConstants,
    grid: &GridConfig,
    style: &GlyphStyle,
) -> Result<Vec<Glyph>, ConfigError> {
    constants.validate()?;
    grid.validate()?;
    style.validate()?;

    let sign = if constants.charge < 0.0 { -1.0 } else { 1.0 };

    let glyphs = lattice_indices(grid.half_extent)
        .filter_map(|[i, j, kk]| {
            // Direction and distance come from the integer index so that
            // extreme spacings cannot overflow the squared length
            let index = DVec3::new(i as f64, j as f64, kk as f64);
            let index_length = index.length();
            if index_length == 0.0 {
                return None;
            }
            let distance = index_length * grid.spacing;
            if distance < style.exclusion_radius {
                return None;
            }

            let magnitude = field_magnitude(constants, distance, style.visual_scale);
            let length = magnitude.abs();
            if !length.is_finite() {
                return None;
            }
            let head_length = length * HEAD_LENGTH_RATIO;

            Some(Glyph {
                origin: index * grid.spacing,
                direction: index / index_length * sign,
                length,
                head_length,
                head_width: head_length * HEAD_WIDTH_RATIO,
                color: style.color,
                opacity: (length / style.opacity_normalizer).clamp(0.0, 1.0),
            })
        })
        .collect();

    Ok(glyphs)
}

/// Summary of a built field, for logging and the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldStats {
    pub glyph_count: usize,
    /// Lattice points skipped by the exclusion rule.
    pub excluded_count: u64,
    pub min_length: f64,
    pub max_length: f64,
}

impl FieldStats {
    pub fn new(glyphs: &[Glyph], grid: &GridConfig) -> Self {
        let (min_length, max_length) = if glyphs.is_empty() {
            (0.0, 0.0)
        } else {
            glyphs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), g| {
                (lo.min(g.length), hi.max(g.length))
            })
        };
        Self {
            glyph_count: glyphs.len(),
            excluded_count: grid.point_count() - glyphs.len() as u64,
            min_length,
            max_length,
        }
    }
}
