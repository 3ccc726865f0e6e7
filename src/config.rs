//! Physical constants, lattice layout and glyph calibration.
//!
//! Everything the field builder needs lives in one [`FieldConfig`]. The two
//! ways of presenting the field (real SI constants with a huge rescale, or
//! pre-tuned "simulation" constants) are just two constructors of the same
//! struct:
//!
//! ```ignore
//! let si = FieldConfig::proton();
//! let demo = FieldConfig::simulation().with_half_extent(3);
//! ```

use crate::error::ConfigError;

/// Vacuum permittivity ε0 in F/m.
pub const VACUUM_PERMITTIVITY: f64 = 8.854e-12;

/// Elementary charge e in coulombs.
pub const ELEMENTARY_CHARGE: f64 = 1.602e-19;

/// Proton charge radius in metres.
pub const PROTON_RADIUS: f64 = 0.84e-15;

/// Default opacity normalizer: magnitudes at or above this are fully opaque.
pub const DEFAULT_OPACITY_NORMALIZER: f64 = 1.5;

/// Default glyph colour (pure red).
pub const DEFAULT_GLYPH_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Physical constants of the point charge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConstants {
    /// Permittivity of the medium. Must be positive.
    pub permittivity: f64,
    /// Charge at the origin. The sign decides whether arrows point out or in.
    pub charge: f64,
    /// Multiplier converting physical lengths into render units.
    ///
    /// Lattice positions are already in render units; this only sizes
    /// physical objects such as the charge marker.
    pub length_scale: f64,
}

impl FieldConstants {
    /// Create constants with a unit length scale.
    pub fn new(permittivity: f64, charge: f64) -> Self {
        Self {
            permittivity,
            charge,
            length_scale: 1.0,
        }
    }

    /// Set the physical-to-render length multiplier.
    pub fn with_length_scale(mut self, length_scale: f64) -> Self {
        self.length_scale = length_scale;
        self
    }

    /// Check the constants before any sampling happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.permittivity.is_finite() {
            return Err(ConfigError::NonFinite("permittivity"));
        }
        if self.permittivity <= 0.0 {
            return Err(ConfigError::NonPositivePermittivity(self.permittivity));
        }
        if !self.charge.is_finite() {
            return Err(ConfigError::NonFinite("charge"));
        }
        if !self.length_scale.is_finite() {
            return Err(ConfigError::NonFinite("length_scale"));
        }
        if self.length_scale <= 0.0 {
            return Err(ConfigError::NonPositiveLengthScale(self.length_scale));
        }
        Ok(())
    }
}

/// Regular cubic lattice centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Distance between adjacent samples, in render units.
    pub spacing: f64,
    /// Samples on each side of the centre, per axis.
    pub half_extent: u32,
}

impl GridConfig {
    /// Create a lattice description.
    pub fn new(spacing: f64, half_extent: u32) -> Self {
        Self {
            spacing,
            half_extent,
        }
    }

    /// Build a lattice from a signed half-extent, rejecting negatives.
    pub fn try_from_signed(spacing: f64, half_extent: i32) -> Result<Self, ConfigError> {
        let half_extent = u32::try_from(half_extent)
            .map_err(|_| ConfigError::NegativeHalfExtent(half_extent))?;
        let grid = Self::new(spacing, half_extent);
        grid.validate()?;
        Ok(grid)
    }

    /// Samples per axis: `2 * half_extent + 1`.
    pub fn points_per_axis(&self) -> u64 {
        2 * self.half_extent as u64 + 1
    }

    /// Number of candidate lattice points, `(2h + 1)^3`.
    pub fn point_count(&self) -> u64 {
        self.points_per_axis().pow(3)
    }

    /// Check the lattice before any sampling happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spacing.is_finite() {
            return Err(ConfigError::NonFinite("spacing"));
        }
        if self.spacing <= 0.0 {
            return Err(ConfigError::NonPositiveSpacing(self.spacing));
        }
        // Corner coordinates must stay representable
        let corner = self.spacing * self.half_extent as f64 * 3f64.sqrt();
        if !corner.is_finite() {
            return Err(ConfigError::NonFinite("lattice extent"));
        }
        Ok(())
    }
}

/// Calibration knobs mapping field magnitude to arrow geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    /// Samples closer to the charge than this are skipped.
    pub exclusion_radius: f64,
    /// Unit-free factor bringing magnitudes into a visible range.
    ///
    /// Real SI constants produce magnitudes many orders of magnitude away
    /// from anything drawable; the proton preset uses 5e9.
    pub visual_scale: f64,
    /// Magnitude at which an arrow becomes fully opaque.
    pub opacity_normalizer: f64,
    /// Arrow colour, linear RGB.
    pub color: [f32; 3],
}

impl GlyphStyle {
    /// Check the calibration before any sampling happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exclusion_radius.is_finite() {
            return Err(ConfigError::NonFinite("exclusion_radius"));
        }
        if self.exclusion_radius < 0.0 {
            return Err(ConfigError::NegativeExclusionRadius(self.exclusion_radius));
        }
        if !self.visual_scale.is_finite() {
            return Err(ConfigError::NonFinite("visual_scale"));
        }
        if self.visual_scale < 0.0 {
            return Err(ConfigError::NegativeVisualScale(self.visual_scale));
        }
        if !self.opacity_normalizer.is_finite() {
            return Err(ConfigError::NonFinite("opacity_normalizer"));
        }
        if self.opacity_normalizer <= 0.0 {
            return Err(ConfigError::NonPositiveOpacityNormalizer(
                self.opacity_normalizer,
            ));
        }
        Ok(())
    }
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            exclusion_radius: 1.2,
            visual_scale: 1.0,
            opacity_normalizer: DEFAULT_OPACITY_NORMALIZER,
            color: DEFAULT_GLYPH_COLOR,
        }
    }
}

/// Complete description of one field visualization.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Human-readable preset name, shown in logs and the window title.
    pub name: String,
    pub constants: FieldConstants,
    pub grid: GridConfig,
    pub style: GlyphStyle,
    /// Physical radius of the charge marker, scaled by `length_scale`.
    pub charge_radius: f64,
}

impl FieldConfig {
    /// Pre-tuned constants that land directly in a drawable range.
    ///
    /// - `permittivity`: 1.0
    /// - `charge`: 150.0
    /// - `visual_scale`: 1.0
    /// - lattice: spacing 2.5, half-extent 2
    pub fn simulation() -> Self {
        Self {
            name: "simulation".into(),
            constants: FieldConstants::new(1.0, 150.0),
            grid: GridConfig::new(2.5, 2),
            style: GlyphStyle::default(),
            charge_radius: 0.84,
        }
    }

    /// A single proton with real SI constants.
    ///
    /// Magnitudes are multiplied by 5e9 and lengths by 1e15 so the
    /// femtometre-scale charge and its field fit the same lattice as
    /// [`FieldConfig::simulation`].
    pub fn proton() -> Self {
        Self {
            name: "proton".into(),
            constants: FieldConstants::new(VACUUM_PERMITTIVITY, ELEMENTARY_CHARGE)
                .with_length_scale(1e15),
            grid: GridConfig::new(2.5, 2),
            style: GlyphStyle {
                visual_scale: 5e9,
                ..GlyphStyle::default()
            },
            charge_radius: PROTON_RADIUS,
        }
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.constants.charge = charge;
        self
    }

    pub fn with_permittivity(mut self, permittivity: f64) -> Self {
        self.constants.permittivity = permittivity;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.grid.spacing = spacing;
        self
    }

    pub fn with_half_extent(mut self, half_extent: u32) -> Self {
        self.grid.half_extent = half_extent;
        self
    }

    pub fn with_exclusion_radius(mut self, radius: f64) -> Self {
        self.style.exclusion_radius = radius;
        self
    }

    pub fn with_visual_scale(mut self, scale: f64) -> Self {
        self.style.visual_scale = scale;
        self
    }

    pub fn with_opacity_normalizer(mut self, normalizer: f64) -> Self {
        self.style.opacity_normalizer = normalizer;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.style.color = color;
        self
    }

    /// Radius of the charge marker in render units.
    pub fn marker_radius(&self) -> f64 {
        self.charge_radius * self.constants.length_scale
    }

    /// Validate every part of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()?;
        self.grid.validate()?;
        self.style.validate()?;
        if !self.charge_radius.is_finite() {
            return Err(ConfigError::NonFinite("charge_radius"));
        }
        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::simulation()
    }
}
