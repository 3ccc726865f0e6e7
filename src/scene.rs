//! Scene ownership: the glyph group, the charge marker and the visibility
//! toggle.
//!
//! [`FieldScene`] is built once from a [`FieldConfig`] and owns everything
//! the renderer draws. The only state that changes afterwards is the field
//! visibility flag, flipped by [`FieldScene::on_toggle_field`].

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::field::{build_field_styled, FieldStats, Glyph};

/// Label text shown while the field is visible.
pub const HIDE_FIELD_LABEL: &str = "Hide Electric Field";

/// Label text shown while the field is hidden.
pub const SHOW_FIELD_LABEL: &str = "Show Electric Field";

/// Button colour while the field is visible (`#ff3333`).
pub const VISIBLE_BUTTON_COLOR: [u8; 3] = [0xff, 0x33, 0x33];

/// Button colour while the field is hidden (`#555555`).
pub const HIDDEN_BUTTON_COLOR: [u8; 3] = [0x55, 0x55, 0x55];

/// All field arrows, shown or hidden as one unit.
#[derive(Clone, Debug, Default)]
pub struct GlyphGroup {
    glyphs: Vec<Glyph>,
    /// Read by the renderer every frame.
    pub visible: bool,
}

impl GlyphGroup {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self {
            glyphs,
            visible: true,
        }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Solid sphere drawn at the charge location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChargeMarker {
    /// Radius in render units.
    pub radius: f32,
    pub color: [f32; 3],
}

/// Display state of the toggle control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleLabel {
    pub text: &'static str,
    /// sRGB button fill.
    pub color: [u8; 3],
}

impl ToggleLabel {
    /// Label matching the given visibility.
    pub fn for_visibility(visible: bool) -> Self {
        if visible {
            Self {
                text: HIDE_FIELD_LABEL,
                color: VISIBLE_BUTTON_COLOR,
            }
        } else {
            Self {
                text: SHOW_FIELD_LABEL,
                color: HIDDEN_BUTTON_COLOR,
            }
        }
    }
}

/// Owner of everything the viewer draws.
#[derive(Clone, Debug)]
pub struct FieldScene {
    config: FieldConfig,
    field: GlyphGroup,
    marker: ChargeMarker,
    field_visible: bool,
    label: ToggleLabel,
    stats: FieldStats,
}

impl FieldScene {
    /// Validate `config` and build the field glyphs.
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let glyphs = build_field_styled(&config.constants, &config.grid, &config.style)?;
        let stats = FieldStats::new(&glyphs, &config.grid);

        log::info!(
            "Built '{}' field: {} arrows ({} lattice points excluded), length {:.4}..{:.4}",
            config.name,
            stats.glyph_count,
            stats.excluded_count,
            stats.min_length,
            stats.max_length,
        );

        let marker = ChargeMarker {
            radius: config.marker_radius() as f32,
            color: [1.0, 0.0, 0.0],
        };

        Ok(Self {
            config,
            field: GlyphGroup::new(glyphs),
            marker,
            field_visible: true,
            label: ToggleLabel::for_visibility(true),
            stats,
        })
    }

    /// Flip field visibility and refresh the toggle label.
    ///
    /// Only the group flag changes; no glyph is rebuilt.
    pub fn on_toggle_field(&mut self) {
        self.field_visible = !self.field_visible;
        self.field.visible = self.field_visible;
        self.label = ToggleLabel::for_visibility(self.field_visible);
        log::debug!("Field visibility -> {}", self.field_visible);
    }

    pub fn field_visible(&self) -> bool {
        self.field_visible
    }

    pub fn field(&self) -> &GlyphGroup {
        &self.field
    }

    pub fn marker(&self) -> &ChargeMarker {
        &self.marker
    }

    pub fn label(&self) -> ToggleLabel {
        self.label
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn stats(&self) -> &FieldStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_visible() {
        let scene = FieldScene::new(FieldConfig::simulation()).unwrap();
        assert!(scene.field_visible());
        assert!(scene.field().visible);
        assert_eq!(scene.label().text, HIDE_FIELD_LABEL);
        assert_eq!(scene.label().color, VISIBLE_BUTTON_COLOR);
    }

    #[test]
    fn test_toggle_hides_then_shows() {
        let mut scene = FieldScene::new(FieldConfig::simulation()).unwrap();

        scene.on_toggle_field();
        assert!(!scene.field_visible());
        assert!(!scene.field().visible);
        assert_eq!(scene.label().text, SHOW_FIELD_LABEL);
        assert_eq!(scene.label().color, HIDDEN_BUTTON_COLOR);

        scene.on_toggle_field();
        assert!(scene.field_visible());
        assert!(scene.field().visible);
        assert_eq!(scene.label(), ToggleLabel::for_visibility(true));
    }

    #[test]
    fn test_toggle_keeps_glyphs() {
        let mut scene = FieldScene::new(FieldConfig::simulation()).unwrap();
        let before = scene.field().glyphs().to_vec();

        scene.on_toggle_field();
        assert_eq!(scene.field().glyphs(), before.as_slice());
        assert_eq!(scene.field().len(), 124);
    }

    #[test]
    fn test_invalid_config_builds_no_scene() {
        let config = FieldConfig::simulation().with_permittivity(-1.0);
        assert!(matches!(
            FieldScene::new(config),
            Err(ConfigError::NonPositivePermittivity(_))
        ));
    }

    #[test]
    fn test_marker_uses_scaled_radius() {
        let scene = FieldScene::new(FieldConfig::proton()).unwrap();
        assert!((scene.marker().radius - 0.84).abs() < 1e-5);
    }
}
