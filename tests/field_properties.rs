//! Integration tests for the field builder and scene.
//!
//! Fixed scenarios first, then property tests over arbitrary lattices and
//! constants.

use efield::{
    build_field, build_field_styled, lattice_indices, ConfigError, DVec3, FieldConfig,
    FieldConstants, FieldScene, GlyphStyle, GridConfig,
};
use proptest::prelude::*;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_simulation_preset_reference_glyph() {
    let glyphs = build_field(&FieldConstants::new(1.0, 150.0), &GridConfig::new(2.5, 2), 1.2, 1.0)
        .unwrap();

    assert_eq!(glyphs.len(), 124);

    let g = glyphs
        .iter()
        .find(|g| g.origin == DVec3::new(2.5, 0.0, 0.0))
        .unwrap();
    assert!((g.length - 1.9099).abs() < 1e-4);
    assert_eq!(g.opacity, 1.0);
    assert!((g.direction - DVec3::X).length() < 1e-12);
}

#[test]
fn test_origin_never_gets_a_glyph() {
    for radius in [0.0, 0.5, 1.2] {
        let glyphs =
            build_field(&FieldConstants::new(1.0, 150.0), &GridConfig::new(2.5, 2), radius, 1.0)
                .unwrap();
        assert!(glyphs.iter().all(|g| g.origin != DVec3::ZERO));
    }
}

#[test]
fn test_corner_glyph_is_faint() {
    let glyphs = build_field(&FieldConstants::new(1.0, 150.0), &GridConfig::new(2.5, 2), 1.2, 1.0)
        .unwrap();
    let corner = glyphs
        .iter()
        .find(|g| g.origin == DVec3::new(-5.0, -5.0, -5.0))
        .unwrap();

    // r^2 = 75
    let expected = 150.0 / (4.0 * std::f64::consts::PI * 75.0);
    assert!((corner.length - expected).abs() < 1e-12);
    assert!(corner.opacity < 0.15);
}

#[test]
fn test_zero_charge_is_flat_along_a_ray() {
    let glyphs = build_field(&FieldConstants::new(1.0, 0.0), &GridConfig::new(1.0, 3), 0.0, 1.0)
        .unwrap();
    let diagonal: Vec<_> = glyphs
        .iter()
        .filter(|g| g.origin.x == g.origin.y && g.origin.y == g.origin.z && g.origin.x > 0.0)
        .collect();
    assert_eq!(diagonal.len(), 3);
    assert!(diagonal.iter().all(|g| g.length == 0.0 && g.opacity == 0.0));
}

#[test]
fn test_large_exclusion_leaves_nothing() {
    let glyphs = build_field(&FieldConstants::new(1.0, 150.0), &GridConfig::new(2.5, 2), 100.0, 1.0)
        .unwrap();
    assert!(glyphs.is_empty());
}

#[test]
fn test_half_extent_zero_is_empty() {
    let glyphs = build_field(&FieldConstants::new(1.0, 150.0), &GridConfig::new(2.5, 0), 0.0, 1.0)
        .unwrap();
    assert!(glyphs.is_empty());
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let grid = GridConfig::new(2.5, 2);
    assert!(matches!(
        build_field(&FieldConstants::new(0.0, 150.0), &grid, 1.2, 1.0),
        Err(ConfigError::NonPositivePermittivity(_))
    ));
    assert!(matches!(
        build_field(&FieldConstants::new(1.0, 150.0), &GridConfig::new(-1.0, 2), 1.2, 1.0),
        Err(ConfigError::NonPositiveSpacing(_))
    ));
    assert!(matches!(
        build_field(&FieldConstants::new(1.0, 150.0), &grid, 1.2, -1.0),
        Err(ConfigError::NegativeVisualScale(_))
    ));
    assert!(matches!(
        GridConfig::try_from_signed(2.5, -1),
        Err(ConfigError::NegativeHalfExtent(-1))
    ));
}

#[test]
fn test_proton_preset_is_drawable() {
    let scene = FieldScene::new(FieldConfig::proton()).unwrap();
    let stats = scene.stats();

    assert_eq!(stats.glyph_count, 124);
    assert!(stats.max_length.is_finite());
    assert!(stats.max_length > 0.0);
    assert!(scene.marker().radius > 0.5 && scene.marker().radius < 1.0);
}

#[test]
fn test_toggle_twice_restores_initial_state() {
    let mut scene = FieldScene::new(FieldConfig::simulation()).unwrap();
    let glyphs_before = scene.field().glyphs().to_vec();

    assert!(scene.field_visible());
    assert_eq!(scene.label().text, "Hide Electric Field");
    assert_eq!(scene.label().color, [0xff, 0x33, 0x33]);

    scene.on_toggle_field();
    assert!(!scene.field_visible());
    assert!(!scene.field().visible);
    assert_eq!(scene.label().text, "Show Electric Field");
    assert_eq!(scene.label().color, [0x55, 0x55, 0x55]);

    scene.on_toggle_field();
    assert!(scene.field_visible());
    assert!(scene.field().visible);
    assert_eq!(scene.label().text, "Hide Electric Field");
    assert_eq!(scene.field().glyphs(), glyphs_before.as_slice());
}

// ============================================================================
// Properties
// ============================================================================

fn constants() -> impl Strategy<Value = FieldConstants> {
    (0.1_f64..10.0, -500.0_f64..500.0).prop_map(|(eps, q)| FieldConstants::new(eps, q))
}

/// Constants with a charge bounded away from zero.
fn charged_constants() -> impl Strategy<Value = FieldConstants> {
    (0.1_f64..10.0, 1.0_f64..500.0, any::<bool>())
        .prop_map(|(eps, q, negative)| FieldConstants::new(eps, if negative { -q } else { q }))
}

fn grid() -> impl Strategy<Value = GridConfig> {
    (0.1_f64..5.0, 0_u32..=4).prop_map(|(spacing, h)| GridConfig::new(spacing, h))
}

fn style() -> impl Strategy<Value = GlyphStyle> {
    (0.0_f64..6.0, 0.01_f64..100.0, 0.1_f64..10.0).prop_map(|(radius, scale, norm)| GlyphStyle {
        exclusion_radius: radius,
        visual_scale: scale,
        opacity_normalizer: norm,
        ..GlyphStyle::default()
    })
}

proptest! {
    #[test]
    fn glyphs_respect_exclusion(c in constants(), g in grid(), s in style()) {
        let glyphs = build_field_styled(&c, &g, &s).unwrap();
        for glyph in &glyphs {
            let r = glyph.origin.length();
            prop_assert!(r >= s.exclusion_radius, "glyph at r={r} inside {}", s.exclusion_radius);
            prop_assert!(r > 0.0);
        }
    }

    #[test]
    fn opacity_is_clamped(c in constants(), g in grid(), s in style()) {
        for glyph in build_field_styled(&c, &g, &s).unwrap() {
            prop_assert!((0.0..=1.0).contains(&glyph.opacity));
            prop_assert!((glyph.opacity - (glyph.length / s.opacity_normalizer).min(1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn directions_are_unit_and_radial(c in constants(), g in grid(), s in style()) {
        for glyph in build_field_styled(&c, &g, &s).unwrap() {
            prop_assert!((glyph.direction.length() - 1.0).abs() < 1e-9);
            let radial = glyph.origin.normalize();
            let dot = glyph.direction.dot(radial);
            prop_assert!((dot.abs() - 1.0).abs() < 1e-9);
            if c.charge < 0.0 {
                prop_assert!(dot < 0.0);
            } else {
                prop_assert!(dot > 0.0);
            }
        }
    }

    #[test]
    fn length_strictly_decreases_along_a_ray(
        c in charged_constants(),
        g in grid(),
        s in style(),
        ray in prop::sample::select(vec![
            DVec3::X,
            DVec3::NEG_Y,
            DVec3::ONE,
            DVec3::new(1.0, -1.0, 0.0),
        ]),
    ) {
        let glyphs = build_field_styled(&c, &g, &s).unwrap();
        // Glyphs on the ray, nearest first
        let mut on_ray: Vec<_> = (1..=g.half_extent as i32)
            .filter_map(|n| {
                let origin = ray * (n as f64 * g.spacing);
                glyphs.iter().find(|gl| gl.origin == origin)
            })
            .collect();
        on_ray.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
        for pair in on_ray.windows(2) {
            let (near, far) = (pair[0], pair[1]);
            prop_assert!(near.length > far.length, "{} <= {}", near.length, far.length);
            prop_assert!(
                near.length / s.opacity_normalizer > far.length / s.opacity_normalizer
            );
            prop_assert!(near.opacity >= far.opacity);
        }
    }

    #[test]
    fn heads_scale_with_length(c in constants(), g in grid(), s in style()) {
        for glyph in build_field_styled(&c, &g, &s).unwrap() {
            prop_assert!((glyph.head_length - 0.2 * glyph.length).abs() <= 1e-12 * glyph.length.max(1.0));
            prop_assert!((glyph.head_width - 0.5 * glyph.head_length).abs() <= 1e-12 * glyph.length.max(1.0));
        }
    }

    #[test]
    fn count_is_bounded(c in constants(), g in grid(), s in style()) {
        let glyphs = build_field_styled(&c, &g, &s).unwrap();
        let side = 2 * g.half_extent as usize + 1;
        prop_assert!(glyphs.len() < side * side * side);
        prop_assert_eq!(lattice_indices(g.half_extent).count(), side * side * side);
    }

    #[test]
    fn build_is_deterministic(c in constants(), g in grid(), s in style()) {
        let first = build_field_styled(&c, &g, &s).unwrap();
        let second = build_field_styled(&c, &g, &s).unwrap();
        prop_assert_eq!(first, second);
    }
}
