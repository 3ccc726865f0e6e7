//! # efield - electric field of a point charge
//!
//! Computes the Coulomb field of a single charge at the origin on a cubic
//! lattice and draws it as a cloud of translucent 3D arrows around a sphere.
//!
//! The computation is pure and usable on its own; the [`Viewer`] adds a
//! window with orbit controls and a button that shows or hides the field.
//!
//! ## Quick Start
//!
//! ```ignore
//! use efield::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new(FieldConfig::simulation()).run()
//! }
//! ```
//!
//! ## Computing glyphs without a window
//!
//! ```
//! use efield::{build_field, FieldConstants, GridConfig};
//!
//! let constants = FieldConstants::new(1.0, 150.0);
//! let grid = GridConfig::new(2.5, 2);
//! let glyphs = build_field(&constants, &grid, 1.2, 1.0).unwrap();
//!
//! // 125 lattice points, the centre one is too close to the charge
//! assert_eq!(glyphs.len(), 124);
//! assert!(glyphs.iter().all(|g| (0.0..=1.0).contains(&g.opacity)));
//! ```
//!
//! ## Presets
//!
//! | Preset | Permittivity | Charge | Visual scale | Length scale |
//! |--------|--------------|--------|--------------|--------------|
//! | [`FieldConfig::simulation`] | 1 | 150 | 1 | 1 |
//! | [`FieldConfig::proton`] | 8.854e-12 | 1.602e-19 | 5e9 | 1e15 |
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade. The `efield` binary installs
//! `env_logger`; set `RUST_LOG=debug` to see toggle events.

pub mod config;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod lattice;
pub mod scene;
mod viewer;

pub use config::{FieldConfig, FieldConstants, GlyphStyle, GridConfig};
pub use error::{ConfigError, GpuError, ViewerError};
pub use field::{build_field, build_field_styled, coulomb_constant, FieldStats, Glyph};
pub use glam::DVec3;
pub use gpu::camera::{Camera, OrbitControls};
pub use lattice::lattice_indices;
pub use scene::{FieldScene, ToggleLabel};
pub use viewer::Viewer;

/// Convenient imports for common usage.
///
/// ```ignore
/// use efield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{FieldConfig, FieldConstants, GlyphStyle, GridConfig};
    pub use crate::error::{ConfigError, ViewerError};
    pub use crate::field::{build_field, Glyph};
    pub use crate::scene::FieldScene;
    pub use crate::viewer::Viewer;
    pub use glam::DVec3;
}
