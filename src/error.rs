//! Error types for efield.
//!
//! Configuration problems are caught before any sampling happens. GPU and
//! windowing failures only surface from [`Viewer::run`](crate::Viewer::run).

use std::fmt;

/// Invalid field or lattice configuration.
///
/// Returned by [`FieldConfig::validate`](crate::FieldConfig::validate) and by
/// [`build_field`](crate::build_field) before any glyph is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Permittivity must be strictly positive.
    NonPositivePermittivity(f64),
    /// Lattice spacing must be strictly positive.
    NonPositiveSpacing(f64),
    /// Length scale must be strictly positive.
    NonPositiveLengthScale(f64),
    /// Exclusion radius must be zero or positive.
    NegativeExclusionRadius(f64),
    /// Visual scale must be zero or positive.
    NegativeVisualScale(f64),
    /// Opacity normalizer must be strictly positive.
    NonPositiveOpacityNormalizer(f64),
    /// Lattice half-extent must not be negative.
    NegativeHalfExtent(i32),
    /// A parameter was NaN or infinite. Holds the parameter name.
    NonFinite(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositivePermittivity(v) => {
                write!(f, "Permittivity must be positive, got {}", v)
            }
            ConfigError::NonPositiveSpacing(v) => {
                write!(f, "Lattice spacing must be positive, got {}", v)
            }
            ConfigError::NonPositiveLengthScale(v) => {
                write!(f, "Length scale must be positive, got {}", v)
            }
            ConfigError::NegativeExclusionRadius(v) => {
                write!(f, "Exclusion radius must not be negative, got {}", v)
            }
            ConfigError::NegativeVisualScale(v) => {
                write!(f, "Visual scale must not be negative, got {}", v)
            }
            ConfigError::NonPositiveOpacityNormalizer(v) => {
                write!(f, "Opacity normalizer must be positive, got {}", v)
            }
            ConfigError::NegativeHalfExtent(v) => {
                write!(f, "Lattice half-extent must not be negative, got {}", v)
            }
            ConfigError::NonFinite(name) => write!(f, "Parameter `{}` must be finite", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Field configuration was rejected before sampling.
    Config(ConfigError),
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Config(e) => write!(f, "Invalid configuration: {}", e),
            ViewerError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Config(e) => Some(e),
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ViewerError {
    fn from(e: ConfigError) -> Self {
        ViewerError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages_name_the_parameter() {
        let msg = ConfigError::NonPositivePermittivity(0.0).to_string();
        assert!(msg.contains("Permittivity"));

        let msg = ConfigError::NonFinite("charge").to_string();
        assert!(msg.contains("`charge`"));
    }

    #[test]
    fn test_viewer_error_wraps_config_error() {
        let err: ViewerError = ConfigError::NonPositiveSpacing(-1.0).into();
        assert!(matches!(err, ViewerError::Config(ConfigError::NonPositiveSpacing(_))));
        assert!(std::error::Error::source(&err).is_some());
    }
}
