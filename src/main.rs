use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use efield::{FieldConfig, GridConfig, Viewer, ViewerError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Pre-tuned constants, charge 150 in a unit-permittivity medium
    Simulation,
    /// A proton with SI constants, rescaled for display
    Proton,
}

/// 3D arrow field of a single point charge.
#[derive(Parser, Debug)]
#[command(name = "efield", version, about)]
struct Cli {
    /// Constant set to start from
    #[arg(long, value_enum, default_value_t = Preset::Simulation)]
    preset: Preset,

    /// Distance between neighbouring lattice points
    #[arg(long)]
    spacing: Option<f64>,

    /// Lattice runs from -N to N on each axis
    #[arg(long, allow_hyphen_values = true)]
    half_extent: Option<i32>,

    /// Lattice points closer than this to the charge get no arrow
    #[arg(long)]
    exclusion_radius: Option<f64>,

    /// Multiplier applied to field magnitudes
    #[arg(long)]
    visual_scale: Option<f64>,

    /// Source charge
    #[arg(long, allow_hyphen_values = true)]
    charge: Option<f64>,

    /// Arrow length at which opacity reaches 1
    #[arg(long)]
    opacity_normalizer: Option<f64>,

    /// Window title
    #[arg(long)]
    title: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<(FieldConfig, Option<String>), ViewerError> {
        let mut config = match self.preset {
            Preset::Simulation => FieldConfig::simulation(),
            Preset::Proton => FieldConfig::proton(),
        };

        if let Some(half_extent) = self.half_extent {
            let spacing = self.spacing.unwrap_or(config.grid.spacing);
            config.grid = GridConfig::try_from_signed(spacing, half_extent)?;
        } else if let Some(spacing) = self.spacing {
            config = config.with_spacing(spacing);
        }
        if let Some(radius) = self.exclusion_radius {
            config = config.with_exclusion_radius(radius);
        }
        if let Some(scale) = self.visual_scale {
            config = config.with_visual_scale(scale);
        }
        if let Some(charge) = self.charge {
            config = config.with_charge(charge);
        }
        if let Some(normalizer) = self.opacity_normalizer {
            config = config.with_opacity_normalizer(normalizer);
        }

        config.validate()?;
        Ok((config, self.title))
    }
}

fn run(cli: Cli) -> Result<(), ViewerError> {
    let (config, title) = cli.into_config()?;
    log::info!(
        "Preset '{}': {} lattice points",
        config.name,
        config.grid.point_count()
    );

    let mut viewer = Viewer::new(config);
    if let Some(title) = title {
        viewer = viewer.with_title(title);
    }
    viewer.run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
