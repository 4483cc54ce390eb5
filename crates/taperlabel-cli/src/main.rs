//! taperlabel CLI - flat labels for tapered objects
//!
//! Writes SVG or DXF outlines and prints the unrolled geometry.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use taperlabel::{Label, LabelConfig, LabelDefaults, LabelSpec, OutlineResult, SvgStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "taperlabel")]
#[command(about = "Generate flat labels for cups, cones and other tapered objects", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML file with label defaults and style
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the label outline to an SVG or DXF file
    Generate {
        #[command(flatten)]
        geometry: GeometryArgs,
        #[command(flatten)]
        style: StyleArgs,
        /// Output file (format determined by extension: .svg, .dxf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the unrolled geometry
    Info {
        #[command(flatten)]
        geometry: GeometryArgs,
        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Label dimensions in mm. Unset values come from the config file, then
/// from the defaults (100 x 50 label, 80 mm top, 100 mm bottom).
#[derive(Args, Debug, Clone, Default)]
struct GeometryArgs {
    /// Label height, measured along the side of the object
    #[arg(long)]
    height: Option<f64>,
    /// Label width
    #[arg(long)]
    width: Option<f64>,
    /// Diameter of the object's top edge
    #[arg(long)]
    top_diameter: Option<f64>,
    /// Diameter of the object's bottom edge
    #[arg(long)]
    bottom_diameter: Option<f64>,
    /// Treat --height as the object's vertical height instead of the slant
    #[arg(long)]
    vertical: bool,
}

impl GeometryArgs {
    fn overrides(&self) -> LabelDefaults {
        LabelDefaults {
            height: self.height,
            width: self.width,
            top_diameter: self.top_diameter,
            bottom_diameter: self.bottom_diameter,
            vertical: self.vertical.then_some(true),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
struct StyleArgs {
    /// Fill colour
    #[arg(long)]
    fill: Option<String>,
    /// Stroke colour
    #[arg(long)]
    stroke: Option<String>,
    /// Stroke width in mm
    #[arg(long)]
    stroke_width: Option<f64>,
    /// Leave out the dimension text
    #[arg(long)]
    no_dimensions: bool,
}

impl StyleArgs {
    fn apply(&self, mut style: SvgStyle) -> SvgStyle {
        if let Some(fill) = &self.fill {
            style.fill = fill.clone();
        }
        if let Some(stroke) = &self.stroke {
            style.stroke = stroke.clone();
        }
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
        }
        if self.no_dimensions {
            style.annotate = false;
        }
        style
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Generate {
            geometry,
            style,
            output,
        }) => {
            generate(&config, &geometry, &style, output)?;
        }
        Some(Commands::Info { geometry, json }) => {
            show_info(&config, &geometry, json)?;
        }
        None => {
            // Default to generating a label with configured values
            generate(
                &config,
                &GeometryArgs::default(),
                &StyleArgs::default(),
                None,
            )?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<LabelConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            LabelConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(LabelConfig::default()),
    }
}

fn build_label(config: &LabelConfig, geometry: &GeometryArgs) -> Result<Label> {
    let spec = config.resolve(geometry.overrides());
    Label::new(spec).with_context(|| describe_failure(&spec))
}

fn describe_failure(spec: &LabelSpec) -> String {
    format!(
        "cannot unroll a {} x {} mm label for diameters {} mm (top) and {} mm (bottom)",
        spec.height, spec.width, spec.top_diameter, spec.bottom_diameter
    )
}

fn generate(
    config: &LabelConfig,
    geometry: &GeometryArgs,
    style: &StyleArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let label = build_label(config, geometry)?;
    let output = output.unwrap_or_else(|| PathBuf::from(label.file_name("svg")));

    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "svg" => {
            let style = style.apply(config.style.clone());
            label.write_svg(&output, &style)?;
            println!("Label {} was saved to {}", label.title(), output.display());
        }
        "dxf" => {
            label.write_dxf(&output)?;
            println!("Label {} was saved to {}", label.title(), output.display());
        }
        _ => {
            anyhow::bail!("Unknown output format: {}", ext);
        }
    }

    Ok(())
}

fn show_info(config: &LabelConfig, geometry: &GeometryArgs, json: bool) -> Result<()> {
    let label = build_label(config, geometry)?;

    if json {
        println!("{}", label.to_json()?);
        return Ok(());
    }

    for line in info_lines(&label) {
        println!("{}", line);
    }
    Ok(())
}

fn info_lines(label: &Label) -> Vec<String> {
    let spec = label.spec();
    let (width, height) = label.bounds();
    let mut lines = vec![
        format!("{}", label.title()),
        format!("  Height: {} mm", spec.height),
        format!("  Width: {} mm", spec.width),
        format!(
            "  Diameters: {} mm (top), {} mm (bottom)",
            spec.top_diameter, spec.bottom_diameter
        ),
    ];

    match label.outline() {
        OutlineResult::Rectangle { .. } => {
            lines.push("\nShape: rectangle (cylindrical)".to_string());
        }
        OutlineResult::AnnularSector(sector) => {
            lines.push("\nShape: annular sector".to_string());
            lines.push(format!("  Outer radius: {:.3} mm", sector.outer_radius));
            lines.push(format!("  Inner radius: {:.3} mm", sector.inner_radius));
            lines.push(format!("  Sweep: {:.3} deg", sector.sweep_degrees()));
            lines.push(format!(
                "  Large arc: {}",
                if sector.large_arc { "yes" } else { "no" }
            ));
            lines.push(format!(
                "  Flipped: {}",
                if sector.flipped { "yes" } else { "no" }
            ));
        }
    }
    lines.push(format!("  Bounds: {:.3} x {:.3} mm", width, height));
    lines
}
