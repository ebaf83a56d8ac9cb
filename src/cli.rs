//! Command-line host
//!
//! Maps flags onto [`JointParameters`], resolves and lays out the joint, and
//! hands the result to a [`RecordingSink`] for printing.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dovetailkit_camtools::{
    generate_with, place_anchor, resolve, AnchorPlacement, AxisOrientation, HorizontalPlacement,
    JointLayout, JointParameters, RecordingSink, ResolvedGeometry, ShapeSink, VerticalPlacement,
};
use dovetailkit_core::units::{format_length, get_unit_label};
use dovetailkit_core::DocumentScale;
use dovetailkit_settings::{default_config_path, Config};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit code when the joint parameters describe an impossible joint
const EXIT_INVALID_JOINT: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "dovetailkit")]
#[command(
    about = "Cut paths for dovetail joints milled with a CNC router",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lay out the pin board and tail board of a joint (default)
    Joint(JointArgs),
    /// Place a custom anchor on a document
    Anchor(AnchorArgs),
    /// Write a config file with the default settings
    InitConfig {
        /// Target file (.toml or .json); defaults to the platform config dir
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct JointArgs {
    /// Taper angle of the dovetail bit in degrees [default: 15]
    #[arg(long)]
    pub cut_angle: Option<f64>,
    /// Widest diameter of the dovetail bit in mm [default: 13.8]
    #[arg(long)]
    pub tail_bit_diameter: Option<f64>,
    /// Diameter of the straight bit in mm [default: 8]
    #[arg(long)]
    pub pin_bit_diameter: Option<f64>,
    /// Thickness of the tail board in mm [default: 15]
    #[arg(long)]
    pub tail_thickness: Option<f64>,
    /// Thickness of the pin board in mm [default: 15]
    #[arg(long)]
    pub pin_thickness: Option<f64>,
    /// Board width in mm [default: 150]
    #[arg(long, visible_alias = "board-width")]
    pub width: Option<f64>,
    /// Width of a tail at its wide end in mm [default: 20]
    #[arg(long, visible_alias = "tail-width")]
    pub width_tails: Option<f64>,
    /// Number of tails [default: 2]
    #[arg(long)]
    pub num_tails: Option<u32>,
    /// Config file (.toml or .json) with defaults and layout settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Millimeters per document user unit [default: 1]
    #[arg(long)]
    pub scale: Option<f64>,
    /// Print the drawing elements as JSON
    #[arg(long)]
    pub json: bool,
}

impl JointArgs {
    /// Command-line values win over the ones in `base`.
    pub fn apply(&self, base: &JointParameters) -> JointParameters {
        JointParameters {
            cut_angle: self.cut_angle.unwrap_or(base.cut_angle),
            tail_bit_diameter: self.tail_bit_diameter.unwrap_or(base.tail_bit_diameter),
            pin_bit_diameter: self.pin_bit_diameter.unwrap_or(base.pin_bit_diameter),
            tail_thickness: self.tail_thickness.unwrap_or(base.tail_thickness),
            pin_thickness: self.pin_thickness.unwrap_or(base.pin_thickness),
            board_width: self.width.unwrap_or(base.board_width),
            tail_width: self.width_tails.unwrap_or(base.tail_width),
            num_tails: self.num_tails.unwrap_or(base.num_tails),
        }
    }
}

#[derive(Debug, Args)]
pub struct AnchorArgs {
    /// Axis orientation: RT, RB, LT or LB
    #[arg(long, default_value = "RT")]
    pub orientation: AxisOrientation,
    /// Length of the X leg in mm; the Y leg is twice as long
    #[arg(long, default_value_t = 10.0)]
    pub x_size: f64,
    /// Horizontal position: l, m or r
    #[arg(long, default_value = "l")]
    pub x_placement: HorizontalPlacement,
    /// Vertical position: t, m or b
    #[arg(long, default_value = "b")]
    pub y_placement: VerticalPlacement,
    /// Document width in mm
    #[arg(long)]
    pub doc_width: f64,
    /// Document height in mm
    #[arg(long)]
    pub doc_height: f64,
    /// Millimeters per document user unit
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,
    /// Print the anchor as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Joint(args)) => run_joint(&args),
        Some(Commands::Anchor(args)) => run_anchor(&args),
        Some(Commands::InitConfig { path, force }) => init_config(path, force),
        None => run_joint(&JointArgs::default()),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => match default_config_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("loading config {}", path.display())),
            Err(e) => {
                debug!(error = %e, "no default config location");
                Ok(Config::default())
            }
        },
    }
}

fn document_scale(scale: f64) -> Result<DocumentScale> {
    if !(scale.is_finite() && scale > 0.0) {
        bail!("--scale must be a positive number, got {}", scale);
    }
    Ok(DocumentScale::new(scale))
}

fn run_joint(args: &JointArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let scale = document_scale(args.scale.unwrap_or(1.0))?;
    let params = args.apply(&config.joint);

    let resolved = match resolve(params) {
        Ok(resolved) => resolved,
        Err(failure) => {
            eprintln!("{}", failure);
            return Ok(ExitCode::from(EXIT_INVALID_JOINT));
        }
    };

    let layout = generate_with(&resolved, &config.layout);
    let mut sink = RecordingSink::new(scale);
    let handles = layout.emit(&mut sink);
    info!(elements = handles.len(), "dovetail layout ready");

    if args.json {
        let output = serde_json::json!({
            "geometry": &resolved,
            "elements": sink.records(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", summary(&resolved, &layout, &config));
    }

    Ok(ExitCode::SUCCESS)
}

fn summary(resolved: &ResolvedGeometry, layout: &JointLayout, config: &Config) -> String {
    let units = config.layout.depth_units;
    let len = |mm: f64| format!("{}{}", format_length(mm, units), get_unit_label(units));
    let p = resolved.params();

    let mut out = String::new();
    out.push_str(&format!(
        "Dovetail joint: {} tails on a {} board\n",
        p.num_tails,
        len(p.board_width)
    ));
    out.push_str(&format!(
        "  dovetail bit diameter at depth: {}\n",
        len(resolved.upper_tail_diameter())
    ));
    out.push_str(&format!(
        "  tail width at narrow end:       {}\n",
        len(resolved.smaller_tail_width())
    ));
    out.push_str(&format!(
        "  gap between tails:              {}\n",
        len(resolved.inter_tail_cut_width())
    ));
    out.push_str(&format!(
        "Pin board:  {} cuts, depth {}\n",
        layout.pin_board.cuts.len(),
        len(p.tail_thickness)
    ));
    out.push_str(&format!(
        "Tail board: {} cuts, depth {}\n",
        layout.tail_board.cuts.len(),
        len(p.pin_thickness)
    ));
    for note in layout.annotations() {
        out.push_str(&format!("  > {}\n", note.text));
    }
    out
}

fn run_anchor(args: &AnchorArgs) -> Result<ExitCode> {
    let placement = AnchorPlacement {
        orientation: args.orientation,
        x_size: args.x_size,
        horizontal: args.x_placement,
        vertical: args.y_placement,
    };
    let scale = document_scale(args.scale)?;
    let marker = place_anchor(&placement, args.doc_width, args.doc_height)?;

    if args.json {
        let mut sink = RecordingSink::new(scale);
        sink.insert_anchor(&marker);
        println!("{}", sink.to_json()?);
    } else {
        let origin = marker.origin();
        println!(
            "Anchor {:?} at ({:.3}, {:.3}), points {:?}",
            marker.orientation,
            origin.x,
            origin.y,
            marker
                .points
                .iter()
                .map(|p| (p.x, p.y))
                .collect::<Vec<_>>()
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<ExitCode> {
    let path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    Config::default().save_to_file(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "dovetailkit",
            "joint",
            "--num-tails",
            "3",
            "--width",
            "200",
            "--tail-width",
            "25",
        ])
        .unwrap();

        let Some(Commands::Joint(args)) = cli.command else {
            panic!("expected the joint subcommand");
        };
        let base = JointParameters {
            cut_angle: 10.0,
            ..JointParameters::default()
        };
        let params = args.apply(&base);
        assert_eq!(params.num_tails, 3);
        assert_eq!(params.board_width, 200.0);
        assert_eq!(params.tail_width, 25.0);
        assert_eq!(params.cut_angle, 10.0);
        assert_eq!(params.pin_bit_diameter, 8.0);
    }

    #[test]
    fn test_anchor_args_parse() {
        let cli = Cli::try_parse_from([
            "dovetailkit",
            "anchor",
            "--orientation",
            "lb",
            "--x-placement",
            "r",
            "--doc-width",
            "300",
            "--doc-height",
            "200",
        ])
        .unwrap();

        let Some(Commands::Anchor(args)) = cli.command else {
            panic!("expected the anchor subcommand");
        };
        assert_eq!(args.orientation, AxisOrientation::LB);
        assert_eq!(args.x_placement, HorizontalPlacement::Right);
        assert_eq!(args.y_placement, VerticalPlacement::Bottom);
        assert_eq!(args.x_size, 10.0);
    }

    #[test]
    fn test_bad_orientation_is_a_parse_error() {
        assert!(Cli::try_parse_from([
            "dovetailkit",
            "anchor",
            "--orientation",
            "up",
            "--doc-width",
            "1",
            "--doc-height",
            "1",
        ])
        .is_err());
    }

    #[test]
    fn test_summary_lists_derived_values() {
        let resolved = resolve(JointParameters::default()).unwrap();
        let config = Config::default();
        let layout = generate_with(&resolved, &config.layout);
        let text = summary(&resolved, &layout, &config);

        assert!(text.contains("2 tails on a 150.000mm board"));
        assert!(text.contains("5.762mm"));
        assert!(text.contains("55.000mm"));
        assert!(text.contains("Tail board: 3 cuts"));
    }

    #[test]
    fn test_anchor_rejects_bad_scale_in_text_mode() {
        let args = AnchorArgs {
            orientation: AxisOrientation::RT,
            x_size: 10.0,
            x_placement: HorizontalPlacement::Left,
            y_placement: VerticalPlacement::Bottom,
            doc_width: 100.0,
            doc_height: 50.0,
            scale: 0.0,
            json: false,
        };
        assert!(run_anchor(&args).is_err());

        let args = AnchorArgs {
            scale: 1.0,
            doc_width: f64::NAN,
            ..args
        };
        assert!(run_anchor(&args).is_err());
    }

    #[test]
    fn test_init_config_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dovetailkit").join("config.toml");

        init_config(Some(path.clone()), false).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());

        let err = init_config(Some(path.clone()), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        init_config(Some(path), true).unwrap();
    }

    #[test]
    fn test_scale_must_be_positive() {
        assert!(document_scale(0.0).is_err());
        assert!(document_scale(f64::NAN).is_err());
        assert!(document_scale(0.5).is_ok());
    }
}
