use backgrounder::aspect::Orientation;
use backgrounder::config::{self, BackgrounderConfig};
use backgrounder::imaging::{BackgroundRequest, RustBackend};
use backgrounder::process::{self, BatchSettings, SaveTarget};
use backgrounder::{logger, output, scan};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backgrounder")]
#[command(about = "Pad photos onto a target aspect ratio with a generated background")]
#[command(long_about = "\
Pad photos onto a target aspect ratio with a generated background

The photo keeps its size and is centered horizontally on a wider canvas of the
same height. The canvas width is the photo height times the aspect ratio; the
side margins are filled with one of:

  BLURRED    stretched, blurred copy of the photo (default)
  BLACK      solid black
  WHITE      solid white
  COLOR      solid --color
  BRIGHTEST  brightest non-blown-out pixel from the top half of the side edges
  DARKEST    darkest pixel from the side edges

Aspect ratios are a decimal between 0 and 1 (0.8) or a pair (4/5, 16:9, 3-2,
1|1). Anything else falls back to 1.0 with a warning.

Settings are read from backgrounder.toml in the working directory (or
--config). Run 'backgrounder gen-config' to generate a documented one.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./backgrounder.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags that decide the canvas shape.
#[derive(clap::Args, Clone)]
struct ShapeArgs {
    /// Image file, or a directory of images (not recursive)
    #[arg(short, long)]
    input: PathBuf,

    /// Aspect ratio: decimal in (0, 1) or W:H, W/H, W-H, W|H
    #[arg(short, long)]
    aspect_ratio: Option<String>,

    /// Orientation reported for decimal ratios and fallbacks
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,
}

#[derive(clap::Args, Clone)]
struct GenerateArgs {
    #[command(flatten)]
    shape: ShapeArgs,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Background type
    #[arg(short = 't', long = "type", value_enum)]
    kind: Option<KindArg>,

    /// Fill color for COLOR: #rrggbb or r,g,b
    #[arg(long)]
    color: Option<String>,

    /// Write the generated canvases to the output directory
    #[arg(short, long)]
    save: bool,

    /// Write a JSON report of the batch
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate backgrounds for an image or a directory of images
    Generate(GenerateArgs),
    /// Identify inputs and show the planned canvases without decoding them
    Check(ShapeArgs),
    /// Print a stock backgrounder.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    #[value(name = "BLURRED")]
    Blurred,
    #[value(name = "BLACK")]
    Black,
    #[value(name = "WHITE")]
    White,
    #[value(name = "COLOR")]
    Color,
    #[value(name = "BRIGHTEST")]
    Brightest,
    #[value(name = "DARKEST")]
    Darkest,
}

impl KindArg {
    fn token(self) -> &'static str {
        match self {
            Self::Blurred => "BLURRED",
            Self::Black => "BLACK",
            Self::White => "WHITE",
            Self::Color => "COLOR",
            Self::Brightest => "BRIGHTEST",
            Self::Darkest => "DARKEST",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Vertical,
    Horizontal,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Vertical => Orientation::Vertical,
            OrientationArg::Horizontal => Orientation::Horizontal,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Command::Generate(args) => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_shape_overrides(&mut config, &args.shape);
            if let Some(kind) = args.kind {
                config.background.kind = kind.token().to_string();
            }
            if let Some(color) = &args.color {
                config.background.color = color.clone();
            }
            if let Some(dir) = &args.output_dir {
                config.output.dir = dir.clone();
            }
            config.validate()?;

            let aspect = config.resolver().resolve(&config.background.aspect_ratio);
            let mut request = BackgroundRequest::new(aspect, config.background.kind()?);
            request.sampling = config.sampling_params();
            let settings = BatchSettings {
                request,
                save: args.save.then(|| SaveTarget {
                    dir: config.output.dir.clone(),
                    quality: config.quality(),
                }),
            };

            let inputs = scan::discover_inputs(&args.shape.input)?;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let summary =
                process::process_batch(&RustBackend::new(), &inputs, &settings, Some(tx))?;
            printer.join().ok();
            output::print_summary(&summary);

            if let Some(report) = &args.report {
                process::write_report(&summary, report)?;
            }
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
        Command::Check(shape) => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_shape_overrides(&mut config, &shape);
            config.validate()?;

            let aspect = config.resolver().resolve(&config.background.aspect_ratio);
            let backend = RustBackend::new();
            println!("{}", output::format_check_header(&aspect));
            for (i, source) in scan::discover_inputs(&shape.input)?.iter().enumerate() {
                match process::plan_item(&backend, source, &aspect) {
                    Ok(plan) => output::print_check_entry(i + 1, source, Ok(&plan)),
                    Err(e) => {
                        output::print_check_entry(i + 1, source, Err(e.to_string().as_str()))
                    }
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_config(
    explicit: Option<&std::path::Path>,
) -> Result<BackgrounderConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    Ok(config::load_config(explicit, &cwd)?)
}

fn apply_shape_overrides(config: &mut BackgrounderConfig, shape: &ShapeArgs) {
    if let Some(expr) = &shape.aspect_ratio {
        config.background.aspect_ratio = expr.clone();
    }
    if let Some(orientation) = shape.orientation {
        config.background.orientation = orientation.into();
    }
}
