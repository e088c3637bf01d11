//! Command-line front end: pick a variant, optionally load a JSON parameter
//! file, print the build summary and write the STL files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pidcase::fasteners::Preset;
use pidcase::io::StlFormat;
use pidcase::{EnclosureConfig, Variant};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pidcase", version, about = "Generate STL files for a PID controller enclosure")]
struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build every part of a variant and write the STL files
    Build(BuildArgs),

    /// Print dimensions and fastener configuration without building geometry
    Summary(ConfigArgs),

    /// Print the default configuration as JSON
    Defaults(DefaultsArgs),
}

#[derive(clap::Args, Debug)]
struct ConfigArgs {
    /// Enclosure design (inverted or tabletop); overrides the config file
    #[arg(long)]
    variant: Option<Variant>,

    /// JSON configuration file; missing fields take their defaults
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Heat-set insert preset: reference, all-inserts, all-screws or structural
    #[arg(long)]
    preset: Option<Preset>,
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    common: ConfigArgs,

    /// Output directory
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,

    /// Facets per full circle
    #[arg(long)]
    segments: Option<usize>,

    /// Also write an assembly preview with component envelopes
    #[arg(long)]
    preview: bool,
}

#[derive(clap::Args, Debug)]
struct DefaultsArgs {
    /// Select this variant in the printed configuration
    #[arg(long)]
    variant: Option<Variant>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<EnclosureConfig> {
        let mut config = match &self.config {
            Some(path) => EnclosureConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EnclosureConfig::default(),
        };
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(preset) = self.preset {
            config.inverted.inserts = preset.config();
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build(args) => {
            let mut config = args.common.resolve()?;
            if let Some(dir) = args.out {
                config.output.dir = dir;
            }
            if args.ascii {
                config.output.format = StlFormat::Ascii;
            }
            if let Some(segments) = args.segments {
                config.output.circle_segments = segments;
            }
            config.output.preview |= args.preview;

            println!("{}", config.variant.report(&config));
            let report = pidcase::export::build_and_export(&config)
                .with_context(|| format!("building the {} enclosure", config.variant))?;
            println!("{report}");
        },
        Commands::Summary(args) => {
            let config = args.resolve()?;
            config.validate().context("invalid configuration")?;
            println!("{}", config.variant.report(&config));
        },
        Commands::Defaults(args) => {
            let mut config = EnclosureConfig::default();
            if let Some(variant) = args.variant {
                config.variant = variant;
            }
            println!("{}", config.to_json()?);
        },
    }
    Ok(())
}
