use anyhow::Context;
use arcpick::config;
use arcpick::label::labels;
use arcpick::{ArcPath, EstimatedMetrics, Picker, StartOffset};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arcpick", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the picker
    Render(RenderArgs),
    /// Print where the config file is read from
    ConfigPath,
    /// Write the default config file if none exists
    InitConfig,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    /// Labels to place on the arc (defaults to the configured items)
    items: Vec<String>,

    /// Initially active label
    #[arg(short = 'a', long)]
    active: Option<usize>,

    /// Click this label before rendering
    #[arg(short = 's', long)]
    select: Option<usize>,

    #[arg(long)]
    font_size: Option<f64>,

    /// Text path start offset, a length ("4") or a percentage ("10%")
    #[arg(long)]
    start_offset: Option<StartOffset>,

    #[arg(short = 'f', long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Read settings from this file instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Svg,
    Json,
    Table,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => render(args),
        Commands::ConfigPath => {
            println!("{}", config::get_config_path()?.display());
            Ok(())
        }
        Commands::InitConfig => {
            let path = config::write_default_config().context("Failed to write config")?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let mut options = match &args.config {
        Some(path) => config::load_config(Some(path.as_path()))?.picker,
        None => config::load_or_sample().picker,
    };

    if !args.items.is_empty() {
        options.items = labels(args.items);
    }
    if let Some(active) = args.active {
        options.default_active = active;
    }
    if let Some(font_size) = args.font_size {
        options.font_size = font_size;
    }
    if let Some(start_offset) = args.start_offset {
        options.start_offset = start_offset;
    }

    let arc = ArcPath::default();
    let metrics = EstimatedMetrics::new(arc, options.font_size);
    let mut picker = Picker::new(options)?.with_on_click(|event| {
        log::info!(
            "Selection changed: current={} previous={:?}",
            event.current,
            event.previous
        );
    });
    picker.measure(&metrics);

    if let Some(index) = args.select {
        picker.click(index)?;
    }

    match args.format {
        Format::Svg => print!("{}", arcpick::svg::render(&picker, &arc)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&picker.snapshot())?),
        Format::Table => {
            println!("{:>3}  {:<20} {:>8} {:>8}", "#", "label", "x", "opacity");
            for label in picker.layout() {
                println!(
                    "{:>3}{} {:<20} {:>8.2} {:>8.2}",
                    label.index,
                    if label.active { "*" } else { " " },
                    label.label.as_str(),
                    label.position,
                    label.opacity
                );
            }
        }
    }
    Ok(())
}
