use clap::{Parser, Subcommand};
use shotframe::imaging::{FontSet, Style};
use shotframe::{batch, config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shotframe")]
#[command(about = "Store listing image generator for browser extensions")]
#[command(long_about = "\
Store listing image generator for browser extensions

Turns raw screenshots into 1280x800 store images: gradient background,
rounded corners, drop shadow, and an optional title/subtitle caption.

The batch table lives in shotframe.toml:

  [[images]]
  source = \"Screenshot 2025-12-25 215031.png\"   # in input_dir
  output = \"1-popup-dark.png\"                    # in output_dir
  caption = { title = \"Dark Theme\", subtitle = \"...\" }
  side = \"right\"                                 # left | right | below

Without a config file the stock table is used. Missing screenshots are
skipped with a warning.

Run 'shotframe gen-config' to generate a documented shotframe.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    /// Screenshot directory (overrides `input_dir`)
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Output directory (overrides `output_dir`)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render every listing image (default)
    Build,
    /// Validate config and report which screenshots exist
    Check,
    /// Print a stock shotframe.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut cli = Cli::parse();

    match cli.command.take().unwrap_or(Command::Build) {
        Command::Build => {
            let config = load(&cli)?;
            let style = Style::from_config(&config);
            let fonts = FontSet::resolve(&config.fonts, &style)?;
            output::print_fonts(&fonts);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_batch_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = batch::run_batch(&config, &fonts, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_batch_summary(&result?);
        }
        Command::Check => {
            let config = load(&cli)?;
            println!("==> Checking {}", config.input_dir);
            output::print_check_output(&batch::check(&config));
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and apply directory overrides from the command line.
fn load(cli: &Cli) -> Result<config::Config, config::ConfigError> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(input) = &cli.input {
        config.input_dir = input.to_string_lossy().into_owned();
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.to_string_lossy().into_owned();
    }
    Ok(config)
}
