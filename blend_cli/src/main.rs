//! # Ethablend CLI Application
//!
//! Terminal front end for the blend solver. Fields are typed the way the
//! form shows them: liters for the starting volume, percentages for the
//! three ethanol contents. Commas are accepted as decimal separators.
//!
//! ```text
//! blend_cli --volume 13 --starting 6 --additive 96 --target 40
//! blend_cli --preset e10 --json
//! blend_cli --interactive
//! ```
//!
//! Exit status is 0 when the blend is solved, 1 when it is not, 2 when the
//! CLI itself failed (bad settings file, terminal I/O).

mod display;
mod settings;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use blend_core::{BlendForm, BlendResult, Preset};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::settings::{CliError, DisplaySettings};

#[derive(Parser, Debug)]
#[command(name = "blend_cli")]
#[command(about = "Ethablend CLI - how much ethanol to add to reach a target E%", long_about = None)]
struct Cli {
    /// Starting fuel volume in liters
    #[arg(long, allow_hyphen_values = true)]
    volume: Option<String>,

    /// Ethanol content of the starting fuel, percent (E6 = 6)
    #[arg(long, allow_hyphen_values = true)]
    starting: Option<String>,

    /// Ethanol content of the additive, percent
    #[arg(long, allow_hyphen_values = true)]
    additive: Option<String>,

    /// Target ethanol content of the mix, percent (E40 = 40)
    #[arg(long, allow_hyphen_values = true)]
    target: Option<String>,

    /// Start from a preset: reference, e10, e0
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Prompt for each field, showing the current value as default
    #[arg(short, long)]
    interactive: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Number of fraction digits in text output
    #[arg(long)]
    decimals: Option<usize>,

    /// JSON file with display settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the available presets and exit
    #[arg(long)]
    list_presets: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "blend_cli failed");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether the blend was solved.
fn run(cli: &Cli) -> Result<bool, CliError> {
    if cli.list_presets {
        for preset in Preset::ALL {
            println!("{:<10} {}", preset.name(), preset.description());
        }
        return Ok(true);
    }

    let settings = match &cli.config {
        Some(path) => DisplaySettings::load(path)?,
        None => DisplaySettings::default(),
    }
    .with_overrides(cli.decimals, cli.json);

    let mut form = build_form(cli);
    if cli.interactive {
        prompt_form(&mut form)?;
    }
    debug!(?form, "resolved form");

    let result = form.solve();
    match &result {
        BlendResult::Solved(s) => info!(additive_volume_l = s.additive_volume_l, "blend solved"),
        BlendResult::Invalid { errors } => info!(count = errors.len(), "blend not solvable"),
    }

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", display::render(&result, &settings));
    }

    Ok(result.is_solved())
}

/// Defaults, then the preset, then any field given explicitly.
fn build_form(cli: &Cli) -> BlendForm {
    let mut form = BlendForm::default();
    if let Some(preset) = cli.preset {
        preset.apply(&mut form);
    }

    let overrides = [
        (&cli.volume, &mut form.starting_volume),
        (&cli.starting, &mut form.starting_percent),
        (&cli.additive, &mut form.additive_percent),
        (&cli.target, &mut form.target_percent),
    ];
    for (arg, field) in overrides {
        if let Some(text) = arg {
            *field = text.clone();
        }
    }
    form
}

fn prompt_form(form: &mut BlendForm) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    form.starting_volume = prompt_field(&mut input, "Starting fuel (L)", &form.starting_volume)?;
    form.starting_percent = prompt_field(&mut input, "Starting fuel E%", &form.starting_percent)?;
    form.additive_percent = prompt_field(&mut input, "Additive ethanol %", &form.additive_percent)?;
    form.target_percent = prompt_field(&mut input, "Target E%", &form.target_percent)?;
    println!();
    Ok(())
}

/// Ask for one field; an empty answer keeps `current`.
fn prompt_field(input: &mut impl BufRead, label: &str, current: &str) -> io::Result<String> {
    print!("{label} [{current}]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer.to_string()
    })
}
