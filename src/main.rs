//! Command line driver for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use game_of_life_engine::{
    config::{CliOverrides, OutputFormat, Settings},
    driver::{Action, ConsoleCommand, Driver},
    utils::{ColorOutput, GridFormatter},
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "game_of_life_engine")]
#[command(about = "Conway's Game of Life on a fixed grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that build an engine
#[derive(Args, Debug)]
struct EngineArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Grid width in cells (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Generations per second while running (overrides config)
    #[arg(long)]
    ticks_per_second: Option<u32>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a preset and run it for a number of generations
    Run {
        #[command(flatten)]
        engine: EngineArgs,

        /// Preset name or ordinal
        #[arg(short, long, default_value = "gliders")]
        preset: String,

        /// Number of generations to run
        #[arg(short, long, default_value_t = 20)]
        generations: usize,

        /// Do not wait between generations
        #[arg(long)]
        no_delay: bool,

        /// Only print the last generation
        #[arg(long)]
        final_only: bool,
    },

    /// Drive the engine with commands read from stdin
    Play {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// List the registered presets
    Presets {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },

    /// Write the default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Run { engine, .. } | Commands::Play { engine } => engine.verbose,
        _ => false,
    };
    init_logging(verbose);

    match cli.command {
        Commands::Run { engine, preset, generations, no_delay, final_only } => {
            run_command(engine, &preset, generations, no_delay, final_only)
        }
        Commands::Play { engine } => play_command(engine),
        Commands::Presets { config } => presets_command(config),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Load the config file if it exists, otherwise fall back to defaults
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::info!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn resolve_settings(args: &EngineArgs) -> Result<Settings> {
    let mut settings = load_settings(&args.config)?;
    settings.merge_with_cli(&CliOverrides {
        width: args.width,
        height: args.height,
        ticks_per_second: args.ticks_per_second,
        format: args.format,
    });
    settings.validate().context("Configuration validation failed")?;

    log::debug!(
        "Grid {}x{}, {} ticks/s, {:?} output",
        settings.grid.width,
        settings.grid.height,
        settings.timing.ticks_per_second,
        settings.output.format
    );
    Ok(settings)
}

fn run_command(
    args: EngineArgs,
    preset: &str,
    generations: usize,
    no_delay: bool,
    final_only: bool,
) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let format = settings.output.format;

    if final_only {
        let engine = game_of_life_engine::simulate(&settings, preset, generations)?;
        println!("{}", GridFormatter::render(&engine, format)?);
        return Ok(());
    }

    let mut driver = Driver::from_settings(&settings)?;
    let id = driver.engine().presets().resolve(preset)?;
    driver.apply(Action::LoadPreset(id))?;
    driver.toggle_running();

    println!("{}", GridFormatter::render(driver.engine(), format)?);
    for _ in 0..generations {
        if !no_delay {
            std::thread::sleep(driver.tick_interval());
        }
        driver.tick();
        println!("{}", GridFormatter::render(driver.engine(), format)?);
    }

    Ok(())
}

fn play_command(args: EngineArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let mut driver = Driver::from_settings(&settings)?;

    println!("{}", ColorOutput::info("Game of Life console. Type `help` for commands."));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_console(&mut driver, settings.output.format, stdin.lock(), &mut stdout)
}

/// Read console commands until `quit` or end of input, writing replies to `out`
fn run_console<R: BufRead, W: Write>(
    driver: &mut Driver,
    format: OutputFormat,
    input: R,
    out: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read console input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", ColorOutput::error(&format!("{:#}", e)))?;
                continue;
            }
        };

        let redraw = match execute(driver, command, out) {
            Ok(Some(redraw)) => redraw,
            Ok(None) => break,
            Err(e) => {
                writeln!(out, "{}", ColorOutput::error(&format!("{:#}", e)))?;
                false
            }
        };

        if redraw {
            writeln!(out, "{}", GridFormatter::render(driver.engine(), format)?)?;
        }
        out.flush().context("Failed to flush console output")?;
    }

    Ok(())
}

/// Run one console command. `None` means quit, otherwise whether to redraw.
fn execute<W: Write>(driver: &mut Driver, command: ConsoleCommand, out: &mut W) -> Result<Option<bool>> {
    let redraw = match command {
        ConsoleCommand::Click { x, y } => {
            let action = driver.click(x, y)?;
            if action == Some(Action::TogglePlay) {
                writeln!(out, "{}", menu_line(driver))?;
            }
            matches!(action, Some(Action::ToggleCell { .. } | Action::LoadPreset(_)))
        }
        ConsoleCommand::Toggle { row, col } => {
            driver.apply(Action::ToggleCell { row, col })?;
            true
        }
        ConsoleCommand::Preset(key) => {
            let id = driver.engine().presets().resolve(&key)?;
            driver.apply(Action::LoadPreset(id))?;
            true
        }
        ConsoleCommand::Play => {
            driver.toggle_running();
            writeln!(out, "{}", menu_line(driver))?;
            false
        }
        ConsoleCommand::Tick => driver.tick(),
        ConsoleCommand::Step => {
            driver.step();
            true
        }
        ConsoleCommand::Clear => {
            driver.clear();
            true
        }
        ConsoleCommand::Show => true,
        ConsoleCommand::Menu => {
            writeln!(out, "{}", menu_line(driver))?;
            false
        }
        ConsoleCommand::Help => {
            writeln!(out, "{}", ConsoleCommand::HELP)?;
            false
        }
        ConsoleCommand::Quit => return Ok(None),
    };
    Ok(Some(redraw))
}

fn menu_line(driver: &Driver) -> String {
    driver
        .menu_labels()
        .iter()
        .enumerate()
        .map(|(slot, label)| format!("[{}] {}", slot, label))
        .collect::<Vec<_>>()
        .join("  ")
}

fn presets_command(config_path: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let registry = settings.preset_registry();

    println!("{}", ColorOutput::info("Presets:"));
    println!("ID | Name         | Cells");
    println!("---|--------------|------");
    for (id, preset) in registry.iter() {
        println!("{:2} | {:12} | {:5}", id.0, preset.name, preset.coordinates.len());
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config").join("default.yaml");

    if config_path.exists() && !force {
        println!("Skipped: {} (already exists)", config_path.display());
        return Ok(());
    }

    Settings::default()
        .to_file(&config_path)
        .context("Failed to create default configuration")?;
    println!("{}", ColorOutput::success(&format!("Created: {}", config_path.display())));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_engine",
            "run",
            "--preset", "blinker",
            "--generations", "5",
            "--width", "20",
            "--format", "json",
            "--no-delay",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life_engine", "run", "--format", "svg"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let path = temp_dir.path().join("config/default.yaml");
        assert!(path.exists());
        assert!(Settings::from_file(&path).is_ok());

        // A second run leaves the file alone.
        std::fs::write(&path, "edited").unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "edited");
    }

    #[test]
    fn test_execute_console_commands() {
        let mut settings = Settings::default();
        settings.grid.width = 10;
        settings.grid.height = 10;
        let mut driver = Driver::from_settings(&settings).unwrap();
        let mut out = Vec::new();

        let mut run = |driver: &mut Driver, command| execute(driver, command, &mut out);
        assert_eq!(run(&mut driver, ConsoleCommand::Preset("blinker".into())).unwrap(), Some(true));
        assert_eq!(run(&mut driver, ConsoleCommand::Tick).unwrap(), Some(false));
        assert_eq!(run(&mut driver, ConsoleCommand::Play).unwrap(), Some(false));
        assert_eq!(run(&mut driver, ConsoleCommand::Tick).unwrap(), Some(true));
        assert_eq!(driver.engine().generation(), 1);

        assert!(run(&mut driver, ConsoleCommand::Toggle { row: 10, col: 0 }).is_err());
        assert!(run(&mut driver, ConsoleCommand::Preset("gliders".into())).is_err());
        assert_eq!(driver.engine().grid().living_count(), 3);

        assert_eq!(run(&mut driver, ConsoleCommand::Quit).unwrap(), None);
        assert!(String::from_utf8(out).unwrap().contains("stop"));
    }

    #[test]
    fn test_run_console_session() {
        let mut settings = Settings::default();
        settings.grid.width = 6;
        settings.grid.height = 6;
        let mut driver = Driver::from_settings(&settings).unwrap();

        let input = "preset block\n\ndance\ntoggle 0 0\nquit\ntoggle 5 5\n";
        let mut out = Vec::new();
        run_console(&mut driver, OutputFormat::Json, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Unknown command `dance`"));
        assert_eq!(text.lines().filter(|line| line.starts_with('{')).count(), 2);
        // Input after `quit` is not read.
        assert_eq!(driver.engine().grid().living_count(), 5);
    }

    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_run_console_reports_flush_errors() {
        let mut driver = Driver::from_settings(&Settings::default()).unwrap();
        let result = run_console(&mut driver, OutputFormat::Text, "show\n".as_bytes(), &mut FailingFlush);

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to flush console output"));
    }
}
