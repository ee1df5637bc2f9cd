use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use todostore::config::Settings;
use todostore::error::Result;
use todostore::samples::build_manager;
use todostore::time::system_clock;
use todostore::ui::App;
use todostore::{TodoItem, TodoManager};

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "A single-screen TODO list")]
struct Cli {
    #[arg(long, global = true, help = "Read settings from this file instead of ~/.todostore/config.toml")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Start with an empty list")]
    no_samples: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print both sections to stdout and exit
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };
    if cli.no_samples {
        settings.seed_samples = false;
    }
    Ok(settings)
}

fn run(command: Option<Commands>, settings: &Settings) -> Result<()> {
    let clock = system_clock();
    let manager = build_manager(settings, clock.clone())?;

    match command {
        Some(Commands::List) => {
            print_sections(&manager);
            Ok(())
        }
        None => {
            let mut terminal = ratatui::init();
            let mut app = App::new(manager, clock);
            let app_result = app.run(&mut terminal);
            ratatui::restore();
            app_result
        }
    }
}

fn print_sections(manager: &TodoManager) {
    print!("{}", format_sections(manager));
}

fn format_sections(manager: &TodoManager) -> String {
    let mut out = format_section("Not Completed", &manager.unchecked());
    out.push('\n');
    out.push_str(&format_section("Completed", &manager.checked()));
    out
}

fn format_section(title: &str, items: &[TodoItem]) -> String {
    let mut out = format!("{title}:\n");
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        let mark = if item.checked { "✓" } else { " " };
        out.push_str(&format!("  [{mark}] {} {}\n", item.id, item.title));
    }
    out
}
