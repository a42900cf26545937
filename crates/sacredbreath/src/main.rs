mod cli;
mod display;
mod input;
mod paths;
mod run;
mod settings;

use std::path::Path;

use anyhow::Result;
use breathclock::StrengthLevel;
use cli::{Command, ConfigAction};
use display::describe_schedule;
use paths::AppPaths;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Command::At(args)) => run::run_at(args, config_path),
        Some(Command::Schedule(args)) => {
            run_schedule(args.level);
            Ok(())
        }
        Some(Command::Config(config_cmd)) => match config_cmd.action {
            ConfigAction::Where => run_config_where(config_path),
        },
        None => run::run(cli.run, config_path),
    }
}

fn run_schedule(level: Option<StrengthLevel>) {
    let levels = match level {
        Some(level) => vec![level],
        None => StrengthLevel::ALL.to_vec(),
    };
    let rendered: Vec<String> = levels.into_iter().map(describe_schedule).collect();
    println!("{}", rendered.join("\n\n"));
}

fn run_config_where(config_path: Option<&Path>) -> Result<()> {
    let paths = AppPaths::discover()?;
    let file = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths.config_file());
    println!("Configuration:");
    println!("  config dir: {}", paths.config_dir().display());
    println!(
        "  config:     {} ({})",
        file.display(),
        if file.exists() { "present" } else { "missing" }
    );
    Ok(())
}
