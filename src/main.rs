use anyhow::Context;
use clap::{Parser, Subcommand};
use git_status_bar::commands::*;
use git_status_bar::core::{
    config::Settings,
    error::{Result, StatusBarError},
    print_error,
    render::RenderMode,
};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "git-status-bar")]
#[command(about = "A cached, powerline-style git status line for tmux and terminals")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Enable trace logging, including every git invocation
    #[arg(long, global = true, hide = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the status line of a repository (gst alias)
    #[command(alias = "gst")]
    Status {
        /// Directory inside the repository
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Emit ANSI escapes instead of tmux markup (default when $TMUX is unset)
        #[arg(
            short = 't',
            long = "no-tmux",
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true"
        )]
        no_tmux: Option<bool>,
        /// Sync the remote and re-probe even if the caches are fresh
        #[arg(short = 'r', long = "remote-update")]
        remote_update: bool,
    },
    /// Inspect or clear the cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// List cached repositories with snapshot age and last remote sync
    Show,
    /// Remove every cached snapshot and remote sync record
    Clear,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = Settings::load();
    init_logging(
        cli.log_level(),
        settings.as_ref().ok().cloned().unwrap_or_default(),
    );

    let result = settings
        .context("Could not load settings")
        .and_then(|settings| run(cli.command, settings));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, settings: Settings) -> anyhow::Result<()> {
    match command {
        Commands::Status {
            path,
            no_tmux,
            remote_update,
        } => {
            let no_tmux = no_tmux.unwrap_or_else(|| std::env::var_os("TMUX").is_none());
            let request = StatusRequest {
                path,
                mode: RenderMode::from_no_tmux(no_tmux),
                force_remote: remote_update,
            };
            execute_status(settings, &request, &mut io::stdout().lock())
                .with_context(|| format!("Status of {} failed", request.path.display()))?;
            Ok(())
        }
        Commands::Cache { action } => {
            let result = match action {
                CacheAction::Show => execute_cache_show(&settings),
                CacheAction::Clear => execute_cache_clear(&settings),
            };
            if let Err(e) = &result {
                print_error(&e.to_string());
            }
            Ok(result?)
        }
    }
}

// stdout carries the status line, so records go to the log file (stderr as fallback)
fn init_logging(level: LevelFilter, settings: Settings) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    match open_log_file(&settings) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Logging to stderr, could not open log file: {e}"),
    }

    if builder.try_init().is_err() {
        eprintln!("Logger was already initialized");
    }
}

fn open_log_file(settings: &Settings) -> Result<std::fs::File> {
    let path = settings.log_file()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StatusBarError::cache_directory_creation_failed(parent, e))?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
