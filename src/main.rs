use clap::Parser;
use controller::{ControllerOptions, DialogController, Document};
use dialog::{DialogConfig, DialogError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod page;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Click-script word that presses Escape.
const ESCAPE: &str = "escape";

/// Render dialogs, bind their triggers and replay clicks against them.
#[derive(Parser, Debug)]
#[command(name = "dialogs", version)]
struct Cli {
    /// TOML file overriding class names, id prefix and close button defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTML page to load instead of the built-in demo page.
    #[arg(short, long)]
    markup: Option<PathBuf>,

    /// Element ids to click, in order. `escape` dismisses the topmost modal dialog.
    #[arg(value_name = "ID")]
    clicks: Vec<String>,

    /// Number of `initialize` passes before clicking.
    #[arg(long, default_value_t = 1)]
    passes: usize,

    /// Re-bind on every pass instead of skipping bound elements.
    #[arg(long)]
    no_marker: bool,

    /// Print the rendered page and exit.
    #[arg(long)]
    print_markup: bool,

    /// Maximum number of nodes in the printed outline.
    #[arg(long, default_value_t = 200)]
    outline_cap: usize,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Render(#[from] DialogError),
    #[error("no element with id {0:?}")]
    UnknownElement(String),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

fn read(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<DialogConfig, AppError> {
    let Some(path) = path else {
        return Ok(DialogConfig::default());
    };
    toml::from_str(&read(path)?).map_err(|source| AppError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn init_logging() -> Result<(), AppError> {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Arc::new(load_config(cli.config.as_deref())?);
    let markup = match &cli.markup {
        Some(path) => read(path)?,
        None => page::render(config)?,
    };
    if cli.print_markup {
        println!("{markup}");
        return Ok(());
    }

    let mut doc = Document::parse(&markup);
    let controller = DialogController::with_options(ControllerOptions {
        mark_bound: !cli.no_marker,
    });
    for pass in 0..cli.passes {
        let report = controller.initialize(&mut doc);
        log::info!(
            "pass {}: bound {} triggers, skipped {}",
            pass + 1,
            report.bound(),
            report.skipped
        );
    }

    for click in &cli.clicks {
        if click == ESCAPE {
            match doc.dismiss_top() {
                Some(dialog) => log::info!("escape closed {:?}", doc.attr(dialog, "id")),
                None => log::info!("escape: no modal dialog open"),
            }
            continue;
        }
        let target = doc
            .get_element_by_id(click)
            .ok_or_else(|| AppError::UnknownElement(click.clone()))?;
        let applied = controller.click(&mut doc, target);
        log::info!("click #{click}: {} command(s) applied", applied.len());
    }

    if let Some(tree) = doc.to_node(doc.root()) {
        for line in html::debug::outline_from_dom(&tree, cli.outline_cap) {
            println!("{line}");
        }
    }
    println!();
    for dialog in doc.elements_with_attribute("id") {
        if !doc.is_element_named(dialog, "dialog") {
            continue;
        }
        let state = match (doc.is_open(dialog), doc.is_modal(dialog)) {
            (true, true) => "open (modal)",
            (true, false) => "open",
            (false, _) => "closed",
        };
        println!("#{}: {state}", doc.attr(dialog, "id").unwrap_or(""));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging() {
        eprintln!("{err}");
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
