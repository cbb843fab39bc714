//! strand CLI: Interactive timelines in the terminal

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use strand_engine::{
    LayoutMode, Timeline, TimelineConfig, TimelineDocument, TimelineError, TitlePosition,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Navigate timelines with debounced scroll synchronization
#[derive(Parser)]
#[command(name = "strand")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Open FILE in the TUI (same as `strand view FILE`)
    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a timeline document in the TUI (default)
    View(ViewArgs),

    /// Validate a timeline document and print a summary
    Check {
        /// Timeline document (JSON)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a sample timeline document
    Init {
        /// Where to write the document
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct ViewArgs {
    /// Timeline document (JSON)
    file: Option<PathBuf>,

    /// Layout mode: horizontal, vertical or tree
    #[arg(long)]
    mode: Option<LayoutMode>,

    /// Item width for horizontal mode
    #[arg(long)]
    item_width: Option<i64>,

    /// Item height for vertical mode
    #[arg(long)]
    item_height: Option<i64>,

    /// Title position: top or bottom
    #[arg(long)]
    title_position: Option<TitlePosition>,

    /// Quiet period in milliseconds before navigation settles
    #[arg(long)]
    debounce_ms: Option<u64>,
}

impl ViewArgs {
    /// Apply command-line overrides on top of the document's config.
    fn apply(&self, config: &mut TimelineConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(width) = self.item_width {
            config.item_width = width;
        }
        if let Some(height) = self.item_height {
            config.item_height = height;
        }
        if let Some(position) = self.title_position {
            config.title_position = position;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
    }
}

const LOG_FILE: &str = "strand.log";

fn main() {
    let cli = Cli::parse();
    let _guard = init_logging();

    match cli.command {
        Some(Commands::View(args)) => cmd_view(&args),
        None => cmd_view(&cli.view),
        Some(Commands::Check { file, json }) => cmd_check(&file, json),
        Some(Commands::Init { file, force }) => cmd_init(&file, force),
    }
}

/// Log to a file; the TUI owns the terminal.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = std::env::var("STRAND_LOG_DIR")
        .map_or_else(|_| std::env::temp_dir(), PathBuf::from);
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "strand=info,strand_engine=info,strand_tui=info,warn".into()
        }))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!(
        "strand {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.join(LOG_FILE).display()
    );
    guard
}

/// Load a document, apply overrides and build the timeline.
fn load_timeline(path: &Path, args: &ViewArgs) -> Result<Timeline, Box<dyn std::error::Error>> {
    let mut document = TimelineDocument::load(path)?;
    args.apply(&mut document.config);
    document.config.validate()?;
    Ok(Timeline::new(document.items, document.config)?)
}

fn cmd_view(args: &ViewArgs) {
    let Some(path) = &args.file else {
        eprintln!("Error: no timeline file given (try `strand init timeline.json`)");
        std::process::exit(1);
    };

    let timeline = match load_timeline(path, args) {
        Ok(timeline) => timeline,
        Err(e) => {
            warn!(path = %path.display(), "failed to load timeline: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(strand_tui::run_tui(timeline)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Summary printed by `strand check`.
#[derive(Debug)]
struct CheckSummary {
    config: TimelineConfig,
    items: usize,
}

impl CheckSummary {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": true,
            "mode": self.config.mode,
            "items": self.items,
            "item_width": self.config.item_width,
            "item_height": self.config.item_height,
            "title_position": self.config.title_position,
            "debounce_ms": self.config.debounce_ms,
        })
    }
}

fn check_document(path: &Path) -> Result<CheckSummary, Box<dyn std::error::Error>> {
    let timeline = load_timeline(path, &ViewArgs::default())?;
    Ok(CheckSummary {
        config: timeline.config().clone(),
        items: timeline.items().len(),
    })
}

fn cmd_check(path: &Path, json: bool) {
    let summary = match check_document(path) {
        Ok(summary) => summary,
        Err(e) => {
            if json {
                println!("{}", serde_json::json!({ "valid": false, "error": e.to_string() }));
            } else {
                eprintln!("Error: {e}");
            }
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&summary.to_json()) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{} is valid\n", path.display());
    println!("  Mode:           {}", summary.config.mode);
    println!("  Items:          {}", summary.items);
    println!("  Item width:     {}", summary.config.item_width);
    println!("  Item height:    {}", summary.config.item_height);
    println!("  Title position: {:?}", summary.config.title_position);
    println!("  Debounce:       {}ms", summary.config.debounce_ms);
}

fn init_document(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }
    TimelineDocument::sample().save(path)?;
    Ok(())
}

fn cmd_init(path: &Path, force: bool) {
    match init_document(path, force) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn sample_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("timeline.json");
        init_document(&path, false).unwrap();
        path
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_file_opens_view() {
        let cli = Cli::try_parse_from(["strand", "t.json", "--mode", "tree"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.view.file, Some(PathBuf::from("t.json")));
        assert_eq!(cli.view.mode, Some(LayoutMode::Tree));
    }

    #[test]
    fn test_view_subcommand_args() {
        let cli = Cli::try_parse_from([
            "strand",
            "view",
            "t.json",
            "--item-width",
            "200",
            "--title-position",
            "bottom",
            "--debounce-ms",
            "80",
        ])
        .unwrap();
        let Some(Commands::View(args)) = cli.command else {
            panic!("expected view command");
        };
        assert_eq!(args.item_width, Some(200));
        assert_eq!(args.title_position, Some(TitlePosition::Bottom));
        assert_eq!(args.debounce_ms, Some(80));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["strand", "t.json", "--mode", "spiral"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let mut config = TimelineConfig::default();
        let args = ViewArgs {
            mode: Some(LayoutMode::Vertical),
            item_height: Some(120),
            ..ViewArgs::default()
        };
        args.apply(&mut config);

        assert_eq!(config.mode, LayoutMode::Vertical);
        assert_eq!(config.item_height, 120);
        assert_eq!(config.item_width, 320);
        assert_eq!(config.debounce_ms, 50);
    }

    #[test]
    fn test_load_timeline_with_overrides() {
        let dir = TempDir::new().unwrap();
        let path = sample_file(&dir);
        let args = ViewArgs {
            mode: Some(LayoutMode::Tree),
            ..ViewArgs::default()
        };

        let timeline = load_timeline(&path, &args).unwrap();
        assert_eq!(timeline.mode(), LayoutMode::Tree);
        assert_eq!(timeline.items().len(), 5);
        assert!(timeline.awaiting_geometry());
    }

    #[test]
    fn test_load_timeline_rejects_bad_override() {
        let dir = TempDir::new().unwrap();
        let path = sample_file(&dir);
        let args = ViewArgs {
            item_width: Some(0),
            ..ViewArgs::default()
        };
        assert!(load_timeline(&path, &args).is_err());
    }

    #[test]
    fn test_check_document() {
        let dir = TempDir::new().unwrap();
        let path = sample_file(&dir);

        let summary = check_document(&path).unwrap();
        assert_eq!(summary.items, 5);

        let json = summary.to_json();
        assert_eq!(json["valid"], true);
        assert_eq!(json["mode"], "horizontal");
        assert_eq!(json["title_position"], "top");
        assert_eq!(json["items"], 5);
    }

    #[test]
    fn test_check_rejects_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"items": []}"#).unwrap();

        let err = check_document(&path).unwrap_err();
        let err = err.downcast_ref::<TimelineError>().unwrap();
        assert!(matches!(err, TimelineError::NoItems));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = sample_file(&dir);

        assert!(init_document(&path, false).is_err());
        assert!(init_document(&path, true).is_ok());
    }

    #[test]
    fn test_init_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/timeline.json");
        init_document(&path, false).unwrap();

        let document = TimelineDocument::load(&path).unwrap();
        assert_eq!(document, TimelineDocument::sample());
    }
}
