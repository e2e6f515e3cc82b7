use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evoque_nav::SearchIndex;
use evoque_tui::TuiOptions;
use evoque_types::{Direction, NavData, ThemeMode};
use evoque_util::{NavSource, default_log_path};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Évoque storefront navigation in the terminal.
#[derive(Debug, Parser)]
#[command(name = "evoque", version, about)]
struct Cli {
    /// JSON or YAML navigation file. Falls back to EVOQUE_NAV_PATH, then the
    /// built-in storefront.
    #[arg(long, global = true, value_name = "FILE")]
    nav: Option<PathBuf>,

    /// Layout direction.
    #[arg(long, value_name = "ltr|rtl", default_value_t = Direction::Ltr)]
    dir: Direction,

    /// Start in this theme instead of the stored preference.
    #[arg(long, value_name = "light|dark")]
    theme: Option<ThemeMode>,

    /// Do not fetch market data.
    #[arg(long)]
    offline: bool,

    /// Width, in columns, below which the header collapses into the drawer.
    #[arg(long, value_name = "COLS", default_value_t = evoque_tui::DEFAULT_BREAKPOINT)]
    breakpoint: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the links the command palette would show for QUERY.
    Search { query: String },
    /// Print every link in the navigation tree.
    Links,
    /// Check the navigation tree and exit non-zero if anything is off.
    Validate,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // No subcommand => TUI
    let Some(command) = cli.command else {
        init_tracing(LogTarget::File)?;
        let data = load_nav(cli.nav)?;
        let mut options = TuiOptions::new(data);
        options.direction = cli.dir;
        options.theme = cli.theme;
        options.offline = cli.offline;
        options.breakpoint = cli.breakpoint;
        evoque_tui::run(options).await?;
        return Ok(ExitCode::SUCCESS);
    };

    init_tracing(LogTarget::Stderr)?;
    let data = load_nav(cli.nav)?;
    match command {
        Command::Search { query } => {
            for line in search_lines(&data, &query) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Links => {
            for line in link_lines(&data) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate => {
            let issues = data.validate();
            if issues.is_empty() {
                println!("ok: {} links", data.all_links().count());
                return Ok(ExitCode::SUCCESS);
            }
            for issue in &issues {
                eprintln!("{issue}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

enum LogTarget {
    /// The TUI owns the terminal, so logs go to a file.
    File,
    Stderr,
}

fn init_tracing(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match target {
        LogTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        LogTarget::File => {
            let path = default_log_path();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = File::options()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
    }
    Ok(())
}

fn load_nav(explicit: Option<PathBuf>) -> Result<NavData> {
    let source = NavSource::resolve(explicit.as_deref());
    debug!(%source, "resolving navigation");
    let data = source.load().with_context(|| format!("loading navigation from {source}"))?;
    info!(%source, links = data.all_links().count(), "navigation loaded");
    Ok(data)
}

fn link_line(label: &str, href: &str) -> String {
    format!("{label}\t{href}")
}

fn search_lines(data: &NavData, query: &str) -> Vec<String> {
    SearchIndex::build(data)
        .search(query)
        .into_iter()
        .map(|link| link_line(&link.label, &link.href))
        .collect()
}

/// Tree order, grouped the way the drawer shows it.
fn link_lines(data: &NavData) -> Vec<String> {
    let mut lines: Vec<String> = data.primary.iter().map(|link| link_line(&link.label, &link.href)).collect();
    for group in &data.mega {
        for section in &group.sections {
            for link in &section.items {
                lines.push(link_line(&format!("{} / {} / {}", group.trigger, section.label, link.label), &link.href));
            }
        }
    }
    lines.extend(data.quick_links.iter().map(|link| link_line(&link.label, &link.href)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_into_options() {
        let cli = Cli::try_parse_from(["evoque", "--dir", "rtl", "--theme", "dark", "--offline", "--breakpoint", "80"])
            .unwrap();
        assert_eq!(cli.dir, Direction::Rtl);
        assert_eq!(cli.theme, Some(ThemeMode::Dark));
        assert!(cli.offline);
        assert_eq!(cli.breakpoint, 80);
        assert!(cli.command.is_none());
    }

    #[test]
    fn subcommands_accept_the_nav_flag_after_them() {
        let cli = Cli::try_parse_from(["evoque", "search", "linen", "--nav", "nav.yaml"]).unwrap();
        assert_eq!(cli.nav, Some(PathBuf::from("nav.yaml")));
        assert!(matches!(cli.command, Some(Command::Search { ref query }) if query == "linen"));
        assert!(Cli::try_parse_from(["evoque", "--dir", "up"]).is_err());
    }

    #[test]
    fn search_prints_label_and_href() {
        let lines = search_lines(&NavData::storefront(), "restock");
        assert_eq!(lines, vec!["Just Restocked\t/new/restocked".to_string()]);
    }

    #[test]
    fn links_follow_tree_order() {
        let data = NavData::storefront();
        let lines = link_lines(&data);
        assert_eq!(lines.len(), data.all_links().count());
        assert!(lines[0].starts_with("Home / "));
        assert_eq!(lines.last().map(String::as_str), Some("Support\t/support"));
    }
}
