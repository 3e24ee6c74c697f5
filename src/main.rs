use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use wpg::app::App;
use wpg::backend::open_default_backend;
use wpg::config::{API_URL_ENV, Config};
use wpg::error::AppResult;
use wpg::history::HistoryEntry;
use wpg::logging;

/// Paginated article search in the terminal.
#[derive(Debug, Parser)]
#[command(name = "wpg", version)]
struct Args {
    /// Search to run on startup.
    #[arg(long, short)]
    query: Option<String>,

    /// Page to open for the startup search.
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    page: u64,

    /// Location to open, e.g. `?query=cat&page=2`. Wins over --query/--page.
    #[arg(long, short)]
    location: Option<String>,

    /// Config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of a custom search API.
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Log file; overrides the config.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn initial_entry(&self) -> HistoryEntry {
        if let Some(location) = self.location.as_deref() {
            return HistoryEntry::parse_location(location);
        }
        match self.query.as_deref() {
            Some(query) => HistoryEntry::search(query, usize::try_from(self.page).unwrap_or(1)),
            None => HistoryEntry::root(),
        }
    }

    fn load_config(&self) -> AppResult<Config> {
        let config = match self.config.as_deref() {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        Ok(config.with_api_url(self.api_url.as_deref()))
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Args::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> AppResult<()> {
    let config = args.load_config()?;
    let log_path = args.log_file.clone().unwrap_or_else(|| config.log_path());
    logging::init(&log_path)?;

    let backend = open_default_backend(&config.api)?;
    info!(backend = backend.name(), "starting");
    let mut app = App::new_with_config(config, backend)?;
    app.restore_initial(args.initial_entry())?;

    app.run().await
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wpg").chain(args.iter().copied()))
            .expect("args should parse")
    }

    #[test]
    fn no_args_opens_root() {
        assert!(parse(&[]).initial_entry().is_root());
    }

    #[test]
    fn query_and_page_build_search_entry() {
        let entry = parse(&["--query", "rust lang", "--page", "3"]).initial_entry();
        assert_eq!(entry.location(), "?query=rust%20lang&page=3");
    }

    #[test]
    fn location_wins_over_query() {
        let entry = parse(&["--query", "cat", "--location", "?query=dog&page=2"]).initial_entry();
        assert_eq!(entry.location(), "?query=dog&page=2");
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(Args::try_parse_from(["wpg", "--page", "0"]).is_err());
    }
}
