// Command-line interface definitions and parsing for gscout

use crate::config::CliConfig;
use crate::core::constants::{export_formats, output_formats, timeouts};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Authentication
    /// OAuth access token to use instead of the cached one
    #[arg(long, global = true, value_name = "TOKEN", help_heading = "Authentication")]
    pub token: Option<String>,

    // Network
    /// Connection timeout in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        global = true,
        value_name = "SECONDS",
        help_heading = "Network"
    )]
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, global = true, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    /// Base URL of the Search Console API
    #[arg(long, global = true, value_name = "URL", help_heading = "Network")]
    pub api_base: Option<String>,

    /// Base URL of the URL Inspection API
    #[arg(long, global = true, value_name = "URL", help_heading = "Network")]
    pub inspection_api_base: Option<String>,

    // Output & Verbosity
    /// Suppress progress and informational output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,

    /// Local store file (token cache and preferences)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub store: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and cache the access token
    Login,
    /// Revoke the cached token and sign out
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List the properties the account can access
    Sites,
    /// Fetch search performance rows for a property
    Query(QueryArgs),
    /// Inspect the index status of a list of URLs
    Inspect(InspectArgs),
    /// Show, toggle or set the color theme
    Theme {
        /// light, dark or toggle (omit to show the current theme)
        #[arg(value_name = "MODE", value_parser = ["light", "dark", "toggle"])]
        mode: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Property URL, e.g. https://example.com/ or sc-domain:example.com
    pub site: String,

    /// Number of days ending three days ago (default: 7)
    #[arg(long, value_name = "DAYS", conflicts_with_all = ["start", "end"])]
    pub days: Option<u32>,

    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "end")]
    pub start: Option<String>,

    /// Last day of a custom range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "start")]
    pub end: Option<String>,

    /// Maximum number of rows to fetch (default: 1000)
    #[arg(long, value_name = "ROWS")]
    pub row_limit: Option<u32>,

    /// Extra dimension after the query (page, country, device, date)
    #[arg(long = "dimension", value_name = "DIMENSION")]
    pub dimensions: Vec<String>,

    /// Sort column (keys, clicks, impressions, ctr, position); descending unless --asc
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort ascending
    #[arg(long, requires = "sort")]
    pub asc: bool,

    /// Filter as COLUMN:OPERATOR:VALUE (contains, regex, gt, lt); repeatable
    #[arg(long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Write the displayed rows to a file
    #[arg(long, value_name = "FORMAT", value_parser = export_formats::ALL)]
    pub export: Option<String>,

    /// Directory for exported files (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct InspectArgs {
    /// Property URL the inspected URLs belong to
    pub site: String,

    /// File with one URL per line; reads stdin when omitted or "-"
    pub file: Option<String>,

    /// Pause between inspection calls in ms (default: 500)
    #[arg(long, value_name = "MS")]
    pub delay: Option<u64>,

    /// Write the results to a file
    #[arg(long, value_name = "FORMAT", value_parser = export_formats::ALL)]
    pub export: Option<String>,

    /// Directory for exported files (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Convert CLI arguments to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig {
        api_base: non_blank(&cli.api_base),
        inspection_api_base: non_blank(&cli.inspection_api_base),
        timeout: cli.timeout,
        user_agent: non_blank(&cli.user_agent),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        config_file: non_blank(&cli.config),
        no_config: cli.no_config,
        store_path: non_blank(&cli.store),
        ..CliConfig::default()
    };

    match &cli.command {
        Commands::Query(args) => {
            cli_config.row_limit = args.row_limit;
            cli_config.export_dir = non_blank(&args.out);
        }
        Commands::Inspect(args) => {
            cli_config.inspection_delay = args.delay;
            cli_config.export_dir = non_blank(&args.out);
        }
        _ => {}
    }

    cli_config
}

/// Warn about unusual but valid values. Hard limits are enforced by
/// `Config::validate`.
pub fn validate_cli_args(cli: &Cli) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(timeout) = cli.timeout
        && timeout > timeouts::DEFAULT_TIMEOUT_SECONDS * 10
    {
        warnings.push(format!(
            "Timeout of {timeout} seconds is quite large. Consider using a smaller value."
        ));
    }

    if let Commands::Inspect(args) = &cli.command
        && args.delay == Some(0)
    {
        warnings.push(
            "A delay of 0 ms may exceed the inspection quota on long URL lists.".to_string(),
        );
    }

    warnings
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gscout").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_to_config_default() {
        let cli = parse(&["sites"]);
        let config = cli_to_config(&cli);

        assert_eq!(config.timeout, None);
        assert_eq!(config.api_base, None);
        assert_eq!(config.row_limit, None);
        assert_eq!(config.inspection_delay, None);
        assert!(!config.quiet);
        assert!(!config.no_config);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "sites",
            "--timeout",
            "10",
            "--format",
            "json",
            "--api-base",
            "http://127.0.0.1:9000",
            "--store",
            "/tmp/store.json",
            "-v",
        ]);
        let config = cli_to_config(&cli);

        assert_eq!(config.timeout, Some(10));
        assert_eq!(config.output_format.as_deref(), Some("json"));
        assert_eq!(config.api_base.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.store_path.as_deref(), Some("/tmp/store.json"));
        assert!(config.verbose);
    }

    #[test]
    fn test_query_args() {
        let cli = parse(&[
            "query",
            "https://example.com/",
            "--days",
            "28",
            "--row-limit",
            "50",
            "--sort",
            "clicks",
            "--asc",
            "--filter",
            "clicks:gt:6",
            "--filter",
            "keys:contains:rust",
            "--export",
            "csv",
            "--out",
            "exports",
        ]);

        let Commands::Query(ref args) = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(args.site, "https://example.com/");
        assert_eq!(args.days, Some(28));
        assert_eq!(args.sort.as_deref(), Some("clicks"));
        assert!(args.asc);
        assert_eq!(args.filters.len(), 2);
        assert_eq!(args.export.as_deref(), Some("csv"));

        let config = cli_to_config(&cli);
        assert_eq!(config.row_limit, Some(50));
        assert_eq!(config.export_dir.as_deref(), Some("exports"));
    }

    #[test]
    fn test_days_conflicts_with_custom_range() {
        let result = Cli::try_parse_from([
            "gscout",
            "query",
            "https://example.com/",
            "--days",
            "7",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_start_requires_end() {
        let result =
            Cli::try_parse_from(["gscout", "query", "https://example.com/", "--start", "2024-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_export_format_rejected() {
        let result =
            Cli::try_parse_from(["gscout", "inspect", "https://example.com/", "--export", "xlsx"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_args() {
        let cli = parse(&["inspect", "sc-domain:example.com", "urls.txt", "--delay", "0"]);
        let config = cli_to_config(&cli);
        assert_eq!(config.inspection_delay, Some(0));

        let Commands::Inspect(ref args) = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(args.file.as_deref(), Some("urls.txt"));
        assert_eq!(validate_cli_args(&cli).len(), 1);
    }

    #[test]
    fn test_cli_to_config_empty_strings() {
        let cli = parse(&["whoami", "--user-agent", "  ", "--config", ""]);
        let config = cli_to_config(&cli);
        assert_eq!(config.user_agent, None);
        assert_eq!(config.config_file, None);
    }

    #[test]
    fn test_theme_mode_values() {
        assert!(Cli::try_parse_from(["gscout", "theme", "toggle"]).is_ok());
        assert!(Cli::try_parse_from(["gscout", "theme"]).is_ok());
        assert!(Cli::try_parse_from(["gscout", "theme", "blue"]).is_err());
    }

    #[test]
    fn test_validate_cli_args_high_timeout_warning() {
        let cli = parse(&["sites", "--timeout", "900"]);
        assert_eq!(validate_cli_args(&cli).len(), 1);
        assert!(validate_cli_args(&parse(&["sites"])).is_empty());
    }
}
