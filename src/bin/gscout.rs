use clap::Parser;
use futures::StreamExt;
use gscout::api::{AnalyticsQuery, GoogleIdentity, SearchConsoleApi, SearchConsoleClient};
use gscout::config::{CliConfig, Config};
use gscout::core::constants::{error_messages, exit_codes};
use gscout::core::{GscoutError, InspectionResult, Result};
use gscout::dates::DateRange;
use gscout::export::{ExportFormat, Exporter};
use gscout::inspection::{CancelHandle, InspectionRunner, parse_url_list};
use gscout::logging;
use gscout::session::SessionManager;
use gscout::storage::{LocalStore, Theme, ThemePreference};
use gscout::table::{Column, ResultTable, SortDirection, SortState};
use gscout::ui::output::{self, AnalyticsReport};
use gscout::ui::{
    Cli, Commands, InspectArgs, Palette, ProgressReporter, QueryArgs, cli_to_config,
    validate_cli_args,
};

use std::io::Read;
use std::pin::pin;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            let exit_code = if e.is_auth() {
                exit_codes::AUTH_REQUIRED
            } else {
                exit_codes::FAILURE
            };
            std::process::exit(exit_code);
        }
    }
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub json: bool,
    pub palette: Palette,
}

impl OutputSettings {
    /// Human-oriented status lines go to stderr and only in text mode.
    pub fn should_show_status(&self) -> bool {
        !self.quiet && !self.json
    }
}

pub async fn run(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);
    if !cli_config.quiet {
        for warning in validate_cli_args(cli) {
            eprintln!("Warning: {warning}");
        }
    }

    let store = LocalStore::new(config.store_path());
    let preference = ThemePreference::new(store.clone());

    if let Commands::Theme { mode } = &cli.command {
        return run_theme(&preference, mode.as_deref(), config.is_json_output());
    }

    let theme = preference.load().unwrap_or_else(|e| {
        logging::log_error("Could not read theme preference", Some(&e));
        Theme::default()
    });
    let settings = OutputSettings {
        quiet: cli_config.quiet,
        json: config.is_json_output(),
        palette: Palette::for_theme(theme),
    };

    let identity = GoogleIdentity::from_config(&config, store)?.with_token(cli.token.clone());
    let mut session = SessionManager::new(identity);

    match &cli.command {
        Commands::Login => {
            let signed_in = session.login().await?;
            if settings.json {
                output::display_user(signed_in.user(), true, &settings.palette);
            } else if !settings.quiet {
                println!("Signed in as {}", signed_in.user().email);
            }
            Ok(exit_codes::SUCCESS)
        }
        Commands::Logout => {
            session.restore().await;
            session.logout().await?;
            if settings.should_show_status() {
                println!("Signed out");
            }
            Ok(exit_codes::SUCCESS)
        }
        Commands::Whoami => {
            let signed_in = session
                .restore()
                .await
                .ok_or_else(not_signed_in)?;
            output::display_user(signed_in.user(), settings.json, &settings.palette);
            Ok(exit_codes::SUCCESS)
        }
        Commands::Sites => {
            let token = require_token(&mut session).await?;
            let client = SearchConsoleClient::from_config(&config)?;
            let sites = client.list_sites(&token).await?;
            output::display_sites(&sites, settings.json, &settings.palette);
            Ok(exit_codes::SUCCESS)
        }
        Commands::Query(args) => {
            let token = require_token(&mut session).await?;
            run_query(args, &token, &config, &settings).await
        }
        Commands::Inspect(args) => {
            let token = require_token(&mut session).await?;
            run_inspect(args, &token, &config, &settings).await
        }
        Commands::Theme { .. } => Ok(exit_codes::SUCCESS),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

fn not_signed_in() -> GscoutError {
    GscoutError::Auth(format!(
        "Not signed in. Run `gscout login` or pass --token with the {} scopes.",
        error_messages::REQUIRED_SCOPES
    ))
}

async fn require_token(session: &mut SessionManager<GoogleIdentity>) -> Result<String> {
    session
        .restore()
        .await
        .map(|s| s.token().to_string())
        .ok_or_else(not_signed_in)
}

fn run_theme(preference: &ThemePreference, mode: Option<&str>, json: bool) -> Result<i32> {
    let theme = match mode {
        Some("toggle") => preference.toggle()?,
        Some(value) => {
            let theme: Theme = value.parse()?;
            preference.set(theme)?;
            theme
        }
        None => preference.load()?,
    };

    if json {
        println!("{}", serde_json::json!({ "theme": theme.to_string() }));
    } else {
        println!("{theme}");
    }
    Ok(exit_codes::SUCCESS)
}

/// Build the date range from `--days` or `--start/--end`
pub fn resolve_date_range(args: &QueryArgs, config: &Config) -> Result<DateRange> {
    match (&args.start, &args.end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => Ok(DateRange::last_days_from_now(
            args.days.unwrap_or_else(|| config.default_days()),
        )),
    }
}

/// Table with the requested sort and filters; rows are filled in after the fetch.
pub fn build_table(args: &QueryArgs) -> Result<ResultTable> {
    let mut table = ResultTable::default();
    for spec in &args.filters {
        table.filters_mut().add_spec(spec)?;
    }
    if let Some(ref column) = args.sort {
        let column: Column = column.parse()?;
        let direction = if args.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        table.set_sort(Some(SortState::new(column, direction)));
    }
    Ok(table)
}

async fn run_query(
    args: &QueryArgs,
    token: &str,
    config: &Config,
    settings: &OutputSettings,
) -> Result<i32> {
    // Reject bad input before any network call
    let date_range = resolve_date_range(args, config)?;
    let mut table = build_table(args)?;
    let export_format = args
        .export
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?;

    let client = SearchConsoleClient::from_config(config)?;
    let query = AnalyticsQuery::new(date_range.clone())
        .with_dimensions(args.dimensions.clone())
        .with_row_limit(config.row_limit());
    let rows = client.query_analytics(token, &args.site, &query).await?;
    logging::log_analytics_fetched(&args.site, rows.len());

    table.replace_rows(rows);
    let view = table.view();

    let report = AnalyticsReport {
        site: &args.site,
        date_range: &date_range,
        fetched: table.rows().len(),
        sort: table.sort_state(),
        filters: table.filters().conditions(),
        rows: &view,
    };
    output::display_analytics(&report, settings.json, &settings.palette);

    if let Some(format) = export_format {
        let exporter = Exporter::new(config.export_dir());
        report_export(exporter.export_analytics(&args.site, &view, format)?, settings);
    }

    Ok(exit_codes::SUCCESS)
}

fn read_url_input(file: Option<&str>) -> Result<String> {
    match file {
        None | Some("-") => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            GscoutError::Validation(format!("Could not read URL list '{path}': {e}"))
        }),
    }
}

async fn run_inspect(
    args: &InspectArgs,
    token: &str,
    config: &Config,
    settings: &OutputSettings,
) -> Result<i32> {
    let export_format = args
        .export
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?;
    let urls = parse_url_list(&read_url_input(args.file.as_deref())?);
    if urls.is_empty() {
        if settings.should_show_status() {
            eprintln!("No URLs to inspect");
        }
        return Ok(exit_codes::SUCCESS);
    }

    let client = SearchConsoleClient::from_config(config)?;
    let runner = InspectionRunner::new(Arc::new(client))
        .with_delay(config.inspection_delay_duration());

    let cancel = CancelHandle::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    logging::log_inspection_start(&args.site, urls.len());
    let started = Instant::now();
    let progress = ProgressReporter::new(
        settings.should_show_status() && !args.no_progress,
        urls.len(),
    );

    let mut snapshots = pin!(runner.run(token, &args.site, &urls, cancel.clone()));
    let mut results: Vec<InspectionResult> = Vec::new();
    while let Some(snapshot) = snapshots.next().await {
        let last = snapshot
            .progress
            .current
            .checked_sub(1)
            .and_then(|i| snapshot.items.get(i));
        progress.update(snapshot.progress, last);
        results = snapshot.items;
    }
    interrupt.abort();

    let failed = output::count_failed(&results);
    if cancel.is_cancelled() {
        progress.abandon("Inspection cancelled");
    } else {
        progress.finish(failed, results.len());
    }
    logging::log_inspection_complete(results.len(), failed, started.elapsed().as_millis());

    output::display_inspection(&args.site, &results, settings.json, &settings.palette);

    if let Some(format) = export_format {
        let exporter = Exporter::new(config.export_dir());
        report_export(exporter.export_inspection(&args.site, &results, format)?, settings);
    }

    Ok(if cancel.is_cancelled() {
        exit_codes::INTERRUPTED
    } else if failed > 0 {
        exit_codes::FAILURE
    } else {
        exit_codes::SUCCESS
    })
}

fn report_export(written: Option<std::path::PathBuf>, settings: &OutputSettings) {
    if settings.quiet {
        return;
    }
    match written {
        Some(path) => eprintln!("Exported to {}", path.display()),
        None => eprintln!("Nothing to export"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn query_args() -> QueryArgs {
        QueryArgs {
            site: "https://example.com/".to_string(),
            ..QueryArgs::default()
        }
    }

    #[test]
    fn test_not_signed_in_names_required_scopes() {
        let err = not_signed_in();
        assert!(err.is_auth());
        assert!(err.to_string().contains("userinfo.email"));
    }

    #[test]
    fn test_load_and_merge_config_no_config_flag() {
        let cli_config = CliConfig {
            no_config: true,
            timeout: Some(12),
            ..CliConfig::default()
        };
        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.timeout, Some(12));
    }

    #[test]
    fn test_load_and_merge_config_with_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "row_limit = 250\ninspection_delay = 100").unwrap();

        let cli_config = CliConfig {
            config_file: Some(file.path().to_string_lossy().to_string()),
            inspection_delay: Some(0),
            ..CliConfig::default()
        };
        let config = load_and_merge_config(&cli_config).unwrap();

        assert_eq!(config.row_limit(), 250);
        assert_eq!(config.inspection_delay, Some(0));
    }

    #[test]
    fn test_load_and_merge_config_rejects_invalid_cli_values() {
        let cli_config = CliConfig {
            no_config: true,
            row_limit: Some(0),
            ..CliConfig::default()
        };
        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_resolve_date_range_custom() {
        let args = QueryArgs {
            start: Some("2024-02-01".to_string()),
            end: Some("2024-02-29".to_string()),
            ..query_args()
        };
        let range = resolve_date_range(&args, &Config::default()).unwrap();
        assert_eq!(range.start_date(), "2024-02-01");
        assert_eq!(range.end_date(), "2024-02-29");
    }

    #[test]
    fn test_resolve_date_range_reversed_is_error() {
        let args = QueryArgs {
            start: Some("2024-03-01".to_string()),
            end: Some("2024-02-01".to_string()),
            ..query_args()
        };
        assert!(resolve_date_range(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_build_table_sort_and_filters() {
        let args = QueryArgs {
            sort: Some("position".to_string()),
            asc: true,
            filters: vec!["clicks:gt:6".to_string()],
            ..query_args()
        };
        let table = build_table(&args).unwrap();

        assert_eq!(
            table.sort_state(),
            Some(SortState::new(Column::Position, SortDirection::Asc))
        );
        assert_eq!(table.filters().conditions().len(), 1);
    }

    #[test]
    fn test_build_table_rejects_bad_filter() {
        let args = QueryArgs {
            filters: vec!["keys:regex:([".to_string()],
            ..query_args()
        };
        assert!(build_table(&args).is_err());
    }

    #[test]
    fn test_output_settings_status() {
        let settings = OutputSettings {
            quiet: false,
            json: true,
            palette: Palette::default(),
        };
        assert!(!settings.should_show_status());
    }
}
