use crate::config::Config;
use crate::core::types::{InspectionResult, InspectionStatus};
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // try_init: a second initialization (tests, embedding) is not fatal
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: api_base={}, inspection_api_base={}, timeout={}s",
        config.api_base(),
        config.inspection_api_base(),
        config.timeout_duration().as_secs()
    );
    info!(
        "Inspection delay={}ms, row_limit={}",
        config.inspection_delay_duration().as_millis(),
        config.row_limit()
    );
}

/// Log the start of an inspection run
pub fn log_inspection_start(site_url: &str, url_count: usize) {
    info!("Inspecting {url_count} URL(s) on {site_url}");
}

/// Log one finished inspection item
pub fn log_inspection_result(item: &InspectionResult) {
    match item.status {
        InspectionStatus::Success => debug!("✓ {} -> {}", item.url, item.verdict),
        InspectionStatus::Error => debug!("✗ {} -> {}", item.url, item.coverage_state),
        InspectionStatus::Loading => debug!("? {} -> pending", item.url),
    }
}

/// Log items skipped because a run was cancelled
pub fn log_inspection_cancelled(skipped: usize) {
    warn!("Inspection cancelled, {skipped} URL(s) skipped");
}

/// Log inspection completion
pub fn log_inspection_complete(total: usize, failed: usize, duration_ms: u128) {
    if failed == 0 {
        info!("✅ Inspection complete: {total}/{total} URLs inspected ({duration_ms}ms)");
    } else {
        warn!(
            "❌ Inspection complete: {}/{} URLs inspected, {} failed ({}ms)",
            total - failed,
            total,
            failed,
            duration_ms
        );
    }
}

/// Log an analytics fetch
pub fn log_analytics_fetched(site_url: &str, rows: usize) {
    info!("Fetched {rows} row(s) for {site_url}");
}

/// Log a written export file
pub fn log_export_written(path: &Path, records: usize) {
    info!("Exported {records} record(s) to {}", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_logger_initialization_twice_does_not_panic() {
        init_logger(true, false);
        init_logger(false, true);
    }

    #[test]
    fn test_log_config_info() {
        log_config_info(&Config::default());
    }

    #[test]
    fn test_log_inspection_result_all_states() {
        let mut ok = InspectionResult::pending("https://example.com/a");
        log_inspection_result(&ok);
        ok.record_error("boom");
        log_inspection_result(&ok);
    }

    #[test]
    fn test_log_inspection_complete() {
        log_inspection_complete(3, 0, 1500);
        log_inspection_complete(3, 1, 1500);
    }

    #[test]
    fn test_log_error_with_source() {
        let err = io::Error::new(io::ErrorKind::NotFound, "missing");
        log_error("Could not read input", Some(&err));
        log_error("Plain message", None);
    }
}
