use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::types::{InspectionResult, InspectionStatus};
use crate::inspection::Progress;

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} URLs inspected {msg}";

/// Progress bar for an inspection run. A disabled reporter ignores every call.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(enabled: bool, total: usize) -> Self {
        if !enabled || total == 0 {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar: Some(bar) }
    }

    pub fn disabled() -> Self {
        Self { bar: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }

    /// Advance to `progress`, showing the most recently finished URL.
    pub fn update(&self, progress: Progress, last: Option<&InspectionResult>) {
        if let Some(ref bar) = self.bar {
            bar.set_position(progress.current as u64);
            if let Some(item) = last {
                let mark = match item.status {
                    InspectionStatus::Success => "✓",
                    InspectionStatus::Error => "✗",
                    InspectionStatus::Loading => "…",
                };
                bar.set_message(format!("{mark} {}", item.url));
            }
        }
    }

    pub fn finish(&self, failed: usize, total: usize) {
        if let Some(ref bar) = self.bar {
            let message = if failed == 0 {
                "✓ All URLs inspected".to_string()
            } else {
                format!("✓ Inspection complete ({failed}/{total} failed)")
            };
            bar.finish_with_message(message);
        }
    }

    pub fn abandon(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }

    /// Print a line above the bar without corrupting it.
    pub fn println(&self, message: &str) {
        match self.bar {
            Some(ref bar) => bar.println(message),
            None => eprintln!("{message}"),
        }
    }
}
