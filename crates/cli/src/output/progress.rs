//! Spinner shown on stderr while a sweep runs
//!
//! Only table output gets a spinner; JSON and CSV stay clean for pipes.

use super::{OutputConfig, OutputFormat};

/// Spinner wrapper
#[derive(Debug)]
pub struct Spinner {
    bar: Option<indicatif::ProgressBar>,
}

impl Spinner {
    /// Start a spinner with the given message
    pub fn start(config: &OutputConfig, message: &str) -> Self {
        let bar = if config.format != OutputFormat::Table {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Finish and clear the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_hidden_for_machine_formats() {
        for format in [OutputFormat::Json, OutputFormat::Csv] {
            let config = OutputConfig {
                format,
                ..Default::default()
            };
            assert!(!Spinner::start(&config, "Scanning").is_visible());
        }
    }

    #[test]
    fn test_spinner_visible_for_table() {
        let spinner = Spinner::start(&OutputConfig::default(), "Scanning");
        assert!(spinner.is_visible());
        spinner.finish_and_clear();
    }
}
