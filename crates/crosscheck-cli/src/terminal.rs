//! Terminal presentation: prints each panel as soon as it settles.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crosscheck_core::{FactCheckPanel, PanelContent, PresentationSink, RunPhase, SourceId};

/// Output format for answer panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
}

/// A [`PresentationSink`] writing to stdout with a spinner while busy.
pub struct TerminalSink {
    format: OutputFormat,
    spinner: Option<ProgressBar>,
}

impl TerminalSink {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            spinner: None,
        }
    }

    fn print(&self, text: String) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        }
    }

    fn panel(&self, title: &str, body: &str) {
        self.print(format!("\n== {} ==\n{}", title, body));
    }
}

impl PresentationSink for TerminalSink {
    fn set_input_enabled(&mut self, enabled: bool) {
        if enabled {
            if let Some(spinner) = self.spinner.take() {
                spinner.finish_and_clear();
            }
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn show_loading(&mut self, _source: SourceId, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    fn show_result(&mut self, source: SourceId, content: PanelContent) {
        let body = match self.format {
            OutputFormat::Text => content.to_string(),
            OutputFormat::Html => content.to_html(),
        };
        self.panel(source.display_name(), &body);
    }

    fn show_error(&mut self, source: SourceId, message: &str) {
        self.panel(source.display_name(), &format!("error: {}", message));
    }

    fn show_fact_check(&mut self, panel: FactCheckPanel) {
        let claims = match (&panel, self.format) {
            (FactCheckPanel::Loading, _) => return,
            (_, OutputFormat::Html) => panel.claims_html(),
            (FactCheckPanel::Ready(summary), OutputFormat::Text) => {
                if summary.items.is_empty() {
                    summary.message.clone().unwrap_or_default()
                } else {
                    summary
                        .items
                        .iter()
                        .map(|item| item.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            (FactCheckPanel::Unavailable(message), OutputFormat::Text) => message.clone(),
        };

        self.panel(
            "Fact check",
            &format!(
                "Truth score: {}\nCoverage:    {}\n{}",
                panel.truth_score(),
                panel.coverage_score(),
                claims
            ),
        );
    }

    fn phase_changed(&mut self, phase: RunPhase) {
        let Some(spinner) = &self.spinner else {
            return;
        };
        match phase {
            RunPhase::AwaitingFactCheck => spinner.set_message("Waiting for fact checks..."),
            RunPhase::AwaitingOthers => spinner.set_message("Waiting for search and model answers..."),
            _ => {}
        }
    }
}
