//! Presentation seam.
//!
//! The orchestrator never renders anything itself; it hands each settled
//! outcome to a [`PresentationSink`]. A browser front end, a terminal, or an
//! in-memory recorder in tests all plug in here.

use std::fmt;

use crate::factcheck::FactCheckSummary;
use crate::orchestrator::RunPhase;
use crate::providers::SearchItem;

/// Placeholder shown for an empty chat answer.
pub const NO_RESPONSE: &str = "No response.";

/// Placeholder shown for an empty result list.
pub const NO_RESULTS: &str = "No results.";

/// Loading text for the fact-check claim list.
pub const FACT_CHECK_LOADING: &str = "Fetching fact checks...";

/// Status shown when the fact-check call fails.
pub const FACT_CHECK_UNAVAILABLE: &str = "Fact check unavailable.";

/// Status shown for a failure that carries no message.
pub const REQUEST_FAILED: &str = "Request failed.";

/// Score placeholder while nothing is known.
pub const SCORE_PLACEHOLDER: &str = "--";

/// The four answer panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Gemini,
    Google,
    Claude,
    ChatGpt,
}

impl SourceId {
    /// Panels in display order.
    pub const ALL: [SourceId; 4] = [
        SourceId::Gemini,
        SourceId::Google,
        SourceId::Claude,
        SourceId::ChatGpt,
    ];

    /// Stable identifier (matches the page's element ids).
    pub fn key(&self) -> &'static str {
        match self {
            SourceId::Gemini => "gemini",
            SourceId::Google => "google",
            SourceId::Claude => "claude",
            SourceId::ChatGpt => "chatgpt",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SourceId::Gemini => "Gemini",
            SourceId::Google => "Google",
            SourceId::Claude => "Claude",
            SourceId::ChatGpt => "ChatGPT",
        }
    }

    pub fn loading_message(&self) -> &'static str {
        match self {
            SourceId::Gemini => "Loading Gemini response...",
            SourceId::Google => "Loading Google results...",
            SourceId::Claude => "Loading Claude response...",
            SourceId::ChatGpt => "Loading ChatGPT response...",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Formatted body of a successful answer panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    /// Chat answer text.
    Text(String),
    /// Ordered web results.
    Results(Vec<SearchItem>),
    /// Nothing came back; carries the placeholder to show.
    Empty(&'static str),
}

impl PanelContent {
    /// HTML fragment for the page: line breaks for text, a list for results.
    pub fn to_html(&self) -> String {
        match self {
            PanelContent::Text(text) => html_escape(text).replace('\n', "<br />"),
            PanelContent::Results(items) => {
                let list_items: String = items
                    .iter()
                    .map(|item| {
                        format!(
                            "<li><a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a><br />{}</li>",
                            html_escape(&item.link),
                            html_escape(&item.title),
                            html_escape(&item.snippet)
                        )
                    })
                    .collect();
                format!("<ul>{}</ul>", list_items)
            }
            PanelContent::Empty(message) => {
                format!("<span class=\"status\">{}</span>", html_escape(message))
            }
        }
    }
}

impl fmt::Display for PanelContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelContent::Text(text) => f.write_str(text),
            PanelContent::Results(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "{}. {}", i + 1, item.title)?;
                    writeln!(f, "   {}", item.link)?;
                    write!(f, "   {}", item.snippet)?;
                }
                Ok(())
            }
            PanelContent::Empty(message) => f.write_str(message),
        }
    }
}

/// Formats a chat answer. Blank answers become [`NO_RESPONSE`].
pub fn format_text_response(text: String) -> PanelContent {
    if text.is_empty() {
        PanelContent::Empty(NO_RESPONSE)
    } else {
        PanelContent::Text(text)
    }
}

/// Formats web results. An empty list becomes [`NO_RESULTS`].
pub fn format_search_results(items: Vec<SearchItem>) -> PanelContent {
    if items.is_empty() {
        PanelContent::Empty(NO_RESULTS)
    } else {
        PanelContent::Results(items)
    }
}

/// State of the fact-check area (truth score, coverage score, claim list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactCheckPanel {
    Loading,
    Ready(FactCheckSummary),
    Unavailable(String),
}

impl FactCheckPanel {
    /// Text for the truth score block.
    pub fn truth_score(&self) -> String {
        match self {
            FactCheckPanel::Ready(summary) => summary.truth_score.to_string(),
            _ => SCORE_PLACEHOLDER.to_string(),
        }
    }

    /// Text for the coverage score block.
    pub fn coverage_score(&self) -> String {
        match self {
            FactCheckPanel::Ready(summary) => summary.coverage_display(),
            _ => SCORE_PLACEHOLDER.to_string(),
        }
    }

    /// Claim list as an HTML fragment.
    pub fn claims_html(&self) -> String {
        match self {
            FactCheckPanel::Loading => html_escape(FACT_CHECK_LOADING),
            FactCheckPanel::Ready(summary) => summary.claims_html(),
            FactCheckPanel::Unavailable(message) => html_escape(message),
        }
    }
}

/// Receiver of every user-visible update produced by a run.
///
/// Each panel receives one loading update and then exactly one terminal
/// update (`show_result` or `show_error`) per run.
pub trait PresentationSink {
    /// Enables or disables the query input.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Shows a loading status on an answer panel.
    fn show_loading(&mut self, source: SourceId, message: &str);

    /// Shows a formatted answer.
    fn show_result(&mut self, source: SourceId, content: PanelContent);

    /// Shows a failure status.
    fn show_error(&mut self, source: SourceId, message: &str);

    /// Updates the fact-check area.
    fn show_fact_check(&mut self, panel: FactCheckPanel);

    /// Called on every run phase transition.
    fn phase_changed(&mut self, _phase: RunPhase) {}
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factcheck::{build_summary, Claim};

    fn item(title: &str) -> SearchItem {
        SearchItem {
            title: title.to_string(),
            link: format!("https://example.com/{}", title),
            snippet: format!("about {}", title),
        }
    }

    #[test]
    fn test_text_newlines_become_breaks() {
        let content = format_text_response("line one\nline <two>".to_string());
        assert_eq!(content.to_html(), "line one<br />line &lt;two&gt;");
    }

    #[test]
    fn test_empty_text_placeholder() {
        let content = format_text_response(String::new());
        assert_eq!(content, PanelContent::Empty(NO_RESPONSE));
        assert_eq!(content.to_html(), "<span class=\"status\">No response.</span>");
    }

    #[test]
    fn test_results_list() {
        let html = format_search_results(vec![item("a"), item("b")]).to_html();
        assert!(html.starts_with("<ul><li><a href=\"https://example.com/a\""));
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.ends_with("</li></ul>"));
    }

    #[test]
    fn test_empty_results_placeholder() {
        assert_eq!(format_search_results(vec![]), PanelContent::Empty(NO_RESULTS));
    }

    #[test]
    fn test_results_plain_text() {
        let text = format_search_results(vec![item("a"), item("b")]).to_string();
        assert!(text.starts_with("1. a\n   https://example.com/a\n   about a"));
        assert!(text.contains("2. b"));
    }

    #[test]
    fn test_fact_check_panel_blocks() {
        assert_eq!(FactCheckPanel::Loading.truth_score(), "--");
        assert_eq!(FactCheckPanel::Loading.claims_html(), FACT_CHECK_LOADING);

        let unavailable = FactCheckPanel::Unavailable(FACT_CHECK_UNAVAILABLE.to_string());
        assert_eq!(unavailable.coverage_score(), "--");
        assert_eq!(unavailable.claims_html(), FACT_CHECK_UNAVAILABLE);

        let ready = FactCheckPanel::Ready(build_summary(&[
            Claim::new("x").with_review("True", "P")
        ]));
        assert_eq!(ready.truth_score(), "100%");
        assert_eq!(ready.coverage_score(), "10%");
    }
}
