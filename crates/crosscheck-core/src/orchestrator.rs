//! Query orchestration.
//!
//! One run sends the query to all five providers at once and reveals the
//! results in two phases:
//!
//! 1. the fact-check panel, as soon as the fact-check call settles;
//! 2. the four answer panels, once all four calls have settled.
//!
//! Every call is driven from the caller's task. Nothing is spawned, so the
//! providers only need to be `Sync` and the sink can be a plain `&mut`.

use std::fmt;
use std::pin::pin;
use std::time::Instant;

use futures::future::{self, Either};

use crate::config::{Config, CredentialReport};
use crate::factcheck::build_summary;
use crate::presentation::{
    format_search_results, format_text_response, FactCheckPanel, PanelContent, PresentationSink,
    SourceId, FACT_CHECK_UNAVAILABLE, REQUEST_FAILED,
};
use crate::providers::{
    ChatClient, ClaimClient, ClaudeClient, FactCheckClient, GeminiClient, GoogleSearchClient,
    OpenAIClient, SearchClient,
};
use crate::Query;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Dispatching,
    AwaitingFactCheck,
    AwaitingOthers,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Dispatching => "dispatching",
            RunPhase::AwaitingFactCheck => "awaiting_fact_check",
            RunPhase::AwaitingOthers => "awaiting_others",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five provider clients a run fans out to.
pub struct Sources {
    pub gemini: ChatClient,
    pub google: SearchClient,
    pub claude: ChatClient,
    pub chatgpt: ChatClient,
    pub fact_check: ClaimClient,
}

impl Sources {
    /// Builds the real HTTP clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            gemini: Box::new(GeminiClient::from_config(&config.gemini)),
            google: Box::new(GoogleSearchClient::from_config(&config.google)),
            claude: Box::new(ClaudeClient::from_config(&config.anthropic)),
            chatgpt: Box::new(OpenAIClient::from_config(&config.openai)),
            fact_check: Box::new(FactCheckClient::from_config(&config.fact_check)),
        }
    }
}

/// Coordinates one query across all sources.
pub struct QueryOrchestrator {
    sources: Sources,
    credentials: CredentialReport,
}

impl QueryOrchestrator {
    /// Creates an orchestrator over the given clients.
    ///
    /// No credential check is performed; see [`QueryOrchestrator::from_config`].
    pub fn new(sources: Sources) -> Self {
        Self {
            sources,
            credentials: CredentialReport::default(),
        }
    }

    /// Creates an orchestrator from configuration, checking credentials once.
    ///
    /// Missing credentials are logged and recorded, not fatal: the affected
    /// providers fail their own calls while the rest keep working.
    pub fn from_config(config: &Config) -> Self {
        let credentials = config.check_credentials();
        for credential in &credentials.missing {
            tracing::warn!(
                credential = credential.label(),
                config_key = credential.config_key(),
                env_var = credential.env_var(),
                "credential not configured"
            );
        }

        Self {
            sources: Sources::from_config(config),
            credentials,
        }
    }

    /// Credentials found missing at construction.
    pub fn credentials(&self) -> &CredentialReport {
        &self.credentials
    }

    /// Handles raw user input. Blank input is ignored.
    ///
    /// Returns whether a run took place.
    pub async fn submit(&self, input: &str, sink: &mut dyn PresentationSink) -> bool {
        match Query::new(input) {
            Ok(query) => {
                self.run(&query, sink).await;
                true
            }
            Err(_) => {
                tracing::debug!("ignoring blank query");
                false
            }
        }
    }

    /// Runs one query to completion.
    ///
    /// Every panel reaches a terminal state and the input is re-enabled no
    /// matter how many providers fail.
    pub async fn run(&self, query: &Query, sink: &mut dyn PresentationSink) {
        let started = Instant::now();
        transition(sink, RunPhase::Dispatching);
        tracing::info!(query = %query, "dispatching query to all sources");

        sink.set_input_enabled(false);
        for source in SourceId::ALL {
            sink.show_loading(source, source.loading_message());
        }
        sink.show_fact_check(FactCheckPanel::Loading);

        let fact_check = self.sources.fact_check.fetch(query);
        let others = pin!(async {
            tokio::join!(
                self.sources.gemini.fetch(query),
                self.sources.google.fetch(query),
                self.sources.claude.fetch(query),
                self.sources.chatgpt.fetch(query),
            )
        });

        // First barrier: the fact-check call alone. The other four keep
        // making progress while we wait; if they finish first their
        // outcomes are held back until the fact-check panel is updated.
        transition(sink, RunPhase::AwaitingFactCheck);
        let (fact_outcome, others) = match future::select(fact_check, others).await {
            Either::Left((outcome, pending)) => (outcome, Either::Left(pending)),
            Either::Right((settled, fact_check)) => (fact_check.await, Either::Right(settled)),
        };

        match fact_outcome {
            Ok(claims) => {
                let summary = build_summary(&claims);
                tracing::info!(
                    claims = claims.len(),
                    truth_score = %summary.truth_score,
                    coverage = summary.coverage_score,
                    "fact check settled"
                );
                sink.show_fact_check(FactCheckPanel::Ready(summary));
            }
            Err(e) => {
                tracing::warn!(provider = self.sources.fact_check.name(), error = %e, "fact check failed");
                sink.show_fact_check(FactCheckPanel::Unavailable(FACT_CHECK_UNAVAILABLE.to_string()));
            }
        }

        // Second barrier: all-settle over the remaining four.
        transition(sink, RunPhase::AwaitingOthers);
        let (gemini, google, claude, chatgpt) = match others {
            Either::Left(pending) => pending.await,
            Either::Right(settled) => settled,
        };

        present(sink, SourceId::Gemini, self.sources.gemini.name(), gemini, format_text_response);
        present(sink, SourceId::Google, self.sources.google.name(), google, format_search_results);
        present(sink, SourceId::Claude, self.sources.claude.name(), claude, format_text_response);
        present(sink, SourceId::ChatGpt, self.sources.chatgpt.name(), chatgpt, format_text_response);

        sink.set_input_enabled(true);
        tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "query finished");
        transition(sink, RunPhase::Idle);
    }
}

/// Status text for a failed call: the error's message, or [`REQUEST_FAILED`]
/// when it has none.
pub fn failure_message(err: &dyn fmt::Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        REQUEST_FAILED.to_string()
    } else {
        message
    }
}

fn present<T, E: fmt::Display>(
    sink: &mut dyn PresentationSink,
    source: SourceId,
    provider: &str,
    outcome: Result<T, E>,
    formatter: fn(T) -> PanelContent,
) {
    match outcome {
        Ok(payload) => {
            tracing::debug!(source = source.key(), "source settled");
            sink.show_result(source, formatter(payload));
        }
        Err(e) => {
            tracing::warn!(source = source.key(), provider, error = %e, "source failed");
            sink.show_error(source, &failure_message(&e));
        }
    }
}

fn transition(sink: &mut dyn PresentationSink, phase: RunPhase) {
    tracing::debug!(phase = phase.as_str(), "run phase");
    sink.phase_changed(phase);
}
