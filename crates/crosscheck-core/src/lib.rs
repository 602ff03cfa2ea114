pub mod config;
pub mod factcheck;
pub mod orchestrator;
pub mod presentation;
pub mod providers;
pub mod query;

pub use config::{Config, ConfigError, Credential, CredentialReport};
pub use factcheck::{build_summary, map_rating_to_score, Claim, FactCheckSummary, TruthScore};
pub use orchestrator::{QueryOrchestrator, RunPhase, Sources};
pub use presentation::{FactCheckPanel, PanelContent, PresentationSink, SourceId};
pub use providers::{ProviderClient, ProviderError, SearchItem};
pub use query::{Query, QueryError};
