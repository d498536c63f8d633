//! Analysis orchestration for Chinese-name analysis: prompt construction, the
//! completion client, fallback validation, the comprehensive-analysis
//! orchestrator and the panels built on the same request contract.

pub mod completion_client;
pub mod completion_provider;
pub mod defaults;
pub mod generator;
pub mod notifier;
pub mod orchestrator;
pub mod panels;
pub mod presentation;
pub mod prompt_builder;
pub mod provider_factory;
pub mod semantic;
pub mod tasks;
pub mod validator;

pub use completion_client::{HttpCompletionClient, HttpCompletionConfig};
pub use completion_provider::*;
pub use generator::{GeneratedName, NameGenerator};
pub use notifier::{AnalysisEvent, AnalysisNotifier, AnalysisSubscriber, UserFacingError};
pub use orchestrator::{compose_analysis, resolve_request, AnalysisOrchestrator};
pub use panels::{
    CharacterAnalysis, CharacterExplorer, CulturalContextPanel, MeaningNetworkPanel,
    NameCulturalAnalysis, NetworkData, PanelResult, RelatedCharacters,
};
pub use presentation::{AnalysisTab, GraphDescription, PresentationAdapter, SummaryCards, TabContent};
pub use prompt_builder::PromptBuilder;
pub use provider_factory::CompletionProviderFactory;
pub use semantic::{SemanticModel, SemanticReport};
pub use validator::ResponseValidator;
