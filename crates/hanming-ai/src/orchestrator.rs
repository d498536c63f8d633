use crate::completion_provider::CompletionProvider;
use crate::notifier::{AnalysisEvent, AnalysisNotifier, UserFacingError};
use crate::prompt_builder::PromptBuilder;
use crate::tasks;
use crate::validator::ResponseValidator;
use hanming_core::{
    AnalysisCategory, AnalysisRequestSpec, AnalysisSettings, CompositeAnalysis, FailureKind,
    NameProfile, Recommendation, Resolved, Result, ResultSource,
};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Build, submit and validate a single request. Never fails.
pub async fn resolve_request(
    provider: &dyn CompletionProvider,
    spec: &AnalysisRequestSpec,
) -> Resolved {
    let prompt = PromptBuilder::build(spec);
    debug!(
        task = spec.task_id(),
        provider = provider.provider_name(),
        "Issuing analysis request"
    );
    let result = provider.complete(&prompt).await;
    ResponseValidator::resolve(spec, result)
}

/// The four category requests run concurrently, then the optional
/// recommendations follow-up embeds their values. Touches no shared state.
pub async fn compose_analysis(
    provider: &dyn CompletionProvider,
    profile: &NameProfile,
    include_recommendations: bool,
) -> CompositeAnalysis {
    let linguistic_spec = tasks::category(AnalysisCategory::Linguistic, profile);
    let cultural_spec = tasks::category(AnalysisCategory::Cultural, profile);
    let semantic_spec = tasks::category(AnalysisCategory::Semantic, profile);
    let modern_spec = tasks::category(AnalysisCategory::ModernContext, profile);

    let (linguistic, cultural, semantic, modern_context) = tokio::join!(
        resolve_request(provider, &linguistic_spec),
        resolve_request(provider, &cultural_spec),
        resolve_request(provider, &semantic_spec),
        resolve_request(provider, &modern_spec),
    );

    let (recommendation, recommendation_source) = if include_recommendations {
        let spec = tasks::recommendations(
            &profile.name,
            [
                (AnalysisCategory::Semantic, &semantic.value),
                (AnalysisCategory::Cultural, &cultural.value),
                (AnalysisCategory::Linguistic, &linguistic.value),
                (AnalysisCategory::ModernContext, &modern_context.value),
            ],
        );
        let (recommendation, source) =
            recommendation_view(&spec, resolve_request(provider, &spec).await);
        (recommendation, Some(source))
    } else {
        (Recommendation::default(), None)
    };

    CompositeAnalysis {
        name: profile.name.clone(),
        linguistic,
        cultural,
        semantic,
        modern_context,
        recommendation,
        recommendation_source,
    }
}

/// Coordinates the requests behind one comprehensive analysis and owns the
/// single "current analysis" slot.
///
/// Each trigger takes a generation number. A run that finishes after a newer
/// trigger started still returns its composite to its caller, but it is
/// neither stored nor broadcast.
pub struct AnalysisOrchestrator {
    provider: Arc<dyn CompletionProvider>,
    notifier: AnalysisNotifier,
    settings: AnalysisSettings,
    generation: AtomicU64,
    current: RwLock<Option<(u64, Arc<CompositeAnalysis>)>>,
    /// Serializes the supersede check, store and broadcast
    publish_lock: Mutex<()>,
}

impl AnalysisOrchestrator {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        notifier: AnalysisNotifier,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            provider,
            notifier,
            settings,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
            publish_lock: Mutex::new(()),
        }
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    pub fn notifier(&self) -> &AnalysisNotifier {
        &self.notifier
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AnalysisEvent> {
        self.notifier.subscribe()
    }

    /// The most recently published composite, if any
    pub fn current(&self) -> Option<Arc<CompositeAnalysis>> {
        self.current.read().as_ref().map(|(_, analysis)| analysis.clone())
    }

    pub fn current_generation(&self) -> Option<u64> {
        self.current.read().as_ref().map(|(generation, _)| *generation)
    }

    pub async fn resolve(&self, spec: &AnalysisRequestSpec) -> Resolved {
        resolve_request(self.provider.as_ref(), spec).await
    }

    /// Top-level user action. Blank input is the only failure; it is also
    /// reported to the error panel through the notifier.
    pub async fn analyze_name(&self, name: &str) -> Result<CompositeAnalysis> {
        match NameProfile::new(name) {
            Ok(profile) => Ok(self.run_comprehensive(&profile).await),
            Err(e) => {
                self.notifier
                    .publish(AnalysisEvent::Error(UserFacingError::from(&e)));
                Err(e)
            }
        }
    }

    /// Fan out the four category requests, then the recommendations
    /// follow-up. Always resolves with every category present.
    pub async fn run_comprehensive(&self, profile: &NameProfile) -> CompositeAnalysis {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(name = %profile.name, generation, "Starting comprehensive analysis");

        let composite = self.compose(profile).await;
        self.publish(generation, &composite);
        composite
    }

    async fn compose(&self, profile: &NameProfile) -> CompositeAnalysis {
        compose_analysis(
            self.provider.as_ref(),
            profile,
            self.settings.include_recommendations,
        )
        .await
    }

    fn publish(&self, generation: u64, composite: &CompositeAnalysis) {
        let _guard = self.publish_lock.lock();

        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            info!(generation, latest, "Discarding superseded analysis");
            return;
        }

        let analysis = Arc::new(composite.clone());
        *self.current.write() = Some((generation, analysis.clone()));

        info!(
            generation,
            fallbacks = composite.fallback_count(),
            "Analysis completed"
        );
        self.notifier.publish(AnalysisEvent::Completed {
            generation,
            analysis,
        });
    }
}

/// A live payload whose lists have the wrong types counts as a schema mismatch.
fn recommendation_view(
    spec: &AnalysisRequestSpec,
    resolved: Resolved,
) -> (Recommendation, ResultSource) {
    match serde_json::from_value::<Recommendation>(resolved.value) {
        Ok(recommendation) => (recommendation, resolved.source),
        Err(e) => {
            warn!(
                task = spec.task_id(),
                "Recommendations do not fit typed view, substituting default: {}",
                e
            );
            (
                serde_json::from_value(spec.default_value().clone()).unwrap_or_default(),
                ResultSource::Fallback(FailureKind::SchemaMismatch),
            )
        }
    }
}
