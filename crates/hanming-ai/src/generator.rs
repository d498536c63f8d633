use crate::completion_provider::CompletionProvider;
use crate::defaults;
use crate::orchestrator::{compose_analysis, resolve_request};
use crate::semantic::{CompositionScore, SemanticModel};
use crate::tasks;
use hanming_core::{AnalysisSettings, CompositeAnalysis, NameProfile, ResultSource};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Outcome of the three-step generation pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedName {
    /// Display name: refined, else enhanced, else base name
    pub name: String,
    /// Base suggestion with enhancement and refinement merged over it
    pub details: Value,
    pub base_source: ResultSource,
    pub enhancement_source: ResultSource,
    pub refinement_source: ResultSource,
    pub composition: CompositionScore,
    /// Comprehensive analysis of `name`
    pub analysis: CompositeAnalysis,
}

/// base name → cultural enhancement → semantic refinement → analysis
pub struct NameGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: SemanticModel,
    settings: AnalysisSettings,
}

impl NameGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            model: SemanticModel::default(),
            settings: AnalysisSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_model(mut self, model: SemanticModel) -> Self {
        self.model = model;
        self
    }

    pub async fn generate(&self, profile: &NameProfile) -> GeneratedName {
        let base = resolve_request(self.provider.as_ref(), &tasks::base_name(profile)).await;
        let base_name = string_field(&base.value, "name")
            .unwrap_or_else(|| string_field(&defaults::base_name(), "name").unwrap_or_default());

        let enhancement =
            resolve_request(self.provider.as_ref(), &tasks::cultural_enhancement(&base_name)).await;
        let details = merge(base.value, enhancement.value);

        let refinement =
            resolve_request(self.provider.as_ref(), &tasks::semantic_refinement(&base_name)).await;
        let details = merge(details, refinement.value);

        let name = ["refinedName", "enhancedName", "name"]
            .iter()
            .find_map(|key| string_field(&details, key))
            .unwrap_or(base_name);

        info!(original = %profile.name, generated = %name, "Name generated");

        // Not published; the orchestrator's current analysis is untouched
        let generated_profile = NameProfile {
            name: name.clone(),
            ..profile.clone()
        };
        let analysis = compose_analysis(
            self.provider.as_ref(),
            &generated_profile,
            self.settings.include_recommendations,
        )
        .await;

        GeneratedName {
            analysis,
            composition: self.model.composition_score(&name),
            name,
            details,
            base_source: base.source,
            enhancement_source: enhancement.source,
            refinement_source: refinement.source,
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Shallow object merge, later keys win. Non-object overlays are ignored.
fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            base.extend(overlay);
            Value::Object(base)
        }
        (base, _) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_later_keys_win() {
        let merged = merge(
            json!({"name": "智华", "meaning": "智慧华彩"}),
            json!({"meaning": "智慧光华", "enhancedName": "智华"}),
        );
        assert_eq!(
            merged,
            json!({"name": "智华", "meaning": "智慧光华", "enhancedName": "智华"})
        );
    }

    #[test]
    fn test_merge_ignores_non_object_overlay() {
        assert_eq!(merge(json!({"a": 1}), json!([1, 2])), json!({"a": 1}));
    }
}
