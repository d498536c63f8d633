//! Independent panels that issue their own requests keyed by user text.

use crate::completion_provider::CompletionProvider;
use crate::orchestrator::resolve_request;
use crate::tasks;
use hanming_core::{
    AnalysisRequestSpec, FailureKind, HanmingError, Resolved, Result, ResultSource,
    BLANK_NAME_MESSAGE,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// A typed panel result and where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelResult<T> {
    pub value: T,
    pub source: ResultSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterAnalysis {
    pub meanings: Vec<String>,
    pub etymology: String,
    pub usage_frequency: f64,
    pub common_names: Vec<String>,
    pub stroke_count: u32,
    pub radical: String,
    pub related_characters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedCharacters {
    pub similar_meaning: Vec<String>,
    pub common_combinations: Vec<String>,
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameCulturalAnalysis {
    pub historical_significance: Vec<HistoricalSignificance>,
    pub literary_connections: Vec<LiteraryConnection>,
    pub modern_interpretation: ModernInterpretation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalSignificance {
    pub era: String,
    pub relevance: String,
    pub cultural_elements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteraryConnection {
    pub source: String,
    pub reference: String,
    pub meaning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModernInterpretation {
    pub contemporary_relevance: String,
    pub social_implications: Vec<String>,
    pub global_context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkData {
    pub nodes: Vec<NetworkNode>,
    pub relationships: Vec<NetworkRelationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: String,
    pub character: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub meanings: Vec<String>,
    pub cultural_context: Vec<String>,
    pub usage: Vec<UsageEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageEntry {
    pub context: String,
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkRelationship {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    pub strength: f64,
    pub description: String,
}

impl NetworkData {
    /// Drop duplicate nodes and relationships with unknown endpoints, and
    /// clamp strengths to `[0, 1]`.
    pub fn sanitized(self) -> Self {
        let mut seen = HashSet::new();
        let nodes: Vec<NetworkNode> = self
            .nodes
            .into_iter()
            .filter(|node| seen.insert(node.id.clone()))
            .collect();

        let relationships = self
            .relationships
            .into_iter()
            .filter(|rel| seen.contains(&rel.source) && seen.contains(&rel.target))
            .map(|mut rel| {
                rel.strength = if rel.strength.is_nan() {
                    0.0
                } else {
                    rel.strength.clamp(0.0, 1.0)
                };
                rel
            })
            .collect();

        Self {
            nodes,
            relationships,
        }
    }
}

/// Exactly one character after trimming
pub fn single_character(text: &str) -> Result<char> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => Err(HanmingError::InvalidInput(
            "请输入一个汉字 Please enter a character".to_string(),
        )),
        _ => Err(HanmingError::InvalidInput(format!(
            "请只输入一个汉字 Please enter exactly one character, got '{}'",
            text.trim()
        ))),
    }
}

fn non_blank(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HanmingError::InvalidInput(BLANK_NAME_MESSAGE.to_string()));
    }
    Ok(trimmed)
}

/// Convert a resolved value into its typed view. A live payload whose field
/// types do not fit is treated as a schema mismatch.
fn typed<T>(spec: &AnalysisRequestSpec, resolved: Resolved) -> PanelResult<T>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_value::<T>(resolved.value) {
        Ok(value) => PanelResult {
            value,
            source: resolved.source,
        },
        Err(e) => {
            warn!(
                task = spec.task_id(),
                "Payload does not fit typed view, substituting default: {}",
                e
            );
            PanelResult {
                value: serde_json::from_value(spec.default_value().clone()).unwrap_or_default(),
                source: ResultSource::Fallback(FailureKind::SchemaMismatch),
            }
        }
    }
}

/// Character detail and related-character lookups
pub struct CharacterExplorer {
    provider: Arc<dyn CompletionProvider>,
}

impl CharacterExplorer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn explore(&self, text: &str) -> Result<PanelResult<CharacterAnalysis>> {
        let character = single_character(text)?;
        let spec = tasks::character_analysis(character);
        let resolved = resolve_request(self.provider.as_ref(), &spec).await;
        Ok(typed(&spec, resolved))
    }

    pub async fn related(&self, text: &str) -> Result<PanelResult<RelatedCharacters>> {
        let character = single_character(text)?;
        let spec = tasks::related_characters(character);
        let resolved = resolve_request(self.provider.as_ref(), &spec).await;
        Ok(typed(&spec, resolved))
    }
}

pub struct CulturalContextPanel {
    provider: Arc<dyn CompletionProvider>,
}

impl CulturalContextPanel {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn analyze(&self, name: &str) -> Result<PanelResult<NameCulturalAnalysis>> {
        let spec = tasks::name_cultural_context(non_blank(name)?);
        let resolved = resolve_request(self.provider.as_ref(), &spec).await;
        Ok(typed(&spec, resolved))
    }
}

pub struct MeaningNetworkPanel {
    provider: Arc<dyn CompletionProvider>,
}

impl MeaningNetworkPanel {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn build(&self, text: &str) -> Result<PanelResult<NetworkData>> {
        let character = single_character(text)?;
        let spec = tasks::meaning_network(character);
        let resolved = resolve_request(self.provider.as_ref(), &spec).await;
        let PanelResult { value, source } = typed::<NetworkData>(&spec, resolved);
        Ok(PanelResult {
            value: value.sanitized(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_character() {
        assert_eq!(single_character(" 智 ").unwrap(), '智');
        assert!(single_character("").is_err());
        assert!(single_character("智华").is_err());
    }

    #[test]
    fn test_network_sanitize() {
        let data: NetworkData = serde_json::from_value(json!({
            "nodes": [{"id": "智"}, {"id": "慧"}, {"id": "智"}],
            "relationships": [
                {"source": "智", "target": "慧", "strength": 1.7},
                {"source": "智", "target": "明", "strength": 0.5},
                {"source": "慧", "target": "智", "strength": -0.2}
            ]
        }))
        .unwrap();

        let clean = data.sanitized();
        assert_eq!(clean.nodes.len(), 2);
        assert_eq!(clean.relationships.len(), 2);
        assert_eq!(clean.relationships[0].strength, 1.0);
        assert_eq!(clean.relationships[1].strength, 0.0);
    }

    #[test]
    fn test_typed_view_mismatch_falls_back() {
        let spec = tasks::character_analysis('智');
        let result: PanelResult<CharacterAnalysis> = typed(
            &spec,
            Resolved::live(json!({
                "meanings": ["wisdom"],
                "etymology": "",
                "stroke_count": "twelve",
                "radical": "日"
            })),
        );
        assert_eq!(result.source, ResultSource::Fallback(FailureKind::SchemaMismatch));
        assert_eq!(result.value, CharacterAnalysis::default());
    }
}
