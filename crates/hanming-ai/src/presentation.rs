//! Maps analysis results to render instructions for the view layer.

use crate::panels::NetworkData;
use crate::semantic::SemanticModel;
use hanming_core::{CompositeAnalysis, HanmingError, Recommendation, ResultSource};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinguisticSummary {
    pub tone_pattern: String,
    pub phonetic_harmony: String,
    pub stroke_balance: String,
    pub visual_harmony: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalSummary {
    pub historical_context: String,
    pub modern_significance: String,
    pub social_context: String,
    pub regional_characteristics: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub name: String,
    pub linguistic: LinguisticSummary,
    pub cultural: CulturalSummary,
    pub recommendations: Recommendation,
    pub fallback_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisTab {
    Linguistic,
    Cultural,
    Semantic,
    Modern,
    Visual,
}

impl AnalysisTab {
    pub const ALL: [AnalysisTab; 5] = [
        AnalysisTab::Linguistic,
        AnalysisTab::Cultural,
        AnalysisTab::Semantic,
        AnalysisTab::Modern,
        AnalysisTab::Visual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisTab::Linguistic => "linguistic",
            AnalysisTab::Cultural => "cultural",
            AnalysisTab::Semantic => "semantic",
            AnalysisTab::Modern => "modern",
            AnalysisTab::Visual => "visual",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AnalysisTab::Linguistic => "语言特点 Linguistic Features",
            AnalysisTab::Cultural => "文化特征 Cultural Characteristics",
            AnalysisTab::Semantic => "语义分析 Semantic Analysis",
            AnalysisTab::Modern => "现代语境 Modern Context",
            AnalysisTab::Visual => "视觉分析 Visual Analysis",
        }
    }
}

impl fmt::Display for AnalysisTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisTab {
    type Err = HanmingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| HanmingError::InvalidInput(format!("unknown tab: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabContent {
    pub tab: AnalysisTab,
    pub title: String,
    /// `None` for tabs computed locally
    pub source: Option<ResultSource>,
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub group: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub label: String,
    /// Relationship strength in `[0, 1]`
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphDescription {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

pub struct PresentationAdapter {
    model: SemanticModel,
}

impl Default for PresentationAdapter {
    fn default() -> Self {
        Self::new(SemanticModel::default())
    }
}

impl PresentationAdapter {
    pub fn new(model: SemanticModel) -> Self {
        Self { model }
    }

    pub fn summary(&self, analysis: &CompositeAnalysis) -> SummaryCards {
        let linguistic = &analysis.linguistic.value;
        let cultural = &analysis.cultural.value;

        SummaryCards {
            name: analysis.name.clone(),
            linguistic: LinguisticSummary {
                tone_pattern: text(linguistic, "tonePattern"),
                phonetic_harmony: percent(linguistic, "phoneticHarmony"),
                stroke_balance: percent(linguistic, "strokeBalance"),
                visual_harmony: percent(linguistic, "visualHarmony"),
            },
            cultural: CulturalSummary {
                historical_context: text(cultural, "historicalContext"),
                modern_significance: text(cultural, "modernSignificance"),
                social_context: text(cultural, "socialContext"),
                regional_characteristics: text(cultural, "regionalCharacteristics"),
            },
            recommendations: analysis.recommendation.clone(),
            fallback_count: analysis.fallback_count(),
        }
    }

    /// Tab content comes only from the currently published composite, so a
    /// tab can never mix categories from two triggers.
    pub fn tab_content(
        &self,
        current: Option<&CompositeAnalysis>,
        tab: AnalysisTab,
    ) -> Option<TabContent> {
        let analysis = current?;

        let (source, entries) = match tab {
            AnalysisTab::Linguistic => category_entries(&analysis.linguistic.value, analysis.linguistic.source),
            AnalysisTab::Cultural => category_entries(&analysis.cultural.value, analysis.cultural.source),
            AnalysisTab::Semantic => category_entries(&analysis.semantic.value, analysis.semantic.source),
            AnalysisTab::Modern => {
                category_entries(&analysis.modern_context.value, analysis.modern_context.source)
            }
            AnalysisTab::Visual => (None, self.visual_entries(analysis)),
        };

        Some(TabContent {
            tab,
            title: tab.title().to_string(),
            source,
            entries,
        })
    }

    fn visual_entries(&self, analysis: &CompositeAnalysis) -> Vec<(String, String)> {
        let composition = self.model.composition_score(&analysis.name);
        vec![
            (
                "strokeBalance".to_string(),
                percent(&analysis.linguistic.value, "strokeBalance"),
            ),
            (
                "visualHarmony".to_string(),
                percent(&analysis.linguistic.value, "visualHarmony"),
            ),
            (
                "semanticDiversityScore".to_string(),
                format_percent(composition.semantic_diversity_score),
            ),
            (
                "interpretationScore".to_string(),
                format_percent(composition.interpretation_score),
            ),
        ]
    }

    pub fn network_graph(&self, network: &NetworkData) -> GraphDescription {
        GraphDescription {
            nodes: network
                .nodes
                .iter()
                .map(|node| GraphNode {
                    id: node.id.clone(),
                    label: if node.character.is_empty() {
                        node.id.clone()
                    } else {
                        node.character.clone()
                    },
                    group: node.node_type.clone(),
                    detail: node.meanings.join(", "),
                })
                .collect(),
            edges: network
                .relationships
                .iter()
                .map(|rel| GraphEdge {
                    source: rel.source.clone(),
                    target: rel.target.clone(),
                    label: rel.description.clone(),
                    weight: rel.strength,
                })
                .collect(),
        }
    }
}

fn category_entries(value: &Value, source: ResultSource) -> (Option<ResultSource>, Vec<(String, String)>) {
    let entries = value
        .as_object()
        .map(|object| {
            object
                .iter()
                .map(|(key, value)| (key.clone(), display_value(value)))
                .collect()
        })
        .unwrap_or_default();
    (Some(source), entries)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join("、"),
        Value::Null => MISSING.to_string(),
        other => other.to_string(),
    }
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(MISSING)
        .to_string()
}

fn percent(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_f64)
        .map(format_percent)
        .unwrap_or_else(|| MISSING.to_string())
}

/// Ratio in `[0, 1]` as a percentage with one decimal
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
