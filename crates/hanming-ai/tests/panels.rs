use async_trait::async_trait;
use hanming_ai::{
    CharacterExplorer, CompletionProvider, CulturalContextPanel, MeaningNetworkPanel,
    NameGenerator, OfflineProvider, PresentationAdapter,
};
use hanming_core::{
    AnalysisCategory, AnalysisSettings, CompletionResult, FailureKind, NameProfile, ResultSource,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Fixed payload per interface name found in the prompt
struct FixedProvider(HashMap<&'static str, Value>);

#[async_trait]
impl CompletionProvider for FixedProvider {
    async fn complete_with_timeout(
        &self,
        prompt: &str,
        _timeout: Option<Duration>,
    ) -> CompletionResult {
        self.0
            .iter()
            .find(|(interface, _)| prompt.contains(&format!("interface {} {{", interface)))
            .map(|(_, payload)| CompletionResult::success(payload.clone()))
            .unwrap_or_else(|| CompletionResult::failure(FailureKind::NetworkError, "unscripted"))
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }

    fn endpoint(&self) -> &str {
        "memory://fixed"
    }
}

fn provider(entries: Vec<(&'static str, Value)>) -> Arc<FixedProvider> {
    Arc::new(FixedProvider(entries.into_iter().collect()))
}

#[tokio::test]
async fn test_character_explorer_live_and_fallback() {
    let explorer = CharacterExplorer::new(provider(vec![(
        "CharacterAnalysis",
        json!({
            "meanings": ["wisdom"],
            "etymology": "从日从知",
            "stroke_count": 12,
            "radical": "日",
            "pinyin": "zhì"
        }),
    )]));

    let analysis = explorer.explore("智").await.unwrap();
    assert_eq!(analysis.source, ResultSource::Live);
    assert_eq!(analysis.value.stroke_count, 12);
    assert_eq!(analysis.value.pinyin.as_deref(), Some("zhì"));

    let related = explorer.related("智").await.unwrap();
    assert_eq!(related.source, ResultSource::Fallback(FailureKind::NetworkError));
    assert!(related.value.similar_meaning.is_empty());
}

#[tokio::test]
async fn test_character_explorer_rejects_multiple_characters() {
    let explorer = CharacterExplorer::new(Arc::new(OfflineProvider));
    assert!(explorer.explore("智华").await.is_err());
    assert!(explorer.related(" ").await.is_err());
}

#[tokio::test]
async fn test_cultural_context_panel() {
    let panel = CulturalContextPanel::new(provider(vec![(
        "NameCulturalAnalysis",
        json!({
            "historical_significance": [{"era": "宋代", "relevance": "文人雅号", "cultural_elements": ["书法"]}],
            "literary_connections": [],
            "modern_interpretation": {"contemporary_relevance": "常见", "social_implications": [], "global_context": "易读"}
        }),
    )]));

    let result = panel.analyze("文华").await.unwrap();
    assert_eq!(result.source, ResultSource::Live);
    assert_eq!(result.value.historical_significance[0].era, "宋代");
    assert!(panel.analyze("  ").await.is_err());
}

#[tokio::test]
async fn test_meaning_network_drops_dangling_edges() {
    let panel = MeaningNetworkPanel::new(provider(vec![(
        "NetworkData",
        json!({
            "nodes": [
                {"id": "智", "character": "智", "type": "wisdom", "meanings": ["wisdom"]},
                {"id": "慧", "character": "慧", "type": "wisdom", "meanings": ["insight"]}
            ],
            "relationships": [
                {"source": "智", "target": "慧", "type": "semantic", "strength": 0.9, "description": "wisdom connection"},
                {"source": "智", "target": "愚", "type": "antonym", "strength": 0.8, "description": "opposite"}
            ]
        }),
    )]));

    let network = panel.build("智").await.unwrap();
    assert_eq!(network.value.nodes.len(), 2);
    assert_eq!(network.value.relationships.len(), 1);

    let graph = PresentationAdapter::default().network_graph(&network.value);
    assert_eq!(graph.edges[0].label, "wisdom connection");
    assert_eq!(graph.nodes[1].detail, "insight");
}

#[tokio::test]
async fn test_generator_merges_steps() {
    let generator = NameGenerator::new(provider(vec![
        (
            "NameSuggestion",
            json!({"name": "雨泽", "meaning": "雨露恩泽", "culturalSignificance": "润泽万物", "pronunciation": "Yǔ Zé"}),
        ),
        (
            "CulturalEnhancement",
            json!({"enhancedName": "雨泽", "culturalElements": [], "meaning": "甘雨润泽"}),
        ),
    ]));

    let profile = NameProfile::new("Rain").unwrap().with_traits(["温和"]);
    let generated = generator.generate(&profile).await;

    assert_eq!(generated.name, "雨泽");
    assert_eq!(generated.details["meaning"], "甘雨润泽");
    assert_eq!(generated.details["pronunciation"], "Yǔ Zé");
    assert_eq!(generated.base_source, ResultSource::Live);
    assert_eq!(generated.enhancement_source, ResultSource::Live);
    assert_eq!(
        generated.refinement_source,
        ResultSource::Fallback(FailureKind::NetworkError)
    );
}

#[tokio::test]
async fn test_generator_offline_uses_fallback_name() {
    let generator = NameGenerator::new(Arc::new(OfflineProvider));
    let generated = generator.generate(&NameProfile::new("Alex").unwrap()).await;

    assert_eq!(generated.name, "智华");
    assert_eq!(generated.details["meaning"], "智慧华彩");
    assert_eq!(generated.details["culturalSignificance"], "体现追求智慧和绚丽人生");

    assert_eq!(generated.analysis.name, "智华");
    assert_eq!(generated.analysis.fallback_count(), 4);
    assert!(generated.analysis.recommendation.alternatives.is_empty());
    assert_eq!(
        generated.analysis.recommendation_source,
        Some(ResultSource::Fallback(FailureKind::NetworkError))
    );
}

#[tokio::test]
async fn test_generator_analyzes_generated_name() {
    let generator = NameGenerator::new(provider(vec![
        (
            "NameSuggestion",
            json!({"name": "雨泽", "meaning": "雨露恩泽", "culturalSignificance": "润泽万物", "pronunciation": "Yǔ Zé"}),
        ),
        (
            "SemanticRefinement",
            json!({"refinedName": "雨辰", "semanticImprovements": []}),
        ),
        (
            "LinguisticAnalysis",
            json!({"tonePattern": "仄平", "phoneticHarmony": 0.8, "strokeBalance": 0.7, "visualHarmony": 0.9}),
        ),
        (
            "Recommendations",
            json!({"alternatives": ["雨泽"], "improvements": [], "usageGuidelines": []}),
        ),
    ]));

    let generated = generator.generate(&NameProfile::new("Rain").unwrap()).await;

    assert_eq!(generated.name, "雨辰");
    assert_eq!(generated.analysis.name, "雨辰");
    assert_eq!(
        generated.analysis.get(AnalysisCategory::Linguistic).source,
        ResultSource::Live
    );
    assert_eq!(generated.analysis.linguistic.value["tonePattern"], "仄平");
    assert!(generated.analysis.cultural.is_fallback());
    assert_eq!(generated.analysis.recommendation.alternatives, vec!["雨泽"]);
    assert_eq!(generated.analysis.recommendation_source, Some(ResultSource::Live));
}

#[tokio::test]
async fn test_generator_respects_disabled_recommendations() {
    let settings = AnalysisSettings {
        include_recommendations: false,
        ..AnalysisSettings::default()
    };
    let generator = NameGenerator::new(Arc::new(OfflineProvider)).with_settings(settings);

    let generated = generator.generate(&NameProfile::new("Alex").unwrap()).await;

    assert_eq!(generated.analysis.recommendation_source, None);
}
