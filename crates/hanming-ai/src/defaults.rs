//! Static fallback defaults and worked examples for every analysis request.
//!
//! Defaults are substituted whenever a live completion cannot be used, so each
//! one carries every required field of its interface.

use serde_json::{json, Value};

pub fn linguistic() -> Value {
    json!({
        "tonePattern": "平仄平",
        "phoneticHarmony": 0.85,
        "strokeBalance": 0.78,
        "visualHarmony": 0.92
    })
}

pub fn cultural() -> Value {
    json!({
        "historicalContext": "源自古代文献",
        "modernSignificance": "象征智慧与力量",
        "socialContext": "适合正式场合",
        "regionalCharacteristics": "江南文化特色"
    })
}

pub fn semantic() -> Value {
    json!({
        "meaningNetwork": {},
        "semanticComplexity": 0.5,
        "conceptualRelationships": []
    })
}

pub fn modern_context() -> Value {
    json!({
        "globalAppeal": 0.5,
        "professionalContext": "适合正式场合",
        "socialMediaSuitability": 0.5,
        "contemporaryTrends": []
    })
}

pub fn semantic_example() -> Value {
    json!({
        "meaningNetwork": {"智": ["慧", "明"], "华": ["彩", "荣"]},
        "semanticComplexity": 0.72,
        "conceptualRelationships": ["智慧与光彩相互映衬"]
    })
}

pub fn modern_context_example() -> Value {
    json!({
        "globalAppeal": 0.8,
        "professionalContext": "适合学术与商务场合",
        "socialMediaSuitability": 0.75,
        "contemporaryTrends": ["简洁双字名", "寓意积极"]
    })
}

pub fn recommendation() -> Value {
    json!({
        "alternatives": [],
        "improvements": [],
        "usageGuidelines": []
    })
}

pub fn recommendation_example() -> Value {
    json!({
        "alternatives": ["志明", "文华", "雨泽"],
        "improvements": ["Balance stroke counts between the two characters"],
        "usageGuidelines": [
            "Use in formal settings",
            "Suitable for artistic personalities",
            "Consider for scholarly pursuits"
        ]
    })
}

pub fn character_analysis() -> Value {
    json!({
        "meanings": [],
        "etymology": "",
        "usage_frequency": 0.0,
        "common_names": [],
        "stroke_count": 0,
        "radical": "",
        "related_characters": []
    })
}

pub fn character_analysis_example() -> Value {
    json!({
        "meanings": ["wisdom", "intelligence"],
        "etymology": "从日从知，表示明白事理",
        "usage_frequency": 0.8,
        "common_names": ["智华", "明智", "智勇"],
        "stroke_count": 12,
        "radical": "日",
        "related_characters": ["慧", "明", "哲"]
    })
}

pub fn related_characters() -> Value {
    json!({
        "similar_meaning": [],
        "common_combinations": [],
        "antonyms": []
    })
}

pub fn related_characters_example() -> Value {
    json!({
        "similar_meaning": ["慧", "哲"],
        "common_combinations": ["智慧", "明智"],
        "antonyms": ["愚"]
    })
}

pub fn name_cultural_context() -> Value {
    json!({
        "historical_significance": [],
        "literary_connections": [],
        "modern_interpretation": {
            "contemporary_relevance": "",
            "social_implications": [],
            "global_context": ""
        }
    })
}

pub fn name_cultural_context_example() -> Value {
    json!({
        "historical_significance": [
            {"era": "唐代", "relevance": "崇尚才智", "cultural_elements": ["科举", "诗文"]}
        ],
        "literary_connections": [
            {"source": "论语", "reference": "知者不惑", "meaning": "有智慧的人不会迷惑"}
        ],
        "modern_interpretation": {
            "contemporary_relevance": "象征智慧与力量",
            "social_implications": ["适合正式场合"],
            "global_context": "易于国际交流"
        }
    })
}

pub fn meaning_network() -> Value {
    json!({
        "nodes": [],
        "relationships": []
    })
}

pub fn meaning_network_example() -> Value {
    json!({
        "nodes": [
            {
                "id": "智",
                "character": "智",
                "type": "wisdom",
                "meanings": ["wisdom", "intelligence"],
                "culturalContext": ["传统文化", "教育理想"],
                "usage": [{"context": "names", "frequency": 0.8}]
            }
        ],
        "relationships": [
            {
                "source": "智",
                "target": "慧",
                "type": "semantic",
                "strength": 0.9,
                "description": "wisdom connection"
            }
        ]
    })
}

/// Used as the generated name whenever base-name generation fails
pub fn base_name() -> Value {
    json!({
        "name": "智华",
        "meaning": "智慧华彩",
        "culturalSignificance": "体现追求智慧和绚丽人生",
        "pronunciation": "Zhì Huá"
    })
}

/// Enhancement and refinement contribute nothing when they fail
pub fn cultural_enhancement() -> Value {
    json!({})
}

pub fn cultural_enhancement_example() -> Value {
    json!({
        "enhancedName": "智华",
        "culturalElements": [
            {"element": "智", "significance": "儒家五常之一", "relevance": 0.9}
        ],
        "recommendations": ["在正式场合使用全名"]
    })
}

pub fn semantic_refinement() -> Value {
    json!({})
}

pub fn semantic_refinement_example() -> Value {
    json!({
        "refinedName": "智华",
        "semanticImprovements": [
            {"aspect": "harmony", "improvement": "声调起伏更自然", "impact": 0.6}
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults_are_objects() {
        for value in [linguistic(), cultural(), semantic(), modern_context(), recommendation()] {
            assert!(value.is_object());
        }
    }

    #[test]
    fn test_base_name_fallback() {
        assert_eq!(base_name()["name"], "智华");
        assert_eq!(base_name()["pronunciation"], "Zhì Huá");
    }
}
