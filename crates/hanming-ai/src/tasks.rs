//! Constructors for every [`AnalysisRequestSpec`] the front-end issues.

use crate::defaults;
use hanming_core::{AnalysisCategory, AnalysisRequestSpec, NameProfile, ResponseSchema, SchemaField};
use serde_json::Value;

pub const RECOMMENDATIONS_TASK: &str = "recommendations";
pub const CHARACTER_ANALYSIS_TASK: &str = "character_analysis";
pub const RELATED_CHARACTERS_TASK: &str = "related_characters";
pub const NAME_CULTURAL_CONTEXT_TASK: &str = "name_cultural_context";
pub const MEANING_NETWORK_TASK: &str = "meaning_network";
pub const BASE_NAME_TASK: &str = "base_name";
pub const CULTURAL_ENHANCEMENT_TASK: &str = "cultural_enhancement";
pub const SEMANTIC_REFINEMENT_TASK: &str = "semantic_refinement";

/// Request for one category of the comprehensive analysis
pub fn category(category: AnalysisCategory, profile: &NameProfile) -> AnalysisRequestSpec {
    match category {
        AnalysisCategory::Linguistic => linguistic(profile),
        AnalysisCategory::Cultural => cultural(profile),
        AnalysisCategory::Semantic => semantic(profile),
        AnalysisCategory::ModernContext => modern_context(profile),
    }
}

fn linguistic(profile: &NameProfile) -> AnalysisRequestSpec {
    AnalysisRequestSpec::builder(
        AnalysisCategory::Linguistic.as_str(),
        "Analyze the linguistic features (tones, phonetics, strokes) of the following Chinese name.",
    )
    .input("name", profile.name.as_str())
    .schema(
        ResponseSchema::new("LinguisticAnalysis")
            .field(SchemaField::required("tonePattern", "string"))
            .field(SchemaField::required("phoneticHarmony", "number"))
            .field(SchemaField::required("strokeBalance", "number"))
            .field(SchemaField::required("visualHarmony", "number")),
    )
    .default_value(defaults::linguistic())
    .build()
}

fn cultural(profile: &NameProfile) -> AnalysisRequestSpec {
    let mut builder = AnalysisRequestSpec::builder(
        AnalysisCategory::Cultural.as_str(),
        "Analyze the cultural significance of the following Chinese name.",
    )
    .input("name", profile.name.as_str());

    if let Some(preference) = &profile.cultural_preference {
        builder = builder.input("culturalPreference", preference.as_str());
    }
    if let Some(background) = &profile.family_background {
        builder = builder.input("familyBackground", background.as_str());
    }

    builder
        .schema(
            ResponseSchema::new("CulturalAnalysis")
                .field(SchemaField::required("historicalContext", "string"))
                .field(SchemaField::required("modernSignificance", "string"))
                .field(SchemaField::required("socialContext", "string"))
                .field(SchemaField::required("regionalCharacteristics", "string")),
        )
        .default_value(defaults::cultural())
        .build()
}

fn semantic(profile: &NameProfile) -> AnalysisRequestSpec {
    let mut builder = AnalysisRequestSpec::builder(
        AnalysisCategory::Semantic.as_str(),
        "Analyze the semantic structure and meaning relationships of the following Chinese name.",
    )
    .input("name", profile.name.as_str());

    if !profile.personality_traits.is_empty() {
        builder = builder.input("personalityTraits", profile.personality_traits.join(", "));
    }

    builder
        .schema(
            ResponseSchema::new("SemanticAnalysis")
                .field(SchemaField::optional("meaningNetwork", "Record<string, string[]>"))
                .field(SchemaField::required("semanticComplexity", "number"))
                .field(SchemaField::required("conceptualRelationships", "string[]")),
        )
        .example(defaults::semantic_example())
        .default_value(defaults::semantic())
        .build()
}

fn modern_context(profile: &NameProfile) -> AnalysisRequestSpec {
    let mut builder = AnalysisRequestSpec::builder(
        AnalysisCategory::ModernContext.as_str(),
        "Analyze the modern context of the following Chinese name.",
    )
    .input("name", profile.name.as_str());

    if !profile.interests.is_empty() {
        builder = builder.input("interests", profile.interests.join(", "));
    }

    builder
        .schema(
            ResponseSchema::new("ModernAnalysis")
                .field(SchemaField::required("globalAppeal", "number"))
                .field(SchemaField::required("professionalContext", "string"))
                .field(SchemaField::optional("socialMediaSuitability", "number"))
                .field(SchemaField::optional("contemporaryTrends", "string[]")),
        )
        .example(defaults::modern_context_example())
        .default_value(defaults::modern_context())
        .build()
}

/// Follow-up request embedding the JSON of each category result
pub fn recommendations<'a>(
    name: &str,
    analyses: impl IntoIterator<Item = (AnalysisCategory, &'a Value)>,
) -> AnalysisRequestSpec {
    let mut builder = AnalysisRequestSpec::builder(
        RECOMMENDATIONS_TASK,
        "Generate personalized name recommendations based on the following analysis.",
    )
    .input("name", name);

    for (category, payload) in analyses {
        builder = builder.input(category.label(), payload.clone());
    }

    builder
        .schema(
            ResponseSchema::new("Recommendations")
                .field(SchemaField::required("alternatives", "string[]"))
                .field(SchemaField::required("improvements", "string[]"))
                .field(SchemaField::required("usageGuidelines", "string[]")),
        )
        .example(defaults::recommendation_example())
        .default_value(defaults::recommendation())
        .build()
}

pub fn character_analysis(character: char) -> AnalysisRequestSpec {
    AnalysisRequestSpec::builder(
        CHARACTER_ANALYSIS_TASK,
        "Analyze the following Chinese character in detail.",
    )
    .input("character", character.to_string())
    .schema(
        ResponseSchema::new("CharacterAnalysis")
            .field(SchemaField::required("meanings", "string[]"))
            .field(SchemaField::required("etymology", "string"))
            .field(SchemaField::optional("usage_frequency", "number"))
            .field(SchemaField::optional("common_names", "string[]"))
            .field(SchemaField::required("stroke_count", "number"))
            .field(SchemaField::required("radical", "string"))
            .field(SchemaField::optional("related_characters", "string[]")),
    )
    .example(defaults::character_analysis_example())
    .default_value(defaults::character_analysis())
    .build()
}

pub fn related_characters(character: char) -> AnalysisRequestSpec {
    AnalysisRequestSpec::builder(
        RELATED_CHARACTERS_TASK,
        "Find related characters for the following character as used in Chinese names.",
    )
    .input("character", character.to_string())
    .schema(
        ResponseSchema::new("RelatedCharacters")
            .field(SchemaField::required("similar_meaning", "string[]"))
            .field(SchemaField::required("common_combinations", "string[]"))
            .field(SchemaField::required("antonyms", "string[]")),
    )
    .example(defaults::related_characters_example())
    .default_value(defaults::related_characters())
    .build()
}

pub fn name_cultural_context(name: &str) -> AnalysisRequestSpec {
    AnalysisRequestSpec::builder(
        NAME_CULTURAL_CONTEXT_TASK,
        "Analyze the cultural context of the following Chinese name.",
    )
    .input("name", name)
    .schema(
        ResponseSchema::new("NameCulturalAnalysis")
            .field(SchemaField::required(
                "historical_significance",
                "Array<{ era: string; relevance: string; cultural_elements: string[] }>",
            ))
            .field(SchemaField::required(
                "literary_connections",
                "Array<{ source: string; reference: string; meaning: string }>",
            ))
            .field(SchemaField::required(
                "modern_interpretation",
                "{ contemporary_relevance: string; social_implications: string[]; global_context: string }",
            )),
    )
    .example(defaults::name_cultural_context_example())
    .default_value(defaults::name_cultural_context())
    .build()
}

pub fn meaning_network(character: char) -> AnalysisRequestSpec {
    AnalysisRequestSpec::builder(
        MEANING_NETWORK_TASK,
        "Generate meaning network data for the following Chinese name character.",
    )
    .input("character", character.to_string())
    .schema(
        ResponseSchema::new("NetworkData")
            .field(SchemaField::required(
                "nodes",
                "Array<{ id: string; character: string; type: string; meanings: string[]; culturalContext: string[]; usage: Array<{ context: string; frequency: number }> }>",
            ))
            .field(SchemaField::required(
                "relationships",
                "Array<{ source: string; target: string; type: string; strength: number; description: string }>",
            )),
    )
    .example(defaults::meaning_network_example())
    .default_value(defaults::meaning_network())
    .build()
}

pub fn base_name(profile: &NameProfile) -> AnalysisRequestSpec {
    let mut builder = AnalysisRequestSpec::builder(
        BASE_NAME_TASK,
        "Generate a culturally appropriate Chinese name based on the following parameters.",
    )
    .input("originalName", profile.name.as_str())
    .input("personalityTraits", profile.personality_traits.join(", "))
    .input("interests", profile.interests.join(", "));

    if let Some(preference) = &profile.cultural_preference {
        builder = builder.input("culturalPreference", preference.as_str());
    }
    if let Some(background) = &profile.family_background {
        builder = builder.input("familyBackground", background.as_str());
    }

    builder
        .schema(
            ResponseSchema::new("NameSuggestion")
                .field(SchemaField::required("name", "string"))
                .field(SchemaField::required("meaning", "string"))
                .field(SchemaField::required("culturalSignificance", "string"))
                .field(SchemaField::required("pronunciation", "string")),
        )
        .default_value(defaults::base_name())
        .build()
}

pub fn cultural_enhancement(name: &str) -> AnalysisRequestSpec {
    AnalysisRequestSpec::builder(
        CULTURAL_ENHANCEMENT_TASK,
        "Enhance the following Chinese name with deeper cultural context.",
    )
    .input("name", name)
    .schema(
        ResponseSchema::new("CulturalEnhancement")
            .field(SchemaField::required("enhancedName", "string"))
            .field(SchemaField::required(
                "culturalElements",
                "Array<{ element: string; significance: string; relevance: number }>",
            ))
            .field(SchemaField::optional("recommendations", "string[]")),
    )
    .example(defaults::cultural_enhancement_example())
    .default_value(defaults::cultural_enhancement())
    .build()
}

pub fn semantic_refinement(name: &str) -> AnalysisRequestSpec {
    AnalysisRequestSpec::builder(
        SEMANTIC_REFINEMENT_TASK,
        "Refine the following Chinese name for semantic harmony.",
    )
    .input("name", name)
    .schema(
        ResponseSchema::new("SemanticRefinement")
            .field(SchemaField::required("refinedName", "string"))
            .field(SchemaField::required(
                "semanticImprovements",
                "Array<{ aspect: string; improvement: string; impact: number }>",
            )),
    )
    .example(defaults::semantic_refinement_example())
    .default_value(defaults::semantic_refinement())
    .build()
}
