use crate::error::{HanmingError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// An independent facet of name analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisCategory {
    Linguistic,
    Cultural,
    Semantic,
    ModernContext,
}

impl AnalysisCategory {
    pub const ALL: [AnalysisCategory; 4] = [
        AnalysisCategory::Linguistic,
        AnalysisCategory::Cultural,
        AnalysisCategory::Semantic,
        AnalysisCategory::ModernContext,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisCategory::Linguistic => "linguistic",
            AnalysisCategory::Cultural => "cultural",
            AnalysisCategory::Semantic => "semantic",
            AnalysisCategory::ModernContext => "modernContext",
        }
    }

    /// Heading used when a category result is embedded in a follow-up prompt
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisCategory::Linguistic => "Linguistic analysis",
            AnalysisCategory::Cultural => "Cultural analysis",
            AnalysisCategory::Semantic => "Semantic analysis",
            AnalysisCategory::ModernContext => "Modern context analysis",
        }
    }
}

impl fmt::Display for AnalysisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared field of an expected response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    /// TypeScript-style type declaration, e.g. `string[]`
    pub type_decl: String,
    pub required: bool,
}

impl SchemaField {
    pub fn required(name: impl Into<String>, type_decl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_decl: type_decl.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, type_decl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_decl: type_decl.into(),
            required: false,
        }
    }
}

/// Declared shape of a completion response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSchema {
    interface_name: String,
    fields: Vec<SchemaField>,
}

impl ResponseSchema {
    pub fn new(interface_name: impl Into<String>) -> Self {
        Self {
            interface_name: interface_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}

/// A single analysis request: prompt parameters, declared shape and the
/// value substituted when the live call cannot be used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequestSpec {
    task_id: String,
    instruction: String,
    inputs: BTreeMap<String, Value>,
    response_schema: ResponseSchema,
    example: Value,
    default_value: Value,
}

impl AnalysisRequestSpec {
    pub fn builder(
        task_id: impl Into<String>,
        instruction: impl Into<String>,
    ) -> AnalysisRequestSpecBuilder {
        AnalysisRequestSpecBuilder {
            task_id: task_id.into(),
            instruction: instruction.into(),
            inputs: BTreeMap::new(),
            response_schema: None,
            example: None,
            default_value: Value::Null,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn inputs(&self) -> &BTreeMap<String, Value> {
        &self.inputs
    }

    pub fn response_schema(&self) -> &ResponseSchema {
        &self.response_schema
    }

    pub fn example(&self) -> &Value {
        &self.example
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }
}

pub struct AnalysisRequestSpecBuilder {
    task_id: String,
    instruction: String,
    inputs: BTreeMap<String, Value>,
    response_schema: Option<ResponseSchema>,
    example: Option<Value>,
    default_value: Value,
}

impl AnalysisRequestSpecBuilder {
    pub fn input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    pub fn schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn default_value(mut self, default_value: Value) -> Self {
        self.default_value = default_value;
        self
    }

    /// Without an explicit example the default value doubles as the worked example.
    pub fn build(self) -> AnalysisRequestSpec {
        let response_schema = self
            .response_schema
            .unwrap_or_else(|| ResponseSchema::new("Response"));
        let example = self.example.unwrap_or_else(|| self.default_value.clone());

        AnalysisRequestSpec {
            task_id: self.task_id,
            instruction: self.instruction,
            inputs: self.inputs,
            response_schema,
            example,
            default_value: self.default_value,
        }
    }
}

/// Why a completion could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    NetworkError,
    ParseError,
    SchemaMismatch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NetworkError => write!(f, "network error"),
            FailureKind::ParseError => write!(f, "parse error"),
            FailureKind::SchemaMismatch => write!(f, "schema mismatch"),
        }
    }
}

/// Outcome of one call to the completion endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    Success { payload: Value },
    Failure { kind: FailureKind, message: String },
}

impl CompletionResult {
    pub fn success(payload: Value) -> Self {
        CompletionResult::Success { payload }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        CompletionResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompletionResult::Success { .. })
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "reason", rename_all = "camelCase")]
pub enum ResultSource {
    Live,
    Fallback(FailureKind),
}

/// A value of the declared shape, live or defaulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolved {
    pub value: Value,
    pub source: ResultSource,
}

impl Resolved {
    pub fn live(value: Value) -> Self {
        Self {
            value,
            source: ResultSource::Live,
        }
    }

    pub fn fallback(value: Value, kind: FailureKind) -> Self {
        Self {
            value,
            source: ResultSource::Fallback(kind),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ResultSource::Fallback(_))
    }
}

/// Name recommendations derived from the four category results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub usage_guidelines: Vec<String>,
}

/// Merged result of one comprehensive analysis trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeAnalysis {
    pub name: String,
    pub linguistic: Resolved,
    pub cultural: Resolved,
    pub semantic: Resolved,
    pub modern_context: Resolved,
    pub recommendation: Recommendation,
    /// `None` when the follow-up request is disabled
    pub recommendation_source: Option<ResultSource>,
}

impl CompositeAnalysis {
    pub fn get(&self, category: AnalysisCategory) -> &Resolved {
        match category {
            AnalysisCategory::Linguistic => &self.linguistic,
            AnalysisCategory::Cultural => &self.cultural,
            AnalysisCategory::Semantic => &self.semantic,
            AnalysisCategory::ModernContext => &self.modern_context,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = (AnalysisCategory, &Resolved)> {
        AnalysisCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Number of categories that fell back to their defaults
    pub fn fallback_count(&self) -> usize {
        self.categories().filter(|(_, r)| r.is_fallback()).count()
    }
}

/// The user's current name and generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameProfile {
    pub name: String,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub cultural_preference: Option<String>,
    #[serde(default)]
    pub family_background: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Error text for a blank name, shared by every entry point that takes one
pub const BLANK_NAME_MESSAGE: &str = "请输入名字 Please enter a name";

impl NameProfile {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(HanmingError::InvalidInput(BLANK_NAME_MESSAGE.to_string()));
        }

        Ok(Self {
            name,
            personality_traits: Vec::new(),
            cultural_preference: None,
            family_background: None,
            interests: Vec::new(),
        })
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.personality_traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cultural_preference(mut self, preference: impl Into<String>) -> Self {
        self.cultural_preference = Some(preference.into());
        self
    }

    pub fn with_family_background(mut self, background: impl Into<String>) -> Self {
        self.family_background = Some(background.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_value(AnalysisCategory::ModernContext).unwrap(),
            json!("modernContext")
        );
        assert_eq!(AnalysisCategory::Linguistic.to_string(), "linguistic");
    }

    #[test]
    fn test_builder_uses_default_as_example() {
        let spec = AnalysisRequestSpec::builder("t", "Do it")
            .default_value(json!({"a": 1}))
            .build();
        assert_eq!(spec.example(), &json!({"a": 1}));
        assert_eq!(spec.response_schema().interface_name(), "Response");
    }

    #[test]
    fn test_required_fields() {
        let schema = ResponseSchema::new("X")
            .field(SchemaField::required("a", "string"))
            .field(SchemaField::optional("b", "number"));
        assert_eq!(schema.required_fields().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_recommendation_rejects_mistyped_lists() {
        let ok: Recommendation = serde_json::from_value(json!({
            "alternatives": ["志明", "文华"],
            "usageGuidelines": ["Use in formal settings"]
        }))
        .unwrap();
        assert_eq!(ok.alternatives, vec!["志明", "文华"]);
        assert!(ok.improvements.is_empty());

        assert!(serde_json::from_value::<Recommendation>(json!({
            "alternatives": "志明, 文华"
        }))
        .is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        match NameProfile::new("   ") {
            Err(HanmingError::InvalidInput(msg)) => assert_eq!(msg, BLANK_NAME_MESSAGE),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(NameProfile::new(" 智华 ").unwrap().name, "智华");
    }
}
