use hanming_core::{AnalysisRequestSpec, CompletionResult, FailureKind, Resolved};
use serde_json::Value;
use tracing::{debug, warn};

/// Trust boundary between the completion endpoint and everything above it.
///
/// Always yields a value of the declared shape: either the validated live
/// payload or the request's default. Never panics and never returns an error.
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn resolve(spec: &AnalysisRequestSpec, result: CompletionResult) -> Resolved {
        let outcome = match result {
            CompletionResult::Success { payload } => Self::check_shape(spec, payload),
            CompletionResult::Failure { kind, message } => Err((kind, message)),
        };

        match outcome {
            Ok(payload) => {
                debug!(task = spec.task_id(), "Completion accepted");
                Resolved::live(payload)
            }
            Err((kind, message)) => {
                warn!(
                    task = spec.task_id(),
                    kind = %kind,
                    "Completion unusable, substituting default: {}",
                    message
                );
                Resolved::fallback(spec.default_value().clone(), kind)
            }
        }
    }

    /// Every required top-level field must be present and non-null
    fn check_shape(
        spec: &AnalysisRequestSpec,
        payload: Value,
    ) -> Result<Value, (FailureKind, String)> {
        let Some(object) = payload.as_object() else {
            return Err((
                FailureKind::SchemaMismatch,
                format!("expected a JSON object, got {}", json_type(&payload)),
            ));
        };

        let missing: Vec<&str> = spec
            .response_schema()
            .required_fields()
            .filter(|field| object.get(*field).map_or(true, Value::is_null))
            .collect();

        if !missing.is_empty() {
            return Err((
                FailureKind::SchemaMismatch,
                format!("missing required fields: {}", missing.join(", ")),
            ));
        }

        Ok(payload)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
