use hanming_core::{AnalysisRequestSpec, ResponseSchema};
use serde_json::Value;
use std::fmt::Write;

/// Renders an [`AnalysisRequestSpec`] into the natural-language prompt sent
/// to the completion endpoint.
///
/// The output is a pure function of the spec: inputs are emitted in key
/// order, the declared shape as a TypeScript-style interface, then the worked
/// example. Identical specs produce byte-identical prompts.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(spec: &AnalysisRequestSpec) -> String {
        let mut prompt = String::new();

        prompt.push_str(spec.instruction().trim());
        prompt.push('\n');

        if !spec.inputs().is_empty() {
            prompt.push('\n');
            for (key, value) in spec.inputs() {
                let _ = writeln!(prompt, "- {}: {}", key, render_input(value));
            }
        }

        prompt.push_str("\nReturn the result as JSON matching this interface:\n");
        prompt.push_str(&render_interface(spec.response_schema()));

        prompt.push_str("\nExample response:\n");
        prompt.push_str(&render_example(spec.example()));
        prompt.push('\n');

        prompt.push_str("\nRespond with JSON only, without commentary or Markdown.");
        prompt
    }
}

/// Strings are embedded verbatim; everything else as compact JSON.
fn render_input(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_interface(schema: &ResponseSchema) -> String {
    let mut out = format!("interface {} {{\n", schema.interface_name());
    for field in schema.fields() {
        let marker = if field.required { "" } else { "?" };
        let _ = writeln!(out, "  {}{}: {};", field.name, marker, field.type_decl);
    }
    out.push_str("}\n");
    out
}

fn render_example(example: &Value) -> String {
    serde_json::to_string_pretty(example).unwrap_or_else(|_| example.to_string())
}
