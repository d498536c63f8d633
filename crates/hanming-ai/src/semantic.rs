//! Local semantic diversity scoring over small character vectors.

use serde::Serialize;
use std::collections::HashMap;

pub const DIMENSIONS: usize = 5;

pub type SemanticVector = [f64; DIMENSIONS];

const DEFAULT_VECTORS: [(char, SemanticVector); 4] = [
    ('慧', [0.7, 0.2, 0.1, 0.6, 0.3]),
    ('智', [0.8, 0.3, 0.2, 0.7, 0.4]),
    ('勇', [0.2, 0.7, 0.6, 0.1, 0.5]),
    ('宁', [0.5, 0.4, 0.3, 0.6, 0.2]),
];

const MEANINGS: [(char, [&str; 4]); 4] = [
    ('慧', ["智慧", "聪明", "通透", "明智"]),
    ('智', ["智力", "聪颖", "明智", "理性"]),
    ('勇', ["勇气", "勇敢", "胆识", "无畏"]),
    ('宁', ["宁静", "安宁", "平和", "淡定"]),
];

const CONNECTIONS: [(char, [&str; 3]); 4] = [
    ('慧', ["智", "明", "学"]),
    ('智', ["慧", "思", "知"]),
    ('勇', ["猛", "敢", "毅"]),
    ('宁', ["安", "静", "和"]),
];

const UNKNOWN_MEANING: &str = "未知含义";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSemantics {
    pub character: char,
    pub semantic_vector: SemanticVector,
    pub potential_meanings: Vec<String>,
    pub semantic_connections: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionScore {
    /// Mean cosine similarity of adjacent characters, 0.5 for a single character
    pub semantic_diversity_score: f64,
    /// Average known meanings per character, normalized to `[0, 1]`
    pub interpretation_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInsight {
    #[serde(rename = "type")]
    pub criterion: String,
    pub score: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticReport {
    pub name: String,
    pub character_breakdown: Vec<CharacterSemantics>,
    pub composition: CompositionScore,
    pub insights: Vec<ScoreInsight>,
}

/// Character vectors with a deterministic stand-in for unknown characters.
#[derive(Debug, Clone)]
pub struct SemanticModel {
    vectors: HashMap<char, SemanticVector>,
}

impl Default for SemanticModel {
    fn default() -> Self {
        Self {
            vectors: DEFAULT_VECTORS.into_iter().collect(),
        }
    }
}

impl SemanticModel {
    /// Add or replace vectors, e.g. from an external vector table
    pub fn with_vectors(mut self, vectors: impl IntoIterator<Item = (char, SemanticVector)>) -> Self {
        self.vectors.extend(vectors);
        self
    }

    pub fn vector(&self, character: char) -> SemanticVector {
        self.vectors
            .get(&character)
            .copied()
            .unwrap_or_else(|| pseudo_vector(character))
    }

    /// Cosine similarity of the averaged character vectors of two names
    pub fn name_similarity(&self, a: &str, b: &str) -> f64 {
        match (self.name_vector(a), self.name_vector(b)) {
            (Some(va), Some(vb)) => cosine_similarity(&va, &vb),
            _ => 0.0,
        }
    }

    pub fn name_vector(&self, name: &str) -> Option<SemanticVector> {
        let vectors: Vec<SemanticVector> = name.chars().map(|c| self.vector(c)).collect();
        if vectors.is_empty() {
            return None;
        }

        let mut avg = [0.0; DIMENSIONS];
        for v in &vectors {
            for (acc, x) in avg.iter_mut().zip(v) {
                *acc += x;
            }
        }
        let n = vectors.len() as f64;
        avg.iter_mut().for_each(|x| *x /= n);
        Some(avg)
    }

    pub fn composition_score(&self, name: &str) -> CompositionScore {
        let vectors: Vec<SemanticVector> = name.chars().map(|c| self.vector(c)).collect();

        let adjacent: Vec<f64> = vectors
            .windows(2)
            .map(|pair| cosine_similarity(&pair[1], &pair[0]))
            .collect();

        let semantic_diversity_score = if adjacent.is_empty() {
            0.5
        } else {
            adjacent.iter().sum::<f64>() / adjacent.len() as f64
        };

        CompositionScore {
            semantic_diversity_score,
            interpretation_score: interpretation_complexity(name),
        }
    }

    pub fn character_breakdown(&self, name: &str) -> Vec<CharacterSemantics> {
        name.chars()
            .map(|c| CharacterSemantics {
                character: c,
                semantic_vector: self.vector(c),
                potential_meanings: meanings(c),
                semantic_connections: connections(c),
            })
            .collect()
    }

    pub fn analyze(&self, name: &str) -> SemanticReport {
        let composition = self.composition_score(name);
        let insights = vec![
            ScoreInsight {
                criterion: "Semantic Diversity".to_string(),
                score: composition.semantic_diversity_score,
                recommendation: diversity_recommendation(composition.semantic_diversity_score)
                    .to_string(),
            },
            ScoreInsight {
                criterion: "Interpretation Complexity".to_string(),
                score: composition.interpretation_score,
                recommendation: complexity_recommendation(composition.interpretation_score)
                    .to_string(),
            },
        ];

        SemanticReport {
            name: name.to_string(),
            character_breakdown: self.character_breakdown(name),
            composition,
            insights,
        }
    }
}

/// Zero when either vector has no magnitude
pub fn cosine_similarity(a: &SemanticVector, b: &SemanticVector) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Stable per-character vector in `[0, 1)` derived from the code point (splitmix64)
fn pseudo_vector(character: char) -> SemanticVector {
    let mut state = u64::from(character as u32);
    let mut out = [0.0; DIMENSIONS];
    for slot in out.iter_mut() {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        *slot = (z >> 11) as f64 / (1u64 << 53) as f64;
    }
    out
}

fn meanings(character: char) -> Vec<String> {
    MEANINGS
        .iter()
        .find(|(c, _)| *c == character)
        .map(|(_, m)| m.iter().map(|s| s.to_string()).collect())
        .unwrap_or_else(|| vec![UNKNOWN_MEANING.to_string()])
}

fn connections(character: char) -> Vec<String> {
    CONNECTIONS
        .iter()
        .find(|(c, _)| *c == character)
        .map(|(_, m)| m.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

fn interpretation_complexity(name: &str) -> f64 {
    let counts: Vec<usize> = name.chars().map(|c| meanings(c).len()).collect();
    if counts.is_empty() {
        return 0.0;
    }
    let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    (average / 5.0).min(1.0)
}

fn diversity_recommendation(score: f64) -> &'static str {
    if score > 0.8 {
        "语义丰富，概念多元 (Semantically Rich, Conceptually Diverse)"
    } else if score > 0.5 {
        "语义均衡，概念协调 (Semantically Balanced)"
    } else {
        "语义单一，建议增加概念多样性 (Semantically Uniform, Consider Diversifying)"
    }
}

fn complexity_recommendation(score: f64) -> &'static str {
    if score > 0.8 {
        "高度复杂，多层次意义 (Highly Complex, Multi-layered Meaning)"
    } else if score > 0.5 {
        "适度复杂，意义丰富 (Moderately Complex, Rich Meaning)"
    } else {
        "语义简单，可考虑深化 (Semantically Simple, Consider Deepening)"
    }
}
