use serde::{Deserialize, Serialize};

use super::style::StyleDna;

/// Identity metadata for the portfolio owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApfMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default)]
    pub primary_links: Vec<String>,
}

/// The short narrative core: who this person is and what sets them apart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApfSignature {
    #[serde(default)]
    pub one_sentence: String,
    #[serde(default)]
    pub three_traits: Vec<String>,
    #[serde(default)]
    pub edge: String,
    #[serde(default)]
    pub non_goals: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionPattern {
    #[serde(default)]
    pub pattern_name: String,
    #[serde(default)]
    pub when_used: String,
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default)]
    pub tradeoffs: Vec<String>,
    #[serde(default)]
    pub example: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodStackStep {
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub artifacts_produced: Vec<String>,
    #[serde(default)]
    pub common_failure: String,
    #[serde(default)]
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureEntry {
    #[serde(default)]
    pub failure: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    pub rule_created: String,
    #[serde(default)]
    pub what_changed: String,
    #[serde(default)]
    pub evidence_refs: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LovesHates {
    #[serde(default)]
    pub loves: Vec<String>,
    #[serde(default)]
    pub hates: Vec<String>,
    #[serde(default)]
    pub will_use_if_needed: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Superpower {
    #[serde(default)]
    pub claim: String,
    #[serde(default)]
    pub why_true: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub boundaries: String,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role_function: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub approach: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// How independently checkable a proof claim is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verifiability {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MED")]
    Med,
    #[serde(rename = "LOW")]
    Low,
}

impl Default for Verifiability {
    fn default() -> Self {
        Self::Low
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofEvidence {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofItem {
    #[serde(default)]
    pub claim_id: String,
    #[serde(default)]
    pub claim_text: String,
    #[serde(default)]
    pub verifiability: Verifiability,
    #[serde(default)]
    pub evidence: Vec<ProofEvidence>,
}

/// Generator-chosen display titles for the rendered sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionLabels {
    #[serde(default)]
    pub edge: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub failures: Option<String>,
    #[serde(default)]
    pub patterns: Option<String>,
    #[serde(default)]
    pub evidence: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub anti_goals: Option<String>,
    #[serde(default)]
    pub hates: Option<String>,
}

/// The full content payload produced by the structured-content call.
///
/// Every list is independently optional on the wire; the renderer treats an
/// empty list as "omit this section". Held in memory only, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AntiPortfolio {
    #[serde(default)]
    pub meta: ApfMeta,
    #[serde(default)]
    pub anti_title: String,
    #[serde(default)]
    pub signature: ApfSignature,
    #[serde(default)]
    pub decision_patterns: Vec<DecisionPattern>,
    #[serde(default)]
    pub method_stack: Vec<MethodStackStep>,
    #[serde(default)]
    pub failure_ledger: Vec<FailureEntry>,
    #[serde(default)]
    pub loves_hates: LovesHates,
    #[serde(default)]
    pub superpowers: Vec<Superpower>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub proof_layer: Vec<ProofItem>,

    /// Mandatory on the wire contract; validated after parse. `None` here
    /// means the generator violated the contract.
    #[serde(default)]
    pub style_dna: Option<StyleDna>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_labels: Option<SectionLabels>,

    /// Opaque full-markup artifact. When present the fallback renderer is
    /// bypassed entirely and this is displayed inside an isolated surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_html: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_default_to_empty() {
        let apf: AntiPortfolio = serde_json::from_str(r#"{"anti_title": "The Breaker"}"#).unwrap();
        assert_eq!(apf.anti_title, "The Breaker");
        assert!(apf.projects.is_empty());
        assert!(apf.proof_layer.is_empty());
        assert!(apf.loves_hates.loves.is_empty());
        assert!(apf.style_dna.is_none());
    }

    #[test]
    fn verifiability_uses_upper_case_wire_tags() {
        let item: ProofItem = serde_json::from_str(
            r#"{"claim_id": "c1", "claim_text": "shipped it", "verifiability": "MED"}"#,
        )
        .unwrap();
        assert_eq!(item.verifiability, Verifiability::Med);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"MED\""));
    }

    #[test]
    fn generated_html_is_not_serialized_when_absent() {
        let apf = AntiPortfolio::default();
        let json = serde_json::to_string(&apf).unwrap();
        assert!(!json.contains("generated_html"));
    }
}
