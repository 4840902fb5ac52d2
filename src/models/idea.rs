use serde::{Deserialize, Serialize};

/// Three-step rating used for complexity and revenue potential
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Laag")]
    Low,
    #[default]
    #[serde(rename = "Gemiddeld")]
    Medium,
    #[serde(rename = "Hoog")]
    High,
}

/// Business plan fields attached to one generated idea
///
/// Free-text fields may contain markdown; they are normalized at render time,
/// never on ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blueprint {
    /// The problem the target customer has today
    pub pain_point: String,
    /// Description of the automation workflow
    pub automation: String,
    /// How the workflow is hidden behind a product surface
    pub abstraction: String,
    /// What makes the end product feel finished
    pub polish: String,
    /// How the product earns money
    pub monetization: String,
    /// Why this is relevant right now
    pub why_now: String,
    /// Features for version 1.0
    pub mvp_features: Vec<String>,
    /// Tools and APIs required
    pub tech_stack: Vec<String>,
    /// Workflow-engine nodes required
    #[serde(rename = "n8nNodes")]
    pub workflow_nodes: Vec<String>,
    /// Customer acquisition channels
    pub marketing_channels: Vec<String>,
    /// Concrete price proposal, e.g. "€29 p/m"
    pub pricing_strategy: String,
    /// Difficulty score, 1-100
    pub difficulty_rating: u32,
    /// Estimated time to launch, e.g. "1 week"
    pub speed_to_launch: String,
}

/// A generated micro-SaaS idea
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub one_liner: String,
    pub target_audience: String,
    pub emoji: String,
    pub complexity: Tier,
    pub potential_revenue: Tier,
    pub blueprint: Blueprint,
}

/// Payload shape accepted from the generation collaborator: one idea or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdeaSet {
    Many(Vec<Idea>),
    One(Box<Idea>),
}

impl IdeaSet {
    /// Parse a JSON payload holding either a single idea or an array of ideas
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn into_vec(self) -> Vec<Idea> {
        match self {
            IdeaSet::Many(ideas) => ideas,
            IdeaSet::One(idea) => vec![*idea],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDEA_JSON: &str = r#"{
        "id": "idea-1",
        "title": "Factuur Robot",
        "oneLiner": "Automatische facturatie voor kappers",
        "targetAudience": "Kapsalons",
        "emoji": "💈",
        "complexity": "Laag",
        "potentialRevenue": "Hoog",
        "blueprint": {
            "painPoint": "Handmatig factureren kost uren.",
            "automation": "Webhook -> PDF -> Mail",
            "abstraction": "Eén knop in de kassa.",
            "polish": "Mooie huisstijl.",
            "monetization": "Abonnement",
            "whyNow": "E-facturatie wordt verplicht.",
            "mvpFeatures": ["**Snelle** export"],
            "techStack": ["Stripe"],
            "n8nNodes": ["Webhook", "HTTP Request"],
            "marketingChannels": ["LinkedIn"],
            "pricingStrategy": "€29 p/m",
            "difficultyRating": 35,
            "speedToLaunch": "1 week"
        }
    }"#;

    #[test]
    fn test_idea_deserialize_camel_case() {
        let idea: Idea = serde_json::from_str(IDEA_JSON).unwrap();
        assert_eq!(idea.one_liner, "Automatische facturatie voor kappers");
        assert_eq!(idea.complexity, Tier::Low);
        assert_eq!(idea.potential_revenue, Tier::High);
        assert_eq!(idea.blueprint.workflow_nodes, vec!["Webhook", "HTTP Request"]);
        assert_eq!(idea.blueprint.difficulty_rating, 35);
    }

    #[test]
    fn test_idea_missing_fields_default() {
        let idea: Idea = serde_json::from_str(r#"{"title": "Alleen titel"}"#).unwrap();
        assert_eq!(idea.title, "Alleen titel");
        assert!(idea.blueprint.mvp_features.is_empty());
        assert_eq!(idea.complexity, Tier::Medium);
    }

    #[test]
    fn test_idea_set_single_and_many() {
        let one = IdeaSet::from_json(IDEA_JSON).unwrap().into_vec();
        assert_eq!(one.len(), 1);

        let many = IdeaSet::from_json(&format!("[{},{}]", IDEA_JSON, IDEA_JSON))
            .unwrap()
            .into_vec();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn test_tier_serializes_dutch() {
        assert_eq!(serde_json::to_string(&Tier::Medium).unwrap(), "\"Gemiddeld\"");
        assert!(serde_json::from_str::<Tier>("\"Medium\"").is_err());
    }
}
