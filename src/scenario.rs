//! What-if scenario rule table
//!
//! Each scenario category maps to a fixed prediction and recommendation.
//! Callers pick the category explicitly; nothing is inferred from the
//! scenario's wording.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Unknown scenario category: {0} (expected yield, supply-chain, utilization or general)")]
    UnknownCategory(String),
}

/// Kind of what-if analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioCategory {
    /// Yield optimisation of a product line
    Yield,
    /// Component lead-time and inventory changes
    SupplyChain,
    /// Line utilisation and maintenance scheduling
    Utilization,
    General,
}

impl ScenarioCategory {
    pub const ALL: [ScenarioCategory; 4] = [
        ScenarioCategory::Yield,
        ScenarioCategory::SupplyChain,
        ScenarioCategory::Utilization,
        ScenarioCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioCategory::Yield => "yield",
            ScenarioCategory::SupplyChain => "supply-chain",
            ScenarioCategory::Utilization => "utilization",
            ScenarioCategory::General => "general",
        }
    }
}

impl fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioCategory {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        ScenarioCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == tag)
            .ok_or_else(|| ScenarioError::UnknownCategory(s.to_string()))
    }
}

/// Predicted effect of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Percent
    pub efficiency_gain: f64,
    /// Monthly, in millions of local currency
    pub cost_reduction: f64,
    /// 0..=100
    pub risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRule {
    pub prediction: Prediction,
    pub recommendation: String,
}

/// Result of running a scenario through the rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationScenario {
    pub name: String,
    pub category: ScenarioCategory,
    pub variables: HashMap<String, serde_json::Value>,
    pub prediction: Prediction,
    pub recommendation: String,
    pub created_at: DateTime<Utc>,
}

/// Category -> rule lookup table
#[derive(Debug, Clone)]
pub struct ScenarioRules {
    rules: HashMap<ScenarioCategory, ScenarioRule>,
}

fn rule(efficiency_gain: f64, cost_reduction: f64, risk_score: f64, text: &str) -> ScenarioRule {
    ScenarioRule {
        prediction: Prediction {
            efficiency_gain,
            cost_reduction,
            risk_score,
        },
        recommendation: text.to_string(),
    }
}

impl ScenarioRules {
    /// The rule set shipped with the dashboard
    pub fn standard() -> Self {
        let mut rules = HashMap::new();
        rules.insert(
            ScenarioCategory::Yield,
            rule(
                15.8,
                180.0,
                12.0,
                "Tune inspection parameters at the Vina 2 plant to raise sensor module yield; \
                 expected saving is 180M per month.",
            ),
        );
        rules.insert(
            ScenarioCategory::SupplyChain,
            rule(
                9.5,
                120.0,
                8.0,
                "IC lead time slipped from 4 to 6 weeks: raise safety stock at the HQ hub by 20% \
                 and shorten the production cycle by 2 days.",
            ),
        );
        rules.insert(
            ScenarioCategory::Utilization,
            rule(
                22.1,
                250.0,
                20.0,
                "Rebuild the preventive maintenance schedule to lift SMT line utilization at \
                 Vina 1 from 88% to 94%.",
            ),
        );
        rules.insert(
            ScenarioCategory::General,
            rule(
                10.0,
                100.0,
                15.0,
                "Ontology analysis found a 5% cost reduction opportunity in sensor module assembly.",
            ),
        );
        Self { rules }
    }

    /// Replace one category's rule
    pub fn with_rule(mut self, category: ScenarioCategory, rule: ScenarioRule) -> Self {
        self.rules.insert(category, rule);
        self
    }

    /// Rule for a category, falling back to `General`
    pub fn rule(&self, category: ScenarioCategory) -> Option<&ScenarioRule> {
        self.rules
            .get(&category)
            .or_else(|| self.rules.get(&ScenarioCategory::General))
    }

    pub fn simulate(
        &self,
        name: impl Into<String>,
        category: ScenarioCategory,
        variables: HashMap<String, serde_json::Value>,
    ) -> Option<SimulationScenario> {
        let rule = self.rule(category)?;
        Some(SimulationScenario {
            name: name.into(),
            category,
            variables,
            prediction: rule.prediction,
            recommendation: rule.recommendation.clone(),
            created_at: Utc::now(),
        })
    }
}

impl Default for ScenarioRules {
    fn default() -> Self {
        Self::standard()
    }
}
