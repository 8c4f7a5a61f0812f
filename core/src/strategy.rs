//! Named scoring presets sent to the prioritization service.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    Smart,
    Fastest,
    HighImpact,
    Deadline,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Smart,
        Strategy::Fastest,
        Strategy::HighImpact,
        Strategy::Deadline,
    ];

    /// Exact, case-sensitive lookup. Anything else resolves to
    /// [`Strategy::Smart`].
    pub fn resolve(name: &str) -> Self {
        match name {
            "smart" => Strategy::Smart,
            "fastest" => Strategy::Fastest,
            "high-impact" => Strategy::HighImpact,
            "deadline" => Strategy::Deadline,
            other => {
                tracing::debug!(
                    target: "taskrank.strategy",
                    name = %other,
                    "unknown strategy, using smart"
                );
                Strategy::Smart
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Smart => "smart",
            Strategy::Fastest => "fastest",
            Strategy::HighImpact => "high-impact",
            Strategy::Deadline => "deadline",
        }
    }

    pub fn weights(self) -> StrategyWeights {
        match self {
            Strategy::Smart => StrategyWeights {
                importance_mul: Some(5),
                quickwin_bonus: Some(10),
                urgency_overdue: Some(100),
                urgency_due_3: Some(50),
                urgency_due_7: Some(20),
                dependency_mul: Some(3),
            },
            Strategy::Fastest => StrategyWeights {
                importance_mul: Some(3),
                quickwin_bonus: Some(25),
                urgency_due_3: Some(10),
                dependency_mul: Some(1),
                ..StrategyWeights::default()
            },
            Strategy::HighImpact => StrategyWeights {
                importance_mul: Some(12),
                quickwin_bonus: Some(0),
                urgency_due_3: Some(20),
                dependency_mul: Some(2),
                ..StrategyWeights::default()
            },
            Strategy::Deadline => StrategyWeights {
                importance_mul: Some(4),
                quickwin_bonus: Some(5),
                urgency_due_3: Some(80),
                urgency_due_7: Some(40),
                ..StrategyWeights::default()
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn resolve_weights(name: &str) -> StrategyWeights {
    Strategy::resolve(name).weights()
}

/// Flat weight-name → multiplier mapping. Fields a preset does not set are
/// left out of the payload entirely so the service applies its own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrategyWeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance_mul: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quickwin_bonus: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_overdue: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_due_3: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_due_7: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_mul: Option<i64>,
}

impl StrategyWeights {
    /// Present weights in payload order.
    pub fn entries(&self) -> Vec<(&'static str, i64)> {
        [
            ("importance_mul", self.importance_mul),
            ("quickwin_bonus", self.quickwin_bonus),
            ("urgency_overdue", self.urgency_overdue),
            ("urgency_due_3", self.urgency_due_3),
            ("urgency_due_7", self.urgency_due_7),
            ("dependency_mul", self.dependency_mul),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}
