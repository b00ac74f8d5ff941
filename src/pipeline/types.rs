use std::fmt;

use serde::Serialize;

/// Stages of the sequential business build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Research,
    Product,
    Marketing,
    OutreachPlan,
    LeadDiscovery,
}

impl StageKind {
    pub const BUILD_ORDER: [StageKind; 5] = [
        StageKind::Research,
        StageKind::Product,
        StageKind::Marketing,
        StageKind::OutreachPlan,
        StageKind::LeadDiscovery,
    ];
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageKind::Research => "research",
            StageKind::Product => "product",
            StageKind::Marketing => "marketing",
            StageKind::OutreachPlan => "outreach plan",
            StageKind::LeadDiscovery => "lead discovery",
        };
        write!(f, "{label}")
    }
}
