//! Service plans: the static reference table every customer points at.

use crate::types::{PlanId, UNLIMITED_SENTINEL};
use serde::{Deserialize, Serialize};

/// A plan allowance. Files and the database encode `Unlimited` as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum Allowance {
    Limited(f64),
    Unlimited,
}

impl Allowance {
    /// Decode the file/database representation. Any negative value is unlimited.
    pub fn from_sentinel(value: f64) -> Self {
        if value < 0.0 {
            Self::Unlimited
        } else {
            Self::Limited(value)
        }
    }

    pub fn to_sentinel(self) -> f64 {
        match self {
            Self::Limited(v) => v,
            Self::Unlimited => UNLIMITED_SENTINEL,
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// True iff the allowance is finite and `used` is strictly above it.
    pub fn exceeded_by(self, used: f64) -> bool {
        match self {
            Self::Limited(limit) => used > limit,
            Self::Unlimited => false,
        }
    }
}

impl From<f64> for Allowance {
    fn from(value: f64) -> Self {
        Self::from_sentinel(value)
    }
}

impl From<Allowance> for f64 {
    fn from(value: Allowance) -> Self {
        value.to_sentinel()
    }
}

/// One row of the plan table, in file column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: PlanId,
    pub plan_name: String,
    pub plan_type: String,
    pub monthly_price_usd: f64,
    pub data_limit_gb: Allowance,
    pub talk_minutes: Allowance,
    pub text_messages: Allowance,
    pub hotspot_gb: Allowance,
    pub overage_rate_usd_per_gb: f64,
    pub contract_months: i64,
}

impl Plan {
    /// Column names of the plan table, in order.
    pub const COLUMNS: [&'static str; 10] = [
        "plan_id",
        "plan_name",
        "plan_type",
        "monthly_price_usd",
        "data_limit_gb",
        "talk_minutes",
        "text_messages",
        "hotspot_gb",
        "overage_rate_usd_per_gb",
        "contract_months",
    ];

    pub fn exceeds_data(&self, used_gb: f64) -> bool {
        self.data_limit_gb.exceeded_by(used_gb)
    }
}

/// The built-in R-Mobile catalog.
pub fn default_catalog() -> Vec<Plan> {
    use Allowance::{Limited, Unlimited};
    vec![
        Plan {
            plan_id: 1,
            plan_name: "R-Basic".into(),
            plan_type: "postpaid".into(),
            monthly_price_usd: 29.99,
            data_limit_gb: Limited(5.0),
            talk_minutes: Limited(500.0),
            text_messages: Limited(1000.0),
            hotspot_gb: Limited(0.0),
            overage_rate_usd_per_gb: 15.0,
            contract_months: 0,
        },
        Plan {
            plan_id: 2,
            plan_name: "R-Plus".into(),
            plan_type: "postpaid".into(),
            monthly_price_usd: 49.99,
            data_limit_gb: Limited(20.0),
            talk_minutes: Unlimited,
            text_messages: Unlimited,
            hotspot_gb: Limited(5.0),
            overage_rate_usd_per_gb: 10.0,
            contract_months: 12,
        },
        Plan {
            plan_id: 3,
            plan_name: "R-Max".into(),
            plan_type: "postpaid".into(),
            monthly_price_usd: 79.99,
            data_limit_gb: Limited(100.0),
            talk_minutes: Unlimited,
            text_messages: Unlimited,
            hotspot_gb: Limited(20.0),
            overage_rate_usd_per_gb: 5.0,
            contract_months: 24,
        },
        Plan {
            plan_id: 4,
            plan_name: "R-Unlimited".into(),
            plan_type: "postpaid".into(),
            monthly_price_usd: 99.99,
            data_limit_gb: Unlimited,
            talk_minutes: Unlimited,
            text_messages: Unlimited,
            hotspot_gb: Limited(50.0),
            overage_rate_usd_per_gb: 0.0,
            contract_months: 24,
        },
    ]
}
