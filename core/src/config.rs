use crate::plan::{default_catalog, Plan};
use serde::{Deserialize, Serialize};

/// Longest call window, in days, the generator will accept.
pub const MAX_DAYS_BACK: i64 = 100_000;

/// Customer and call-record generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub customer_count: usize,
    pub customers_csv: String,
    pub call_records_csv: String,
    pub plans_csv: String,
    pub plans: Vec<Plan>,
    pub usage: UsageConfig,
    pub calls: CallConfig,
}

/// Simulated monthly usage ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// Data range (GB) for plans without a data cap.
    pub unlimited_data_gb: (f64, f64),
    /// Finite plans draw usage from [0, limit * overage_headroom].
    pub overage_headroom: f64,
    pub minutes: (i64, i64),
    pub texts: (i64, i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CallConfig {
    pub min_calls_per_customer: i64,
    pub max_calls_per_customer: i64,
    pub days_back: i64,
    pub missed_probability: f64,
    pub roaming_probability: f64,
    pub duration_seconds: (i64, i64),
    pub domestic_rate_per_second: f64,
    pub roaming_rate_per_second: f64,
    pub outgoing_weight: f64,
    pub incoming_weight: f64,
    pub missed_weight: f64,
}

/// Flat files in, SQLite database out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Plan table: `.xlsx`, `.xlsm`, `.xls`, `.ods` or `.csv`.
    pub plans_path: String,
    pub customers_csv: String,
    pub call_records_csv: String,
    pub db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub endpoint: String,
    pub server_name: String,
    pub default_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_output_tokens: u32,
    pub store: bool,
    pub base_url: String,
    pub api_key_env: String,
    pub workflow_id: String,
    /// Reported as `__trace_source__` in request metadata.
    pub trace_source: String,
}

/// Every stage's settings. Each stage receives only its own section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierConfig {
    pub generator: GeneratorConfig,
    pub loader: LoaderConfig,
    pub server: ServerConfig,
    pub agent: AgentConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            customer_count: 500,
            customers_csv: "r_mobile_customers.csv".into(),
            call_records_csv: "r_mobile_call_records.csv".into(),
            plans_csv: "r_mobile_plans.csv".into(),
            plans: default_catalog(),
            usage: UsageConfig::default(),
            calls: CallConfig::default(),
        }
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            unlimited_data_gb: (20.0, 150.0),
            overage_headroom: 1.5,
            minutes: (50, 2000),
            texts: (100, 5000),
        }
    }
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            min_calls_per_customer: 20,
            max_calls_per_customer: 80,
            days_back: 60,
            missed_probability: 0.10,
            roaming_probability: 0.05,
            duration_seconds: (10, 3600),
            domestic_rate_per_second: 0.01,
            roaming_rate_per_second: 0.03,
            outgoing_weight: 0.5,
            incoming_weight: 0.4,
            missed_weight: 0.1,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            plans_path: "r_mobile_plans.csv".into(),
            customers_csv: "r_mobile_customers.csv".into(),
            call_records_csv: "r_mobile_call_records.csv".into(),
            db_path: "r_mobile.db".into(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: "r_mobile.db".into(),
            host: "127.0.0.1".into(),
            port: 8000,
            endpoint: "/mcp".into(),
            server_name: "R-Mobile SQLite".into(),
            default_limit: 50,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "R-Mobile Agent".into(),
            instructions: "You are a call center agent for a telephone company use your fine \
                           tuning as a priority in answering customer questions."
                .into(),
            model: "ft:gpt-4.1-2025-04-14:riis-llc::CellOhfT".into(),
            temperature: 1.0,
            top_p: 1.0,
            max_output_tokens: 2048,
            store: true,
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            workflow_id: "wf_692219781f148190acae41fee68e4a3606006eb1de08b775".into(),
            trace_source: "agent-builder".into(),
        }
    }
}

impl CarrierConfig {
    /// Load from a JSON file. Missing sections and fields keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the generators cannot sample from.
    pub fn validate(&self) -> anyhow::Result<()> {
        let g = &self.generator;
        anyhow::ensure!(!g.plans.is_empty(), "generator.plans must not be empty");
        anyhow::ensure!(
            g.calls.min_calls_per_customer >= 0
                && g.calls.min_calls_per_customer <= g.calls.max_calls_per_customer,
            "generator.calls: min_calls_per_customer must be in [0, max_calls_per_customer]"
        );
        anyhow::ensure!(
            (0..=MAX_DAYS_BACK).contains(&g.calls.days_back),
            "generator.calls.days_back must be in [0, {MAX_DAYS_BACK}]"
        );
        anyhow::ensure!(
            g.calls.duration_seconds.0 >= 0,
            "generator.calls.duration_seconds must not start below zero"
        );
        anyhow::ensure!(
            g.calls.duration_seconds.0 <= g.calls.duration_seconds.1,
            "generator.calls.duration_seconds is an empty range"
        );
        anyhow::ensure!(
            g.calls.outgoing_weight + g.calls.incoming_weight + g.calls.missed_weight > 0.0,
            "generator.calls: call type weights must not all be zero"
        );
        anyhow::ensure!(
            g.usage.minutes.0 <= g.usage.minutes.1 && g.usage.texts.0 <= g.usage.texts.1,
            "generator.usage: minutes/texts ranges must be non-empty"
        );
        Ok(())
    }

    /// Small, fast settings for tests.
    pub fn default_test() -> Self {
        let mut config = Self::default();
        config.generator.seed = 7;
        config.generator.customer_count = 25;
        config.generator.calls.min_calls_per_customer = 2;
        config.generator.calls.max_calls_per_customer = 6;
        config
    }
}
