use serde::Deserialize;

/// File-sink configuration: each configured sink is rewritten with the
/// latest per-stream metrics on every collector update.
#[derive(Debug, Clone, Deserialize)]
pub struct SinksConfig {
    pub prometheus: Option<PrometheusSinkConfig>,
    pub influx: Option<InfluxSinkConfig>,
    pub json: Option<JsonSinkConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrometheusSinkConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InfluxSinkConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonSinkConfig {
    pub path: String,
}
