//! Table configuration.
//!
//! Read from `DYNAMODB_*` environment variables:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `DYNAMODB_TABLE_NAME` | [`TableConfig::table_name`] | `orders` |
//! | `DYNAMODB_REGION` | [`TableConfig::region`] | the ambient AWS region |
//! | `DYNAMODB_ENDPOINT_URL` | [`TableConfig::endpoint_url`] | the regional endpoint |

use crate::error::Result;

use config::Environment;
use serde::Deserialize;

const ENV_PREFIX: &str = "DYNAMODB";

fn default_table_name() -> String {
    "orders".to_string()
}

/// Where the single table lives.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct TableConfig {
    /// Name of the table.
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// AWS region override.
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override, e.g. a local DynamoDB.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            region: None,
            endpoint_url: None,
        }
    }
}

impl TableConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        let settings = config::Config::builder().add_source(environment).build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn load(variables: &[(&str, &str)]) -> TableConfig {
        let variables: HashMap<String, String> = variables
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        TableConfig::from_environment(
            Environment::with_prefix(ENV_PREFIX).source(Some(variables)),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]), TableConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DYNAMODB_TABLE_NAME", "orders-test"),
            ("DYNAMODB_REGION", "eu-west-1"),
            ("DYNAMODB_ENDPOINT_URL", "http://localhost:8000"),
            ("OTHER_TABLE_NAME", "ignored"),
        ]);
        assert_eq!(
            config,
            TableConfig {
                table_name: "orders-test".to_string(),
                region: Some("eu-west-1".to_string()),
                endpoint_url: Some("http://localhost:8000".to_string()),
            }
        );
    }
}
