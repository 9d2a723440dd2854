//! User preference model.

use serde::{Deserialize, Serialize};

/// Session-level user preferences consulted by the aggregation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Optional duration budget compared against the aggregate total.
    #[serde(default)]
    pub cap: Option<f64>,
    /// Display label for duration values.
    #[serde(default = "default_units")]
    pub units: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cap: None,
            units: default_units(),
        }
    }
}

fn default_units() -> String {
    "minutes".to_string()
}
