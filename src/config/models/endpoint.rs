//! Remote endpoint configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where and how identifiers are submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL receiving one POST per identifier
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Fixed secondary key (GLN) sent with every identifier
    #[serde(default = "default_secondary_key")]
    pub secondary_key: String,
    /// Ask the remote side to reprocess identifiers it has already seen
    #[serde(default = "default_true")]
    pub reprocess: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            secondary_key: default_secondary_key(),
            reprocess: true,
            user_agent: default_user_agent(),
        }
    }
}
