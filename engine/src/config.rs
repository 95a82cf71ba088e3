//! Generator configuration
//!
//! Meant to be embedded in a host application's own config file. An absent
//! seed means "seed from the entropy source".

use serde::{Deserialize, Serialize};

/// Seeding configuration for [`RngManager`](crate::RngManager)
///
/// # Example
/// ```
/// use inclusive_rng::{RngConfig, RngManager};
///
/// let config: RngConfig = serde_json::from_str(r#"{"seed": 12345}"#).unwrap();
/// let rng = RngManager::from_config(&config).unwrap();
/// assert_eq!(rng, RngManager::new(12345).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    /// Fixed seed; `None` seeds from the entropy source
    pub seed: Option<u64>,
}
