//! `[watch]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[watch]` section in fieldnotes.toml - live rebuild settings.
///
/// # Example
/// ```toml
/// [watch]
/// debounce_ms = 500
/// export = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Quiet period before a batch of changes triggers a rebuild.
    #[serde(default = "defaults::watch::debounce_ms")]
    #[educe(Default = defaults::watch::debounce_ms())]
    pub debounce_ms: u64,

    /// Minimum time between the end of one rebuild and the next.
    #[serde(default = "defaults::watch::cooldown_ms")]
    #[educe(Default = defaults::watch::cooldown_ms())]
    pub cooldown_ms: u64,

    /// Write JSON data files after every rebuild.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub export: bool,
}
