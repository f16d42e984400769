//! Cluster feature flags
//!
//! Each flag is an independent boolean gate consulted by the derivers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Feature flags set on the cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureFlags {
    pub block_outbound_internet: bool,
    #[serde(rename = "enableCSERunInBackground")]
    pub cse_run_in_background: bool,
    #[serde(rename = "enableIPv6DualStack")]
    pub enable_ipv6_dual_stack: bool,
    #[serde(rename = "enableIPv6Only")]
    pub enable_ipv6_only: bool,
    pub enable_telemetry: bool,
    #[serde(rename = "enableWinDSR")]
    pub enable_win_dsr: bool,
}

/// Named feature gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Node has no outbound internet; skip the connectivity check
    BlockOutboundInternet,
    CSERunInBackground,
    EnableIPv6DualStack,
    EnableIPv6Only,
    EnableTelemetry,
    EnableWinDSR,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::BlockOutboundInternet,
        Feature::CSERunInBackground,
        Feature::EnableIPv6DualStack,
        Feature::EnableIPv6Only,
        Feature::EnableTelemetry,
        Feature::EnableWinDSR,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::BlockOutboundInternet => "BlockOutboundInternet",
            Feature::CSERunInBackground => "CSERunInBackground",
            Feature::EnableIPv6DualStack => "EnableIPv6DualStack",
            Feature::EnableIPv6Only => "EnableIPv6Only",
            Feature::EnableTelemetry => "EnableTelemetry",
            Feature::EnableWinDSR => "EnableWinDSR",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown feature flag: {s}"))
    }
}

impl FeatureFlags {
    /// Check a single feature gate
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::BlockOutboundInternet => self.block_outbound_internet,
            Feature::CSERunInBackground => self.cse_run_in_background,
            Feature::EnableIPv6DualStack => self.enable_ipv6_dual_stack,
            Feature::EnableIPv6Only => self.enable_ipv6_only,
            Feature::EnableTelemetry => self.enable_telemetry,
            Feature::EnableWinDSR => self.enable_win_dsr,
        }
    }

    /// Check a feature gate by name; unknown names are disabled
    pub fn is_feature_enabled(&self, name: &str) -> bool {
        name.parse::<Feature>()
            .map(|f| self.is_enabled(f))
            .unwrap_or(false)
    }
}
