//! Outbound connectivity check
//!
//! Synthesizes the shell snippet run by the CSE before provisioning to make
//! sure the node can reach its container registry. The snippet retries the
//! probe, then makes one last untimed attempt and exits with
//! `ERR_OUTBOUND_CONN_FAIL` (50) if that fails too.

use crate::datamodel::{HttpProxyConfig, NodeBootstrappingConfiguration};
use crate::features::Feature;
use semver::Version;
use tracing::debug;

/// Registry mirror used from the China sovereign cloud
pub const CHINA_REGISTRY: &str = "gcr.azk8s.cn";

/// Public registry host
pub const DEFAULT_REGISTRY: &str = "mcr.microsoft.com";

/// First orchestrator version whose node image can run curl through a TLS proxy
pub const TLS_PROBE_MIN_VERSION: Version = Version::new(1, 18, 0);

pub const RETRY_COUNT: u32 = 100;
pub const RETRY_WAIT_SECONDS: u32 = 1;
pub const RETRY_TIMEOUT_SECONDS: u32 = 10;

/// Exit code reported when the node has no outbound connectivity
pub const ERR_OUTBOUND_CONN_FAIL: i32 = 50;

pub const OUTBOUND_LOG_PATH: &str = "/var/log/azure/cluster-provision-cse-output.log";

const RETRY_FUNCTION: &str = "retrycmd_if_failure() { r=$1; w=$2; t=$3; shift && shift && shift; for i in $(seq 1 $r); do timeout $t ${@}; [ $? -eq 0  ] && break || if [ $i -eq $r ]; then return 1; else sleep $w; fi; done }";

/// Registry host probed by the connectivity check
pub fn registry_host(config: &NodeBootstrappingConfiguration) -> String {
    let cs = &config.container_service;
    if config.is_china_cloud() {
        CHINA_REGISTRY.to_string()
    } else if cs.is_aks_custom_cloud() {
        cs.properties
            .custom_cloud_env
            .as_ref()
            .map(|env| env.mcr_url.clone())
            .unwrap_or_default()
    } else {
        DEFAULT_REGISTRY.to_string()
    }
}

/// Parse a semantic version, treating anything malformed as `0.0.0`
pub fn parse_version_or_zero(version: &str) -> Version {
    Version::parse(version).unwrap_or(Version::new(0, 0, 0))
}

/// Single connectivity probe against `registry`
///
/// Clusters older than 1.18 run images whose curl cannot negotiate TLS
/// through a proxy, so they fall back to a raw TCP check on port 443.
pub fn connectivity_probe(registry: &str, orchestrator_version: &str) -> String {
    let version = parse_version_or_zero(orchestrator_version);
    if version >= TLS_PROBE_MIN_VERSION {
        format!("curl -v --insecure --proxy-insecure https://{registry}/v2/")
    } else {
        format!("nc -vz {registry} 443")
    }
}

/// Proxy `export` statements, empty when nothing is set
///
/// Order is `NO_PROXY`, `HTTPS_PROXY`, then `http_proxy` last.
pub fn proxy_exports(proxy: &HttpProxyConfig) -> String {
    let mut vars = String::new();
    if let Some(http_proxy) = &proxy.http_proxy {
        vars = format!("export http_proxy=\"{http_proxy}\";");
    }
    if let Some(https_proxy) = &proxy.https_proxy {
        vars = format!("export HTTPS_PROXY=\"{https_proxy}\"; {vars}");
    }
    if let Some(no_proxy) = &proxy.no_proxy {
        vars = format!("export NO_PROXY=\"{}\"; {vars}", no_proxy.join(","));
    }
    vars
}

/// Build the outbound connectivity check command
///
/// Returns an empty string when outbound internet is blocked or no registry
/// is known.
pub fn outbound_command(config: &NodeBootstrappingConfiguration) -> String {
    if config
        .feature_flags()
        .is_enabled(Feature::BlockOutboundInternet)
    {
        debug!("Outbound internet blocked, skipping connectivity check");
        return String::new();
    }

    let registry = registry_host(config);
    if registry.is_empty() {
        debug!("No registry configured for custom cloud, skipping connectivity check");
        return String::new();
    }

    let probe = connectivity_probe(
        &registry,
        config.container_service.properties.orchestrator_version(),
    );
    debug!("Outbound connectivity probe: {}", probe);

    let cmd = format!(
        "{RETRY_FUNCTION}; ERR_OUTBOUND_CONN_FAIL={ERR_OUTBOUND_CONN_FAIL}; \
         retrycmd_if_failure {RETRY_COUNT} {RETRY_WAIT_SECONDS} {RETRY_TIMEOUT_SECONDS} {probe} \
         >> {OUTBOUND_LOG_PATH} 2>&1 || time {probe} || exit $ERR_OUTBOUND_CONN_FAIL;"
    );

    let exports = config
        .http_proxy_config
        .as_ref()
        .map(proxy_exports)
        .unwrap_or_default();

    if exports.is_empty() {
        cmd
    } else {
        format!("{exports} {cmd}")
    }
}
