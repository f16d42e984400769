//! Linux cloud-init data
//!
//! Every entry maps a template key to the encoded payload of one script.

use super::ParameterSet;
use crate::catalog::{ScriptCatalog, scripts};
use crate::datamodel::NodeBootstrappingConfiguration;
use tracing::debug;

/// Scripts shipped to every Linux node
pub const LINUX_CLOUD_INIT_SCRIPTS: &[(&str, &str)] = &[
    ("provisionStartScript", scripts::CSE_START_SCRIPT),
    ("provisionScript", scripts::CSE_MAIN_SCRIPT),
    ("provisionSource", scripts::CSE_HELPERS_SCRIPT),
    ("provisionSourceUbuntu", scripts::CSE_HELPERS_SCRIPT_UBUNTU),
    ("provisionSourceMariner", scripts::CSE_HELPERS_SCRIPT_MARINER),
    ("provisionInstalls", scripts::CSE_INSTALL_SCRIPT),
    ("provisionInstallsUbuntu", scripts::CSE_INSTALL_SCRIPT_UBUNTU),
    ("provisionInstallsMariner", scripts::CSE_INSTALL_SCRIPT_MARINER),
    ("provisionConfigs", scripts::CSE_CONFIG_SCRIPT),
    ("provisionSendLogs", scripts::CSE_SEND_LOGS_SCRIPT),
    ("provisionRedactCloudConfig", scripts::CSE_REDACT_CLOUD_CONFIG_SCRIPT),
    ("customSearchDomainsScript", scripts::CUSTOM_SEARCH_DOMAINS_SCRIPT),
    ("dhcpv6SystemdService", scripts::DHCPV6_SYSTEMD_SERVICE),
    ("dhcpv6ConfigurationScript", scripts::DHCPV6_CONFIGURATION_SCRIPT),
    ("kubeletSystemdService", scripts::KUBELET_SYSTEMD_SERVICE),
    ("krustletSystemdService", scripts::KRUSTLET_SYSTEMD_SERVICE),
    ("reconcilePrivateHostsScript", scripts::RECONCILE_PRIVATE_HOSTS_SCRIPT),
    ("reconcilePrivateHostsService", scripts::RECONCILE_PRIVATE_HOSTS_SERVICE),
    ("ensureNoDupEbtablesScript", scripts::ENSURE_NO_DUP_EBTABLES_SCRIPT),
    ("ensureNoDupEbtablesService", scripts::ENSURE_NO_DUP_EBTABLES_SERVICE),
    ("bindMountScript", scripts::BIND_MOUNT_SCRIPT),
    ("bindMountSystemdService", scripts::BIND_MOUNT_SYSTEMD_SERVICE),
    ("migPartitionSystemdService", scripts::MIG_PARTITION_SYSTEMD_SERVICE),
    ("migPartitionScript", scripts::MIG_PARTITION_SCRIPT),
    ("containerdKubeletDropin", scripts::CONTAINERD_KUBELET_DROPIN),
    ("cgroupv2KubeletDropin", scripts::CGROUPV2_KUBELET_DROPIN),
    ("componentConfigDropin", scripts::COMPONENT_CONFIG_DROPIN),
    ("tlsBootstrapDropin", scripts::TLS_BOOTSTRAP_DROPIN),
    ("bindMountDropin", scripts::BIND_MOUNT_DROPIN),
    ("httpProxyDropin", scripts::HTTP_PROXY_DROPIN),
    ("componentManifestFile", scripts::COMPONENT_MANIFEST_FILE),
    ("syncTunnelLogsScript", scripts::SYNC_TUNNEL_LOGS_SCRIPT),
];

/// Scripts already baked into VHD images; shipped as one block otherwise
pub const LINUX_NON_VHD_SCRIPTS: &[(&str, &str)] = &[
    ("provisionCIS", scripts::CIS_SCRIPT),
    ("kmsSystemdService", scripts::KMS_SYSTEMD_SERVICE),
    ("aptPreferences", scripts::APT_PREFERENCES),
    ("healthMonitorScript", scripts::HEALTH_MONITOR_SCRIPT),
    ("kubeletMonitorSystemdService", scripts::KUBELET_MONITOR_SYSTEMD_SERVICE),
    ("dockerMonitorSystemdService", scripts::DOCKER_MONITOR_SYSTEMD_SERVICE),
    ("dockerMonitorSystemdTimer", scripts::DOCKER_MONITOR_SYSTEMD_TIMER),
    ("containerdMonitorSystemdService", scripts::CONTAINERD_MONITOR_SYSTEMD_SERVICE),
    ("containerdMonitorSystemdTimer", scripts::CONTAINERD_MONITOR_SYSTEMD_TIMER),
    ("dockerClearMountPropagationFlags", scripts::DOCKER_CLEAR_MOUNT_PROPAGATION_FLAGS),
];

/// Key carrying the custom cloud bootstrap script
pub const INIT_AKS_CUSTOM_CLOUD_KEY: &str = "initAKSCustomCloud";

/// Custom cloud init script for the node OS
pub fn custom_cloud_init_script(config: &NodeBootstrappingConfiguration) -> &'static str {
    if config.is_mariner() {
        scripts::INIT_AKS_CUSTOM_CLOUD_MARINER_SCRIPT
    } else {
        scripts::INIT_AKS_CUSTOM_CLOUD_SCRIPT
    }
}

fn insert_scripts(
    params: &mut ParameterSet,
    table: &[(&str, &str)],
    catalog: &dyn ScriptCatalog,
) {
    for (key, script) in table {
        params.insert(*key, catalog.encode(script));
    }
}

/// Build the cloud-init data for a Linux node
pub fn linux_cloud_init_data(
    config: &NodeBootstrappingConfiguration,
    catalog: &dyn ScriptCatalog,
) -> ParameterSet {
    let cs = &config.container_service;
    let mut params = ParameterSet::new();

    insert_scripts(&mut params, LINUX_CLOUD_INIT_SCRIPTS, catalog);

    if cs.is_aks_custom_cloud() {
        params.insert(
            INIT_AKS_CUSTOM_CLOUD_KEY,
            catalog.encode(custom_cloud_init_script(config)),
        );
    }

    let all_vhd = cs.properties.is_vhd_distro_for_all_nodes();
    if !all_vhd {
        insert_scripts(&mut params, LINUX_NON_VHD_SCRIPTS, catalog);
    }

    debug!(
        "Built Linux cloud-init data with {} entries (custom cloud: {}, all VHD: {})",
        params.len(),
        cs.is_aks_custom_cloud(),
        all_vhd
    );
    params
}
