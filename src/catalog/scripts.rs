//! Script names known to the catalog
//!
//! Names are paths relative to the script root.

pub const CSE_START_SCRIPT: &str = "linux/cloud-init/artifacts/cse_start.sh";
pub const CSE_MAIN_SCRIPT: &str = "linux/cloud-init/artifacts/cse_main.sh";
pub const CSE_HELPERS_SCRIPT: &str = "linux/cloud-init/artifacts/cse_helpers.sh";
pub const CSE_HELPERS_SCRIPT_UBUNTU: &str = "linux/cloud-init/artifacts/ubuntu/cse_helpers_ubuntu.sh";
pub const CSE_HELPERS_SCRIPT_MARINER: &str =
    "linux/cloud-init/artifacts/mariner/cse_helpers_mariner.sh";
pub const CSE_INSTALL_SCRIPT: &str = "linux/cloud-init/artifacts/cse_install.sh";
pub const CSE_INSTALL_SCRIPT_UBUNTU: &str = "linux/cloud-init/artifacts/ubuntu/cse_install_ubuntu.sh";
pub const CSE_INSTALL_SCRIPT_MARINER: &str =
    "linux/cloud-init/artifacts/mariner/cse_install_mariner.sh";
pub const CSE_CONFIG_SCRIPT: &str = "linux/cloud-init/artifacts/cse_config.sh";
pub const CSE_SEND_LOGS_SCRIPT: &str = "linux/cloud-init/artifacts/cse_send_logs.py";
pub const CSE_REDACT_CLOUD_CONFIG_SCRIPT: &str =
    "linux/cloud-init/artifacts/cse_redact_cloud_config.py";
pub const CUSTOM_SEARCH_DOMAINS_SCRIPT: &str =
    "linux/cloud-init/artifacts/setup-custom-search-domains.sh";
pub const DHCPV6_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/dhcpv6.service";
pub const DHCPV6_CONFIGURATION_SCRIPT: &str = "linux/cloud-init/artifacts/enable-dhcpv6.sh";
pub const KUBELET_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/kubelet.service";
pub const KRUSTLET_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/krustlet.service";
pub const RECONCILE_PRIVATE_HOSTS_SCRIPT: &str =
    "linux/cloud-init/artifacts/reconcile-private-hosts.sh";
pub const RECONCILE_PRIVATE_HOSTS_SERVICE: &str =
    "linux/cloud-init/artifacts/reconcile-private-hosts.service";
pub const ENSURE_NO_DUP_EBTABLES_SCRIPT: &str = "linux/cloud-init/artifacts/ensure-no-dup.sh";
pub const ENSURE_NO_DUP_EBTABLES_SERVICE: &str = "linux/cloud-init/artifacts/ensure-no-dup.service";
pub const BIND_MOUNT_SCRIPT: &str = "linux/cloud-init/artifacts/bind-mount.sh";
pub const BIND_MOUNT_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/bind-mount.service";
pub const MIG_PARTITION_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/mig-partition.service";
pub const MIG_PARTITION_SCRIPT: &str = "linux/cloud-init/artifacts/mig-partition.sh";
pub const CONTAINERD_KUBELET_DROPIN: &str = "linux/cloud-init/artifacts/10-containerd.conf";
pub const CGROUPV2_KUBELET_DROPIN: &str = "linux/cloud-init/artifacts/10-cgroupv2.conf";
pub const COMPONENT_CONFIG_DROPIN: &str = "linux/cloud-init/artifacts/10-componentconfig.conf";
pub const TLS_BOOTSTRAP_DROPIN: &str = "linux/cloud-init/artifacts/10-tlsbootstrap.conf";
pub const BIND_MOUNT_DROPIN: &str = "linux/cloud-init/artifacts/10-bindmount.conf";
pub const HTTP_PROXY_DROPIN: &str = "linux/cloud-init/artifacts/10-httpproxy.conf";
pub const COMPONENT_MANIFEST_FILE: &str = "linux/cloud-init/artifacts/manifest.json";
pub const SYNC_TUNNEL_LOGS_SCRIPT: &str = "linux/cloud-init/artifacts/sync-tunnel-logs.sh";

// Custom cloud bootstrap
pub const INIT_AKS_CUSTOM_CLOUD_SCRIPT: &str =
    "linux/cloud-init/artifacts/init-aks-custom-cloud.sh";
pub const INIT_AKS_CUSTOM_CLOUD_MARINER_SCRIPT: &str =
    "linux/cloud-init/artifacts/init-aks-custom-cloud-mariner.sh";

// Only needed on images that are not pre-baked
pub const CIS_SCRIPT: &str = "linux/cloud-init/artifacts/cis.sh";
pub const KMS_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/kms.service";
pub const APT_PREFERENCES: &str = "linux/cloud-init/artifacts/apt-preferences";
pub const HEALTH_MONITOR_SCRIPT: &str = "linux/cloud-init/artifacts/health-monitor.sh";
pub const KUBELET_MONITOR_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/kubelet-monitor.service";
pub const DOCKER_MONITOR_SYSTEMD_SERVICE: &str = "linux/cloud-init/artifacts/docker-monitor.service";
pub const DOCKER_MONITOR_SYSTEMD_TIMER: &str = "linux/cloud-init/artifacts/docker-monitor.timer";
pub const CONTAINERD_MONITOR_SYSTEMD_SERVICE: &str =
    "linux/cloud-init/artifacts/containerd-monitor.service";
pub const CONTAINERD_MONITOR_SYSTEMD_TIMER: &str =
    "linux/cloud-init/artifacts/containerd-monitor.timer";
pub const DOCKER_CLEAR_MOUNT_PROPAGATION_FLAGS: &str =
    "linux/cloud-init/artifacts/docker_clear_mount_propagation_flags.conf";
