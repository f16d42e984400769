//! Node bootstrapping configuration types
//!
//! The configuration snapshot handed to the parameter derivers. Every
//! section is optional so that a partially filled document deserializes and
//! derives with defaults instead of failing.

pub mod loader;
pub mod properties;
pub mod sku;

use serde::{Deserialize, Serialize};

use crate::features::FeatureFlags;

/// Cloud name of the China sovereign cloud
pub const AZURE_CHINA_CLOUD: &str = "AzureChinaCloud";

/// Custom cloud environment name marking an AKS custom cloud
pub const AKS_CUSTOM_CLOUD_NAME: &str = "akscustom";

/// OS SKU of the Mariner family
pub const OS_SKU_CBL_MARINER: &str = "CBLMariner";

/// Availability profile of scale-set agent pools
pub const VIRTUAL_MACHINE_SCALE_SETS: &str = "VirtualMachineScaleSets";

/// Availability profile of availability-set agent pools
pub const AVAILABILITY_SET: &str = "AvailabilitySet";

/// Distros that ship as pre-baked VHD images
pub const VHD_DISTROS: &[&str] = &[
    "aks-ubuntu-16.04",
    "aks-ubuntu-18.04",
    "aks-ubuntu-gpu-18.04",
    "aks-ubuntu-containerd-18.04",
    "aks-ubuntu-containerd-18.04-gen2",
    "aks-ubuntu-gpu-containerd-18.04",
    "aks-ubuntu-gpu-containerd-18.04-gen2",
    "aks-ubuntu-fips-18.04",
    "aks-ubuntu-fips-containerd-18.04",
    "aks-ubuntu-containerd-22.04",
    "aks-ubuntu-containerd-22.04-gen2",
    "aks-cblmariner-v1",
    "aks-cblmariner-v1-gen2",
    "aks-cblmariner-v2",
    "aks-cblmariner-v2-gen2",
];

/// Complete input for one node pool bootstrap derivation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeBootstrappingConfiguration {
    /// Cluster the node joins
    pub container_service: ContainerService,

    /// Cloud environment the cluster runs in
    pub cloud_spec_config: Option<CloudSpecConfig>,

    /// Agent pool being bootstrapped
    pub agent_pool_profile: Option<AgentPoolProfile>,

    #[serde(rename = "tenantID")]
    pub tenant_id: String,

    #[serde(rename = "subscriptionID")]
    pub subscription_id: String,

    pub resource_group_name: String,

    #[serde(rename = "userAssignedIdentityClientID")]
    pub user_assigned_identity_client_id: String,

    pub primary_scale_set_name: String,

    /// OS SKU of the node image (e.g. `Ubuntu`, `CBLMariner`)
    #[serde(rename = "osSKU")]
    pub os_sku: String,

    /// Outbound proxy settings
    pub http_proxy_config: Option<HttpProxyConfig>,

    /// Explicit NVIDIA enablement; derived from the VM size when unset
    pub enable_nvidia: Option<bool>,

    #[serde(rename = "configGPUDriverIfNeeded")]
    pub config_gpu_driver_if_needed: bool,

    #[serde(rename = "enableGPUDevicePluginIfNeeded")]
    pub enable_gpu_device_plugin_if_needed: bool,

    /// MIG partition profile of the GPU (e.g. `MIG1g`)
    #[serde(rename = "gpuInstanceProfile")]
    pub gpu_instance_profile: String,
}

/// Cluster definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerService {
    pub location: String,
    pub properties: Properties,
}

/// Cluster properties
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Properties {
    /// Fixed cluster id; generated from the DNS prefix when unset
    #[serde(rename = "clusterID")]
    pub cluster_id: Option<String>,

    pub orchestrator_profile: Option<OrchestratorProfile>,

    pub hosted_master_profile: Option<HostedMasterProfile>,

    pub agent_pool_profiles: Vec<AgentPoolProfile>,

    pub windows_profile: Option<WindowsProfile>,

    pub feature_flags: Option<FeatureFlags>,

    pub custom_cloud_env: Option<CustomCloudEnv>,
}

/// Orchestrator selection and settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrchestratorProfile {
    /// Kubernetes version, e.g. `1.18.4`
    pub orchestrator_version: String,
    pub kubernetes_config: Option<KubernetesConfig>,
}

/// Kubernetes cloud-provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesConfig {
    pub use_managed_identity: bool,
    pub use_instance_metadata: Option<bool>,
    pub load_balancer_sku: String,
    pub maximum_load_balancer_rule_count: i64,
}

/// Managed control plane
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostedMasterProfile {
    pub dns_prefix: String,
    pub fqdn: String,
}

/// Agent pool definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentPoolProfile {
    pub name: String,
    pub vm_size: String,
    pub distro: String,
    pub availability_profile: String,
    #[serde(rename = "vnetSubnetID")]
    pub vnet_subnet_id: String,
    pub not_reboot_windows_node: Option<bool>,
}

/// Windows node settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowsProfile {
    pub enable_csi_proxy: Option<bool>,
    #[serde(rename = "csiProxyURL")]
    pub csi_proxy_url: String,
    #[serde(rename = "provisioningScriptsPackageURL")]
    pub provisioning_scripts_package_url: String,
    #[serde(rename = "windowsPauseImageURL")]
    pub windows_pause_image_url: String,
    pub always_pull_windows_pause_image: Option<bool>,
    #[serde(rename = "windowsCalicoPackageURL")]
    pub windows_calico_package_url: String,
    pub windows_secure_tls_enabled: Option<bool>,
    pub windows_gmsa_package_url: String,
    #[serde(rename = "cseScriptsPackageURL")]
    pub cse_scripts_package_url: String,
}

/// Custom (sovereign or air-gapped) cloud endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomCloudEnv {
    pub name: String,
    #[serde(rename = "mcrURL")]
    pub mcr_url: String,
}

/// Cloud environment identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudSpecConfig {
    /// e.g. `AzurePublicCloud`, `AzureChinaCloud`
    pub cloud_name: String,
}

/// Outbound proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpProxyConfig {
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
    pub no_proxy: Option<Vec<String>>,
    #[serde(rename = "trustedCA")]
    pub trusted_ca: Option<String>,
}

impl NodeBootstrappingConfiguration {
    /// Parse a configuration snapshot from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse a configuration snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Feature flags of the cluster, all off when the section is absent
    pub fn feature_flags(&self) -> FeatureFlags {
        self.container_service
            .properties
            .feature_flags
            .clone()
            .unwrap_or_default()
    }

    /// Whether the node OS SKU is the Mariner family
    pub fn is_mariner(&self) -> bool {
        self.os_sku.eq_ignore_ascii_case(OS_SKU_CBL_MARINER)
    }

    /// Whether the target cloud is the China sovereign cloud
    pub fn is_china_cloud(&self) -> bool {
        self.cloud_spec_config
            .as_ref()
            .is_some_and(|c| c.cloud_name == AZURE_CHINA_CLOUD)
    }
}
