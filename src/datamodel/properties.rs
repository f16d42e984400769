//! Derived cluster names and predicates
//!
//! Resource names that are not stored in the configuration but computed from
//! it (subnet, NSG, route table, ...). All of them are total: a missing or
//! malformed section falls back to the generated default name.

use super::{
    AKS_CUSTOM_CLOUD_NAME, AVAILABILITY_SET, AgentPoolProfile, ContainerService,
    KubernetesConfig, Properties, VHD_DISTROS, VIRTUAL_MACHINE_SCALE_SETS, WindowsProfile,
};

/// Prefix used for generated Kubernetes resource names
const ORCHESTRATOR_NAME: &str = "k8s";

/// VM type reported for clusters with a scale-set pool
pub const VMSS_VM_TYPE: &str = "vmss";

/// VM type reported for availability-set clusters
pub const STANDARD_VM_TYPE: &str = "standard";

// Segment positions in
// /subscriptions/<sub>/resourceGroups/<rg>/providers/Microsoft.Network/virtualNetworks/<vnet>/subnets/<subnet>
const VNET_RESOURCE_GROUP_INDEX: usize = 4;
const VNET_NAME_INDEX: usize = 8;
const SUBNET_NAME_INDEX: usize = 10;

const CLUSTER_ID_SIZE: u64 = 100_000_000;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(data: &[u8]) -> u64 {
    data.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

impl ContainerService {
    /// Whether the cluster targets an AKS custom cloud
    pub fn is_aks_custom_cloud(&self) -> bool {
        self.properties
            .custom_cloud_env
            .as_ref()
            .is_some_and(|env| env.name.eq_ignore_ascii_case(AKS_CUSTOM_CLOUD_NAME))
    }
}

impl Properties {
    /// Kubernetes config section, if present
    pub fn kubernetes_config(&self) -> Option<&KubernetesConfig> {
        self.orchestrator_profile
            .as_ref()
            .and_then(|p| p.kubernetes_config.as_ref())
    }

    /// Orchestrator version string, empty when no orchestrator profile is set
    pub fn orchestrator_version(&self) -> &str {
        self.orchestrator_profile
            .as_ref()
            .map(|p| p.orchestrator_version.as_str())
            .unwrap_or_default()
    }

    /// Eight digit cluster id
    ///
    /// Uses the configured id when present, otherwise hashes the hosted
    /// master DNS prefix (or the first pool name) so that the id is stable
    /// for a given cluster.
    pub fn cluster_id(&self) -> String {
        if let Some(id) = self.cluster_id.as_deref().filter(|id| !id.is_empty()) {
            return id.to_string();
        }

        let seed = if let Some(master) = &self.hosted_master_profile {
            master.dns_prefix.as_str()
        } else if let Some(pool) = self.agent_pool_profiles.first() {
            pool.name.as_str()
        } else {
            ""
        };

        format!("{:08}", fnv1a(seed.as_bytes()) % CLUSTER_ID_SIZE)
    }

    pub fn has_vmss_agent_pool(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(AgentPoolProfile::is_virtual_machine_scale_sets)
    }

    /// `vmss` or `standard`
    pub fn vm_type(&self) -> &'static str {
        if self.has_vmss_agent_pool() {
            VMSS_VM_TYPE
        } else {
            STANDARD_VM_TYPE
        }
    }

    /// Whether every agent pool is placed in a bring-your-own subnet
    pub fn are_agent_profiles_custom_vnet(&self) -> bool {
        !self.agent_pool_profiles.is_empty()
            && self
                .agent_pool_profiles
                .iter()
                .all(AgentPoolProfile::is_custom_vnet)
    }

    fn custom_vnet_segment(&self, index: usize) -> Option<&str> {
        if !self.are_agent_profiles_custom_vnet() {
            return None;
        }
        self.agent_pool_profiles
            .first()
            .and_then(|pool| pool.vnet_subnet_id.split('/').nth(index))
            .filter(|segment| !segment.is_empty())
    }

    pub fn subnet_name(&self) -> String {
        self.custom_vnet_segment(SUBNET_NAME_INDEX)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{ORCHESTRATOR_NAME}-subnet"))
    }

    pub fn virtual_network_name(&self) -> String {
        self.custom_vnet_segment(VNET_NAME_INDEX)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{ORCHESTRATOR_NAME}-vnet-{}", self.cluster_id()))
    }

    /// Resource group of a custom VNET, empty otherwise
    pub fn vnet_resource_group_name(&self) -> String {
        self.custom_vnet_segment(VNET_RESOURCE_GROUP_INDEX)
            .map(str::to_string)
            .unwrap_or_default()
    }

    pub fn nsg_name(&self) -> String {
        format!("{ORCHESTRATOR_NAME}-agentpool-{}-nsg", self.cluster_id())
    }

    pub fn route_table_name(&self) -> String {
        format!("{ORCHESTRATOR_NAME}-agentpool-{}-routetable", self.cluster_id())
    }

    /// Availability set of the first pool, empty for scale-set clusters
    pub fn primary_availability_set_name(&self) -> String {
        match self.agent_pool_profiles.first() {
            Some(pool) if pool.is_availability_sets() => {
                format!("{}-availabilitySet-{}", pool.name, self.cluster_id())
            }
            _ => String::new(),
        }
    }

    /// Whether every agent pool boots from a pre-baked VHD image
    pub fn is_vhd_distro_for_all_nodes(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .all(AgentPoolProfile::is_vhd_distro)
    }

    pub fn use_managed_identity(&self) -> bool {
        self.kubernetes_config()
            .is_some_and(|k| k.use_managed_identity)
    }

    pub fn use_instance_metadata(&self) -> bool {
        self.kubernetes_config()
            .and_then(|k| k.use_instance_metadata)
            .unwrap_or(false)
    }

    /// Load balancer SKU, empty without kubernetes config
    pub fn load_balancer_sku(&self) -> &str {
        self.kubernetes_config()
            .map(|k| k.load_balancer_sku.as_str())
            .unwrap_or_default()
    }

    pub fn maximum_load_balancer_rule_count(&self) -> i64 {
        self.kubernetes_config()
            .map(|k| k.maximum_load_balancer_rule_count)
            .unwrap_or(0)
    }
}

impl AgentPoolProfile {
    pub fn is_vhd_distro(&self) -> bool {
        VHD_DISTROS.contains(&self.distro.as_str())
    }

    pub fn is_virtual_machine_scale_sets(&self) -> bool {
        self.availability_profile == VIRTUAL_MACHINE_SCALE_SETS
    }

    pub fn is_availability_sets(&self) -> bool {
        self.availability_profile == AVAILABILITY_SET
    }

    pub fn is_custom_vnet(&self) -> bool {
        !self.vnet_subnet_id.is_empty()
    }

    pub fn is_not_reboot_windows_node(&self) -> bool {
        self.not_reboot_windows_node.unwrap_or(false)
    }
}

impl WindowsProfile {
    pub fn is_csi_proxy_enabled(&self) -> bool {
        self.enable_csi_proxy.unwrap_or(false)
    }

    pub fn is_always_pull_windows_pause_image(&self) -> bool {
        self.always_pull_windows_pause_image.unwrap_or(false)
    }

    pub fn is_windows_secure_tls_enabled(&self) -> bool {
        self.windows_secure_tls_enabled.unwrap_or(false)
    }
}
