//! CSE command variables

use super::{ParamValue, ParameterSet, cluster_identity};
use crate::datamodel::NodeBootstrappingConfiguration;
use crate::datamodel::sku::{is_mig_node, is_nvidia_enabled_sku, is_sgx_enabled_sku};
use crate::outbound::outbound_command;
use tracing::debug;

/// Key carrying the outbound connectivity check
pub const OUTBOUND_COMMAND_KEY: &str = "outBoundCmd";

/// Whether the node gets the NVIDIA driver stack
///
/// An explicit `enableNvidia` wins over the VM size.
pub fn is_gpu_node(config: &NodeBootstrappingConfiguration) -> bool {
    config.enable_nvidia.unwrap_or_else(|| {
        config
            .agent_pool_profile
            .as_ref()
            .is_some_and(|p| is_nvidia_enabled_sku(&p.vm_size))
    })
}

/// Build the variables of the CSE command line
pub fn cse_command_variables(config: &NodeBootstrappingConfiguration) -> ParameterSet {
    let props = &config.container_service.properties;
    let profile = config.agent_pool_profile.as_ref();
    let vm_size = profile.map(|p| p.vm_size.as_str()).unwrap_or_default();

    let mut params = cluster_identity(config);
    params.insert(
        "virtualNetworkResourceGroupName",
        props.vnet_resource_group_name(),
    );
    params.insert("excludeMasterFromStandardLB", true);
    params.insert(
        "maximumLoadBalancerRuleCount",
        props.maximum_load_balancer_rule_count(),
    );
    params.insert(
        "userAssignedIdentityID",
        config.user_assigned_identity_client_id.as_str(),
    );
    params.insert(
        "isVHD",
        ParamValue::bool_text(profile.is_some_and(|p| p.is_vhd_distro())),
    );
    params.insert("gpuNode", ParamValue::bool_text(is_gpu_node(config)));
    params.insert("sgxNode", ParamValue::bool_text(is_sgx_enabled_sku(vm_size)));
    params.insert("configGPUDriverIfNeeded", config.config_gpu_driver_if_needed);
    params.insert(
        "enableGPUDevicePluginIfNeeded",
        config.enable_gpu_device_plugin_if_needed,
    );
    params.insert(
        "migNode",
        ParamValue::bool_text(is_mig_node(&config.gpu_instance_profile)),
    );
    params.insert("gpuInstanceProfile", config.gpu_instance_profile.as_str());
    params.insert(OUTBOUND_COMMAND_KEY, outbound_command(config));

    debug!("Built CSE command variables with {} entries", params.len());
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::AgentPoolProfile;

    fn config_with_size(vm_size: &str) -> NodeBootstrappingConfiguration {
        NodeBootstrappingConfiguration {
            agent_pool_profile: Some(AgentPoolProfile {
                vm_size: vm_size.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_gpu_node_from_vm_size() {
        assert!(is_gpu_node(&config_with_size("Standard_NC6s_v3")));
        assert!(!is_gpu_node(&config_with_size("Standard_D4s_v3")));
    }

    #[test]
    fn test_gpu_node_explicit_override() {
        let mut config = config_with_size("Standard_NC6s_v3");
        config.enable_nvidia = Some(false);
        assert!(!is_gpu_node(&config));

        let mut config = config_with_size("Standard_D4s_v3");
        config.enable_nvidia = Some(true);
        assert!(is_gpu_node(&config));
    }

    #[test]
    fn test_hardware_flags_are_text() {
        let mut config = config_with_size("Standard_DC2s");
        config.gpu_instance_profile = "MIG3g".to_string();

        let params = cse_command_variables(&config);
        assert_eq!(params.get_str("sgxNode"), Some("true"));
        assert_eq!(params.get_str("gpuNode"), Some("false"));
        assert_eq!(params.get_str("migNode"), Some("true"));
        assert_eq!(params.get_str("gpuInstanceProfile"), Some("MIG3g"));
    }
}
