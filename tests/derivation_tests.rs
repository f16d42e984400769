//! Tests for parameter derivation

use nodebake::catalog::{GzipCatalog, ScriptCatalog, decode_payload, scripts};
use nodebake::datamodel::{
    AgentPoolProfile, CustomCloudEnv, KubernetesConfig, NodeBootstrappingConfiguration,
    OrchestratorProfile, WindowsProfile,
};
use nodebake::derive_all;
use nodebake::params::cse::OUTBOUND_COMMAND_KEY;
use nodebake::params::linux::{
    INIT_AKS_CUSTOM_CLOUD_KEY, LINUX_CLOUD_INIT_SCRIPTS, LINUX_NON_VHD_SCRIPTS,
};
use nodebake::params::{
    ParamValue, cse_command_variables, linux_cloud_init_data, windows_custom_data,
};

/// Catalog whose payload for a script is `payload:<name>`
struct TaggingCatalog;

impl ScriptCatalog for TaggingCatalog {
    fn encode(&self, name: &str) -> String {
        format!("payload:{name}")
    }
}

fn pool(distro: &str) -> AgentPoolProfile {
    AgentPoolProfile {
        name: "nodepool1".to_string(),
        vm_size: "Standard_D2s_v3".to_string(),
        distro: distro.to_string(),
        availability_profile: "VirtualMachineScaleSets".to_string(),
        ..Default::default()
    }
}

fn config_with_pools(distros: &[&str]) -> NodeBootstrappingConfiguration {
    let mut config = NodeBootstrappingConfiguration::default();
    config.container_service.properties.agent_pool_profiles =
        distros.iter().map(|d| pool(d)).collect();
    config.agent_pool_profile = distros.first().map(|d| pool(d));
    config
}

fn custom_cloud(config: &mut NodeBootstrappingConfiguration) {
    config.container_service.properties.custom_cloud_env = Some(CustomCloudEnv {
        name: "akscustom".to_string(),
        mcr_url: "mcr.microsoft.fakecustomcloud".to_string(),
    });
}

fn full_config() -> NodeBootstrappingConfiguration {
    let mut config = config_with_pools(&["aks-ubuntu-containerd-18.04"]);
    config.tenant_id = "tenant-id".to_string();
    config.subscription_id = "sub-id".to_string();
    config.resource_group_name = "MC_rg_cluster_westus2".to_string();
    config.primary_scale_set_name = "aks-nodepool1-vmss".to_string();
    config.user_assigned_identity_client_id = "client-id".to_string();
    config.container_service.location = "westus2".to_string();
    config.container_service.properties.cluster_id = Some("17281422".to_string());
    config.container_service.properties.orchestrator_profile = Some(OrchestratorProfile {
        orchestrator_version: "1.19.7".to_string(),
        kubernetes_config: Some(KubernetesConfig {
            use_managed_identity: true,
            use_instance_metadata: Some(true),
            load_balancer_sku: "Standard".to_string(),
            maximum_load_balancer_rule_count: 250,
        }),
    });
    config.container_service.properties.windows_profile = Some(WindowsProfile {
        enable_csi_proxy: Some(true),
        csi_proxy_url: "https://packages/csi-proxy.tar".to_string(),
        provisioning_scripts_package_url: "https://packages/scripts.zip".to_string(),
        windows_pause_image_url: "mcr.microsoft.com/oss/kubernetes/pause:3.6".to_string(),
        always_pull_windows_pause_image: Some(false),
        windows_calico_package_url: "https://packages/calico.zip".to_string(),
        windows_secure_tls_enabled: Some(true),
        windows_gmsa_package_url: "https://packages/gmsa.zip".to_string(),
        cse_scripts_package_url: "https://packages/cse.zip".to_string(),
    });
    config
}

// ==================== Linux cloud-init data ====================

#[test]
fn test_linux_fixed_scripts_always_present() {
    let params = linux_cloud_init_data(&config_with_pools(&["aks-ubuntu-18.04"]), &TaggingCatalog);

    for (key, script) in LINUX_CLOUD_INIT_SCRIPTS {
        assert_eq!(
            params.get_str(key),
            Some(format!("payload:{script}").as_str()),
            "{key} should carry {script}"
        );
    }
}

#[test]
fn test_linux_non_vhd_block_present_as_a_whole() {
    let params = linux_cloud_init_data(
        &config_with_pools(&["aks-ubuntu-18.04", "ubuntu"]),
        &TaggingCatalog,
    );

    for (key, script) in LINUX_NON_VHD_SCRIPTS {
        assert_eq!(params.get_str(key), Some(format!("payload:{script}").as_str()));
    }
    assert_eq!(
        params.len(),
        LINUX_CLOUD_INIT_SCRIPTS.len() + LINUX_NON_VHD_SCRIPTS.len()
    );
}

#[test]
fn test_linux_non_vhd_block_absent_for_vhd_pools() {
    let params = linux_cloud_init_data(
        &config_with_pools(&["aks-ubuntu-18.04", "aks-cblmariner-v2"]),
        &TaggingCatalog,
    );

    for (key, _) in LINUX_NON_VHD_SCRIPTS {
        assert!(!params.contains_key(key), "{key} should be absent");
    }
    assert_eq!(params.len(), LINUX_CLOUD_INIT_SCRIPTS.len());
}

#[test]
fn test_linux_custom_cloud_key_only_for_custom_cloud() {
    let mut config = config_with_pools(&["aks-ubuntu-18.04"]);
    let params = linux_cloud_init_data(&config, &TaggingCatalog);
    assert!(!params.contains_key(INIT_AKS_CUSTOM_CLOUD_KEY));

    custom_cloud(&mut config);
    let params = linux_cloud_init_data(&config, &TaggingCatalog);
    assert_eq!(
        params.get_str(INIT_AKS_CUSTOM_CLOUD_KEY),
        Some(format!("payload:{}", scripts::INIT_AKS_CUSTOM_CLOUD_SCRIPT).as_str())
    );
}

#[test]
fn test_linux_custom_cloud_mariner_script() {
    let mut config = config_with_pools(&["aks-cblmariner-v1"]);
    custom_cloud(&mut config);

    for sku in ["CBLMariner", "cblmariner", "CBLMARINER"] {
        config.os_sku = sku.to_string();
        let params = linux_cloud_init_data(&config, &TaggingCatalog);
        assert_eq!(
            params.get_str(INIT_AKS_CUSTOM_CLOUD_KEY),
            Some(format!("payload:{}", scripts::INIT_AKS_CUSTOM_CLOUD_MARINER_SCRIPT).as_str()),
            "{sku} should select the Mariner script"
        );
    }

    config.os_sku = "Ubuntu".to_string();
    let params = linux_cloud_init_data(&config, &TaggingCatalog);
    assert_eq!(
        params.get_str(INIT_AKS_CUSTOM_CLOUD_KEY),
        Some(format!("payload:{}", scripts::INIT_AKS_CUSTOM_CLOUD_SCRIPT).as_str())
    );
}

#[test]
fn test_linux_payloads_from_gzip_catalog() {
    let catalog = GzipCatalog::new()
        .with_script(scripts::CSE_MAIN_SCRIPT, "#!/bin/bash\nmain\n")
        .unwrap();

    let params = linux_cloud_init_data(&config_with_pools(&["aks-ubuntu-18.04"]), &catalog);
    let payload = params.get_str("provisionScript").unwrap();
    assert_eq!(decode_payload(payload).unwrap(), b"#!/bin/bash\nmain\n");
}

// ==================== Windows custom data ====================

#[test]
fn test_windows_custom_data_values() {
    let params = windows_custom_data(&full_config());

    assert_eq!(params.len(), 26);
    assert_eq!(params.get_str("tenantID"), Some("tenant-id"));
    assert_eq!(params.get_str("subscriptionId"), Some("sub-id"));
    assert_eq!(params.get_str("resourceGroup"), Some("MC_rg_cluster_westus2"));
    assert_eq!(params.get_str("location"), Some("westus2"));
    assert_eq!(params.get_str("vmType"), Some("vmss"));
    assert_eq!(params.get_str("nsgName"), Some("k8s-agentpool-17281422-nsg"));
    assert_eq!(params.get_str("primaryAvailabilitySetName"), Some(""));
    assert_eq!(params.get_str("primaryScaleSetName"), Some("aks-nodepool1-vmss"));
    assert_eq!(params.get_str("loadBalancerSku"), Some("Standard"));
    assert_eq!(params.get_str("windowsCSIProxyURL"), Some("https://packages/csi-proxy.tar"));
    assert_eq!(params.get_str("windowsCSEScriptsPackageURL"), Some("https://packages/cse.zip"));
}

#[test]
fn test_windows_booleans_are_text() {
    let params = windows_custom_data(&full_config());

    let expected = [
        ("useManagedIdentityExtension", "true"),
        ("useInstanceMetadata", "true"),
        ("excludeMasterFromStandardLB", "true"),
        ("enableTelemetry", "false"),
        ("windowsEnableCSIProxy", "true"),
        ("alwaysPullWindowsPauseImage", "false"),
        ("windowsSecureTlsEnabled", "true"),
        ("isNotRebootWindowsNode", "false"),
    ];
    for (key, value) in expected {
        assert_eq!(params.get(key), Some(&ParamValue::Str(value.to_string())), "{key}");
    }
    assert!(params.iter().all(|(_, v)| v.as_bool().is_none()));
}

#[test]
fn test_windows_not_reboot_node() {
    let mut config = full_config();
    if let Some(profile) = config.agent_pool_profile.as_mut() {
        profile.not_reboot_windows_node = Some(true);
    }
    let params = windows_custom_data(&config);
    assert_eq!(params.get_str("isNotRebootWindowsNode"), Some("true"));
}

// ==================== CSE command variables ====================

#[test]
fn test_cse_variables() {
    let params = cse_command_variables(&full_config());

    assert_eq!(params.get("maximumLoadBalancerRuleCount"), Some(&ParamValue::Int(250)));
    assert_eq!(params.get("excludeMasterFromStandardLB"), Some(&ParamValue::Bool(true)));
    assert_eq!(params.get_str("userAssignedIdentityID"), Some("client-id"));
    assert_eq!(params.get_str("isVHD"), Some("true"));
    assert_eq!(params.get_str("gpuNode"), Some("false"));
    assert_eq!(params.get_str("sgxNode"), Some("false"));
    assert_eq!(params.get_str("migNode"), Some("false"));
    assert_eq!(params.get_str("virtualNetworkResourceGroupName"), Some(""));
    assert_eq!(params.get("configGPUDriverIfNeeded"), Some(&ParamValue::Bool(false)));

    let outbound = params.get_str(OUTBOUND_COMMAND_KEY).unwrap();
    assert!(outbound.contains("curl -v --insecure --proxy-insecure https://mcr.microsoft.com/v2/"));
}

#[test]
fn test_cse_custom_vnet_resource_group() {
    let mut config = full_config();
    config.container_service.properties.agent_pool_profiles[0].vnet_subnet_id =
        "/subscriptions/sub-id/resourceGroups/vnet-rg/providers/Microsoft.Network/virtualNetworks/vnet1/subnets/subnet1"
            .to_string();

    let params = cse_command_variables(&config);
    assert_eq!(params.get_str("virtualNetworkResourceGroupName"), Some("vnet-rg"));
    assert_eq!(params.get_str("virtualNetworkName"), Some("vnet1"));
    assert_eq!(params.get_str("subnetName"), Some("subnet1"));
}

// ==================== Defaults and determinism ====================

#[test]
fn test_empty_configuration_derives_defaults() {
    let config = NodeBootstrappingConfiguration::default();
    let all = derive_all(&config, &TaggingCatalog);

    assert!(!all.linux.contains_key(INIT_AKS_CUSTOM_CLOUD_KEY));

    for key in [
        "useManagedIdentityExtension",
        "useInstanceMetadata",
        "windowsEnableCSIProxy",
        "alwaysPullWindowsPauseImage",
        "windowsSecureTlsEnabled",
        "isNotRebootWindowsNode",
    ] {
        assert_eq!(all.windows.get_str(key), Some("false"), "{key}");
    }
    assert_eq!(all.windows.get_str("loadBalancerSku"), Some(""));

    assert_eq!(all.cse.get("maximumLoadBalancerRuleCount"), Some(&ParamValue::Int(0)));
    for key in ["isVHD", "gpuNode", "sgxNode", "migNode"] {
        assert_eq!(all.cse.get_str(key), Some("false"), "{key}");
    }
    // empty version parses as 0.0.0
    assert!(
        all.cse
            .get_str(OUTBOUND_COMMAND_KEY)
            .unwrap()
            .contains("nc -vz mcr.microsoft.com 443")
    );
}

#[test]
fn test_derivation_is_deterministic() {
    let mut config = full_config();
    custom_cloud(&mut config);
    let catalog = GzipCatalog::new()
        .with_script(scripts::CSE_START_SCRIPT, "start")
        .unwrap();

    let first = derive_all(&config, &catalog);
    let second = derive_all(&config, &catalog);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.cse).unwrap(),
        serde_json::to_string(&second.cse).unwrap()
    );
}

#[test]
fn test_configuration_from_yaml_document() {
    let yaml = r#"
tenantID: tenant-id
osSKU: CBLMariner
agentPoolProfile:
  name: pool1
  vmSize: Standard_NC6s_v3
  distro: aks-cblmariner-v2
containerService:
  location: eastus
  properties:
    customCloudEnv:
      name: akscustom
      mcrURL: mcr.airgap.example
    agentPoolProfiles:
      - name: pool1
        vmSize: Standard_NC6s_v3
        distro: aks-cblmariner-v2
        availabilityProfile: VirtualMachineScaleSets
    orchestratorProfile:
      orchestratorVersion: 1.24.9
"#;
    let config = NodeBootstrappingConfiguration::from_yaml(yaml).unwrap();
    let all = derive_all(&config, &TaggingCatalog);

    assert_eq!(
        all.linux.get_str(INIT_AKS_CUSTOM_CLOUD_KEY),
        Some(format!("payload:{}", scripts::INIT_AKS_CUSTOM_CLOUD_MARINER_SCRIPT).as_str())
    );
    assert!(!all.linux.contains_key("provisionCIS"));
    assert_eq!(all.cse.get_str("gpuNode"), Some("true"));
    assert_eq!(all.cse.get_str("isVHD"), Some("true"));
    assert!(
        all.cse
            .get_str(OUTBOUND_COMMAND_KEY)
            .unwrap()
            .contains("https://mcr.airgap.example/v2/")
    );
}
