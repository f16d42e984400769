//! Windows custom data variables

use super::{ParamValue, ParameterSet, cluster_identity};
use crate::datamodel::{NodeBootstrappingConfiguration, WindowsProfile};
use tracing::debug;

/// Build the custom data variables for a Windows node
///
/// Booleans are emitted as `"true"`/`"false"` text because the Windows
/// template interpolates them into PowerShell strings.
pub fn windows_custom_data(config: &NodeBootstrappingConfiguration) -> ParameterSet {
    let default_profile = WindowsProfile::default();
    let windows = config
        .container_service
        .properties
        .windows_profile
        .as_ref()
        .unwrap_or(&default_profile);
    let not_reboot = config
        .agent_pool_profile
        .as_ref()
        .is_some_and(|p| p.is_not_reboot_windows_node());

    let mut params = cluster_identity(config);
    params.insert("excludeMasterFromStandardLB", ParamValue::bool_text(true));
    params.insert("enableTelemetry", ParamValue::bool_text(false));
    params.insert(
        "windowsEnableCSIProxy",
        ParamValue::bool_text(windows.is_csi_proxy_enabled()),
    );
    params.insert("windowsCSIProxyURL", windows.csi_proxy_url.as_str());
    params.insert(
        "windowsProvisioningScriptsPackageURL",
        windows.provisioning_scripts_package_url.as_str(),
    );
    params.insert("windowsPauseImageURL", windows.windows_pause_image_url.as_str());
    params.insert(
        "alwaysPullWindowsPauseImage",
        ParamValue::bool_text(windows.is_always_pull_windows_pause_image()),
    );
    params.insert("windowsCalicoPackageURL", windows.windows_calico_package_url.as_str());
    params.insert(
        "windowsSecureTlsEnabled",
        ParamValue::bool_text(windows.is_windows_secure_tls_enabled()),
    );
    params.insert("windowsGmsaPackageUrl", windows.windows_gmsa_package_url.as_str());
    params.insert("windowsCSEScriptsPackageURL", windows.cse_scripts_package_url.as_str());
    params.insert("isNotRebootWindowsNode", ParamValue::bool_text(not_reboot));

    debug!("Built Windows custom data with {} entries", params.len());
    params
}
