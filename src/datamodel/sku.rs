//! Hardware predicates over VM sizes and GPU profiles

/// VM sizes with Intel SGX enclaves
pub const SGX_ENABLED_SKUS: &[&str] = &[
    "Standard_DC2s",
    "Standard_DC4s",
    "Standard_DC1s_v2",
    "Standard_DC2s_v2",
    "Standard_DC4s_v2",
    "Standard_DC8_v2",
];

/// Whether the VM size carries an NVIDIA GPU
///
/// Covers the NC, ND and NV families. NV `_v4` sizes ship AMD GPUs and are
/// excluded.
pub fn is_nvidia_enabled_sku(vm_size: &str) -> bool {
    let size = vm_size.to_ascii_lowercase();
    if size.starts_with("standard_nv") && size.ends_with("_v4") {
        return false;
    }
    size.starts_with("standard_nc") || size.starts_with("standard_nd") || size.starts_with("standard_nv")
}

/// Whether the VM size supports SGX enclaves
pub fn is_sgx_enabled_sku(vm_size: &str) -> bool {
    SGX_ENABLED_SKUS.contains(&vm_size)
}

/// Whether the node partitions its GPU with MIG
pub fn is_mig_node(gpu_instance_profile: &str) -> bool {
    !gpu_instance_profile.is_empty()
}
