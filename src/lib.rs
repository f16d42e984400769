//! nodebake library
//!
//! Derives the parameters that bootstrap a node into a managed Kubernetes
//! cluster from an immutable configuration snapshot.
//!
//! # Overview
//!
//! - [`params`]: the Linux cloud-init, Windows custom data and CSE command
//!   parameter sets
//! - [`outbound`]: the outbound connectivity check embedded in the CSE
//!   command
//! - [`features`]: feature flag gates consulted by both
//! - [`catalog`]: encoded script payloads referenced by name
//!
//! Derivation is pure and total: a configuration with missing sections
//! derives with defaults instead of failing.

pub mod catalog;
pub mod datamodel;
pub mod features;
pub mod outbound;
pub mod params;
pub mod reconcile;
pub mod render;

mod error;

pub use error::NodeBakeError;

use catalog::ScriptCatalog;
use datamodel::NodeBootstrappingConfiguration;
use params::ParameterSet;
use tracing::info;

/// All parameter sets derived for one node pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapParameters {
    /// Linux cloud-init data
    pub linux: ParameterSet,
    /// Windows custom data
    pub windows: ParameterSet,
    /// CSE command variables
    pub cse: ParameterSet,
}

/// Derive every parameter set for a configuration
pub fn derive_all(
    config: &NodeBootstrappingConfiguration,
    catalog: &dyn ScriptCatalog,
) -> BootstrapParameters {
    let params = BootstrapParameters {
        linux: params::linux_cloud_init_data(config, catalog),
        windows: params::windows_custom_data(config),
        cse: params::cse_command_variables(config),
    };
    info!(
        "Derived bootstrap parameters (linux: {}, windows: {}, cse: {})",
        params.linux.len(),
        params.windows.len(),
        params.cse.len()
    );
    params
}
