//! Bootstrap parameter sets
//!
//! Flat key/value sets handed to the provisioning templates. The renderer
//! substitutes values verbatim, so every value is already in its final
//! presentation form when it leaves this module.
//!
//! - [`linux::linux_cloud_init_data`] - encoded scripts for Linux cloud-init
//! - [`windows::windows_custom_data`] - Windows custom data variables
//! - [`cse::cse_command_variables`] - CSE command variables

pub mod cse;
pub mod linux;
pub mod windows;

pub use cse::cse_command_variables;
pub use linux::linux_cloud_init_data;
pub use windows::windows_custom_data;

use crate::datamodel::NodeBootstrappingConfiguration;
use serde::Serialize;
use std::collections::BTreeMap;

/// Scalar parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl ParamValue {
    /// Boolean rendered as `"true"` / `"false"` text
    pub fn bool_text(value: bool) -> Self {
        ParamValue::Str(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

/// Key/value parameters for one template consumer
///
/// Keys are kept sorted so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// String value of `key`, `None` if absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Identity and networking keys shared by the Windows and CSE sets
fn cluster_identity(config: &NodeBootstrappingConfiguration) -> ParameterSet {
    let cs = &config.container_service;
    let props = &cs.properties;

    let mut params = ParameterSet::new();
    params.insert("tenantID", config.tenant_id.as_str());
    params.insert("subscriptionId", config.subscription_id.as_str());
    params.insert("resourceGroup", config.resource_group_name.as_str());
    params.insert("location", cs.location.as_str());
    params.insert("vmType", props.vm_type());
    params.insert("subnetName", props.subnet_name());
    params.insert("nsgName", props.nsg_name());
    params.insert("virtualNetworkName", props.virtual_network_name());
    params.insert("routeTableName", props.route_table_name());
    params.insert("primaryAvailabilitySetName", props.primary_availability_set_name());
    params.insert("primaryScaleSetName", config.primary_scale_set_name.as_str());
    params.insert(
        "useManagedIdentityExtension",
        ParamValue::bool_text(props.use_managed_identity()),
    );
    params.insert(
        "useInstanceMetadata",
        ParamValue::bool_text(props.use_instance_metadata()),
    );
    params.insert("loadBalancerSku", props.load_balancer_sku());
    params
}
