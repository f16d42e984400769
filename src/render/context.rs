//! Template context building
//!
//! Converts parameter sets into minijinja values without coercion.

use crate::params::{ParamValue, ParameterSet};
use minijinja::value::Value;
use std::collections::HashMap;

fn to_value(value: &ParamValue) -> Value {
    match value {
        ParamValue::Str(s) => Value::from(s.clone()),
        ParamValue::Bool(b) => Value::from(*b),
        ParamValue::Int(i) => Value::from(*i),
    }
}

/// Build a flat template context, one variable per parameter
pub fn build_context(params: &ParameterSet) -> HashMap<String, Value> {
    params
        .iter()
        .map(|(key, value)| (key.to_string(), to_value(value)))
        .collect()
}

/// Build a context holding the whole set under a single variable
///
/// Mirrors how cloud-init data is exposed to templates as `cloudInitData.<key>`.
pub fn nested_context(name: &str, params: &ParameterSet) -> HashMap<String, Value> {
    let mut ctx = HashMap::new();
    ctx.insert(name.to_string(), Value::from_serialize(build_context(params)));
    ctx
}

/// Merge additional variables into context
pub fn merge_context(base: &mut HashMap<String, Value>, additional: HashMap<String, Value>) {
    for (key, value) in additional {
        base.insert(key, value);
    }
}
