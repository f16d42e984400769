//! Jinja2-compatible rendering of provisioning templates
//!
//! Substitutes parameter sets into templates. Values are inserted verbatim,
//! so the derivers are responsible for their final text form.

pub mod context;

pub use context::{build_context, merge_context, nested_context};

use crate::NodeBakeError;
use crate::params::ParameterSet;
use minijinja::{Environment, UndefinedBehavior};
use std::collections::HashMap;
use tracing::debug;

/// Render a template against a single parameter set
pub fn render_with_params(template: &str, params: &ParameterSet) -> Result<String, NodeBakeError> {
    TemplateRenderer::with_params(params).render(template)
}

/// Template renderer with an accumulated context
///
/// Undefined variables are an error so that a missing parameter never
/// renders as empty text.
pub struct TemplateRenderer {
    context: HashMap<String, minijinja::Value>,
}

impl TemplateRenderer {
    /// Create a new template renderer
    pub fn new() -> Self {
        Self {
            context: HashMap::new(),
        }
    }

    /// Create with one parameter set as top-level variables
    pub fn with_params(params: &ParameterSet) -> Self {
        let mut renderer = Self::new();
        renderer.add_params(params);
        renderer
    }

    /// Add a variable to the context
    pub fn add_var(&mut self, name: impl Into<String>, value: impl Into<minijinja::Value>) {
        self.context.insert(name.into(), value.into());
    }

    /// Add every parameter of a set as top-level variables
    pub fn add_params(&mut self, params: &ParameterSet) {
        merge_context(&mut self.context, build_context(params));
    }

    /// Add a parameter set under a single variable name
    pub fn add_nested(&mut self, name: &str, params: &ParameterSet) {
        merge_context(&mut self.context, nested_context(name, params));
    }

    /// Render a template string
    pub fn render(&self, template: &str) -> Result<String, NodeBakeError> {
        debug!("Rendering template with {} variables", self.context.len());

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template("template", template)
            .map_err(|e| NodeBakeError::Template(format!("Template parse error: {}", e)))?;

        let tmpl = env
            .get_template("template")
            .map_err(|e| NodeBakeError::Template(format!("Template error: {}", e)))?;

        tmpl.render(&self.context)
            .map_err(|e| NodeBakeError::Template(format!("Template render error: {}", e)))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
