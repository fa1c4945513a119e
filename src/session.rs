//! Session - routes command lines and owns the node registry

use crate::assign::{self, Assigned};
use crate::compile;
use crate::errors::{PixlabError, Result};
use crate::log::debug;
use crate::node::NodeRef;
use crate::registry::Registry;
use crate::types::Resolution;

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Resolution of generators given `default`
    pub default_resolution: Resolution,
    /// Resolution of the constant-color nodes made from inline colors
    pub constant_resolution: Resolution,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_resolution: Resolution::square(1024),
            constant_resolution: Resolution::square(1),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_resolution(mut self, resolution: Resolution) -> Self {
        self.default_resolution = resolution;
        self
    }

    pub fn with_constant_resolution(mut self, resolution: Resolution) -> Self {
        self.constant_resolution = resolution;
        self
    }
}

/// What a successfully executed command did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank line or comment
    Nothing,
    /// `name = expr` built a node and stored it under `name`
    Registered { name: String },
    /// `name.property = value` changed a live node
    PropertySet { name: String, property: String },
    /// Entries for the caller to print, one per line
    Listing(Vec<String>),
    /// A compiled graph for the renderer
    Render(NodeRef),
}

/// Whether `text` is routed as an assignment rather than compiled
pub fn is_assignment(text: &str) -> bool {
    text.contains('=')
}

/// One interactive session: a registry plus its settings
#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
    config: SessionConfig,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Execute one command line.
    ///
    /// - blank lines and `# comments` do nothing
    /// - `lhs = rhs` assigns (see [`Session::assign`])
    /// - `name.` lists the properties of `name`
    /// - anything else is compiled for rendering
    ///
    /// A failing command leaves the registry and every node unchanged.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Outcome::Nothing);
        }
        if let Some((lhs, rhs)) = line.split_once('=') {
            return self.assign(lhs, rhs);
        }
        if let Some(name) = line.strip_suffix('.') {
            return self.list_names(name.trim()).map(Outcome::Listing);
        }
        self.compile(line).map(Outcome::Render)
    }

    /// Compile an expression against the current registry without storing it
    pub fn compile(&self, text: &str) -> Result<NodeRef> {
        compile::compile(text, &self.registry, &self.config)
    }

    /// `name.property = value` sets a property; `name = expr` registers a node.
    pub fn assign(&mut self, lhs: &str, rhs: &str) -> Result<Outcome> {
        let (name, value) = (lhs.trim(), rhs.trim());
        if name.is_empty() {
            return Err(PixlabError::EmptyName);
        }
        if value.is_empty() {
            return Err(PixlabError::EmptyValue {
                name: name.to_string(),
            });
        }

        match assign::assign(&self.registry, name, value)? {
            Some(Assigned::Set { name, property, .. }) => {
                return Ok(Outcome::PropertySet { name, property });
            }
            Some(Assigned::Cases(cases)) => return Ok(Outcome::Listing(cases)),
            None => {}
        }

        if !is_identifier(name) {
            return Err(PixlabError::InvalidName {
                name: name.to_string(),
            });
        }
        let node = self.compile(value)?;
        if self.registry.insert(name, node).is_some() {
            debug!(%name, "replaced registry entry");
        }
        Ok(Outcome::Registered {
            name: name.to_string(),
        })
    }

    /// Properties of the node called `name`, each written `.property`
    pub fn list_names(&self, name: &str) -> Result<Vec<String>> {
        assign::list_properties(&self.registry, name)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
