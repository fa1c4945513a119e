//! Named nodes of a session

use std::collections::HashMap;

use crate::errors::{PixlabError, Result};
use crate::log::debug;
use crate::node::NodeRef;

/// Name → node. Names are unique; assigning an existing name replaces the
/// entry, while nodes already wired to the old node keep it alive.
#[derive(Debug, Default)]
pub struct Registry {
    nodes: HashMap<String, NodeRef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `name`, returning the node it replaced.
    pub fn insert(&mut self, name: impl Into<String>, node: NodeRef) -> Option<NodeRef> {
        let name = name.into();
        debug!(%name, kind = node.borrow().kind().name(), "registering node");
        self.nodes.insert(name, node)
    }

    pub fn get(&self, name: &str) -> Option<&NodeRef> {
        self.nodes.get(name)
    }

    /// Like `get`, but a missing name is a `NodeNotFound` error.
    pub fn lookup(&self, name: &str) -> Result<&NodeRef> {
        self.get(name).ok_or_else(|| PixlabError::NodeNotFound {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
