// Permission scopes as reported by the login endpoint

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Scope name gating multi-cluster polling.
pub const CONFIG_OPT_SCOPE: &str = "config-opt";

/// Capability flags for one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Permission {
    /// Build from the operation names the API lists for a scope ("read", "update", ...).
    /// Unknown operation names are ignored.
    pub fn from_ops<S: AsRef<str>>(ops: &[S]) -> Self {
        let mut p = Permission::default();
        for op in ops {
            match op.as_ref() {
                "read" => p.read = true,
                "create" => p.create = true,
                "update" => p.update = true,
                "delete" => p.delete = true,
                _ => {}
            }
        }
        p
    }
}

/// Permission set of the logged-in user. Scopes not present have no capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions {
    scopes: BTreeMap<String, Permission>,
}

impl Permissions {
    pub fn from_scopes(scopes: &HashMap<String, Vec<String>>) -> Self {
        Self {
            scopes: scopes
                .iter()
                .map(|(scope, ops)| (scope.clone(), Permission::from_ops(ops)))
                .collect(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>, permission: Permission) -> Self {
        self.scopes.insert(scope.into(), permission);
        self
    }

    pub fn scope(&self, name: &str) -> Permission {
        self.scopes.get(name).copied().unwrap_or_default()
    }

    pub fn config_opt(&self) -> Permission {
        self.scope(CONFIG_OPT_SCOPE)
    }
}
