//! Decision identity and references.
//!
//! Definitions belong to the deployment subsystem; this crate only refers to
//! them. A [`DecisionReference`] is what a business-rule task declares, and a
//! resolver turns it into a concrete [`DecisionDefinition`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a deployed decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDefinition {
    /// Unique id of this deployed version (e.g. `invoice:3:b7e1`).
    pub id: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
}

impl DecisionDefinition {
    pub fn new(id: impl Into<String>, key: impl Into<String>, version: u32) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            name: None,
            version,
            deployment_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_deployment(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = Some(deployment_id.into());
        self
    }
}

/// Which version of a decision key a task calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecisionBinding {
    /// Highest deployed version of the key.
    #[default]
    Latest,
    /// Exactly this version.
    Version(u32),
    /// The version deployed together with the calling process definition.
    Deployment,
}

/// A decision as referenced by a business-rule task.
///
/// JSON form: `{"key": "invoice", "binding": "version", "version": 2}`.
/// `binding` defaults to `latest`; `version` is required for (and only
/// allowed with) the `version` binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReferenceSpec", into = "ReferenceSpec")]
pub struct DecisionReference {
    pub key: String,
    pub binding: DecisionBinding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum BindingName {
    #[default]
    Latest,
    Version,
    Deployment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReferenceSpec {
    key: String,
    #[serde(default)]
    binding: BindingName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
}

impl TryFrom<ReferenceSpec> for DecisionReference {
    type Error = String;

    fn try_from(spec: ReferenceSpec) -> Result<Self, Self::Error> {
        let binding = match (spec.binding, spec.version) {
            (BindingName::Version, Some(version)) => DecisionBinding::Version(version),
            (BindingName::Version, None) => {
                return Err(format!("decision '{}': binding 'version' requires a version", spec.key));
            }
            (_, Some(_)) => {
                return Err(format!(
                    "decision '{}': a version is only allowed with binding 'version'",
                    spec.key
                ));
            }
            (BindingName::Latest, None) => DecisionBinding::Latest,
            (BindingName::Deployment, None) => DecisionBinding::Deployment,
        };
        Ok(Self {
            key: spec.key,
            binding,
        })
    }
}

impl From<DecisionReference> for ReferenceSpec {
    fn from(reference: DecisionReference) -> Self {
        let (binding, version) = match reference.binding {
            DecisionBinding::Latest => (BindingName::Latest, None),
            DecisionBinding::Version(v) => (BindingName::Version, Some(v)),
            DecisionBinding::Deployment => (BindingName::Deployment, None),
        };
        Self {
            key: reference.key,
            binding,
            version,
        }
    }
}

impl DecisionReference {
    pub fn latest(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            binding: DecisionBinding::Latest,
        }
    }

    pub fn version(key: impl Into<String>, version: u32) -> Self {
        Self {
            key: key.into(),
            binding: DecisionBinding::Version(version),
        }
    }

    pub fn deployment(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            binding: DecisionBinding::Deployment,
        }
    }
}

impl fmt::Display for DecisionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.binding {
            DecisionBinding::Latest => write!(f, "{} (latest)", self.key),
            DecisionBinding::Version(version) => write!(f, "{} (version {version})", self.key),
            DecisionBinding::Deployment => write!(f, "{} (deployment)", self.key),
        }
    }
}
