//! Static catalog of the agents reachable through the gateway.
//!
//! Descriptors are immutable and statically enumerated; every active-agent
//! value in the system is validated against this set.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Identifier of a known agent.
///
/// Construction goes through [`AgentId::parse`] (or serde, which delegates to
/// it), so holding an `AgentId` is proof the id belongs to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct AgentId(&'static str);

impl<'de> Deserialize<'de> for AgentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown agent id '{0}'")]
pub struct UnknownAgent(pub String);

/// The coordinator agent: routes complex consultations between specialists.
pub const COORDINATOR: AgentId = AgentId("master_legal_agent");
/// The specialist surface's default agent.
pub const DEFAULT_SPECIALIST: AgentId = AgentId("societario_specialist");

pub const TRIBUTARIO: AgentId = AgentId("tributario_specialist");
pub const CONTRATOS: AgentId = AgentId("contratos_specialist");

/// One entry in the static agent catalog.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDescriptor {
    pub id: AgentId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub gradient: &'static str,
    pub is_default: bool,
}

pub const CATALOG: &[AgentDescriptor] = &[
    AgentDescriptor {
        id: COORDINATOR,
        name: "Master Legal Agent",
        description: "Coordena consultas jurídicas complexas entre especialistas",
        icon: "scale",
        gradient: "from-blue-500 to-purple-600",
        is_default: false,
    },
    AgentDescriptor {
        id: DEFAULT_SPECIALIST,
        name: "Societário Specialist",
        description: "Especialista em estruturação societária e holdings",
        icon: "building",
        gradient: "from-green-500 to-teal-600",
        is_default: true,
    },
    AgentDescriptor {
        id: TRIBUTARIO,
        name: "Tributário Specialist",
        description: "Especialista em planejamento tributário e defesas fiscais",
        icon: "calculator",
        gradient: "from-orange-500 to-red-600",
        is_default: false,
    },
    AgentDescriptor {
        id: CONTRATOS,
        name: "Contratos Specialist",
        description: "Especialista em contratos empresariais e M&A",
        icon: "file-text",
        gradient: "from-purple-500 to-pink-600",
        is_default: false,
    },
];

impl AgentId {
    /// Validate a raw id against the catalog.
    pub fn parse(raw: &str) -> Result<Self, UnknownAgent> {
        CATALOG
            .iter()
            .find(|d| d.id.0 == raw)
            .map(|d| d.id)
            .ok_or_else(|| UnknownAgent(raw.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl TryFrom<String> for AgentId {
    type Error = UnknownAgent;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AgentId> for String {
    fn from(value: AgentId) -> Self {
        value.0.to_string()
    }
}

/// Look up a descriptor by raw id.
pub fn find(raw: &str) -> Option<&'static AgentDescriptor> {
    CATALOG.iter().find(|d| d.id.0 == raw)
}

/// Whether a raw id names a catalog agent.
pub fn is_known(raw: &str) -> bool {
    find(raw).is_some()
}
