//! # Machine Record
//!
//! The inventory entity and its composite `owner/name` identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{MachineError, MachineResult};

/// A compute host tracked by the inventory.
///
/// `owner` + `name` form the identity and never change after creation.
/// Every other attribute is replaced wholesale on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Machine {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub updated_time: String,
    /// Lease expiry; empty means the machine never expires
    pub expire_time: String,
    pub display_name: String,
    pub provider: String,
    /// Instance id reported by the provider
    pub id: String,
    pub region: String,
    pub zone: String,
    pub category: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub size: String,
    pub tag: String,
    pub state: String,
    pub image: String,
    pub os: String,
    pub public_ip: String,
    pub private_ip: String,
    pub cpu_size: String,
    pub mem_size: String,
    pub remote_protocol: String,
    pub remote_port: i32,
    pub remote_username: String,
    pub remote_password: String,
}

impl Machine {
    /// Create a machine with only its identity set
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Composite identity of this record
    pub fn machine_id(&self) -> MachineId {
        MachineId {
            owner: self.owner.clone(),
            name: self.name.clone(),
        }
    }

    /// Look up a string attribute by its wire name.
    ///
    /// Accepts both the camelCase JSON name and the snake_case column name.
    /// Returns `None` for unknown attributes.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "owner" => &self.owner,
            "name" => &self.name,
            "createdTime" | "created_time" => &self.created_time,
            "updatedTime" | "updated_time" => &self.updated_time,
            "expireTime" | "expire_time" => &self.expire_time,
            "displayName" | "display_name" => &self.display_name,
            "provider" => &self.provider,
            "id" => &self.id,
            "region" => &self.region,
            "zone" => &self.zone,
            "category" => &self.category,
            "type" => &self.machine_type,
            "size" => &self.size,
            "tag" => &self.tag,
            "state" => &self.state,
            "image" => &self.image,
            "os" => &self.os,
            "publicIp" | "public_ip" => &self.public_ip,
            "privateIp" | "private_ip" => &self.private_ip,
            "cpuSize" | "cpu_size" => &self.cpu_size,
            "memSize" | "mem_size" => &self.mem_size,
            "remoteProtocol" | "remote_protocol" => &self.remote_protocol,
            "remotePort" | "remote_port" => return Some(self.remote_port.to_string()),
            "remoteUsername" | "remote_username" => &self.remote_username,
            _ => return None,
        };
        Some(value.clone())
    }

    /// Ordering key for a sortable attribute.
    ///
    /// Numeric attributes order by value, everything else as text.
    pub fn sort_key(&self, name: &str) -> Option<SortKey> {
        match name {
            "remotePort" | "remote_port" => Some(SortKey::Number(i64::from(self.remote_port))),
            _ => self.field(name).map(SortKey::Text),
        }
    }

    /// Check that `owner` and `name` form an id [`MachineId::parse`] accepts
    pub fn validate_identity(&self) -> MachineResult<()> {
        let reason = if self.owner.is_empty() {
            "owner is required"
        } else if self.name.is_empty() {
            "name is required"
        } else if self.owner.contains('/') || self.name.contains('/') {
            "owner and name must not contain '/'"
        } else {
            return Ok(());
        };
        Err(MachineError::InvalidIdentity(
            format!("{}/{}", self.owner, self.name),
            reason,
        ))
    }
}

/// Comparable value of one machine attribute
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(i64),
    Text(String),
}

/// Composite machine identity rendered as `owner/name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MachineId {
    pub owner: String,
    pub name: String,
}

impl MachineId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse an `owner/name` id.
    ///
    /// Exactly one separator is allowed and neither side may be empty.
    pub fn parse(id: &str) -> MachineResult<Self> {
        let mut parts = id.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(MachineError::InvalidId(id.to_string())),
        }
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
