//! Caller identity and request provenance
//!
//! The registry performs no authentication; the acting user is whatever the
//! caller hands in and is copied into every audit record.

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// The user performing a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub email: String,
}

impl Actor {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// Where a request came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Everything attached to an audit record besides the change itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    pub actor: Actor,
    pub client: ClientInfo,
}

impl AuditContext {
    /// Context with no client provenance
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            client: ClientInfo::default(),
        }
    }

    /// Attach the client address
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.client.ip = Some(ip.into());
        self
    }

    /// Attach the client user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.client.user_agent = Some(user_agent.into());
        self
    }
}
