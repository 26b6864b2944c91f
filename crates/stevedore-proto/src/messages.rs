//! CLI protocol messages for container management operations.
//!
//! This module defines the protocol between the `stevedore` CLI and the
//! container-management service. Messages are JSON text frames carrying
//! tagged enums.
//!
//! # Message Flow
//!
//! ```text
//! ┌───────────┐    ClientMessage     ┌──────────────────┐
//! │ stevedore │─────────────────────►│  ContainerService │
//! │           │◄─────────────────────│                  │
//! └───────────┘    ServiceResponse   └──────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::container::{ContainerInfo, ContainerSpec};
use crate::types::ContainerId;
use crate::ProtoError;

/// Protocol version for client-service communication.
pub const PROTOCOL_VERSION: u32 = 1;

/// Capability token requested during the handshake.
pub const SERVICE_CAPABILITY: &str = "container-manager";

/// Messages sent from the CLI to the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Handshake identifying the client and the capability it requests.
    Hello {
        /// Client version.
        version: String,
        /// Protocol version.
        protocol_version: u32,
        /// Requested capability token.
        capability: String,
    },

    /// Diagnostic echo; answered without a full handshake.
    Probe,

    /// Start a new container.
    StartContainer {
        /// Start specification.
        spec: ContainerSpec,
    },

    /// List all containers.
    ListContainers,

    /// Get a snapshot of a specific container.
    GetContainer {
        /// Container ID.
        container_id: ContainerId,
    },

    /// Pause a running container.
    PauseContainer {
        /// Container ID.
        container_id: ContainerId,
    },

    /// Resume a paused container.
    UnpauseContainer {
        /// Container ID.
        container_id: ContainerId,
    },

    /// Terminate a container.
    TerminateContainer {
        /// Container ID.
        container_id: ContainerId,
    },
}

impl ClientMessage {
    /// Create a hello message carrying the standard capability token.
    #[must_use]
    pub fn hello(version: impl Into<String>) -> Self {
        Self::Hello {
            version: version.into(),
            protocol_version: PROTOCOL_VERSION,
            capability: SERVICE_CAPABILITY.into(),
        }
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ProtoError> {
        serde_json::to_string(self).map_err(|e| ProtoError::Encoding(e.to_string()))
    }

    /// Parse from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a valid message.
    pub fn from_json(json: &str) -> Result<Self, ProtoError> {
        serde_json::from_str(json).map_err(|e| ProtoError::Decoding(e.to_string()))
    }

    /// Short name of this request for logging.
    #[must_use]
    pub fn request_type(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "hello",
            Self::Probe => "probe",
            Self::StartContainer { .. } => "start_container",
            Self::ListContainers => "list_containers",
            Self::GetContainer { .. } => "get_container",
            Self::PauseContainer { .. } => "pause_container",
            Self::UnpauseContainer { .. } => "unpause_container",
            Self::TerminateContainer { .. } => "terminate_container",
        }
    }
}

/// Responses sent from the service to the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceResponse {
    /// Handshake accepted.
    Welcome {
        /// Server version.
        server_version: String,
        /// Protocol version.
        protocol_version: u32,
    },

    /// Diagnostic echo reply.
    ProbeReply {
        /// Plain string response.
        message: String,
    },

    /// Single container snapshot.
    Container {
        /// Container information.
        container: ContainerInfo,
    },

    /// List of container snapshots, in service order.
    Containers {
        /// Container information.
        containers: Vec<ContainerInfo>,
    },

    /// Container paused.
    ContainerPaused {
        /// Container ID.
        container_id: ContainerId,
    },

    /// Container resumed.
    ContainerUnpaused {
        /// Container ID.
        container_id: ContainerId,
    },

    /// Container terminated.
    ContainerTerminated {
        /// Container ID.
        container_id: ContainerId,
    },

    /// Request rejected or failed.
    Error {
        /// Error code.
        code: u32,
        /// Human-readable cause.
        message: String,
    },
}

impl ServiceResponse {
    /// Create a welcome response.
    #[must_use]
    pub fn welcome(server_version: impl Into<String>) -> Self {
        Self::Welcome {
            server_version: server_version.into(),
            protocol_version: PROTOCOL_VERSION,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(code: u32, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }

    /// Check if this is an error response.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ProtoError> {
        serde_json::to_string(self).map_err(|e| ProtoError::Encoding(e.to_string()))
    }

    /// Parse from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a valid response.
    pub fn from_json(json: &str) -> Result<Self, ProtoError> {
        serde_json::from_str(json).map_err(|e| ProtoError::Decoding(e.to_string()))
    }
}

/// Error codes for service responses.
pub mod error_codes {
    /// Container not found.
    pub const CONTAINER_NOT_FOUND: u32 = 1001;
    /// Invalid request.
    pub const INVALID_REQUEST: u32 = 1002;
    /// Operation not valid in the container's current state.
    pub const INVALID_STATE: u32 = 1003;
    /// Internal error.
    pub const INTERNAL_ERROR: u32 = 1004;
    /// Protocol version mismatch.
    pub const PROTOCOL_MISMATCH: u32 = 1005;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::EnvMap;
    use crate::types::ContainerStatus;

    #[test]
    fn hello_round_trips() {
        let msg = ClientMessage::hello("0.1.0");
        let json = msg.to_json().unwrap();
        assert!(json.contains("\"type\":\"hello\""));
        assert!(json.contains("container-manager"));

        let parsed = ClientMessage::from_json(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn probe_is_tagged() {
        let json = ClientMessage::Probe.to_json().unwrap();
        assert_eq!(json, r#"{"type":"probe"}"#);
    }

    #[test]
    fn start_container_round_trips() {
        let spec = ContainerSpec::new("nginx:latest")
            .with_env("PORT", "8080")
            .with_timeout_seconds(3600);
        let msg = ClientMessage::StartContainer { spec };

        let json = msg.to_json().unwrap();
        assert!(json.contains("\"type\":\"start_container\""));
        assert!(json.contains("\"timeout_seconds\":3600"));

        let parsed = ClientMessage::from_json(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn get_container_carries_canonical_id() {
        let id = ContainerId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let msg = ClientMessage::GetContainer { container_id: id };

        let json = msg.to_json().unwrap();
        assert!(json.contains("67e55044-10b1-426f-9247-bb680e5fe0c8"));
    }

    #[test]
    fn containers_response_round_trips() {
        let resp = ServiceResponse::Containers {
            containers: vec![ContainerInfo {
                id: ContainerId::new(),
                image: "nginx:latest".into(),
                status: ContainerStatus::Running,
                created_at_ms: 1_700_000_000_000,
                auto_terminate_seconds: 0,
                docker_container_id: Some("abc".into()),
                error_message: None,
                env: EnvMap::new(),
            }],
        };

        let json = resp.to_json().unwrap();
        let parsed = ServiceResponse::from_json(&json).unwrap();
        assert_eq!(parsed, resp);
    }

    #[test]
    fn error_response_is_error() {
        let resp = ServiceResponse::error(error_codes::CONTAINER_NOT_FOUND, "no such container");
        assert!(resp.is_error());
        assert!(!ServiceResponse::welcome("0.1.0").is_error());
    }

    #[test]
    fn malformed_json_is_a_decoding_error() {
        let err = ServiceResponse::from_json("{not json").unwrap_err();
        assert!(matches!(err, ProtoError::Decoding(_)));
    }

    #[test]
    fn request_type_names_every_variant() {
        assert_eq!(ClientMessage::ListContainers.request_type(), "list_containers");
        assert_eq!(
            ClientMessage::PauseContainer {
                container_id: ContainerId::new()
            }
            .request_type(),
            "pause_container"
        );
    }
}
