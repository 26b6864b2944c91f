//! WebSocket client for the container-management service.
//!
//! [`ServiceClient::establish`] resolves the logical service address to a
//! live connection and performs the capability handshake, returning a typed
//! proxy for the six container operations. [`ServiceClient::probe`] is the
//! deliberately separate, lighter diagnostic path: it opens its own
//! connection and skips the handshake, because the two paths request
//! different capability sets.
//!
//! No retries and no client-side request timeouts: a first failure is
//! terminal for the invocation, and a remote call may block until the
//! transport gives up. The server-side auto-terminate policy is the only
//! timeout in the system.

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, trace, warn};

use stevedore_proto::{
    ClientMessage, ContainerId, ContainerInfo, ContainerSpec, ServiceResponse, PROTOCOL_VERSION,
};

use crate::error::CliError;

/// Typed proxy over a live service connection.
pub struct ServiceClient {
    /// WebSocket stream.
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// Server version reported in the handshake.
    server_version: String,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("server_version", &self.server_version)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Establish a connection to the service at the given address.
    ///
    /// Performs the handshake carrying the capability token.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Connection` if:
    /// - The address is invalid (must start with `ws://` or `wss://`)
    /// - Resolution or connection fails
    /// - The service refuses the handshake
    pub async fn establish(address: &str) -> Result<Self, CliError> {
        validate_address(address)?;

        debug!(address = %address, "Resolving service address");
        let (ws, _response) = connect_async(address)
            .await
            .map_err(|e| CliError::Connection(e.to_string()))?;

        debug!("Connected, sending handshake");
        let mut client = Self {
            ws,
            server_version: String::new(),
        };

        let hello = ClientMessage::hello(env!("CARGO_PKG_VERSION"));
        // a rejection during establishment is a connection failure
        let response = client.send_request(hello).await.map_err(|e| match e {
            CliError::Remote { message, .. } => CliError::Connection(message),
            other => other,
        })?;

        match response {
            ServiceResponse::Welcome {
                server_version,
                protocol_version,
            } => {
                if protocol_version != PROTOCOL_VERSION {
                    warn!(
                        server = protocol_version,
                        client = PROTOCOL_VERSION,
                        "Protocol version mismatch"
                    );
                }
                client.server_version = server_version;
                debug!(version = %client.server_version, "Handshake complete");
                Ok(client)
            }
            other => Err(CliError::Protocol(format!(
                "unexpected response to hello: {other:?}"
            ))),
        }
    }

    /// Probe the diagnostic endpoint at the given address.
    ///
    /// Opens its own lightweight connection, sends a probe without the
    /// capability handshake, and returns the raw string reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the probe fails.
    pub async fn probe(address: &str) -> Result<String, CliError> {
        validate_address(address)?;

        debug!(address = %address, "Probing service");
        let (mut ws, _response) = connect_async(address)
            .await
            .map_err(|e| CliError::Connection(e.to_string()))?;

        let json = ClientMessage::Probe
            .to_json()
            .map_err(|e| CliError::Protocol(e.to_string()))?;
        ws.send(Message::Text(json))
            .await
            .map_err(|e| CliError::Connection(e.to_string()))?;

        let response = next_response(&mut ws).await?;
        let _ = ws.close(None).await;

        match response {
            ServiceResponse::ProbeReply { message } => Ok(message),
            ServiceResponse::Error { code, message } => Err(CliError::Remote { code, message }),
            other => Err(CliError::Protocol(format!(
                "unexpected response to probe: {other:?}"
            ))),
        }
    }

    /// Get the server version reported in the handshake.
    #[must_use]
    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    /// Send a request and wait for a response.
    async fn send_request(&mut self, request: ClientMessage) -> Result<ServiceResponse, CliError> {
        let request_type = request.request_type();
        let json = request
            .to_json()
            .map_err(|e| CliError::Protocol(e.to_string()))?;

        trace!(request_type, "Sending request");
        self.ws
            .send(Message::Text(json))
            .await
            .map_err(|e| CliError::Connection(e.to_string()))?;

        let response = next_response(&mut self.ws).await?;
        if let ServiceResponse::Error { code, message } = response {
            return Err(CliError::Remote { code, message });
        }

        trace!(request_type, "Received response");
        Ok(response)
    }

    /// Close the connection gracefully.
    ///
    /// # Errors
    ///
    /// Returns an error if the close frame cannot be sent.
    pub async fn close(mut self) -> Result<(), CliError> {
        self.ws
            .close(None)
            .await
            .map_err(|e| CliError::Connection(e.to_string()))
    }

    // ========================================================================
    // Container Operations
    // ========================================================================

    /// Start a new container from the given spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the spec or the request fails.
    pub async fn start_container(&mut self, spec: ContainerSpec) -> Result<ContainerInfo, CliError> {
        let response = self
            .send_request(ClientMessage::StartContainer { spec })
            .await?;

        match response {
            ServiceResponse::Container { container } => Ok(container),
            other => Err(CliError::Protocol(format!("unexpected response: {other:?}"))),
        }
    }

    /// List all containers, in the order the service returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_containers(&mut self) -> Result<Vec<ContainerInfo>, CliError> {
        let response = self.send_request(ClientMessage::ListContainers).await?;

        match response {
            ServiceResponse::Containers { containers } => Ok(containers),
            other => Err(CliError::Protocol(format!("unexpected response: {other:?}"))),
        }
    }

    /// Get a snapshot of a specific container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is not found or the request fails.
    pub async fn get_container(
        &mut self,
        container_id: ContainerId,
    ) -> Result<ContainerInfo, CliError> {
        let response = self
            .send_request(ClientMessage::GetContainer { container_id })
            .await?;

        match response {
            ServiceResponse::Container { container } => Ok(container),
            other => Err(CliError::Protocol(format!("unexpected response: {other:?}"))),
        }
    }

    /// Pause a running container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be paused.
    pub async fn pause_container(
        &mut self,
        container_id: ContainerId,
    ) -> Result<ContainerId, CliError> {
        let response = self
            .send_request(ClientMessage::PauseContainer { container_id })
            .await?;

        match response {
            ServiceResponse::ContainerPaused { container_id } => Ok(container_id),
            other => Err(CliError::Protocol(format!("unexpected response: {other:?}"))),
        }
    }

    /// Resume a paused container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be resumed.
    pub async fn unpause_container(
        &mut self,
        container_id: ContainerId,
    ) -> Result<ContainerId, CliError> {
        let response = self
            .send_request(ClientMessage::UnpauseContainer { container_id })
            .await?;

        match response {
            ServiceResponse::ContainerUnpaused { container_id } => Ok(container_id),
            other => Err(CliError::Protocol(format!("unexpected response: {other:?}"))),
        }
    }

    /// Terminate a container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be terminated.
    pub async fn terminate_container(
        &mut self,
        container_id: ContainerId,
    ) -> Result<ContainerId, CliError> {
        let response = self
            .send_request(ClientMessage::TerminateContainer { container_id })
            .await?;

        match response {
            ServiceResponse::ContainerTerminated { container_id } => Ok(container_id),
            other => Err(CliError::Protocol(format!("unexpected response: {other:?}"))),
        }
    }
}

fn validate_address(address: &str) -> Result<(), CliError> {
    if !address.starts_with("ws://") && !address.starts_with("wss://") {
        return Err(CliError::Connection(format!(
            "invalid service address: {address}, must start with ws:// or wss://"
        )));
    }
    Ok(())
}

/// Read the next protocol response from a WebSocket stream.
async fn next_response<S>(ws: &mut S) -> Result<ServiceResponse, CliError>
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => {
                return ServiceResponse::from_json(&text)
                    .map_err(|e| CliError::Protocol(e.to_string()));
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) => {
                return Err(CliError::Connection(
                    "service closed connection unexpectedly".into(),
                ));
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                return Err(CliError::Connection(format!("WebSocket error: {e}")));
            }
            None => {
                return Err(CliError::Connection("service connection closed".into()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_scheme_is_validated() {
        assert!(validate_address("ws://localhost:7700").is_ok());
        assert!(validate_address("wss://svc.example.com").is_ok());
        assert!(validate_address("http://localhost:7700").is_err());
        assert!(validate_address("localhost:7700").is_err());
    }

    #[tokio::test]
    async fn establish_rejects_invalid_address() {
        let result = ServiceClient::establish("http://invalid").await;
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Connection(_)));
        assert!(err.to_string().contains("invalid service address"));
    }

    #[tokio::test]
    async fn establish_fails_against_unreachable_peer() {
        let result = ServiceClient::establish("ws://127.0.0.1:1").await;
        assert!(matches!(result, Err(CliError::Connection(_))));
    }

    #[tokio::test]
    async fn probe_fails_against_unreachable_peer() {
        let result = ServiceClient::probe("ws://127.0.0.1:1").await;
        assert!(matches!(result, Err(CliError::Connection(_))));
    }

    #[tokio::test]
    async fn probe_rejects_invalid_address() {
        let result = ServiceClient::probe("ftp://nowhere").await;
        assert!(matches!(result, Err(CliError::Connection(_))));
    }
}
