//! Pause and unpause command implementations.
//!
//! Both follow the same fetch-then-mutate shape: the container is fetched
//! first so a missing identifier fails as "not found" rather than as a
//! rejected transition.

use std::io::Write;

use super::parse_container_id;
use crate::client::ServiceClient;
use crate::error::CliError;
use crate::output::{OutputFormat, PauseAck, UnpauseAck};

/// Pause command executor.
pub struct PauseCommand {
    service_url: String,
}

impl PauseCommand {
    /// Create a new pause command.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Execute the pause command.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed, the container is not
    /// found, or the service rejects the transition.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &str,
    ) -> Result<(), CliError> {
        let container_id = parse_container_id(id)?;
        format.notice(&format!("Pausing container {container_id}..."));

        let mut client = ServiceClient::establish(&self.service_url).await?;
        let container = client.get_container(container_id).await?;
        let paused_id = client.pause_container(container.id).await?;
        let _ = client.close().await;

        format.write(
            writer,
            &PauseAck {
                paused: true,
                id: paused_id,
            },
        )?;
        Ok(())
    }
}

/// Unpause command executor.
pub struct UnpauseCommand {
    service_url: String,
}

impl UnpauseCommand {
    /// Create a new unpause command.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Execute the unpause command.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed, the container is not
    /// found, or the service rejects the transition.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &str,
    ) -> Result<(), CliError> {
        let container_id = parse_container_id(id)?;
        format.notice(&format!("Resuming container {container_id}..."));

        let mut client = ServiceClient::establish(&self.service_url).await?;
        let container = client.get_container(container_id).await?;
        let unpaused_id = client.unpause_container(container.id).await?;
        let _ = client.close().await;

        format.write(
            writer,
            &UnpauseAck {
                unpaused: true,
                id: unpaused_id,
            },
        )?;
        Ok(())
    }
}
