//! Terminate command implementation.

use std::io::Write;

use super::parse_container_id;
use crate::client::ServiceClient;
use crate::error::CliError;
use crate::output::{OutputFormat, TerminateAck};

/// Terminate command executor.
pub struct TerminateCommand {
    service_url: String,
}

impl TerminateCommand {
    /// Create a new terminate command.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Execute the terminate command.
    ///
    /// The image reference is captured from the pre-fetch so the
    /// acknowledgment can name it after the remote object has gone stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed, the container is not
    /// found, or the service rejects the termination.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &str,
    ) -> Result<(), CliError> {
        let container_id = parse_container_id(id)?;
        format.notice(&format!("Terminating container {container_id}..."));

        let mut client = ServiceClient::establish(&self.service_url).await?;
        let container = client.get_container(container_id).await?;
        let image = container.image.clone();
        let terminated_id = client.terminate_container(container.id).await?;
        let _ = client.close().await;

        format.write(
            writer,
            &TerminateAck {
                terminated: true,
                id: terminated_id,
                image,
            },
        )?;
        Ok(())
    }
}
