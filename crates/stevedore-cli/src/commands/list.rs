//! List containers command implementation.

use std::io::Write;

use crate::client::ServiceClient;
use crate::error::CliError;
use crate::output::{ContainerList, OutputFormat};

/// List command executor.
pub struct ListCommand {
    service_url: String,
}

impl ListCommand {
    /// Create a new list command.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Execute the list command.
    ///
    /// Snapshots are rendered in the order the service returned them.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the request fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        format.notice("Fetching containers...");

        let mut client = ServiceClient::establish(&self.service_url).await?;
        let containers = client.list_containers().await?;
        let _ = client.close().await;

        format.write(writer, &ContainerList(containers))?;
        Ok(())
    }
}
