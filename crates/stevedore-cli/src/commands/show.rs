//! Show container command implementation.

use std::io::Write;

use super::parse_container_id;
use crate::client::ServiceClient;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Show command executor.
pub struct ShowCommand {
    service_url: String,
}

impl ShowCommand {
    /// Create a new show command.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed, the container is not
    /// found, or the request fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &str,
    ) -> Result<(), CliError> {
        let container_id = parse_container_id(id)?;
        format.notice(&format!("Fetching container {container_id}..."));

        let mut client = ServiceClient::establish(&self.service_url).await?;
        let container = client.get_container(container_id).await?;
        let _ = client.close().await;

        format.write(writer, &container)?;
        Ok(())
    }
}
