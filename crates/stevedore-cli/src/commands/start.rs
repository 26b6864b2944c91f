//! Start container command implementation.

use std::io::Write;

use stevedore_proto::ContainerSpec;

use crate::cli::StartArgs;
use crate::client::ServiceClient;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Start command executor.
pub struct StartCommand {
    service_url: String,
}

impl StartCommand {
    /// Create a new start command.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Execute the start command.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid or the container cannot
    /// be started.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &StartArgs,
    ) -> Result<(), CliError> {
        let spec = self.build_spec(args)?;
        format.notice(&format!("Starting {}...", spec.image));

        let mut client = ServiceClient::establish(&self.service_url).await?;
        let container = client.start_container(spec).await?;
        let _ = client.close().await;

        format.write(writer, &container)?;
        Ok(())
    }

    /// Build a container spec from start arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if an env pair is malformed or the image reference
    /// fails validation.
    pub fn build_spec(&self, args: &StartArgs) -> Result<ContainerSpec, CliError> {
        let mut spec = ContainerSpec::new(&args.image);

        for pair in &args.env {
            let (key, value) = split_env_pair(pair)?;
            spec = spec.with_env(key, value);
        }

        if let Some(timeout) = args.timeout {
            spec = spec.with_timeout_seconds(timeout);
        }

        spec.validate()
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

        Ok(spec)
    }
}

/// Split a `KEY=VALUE` token.
///
/// A token without `=`, or with `=` at position 0, is rejected naming the
/// offending token.
fn split_env_pair(pair: &str) -> Result<(String, String), CliError> {
    match pair.split_once('=') {
        Some(("", _)) | None => Err(CliError::InvalidArgument(format!(
            "invalid environment variable format: {pair}, expected KEY=VALUE"
        ))),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
    }
}
