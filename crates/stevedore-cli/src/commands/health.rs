//! Service health command implementation.

use std::io::Write;
use std::time::Instant;

use crate::client::ServiceClient;
use crate::error::CliError;
use crate::output::{HealthReport, OutputFormat};

/// Health command executor.
pub struct HealthCommand {
    service_url: String,
}

impl HealthCommand {
    /// Create a new health command.
    #[must_use]
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Execute the health command.
    ///
    /// A probe failure is folded into the report rather than returned: the
    /// command's job is to report health, and it has done so either way.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the report fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        format.notice(&format!("Probing {}...", self.service_url));

        let started = Instant::now();
        let outcome = ServiceClient::probe(&self.service_url).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let report = match outcome {
            Ok(message) => HealthReport {
                healthy: true,
                service: self.service_url.clone(),
                response: Some(message),
                error: None,
                latency_ms,
            },
            Err(e) => HealthReport {
                healthy: false,
                service: self.service_url.clone(),
                response: None,
                error: Some(e.to_string()),
                latency_ms,
            },
        };

        format.write(writer, &report)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;

    #[tokio::test]
    async fn unreachable_service_still_produces_a_report() {
        let cmd = HealthCommand::new("ws://127.0.0.1:1");
        let format = OutputFormat::new(Format::Json);
        let mut buf = Vec::new();

        cmd.execute(&mut buf, &format).await.expect("should report");

        let output = String::from_utf8(buf).expect("valid utf8");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(parsed["healthy"], false);
        assert_eq!(parsed["service"], "ws://127.0.0.1:1");
        assert!(parsed["error"].is_string());
        assert!(parsed["latency_ms"].is_u64());
    }

    #[tokio::test]
    async fn invalid_address_is_reported_not_raised() {
        let cmd = HealthCommand::new("not-a-ws-url");
        let format = OutputFormat::new(Format::Human);
        let mut buf = Vec::new();

        cmd.execute(&mut buf, &format).await.expect("should report");

        let output = String::from_utf8(buf).expect("valid utf8");
        assert!(output.contains("✗ Service unhealthy"));
        assert!(output.contains("invalid service address"));
    }
}
