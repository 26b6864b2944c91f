//! Output formatting for CLI commands.
//!
//! Supports human-readable (labeled text blocks) and JSON output. JSON mode
//! renders exactly one document per invocation on stdout; progress notices go
//! to stderr and are suppressed entirely in JSON mode so the primary stream
//! stays parseable.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use stevedore_proto::{ContainerId, ContainerInfo, ContainerStatus};

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both human and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a result value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + HumanDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Human => {
                value.write_human(writer)?;
            }
        }
        Ok(())
    }

    /// Write a result value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + HumanDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }

    /// Emit a progress notice on stderr, human mode only.
    pub fn notice(&self, message: &str) {
        if !self.is_json() {
            eprintln!("{message}");
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Human)
    }
}

/// Trait for types that can be rendered as human-readable text.
pub trait HumanDisplay {
    /// Write the value as labeled, indented plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_human<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Icon used for a status in the compact listing.
#[must_use]
pub const fn status_icon(status: ContainerStatus) -> &'static str {
    match status {
        ContainerStatus::Starting => "[.]",
        ContainerStatus::Running => "[+]",
        ContainerStatus::Paused => "[~]",
        ContainerStatus::Terminated => "[-]",
        ContainerStatus::Failed => "[x]",
    }
}

/// First 8 characters of the canonical identifier, for compact listings.
#[must_use]
pub fn short_id(id: &ContainerId) -> String {
    id.to_string().chars().take(8).collect()
}

fn format_created(ms: i64) -> String {
    if ms == 0 {
        return "unknown".into();
    }
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map_or_else(|| ms.to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

impl HumanDisplay for ContainerInfo {
    fn write_human<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Container: {}", self.id)?;
        writeln!(writer, "  {:<15} {}", "Image:", self.image)?;
        writeln!(writer, "  {:<15} {}", "Status:", self.status)?;
        writeln!(writer, "  {:<15} {}", "Created:", format_created(self.created_at_ms))?;
        if self.auto_terminate_seconds == 0 {
            writeln!(writer, "  {:<15} none", "Auto-terminate:")?;
        } else {
            writeln!(
                writer,
                "  {:<15} {}s",
                "Auto-terminate:", self.auto_terminate_seconds
            )?;
        }
        if let Some(ref docker_id) = self.docker_container_id {
            writeln!(writer, "  {:<15} {docker_id}", "Docker ID:")?;
        }
        if let Some(ref message) = self.error_message {
            writeln!(writer, "  {:<15} {message}", "Error:")?;
        }
        if !self.env.is_empty() {
            writeln!(writer, "  Environment:")?;
            for (key, value) in self.env.iter() {
                writeln!(writer, "    {key}={value}")?;
            }
        }
        Ok(())
    }
}

/// Containers for display, in the order the service returned them.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ContainerList(pub Vec<ContainerInfo>);

impl HumanDisplay for ContainerList {
    fn write_human<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.0.is_empty() {
            writeln!(writer, "No containers found.")?;
            return Ok(());
        }

        for container in &self.0 {
            writeln!(
                writer,
                "{} {}  {}",
                status_icon(container.status),
                short_id(&container.id),
                container.image
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} container(s)", self.0.len())?;
        Ok(())
    }
}

/// Health probe report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Whether the probe succeeded.
    pub healthy: bool,
    /// Logical address that was probed.
    pub service: String,
    /// Probe response, when the probe succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Failure cause, when the probe failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Round-trip wall-clock latency in milliseconds.
    pub latency_ms: u64,
}

impl HumanDisplay for HealthReport {
    fn write_human<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.healthy {
            writeln!(writer, "✓ Service healthy")?;
        } else {
            writeln!(writer, "✗ Service unhealthy")?;
        }
        writeln!(writer, "  {:<9} {}", "Service:", self.service)?;
        if let Some(ref response) = self.response {
            writeln!(writer, "  {:<9} {response}", "Response:")?;
        }
        if let Some(ref error) = self.error {
            writeln!(writer, "  {:<9} {error}", "Error:")?;
        }
        writeln!(writer, "  {:<9} {}ms", "Latency:", self.latency_ms)?;
        Ok(())
    }
}

/// Acknowledgment for a pause operation.
#[derive(Debug, Clone, Serialize)]
pub struct PauseAck {
    /// Whether the container was paused.
    pub paused: bool,
    /// Container ID, canonical form.
    pub id: ContainerId,
}

impl HumanDisplay for PauseAck {
    fn write_human<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "✓ Container paused")?;
        writeln!(writer, "  ID: {}", self.id)?;
        Ok(())
    }
}

/// Acknowledgment for an unpause operation.
#[derive(Debug, Clone, Serialize)]
pub struct UnpauseAck {
    /// Whether the container was resumed.
    pub unpaused: bool,
    /// Container ID, canonical form.
    pub id: ContainerId,
}

impl HumanDisplay for UnpauseAck {
    fn write_human<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "✓ Container resumed")?;
        writeln!(writer, "  ID: {}", self.id)?;
        Ok(())
    }
}

/// Acknowledgment for a terminate operation.
///
/// The image reference is captured before the terminate call, since the
/// remote object is stale afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct TerminateAck {
    /// Whether the container was terminated.
    pub terminated: bool,
    /// Container ID, canonical form.
    pub id: ContainerId,
    /// Image the container was running.
    pub image: String,
}

impl HumanDisplay for TerminateAck {
    fn write_human<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "✓ Container terminated")?;
        writeln!(writer, "  ID:    {}", self.id)?;
        writeln!(writer, "  Image: {}", self.image)?;
        Ok(())
    }
}
