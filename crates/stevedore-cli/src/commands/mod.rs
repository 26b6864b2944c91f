//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`health`] - Service health probe
//! - [`start`] - Start a container
//! - [`list`] - List container snapshots
//! - [`show`] - Inspect a single container
//! - [`pause`] - Pause/resume a container
//! - [`terminate`] - Terminate a container

pub mod health;
pub mod list;
pub mod pause;
pub mod show;
pub mod start;
pub mod terminate;

pub use health::HealthCommand;
pub use list::ListCommand;
pub use pause::{PauseCommand, UnpauseCommand};
pub use show::ShowCommand;
pub use start::StartCommand;
pub use terminate::TerminateCommand;

use stevedore_proto::ContainerId;

use crate::error::CliError;

/// Parse a positional identifier as a canonical UUID.
///
/// Rejection happens before any connection is attempted.
pub(crate) fn parse_container_id(id: &str) -> Result<ContainerId, CliError> {
    ContainerId::parse(id)
        .map_err(|_| CliError::InvalidArgument(format!("Invalid UUID format: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_parse() {
        let id = parse_container_id("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn malformed_ids_name_the_token() {
        let err = parse_container_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert!(err.to_string().contains("Invalid UUID format: not-a-uuid"));
    }
}
