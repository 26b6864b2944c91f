//! Command-line argument parsing with clap.

use clap::{Parser, Subcommand};

/// Stevedore - remote container workload management.
#[derive(Parser, Debug, Clone)]
#[command(name = "stevedore")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Service address to connect to.
    #[arg(
        short,
        long,
        env = "STEVEDORE_SERVICE",
        default_value = "ws://localhost:7700",
        global = true
    )]
    pub service: String,

    /// Emit one machine-readable JSON document instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Labeled, indented plain-text blocks.
    #[default]
    Human,
    /// One JSON document per invocation.
    Json,
}

impl Format {
    /// Derive the format from the global `--json` flag.
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Probe the service and report round-trip health.
    Health,

    /// Start a new container from an image reference.
    Start(StartArgs),

    /// List all containers known to the service.
    List,

    /// Show details for a single container.
    Show {
        /// Container ID to inspect.
        id: String,
    },

    /// Pause a running container.
    Pause {
        /// Container ID to pause.
        id: String,
    },

    /// Resume a paused container.
    Unpause {
        /// Container ID to resume.
        id: String,
    },

    /// Terminate a container.
    Terminate {
        /// Container ID to terminate.
        id: String,
    },
}

impl Commands {
    /// Short description of the operation, used in failure reports.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Health => "check service health",
            Self::Start(_) => "start container",
            Self::List => "list containers",
            Self::Show { .. } => "show container",
            Self::Pause { .. } => "pause container",
            Self::Unpause { .. } => "unpause container",
            Self::Terminate { .. } => "terminate container",
        }
    }
}

/// Arguments for the start command.
#[derive(Parser, Debug, Clone)]
pub struct StartArgs {
    /// Container image to run.
    #[arg(required = true)]
    pub image: String,

    /// Environment variables (KEY=VALUE), repeatable.
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Auto-terminate the container after this many seconds.
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_help_does_not_panic() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_health_command() {
        let cli = Cli::parse_from(["stevedore", "health"]);
        assert!(matches!(cli.command, Commands::Health));
        assert_eq!(cli.service, "ws://localhost:7700");
        assert!(!cli.json);
    }

    #[test]
    fn parse_list_with_json_flag() {
        let cli = Cli::parse_from(["stevedore", "list", "--json"]);
        assert!(matches!(cli.command, Commands::List));
        assert!(cli.json);
    }

    #[test]
    fn json_flag_is_global() {
        // --json may appear anywhere after the command token
        let cli = Cli::parse_from(["stevedore", "show", "--json", "abc"]);
        assert!(cli.json);
        match cli.command {
            Commands::Show { id } => assert_eq!(id, "abc"),
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn parse_custom_service_address() {
        let cli = Cli::parse_from(["stevedore", "-s", "ws://10.0.0.5:9000", "list"]);
        assert_eq!(cli.service, "ws://10.0.0.5:9000");
    }

    #[test]
    fn parse_start_minimal() {
        let cli = Cli::parse_from(["stevedore", "start", "nginx:latest"]);
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.image, "nginx:latest");
                assert!(args.env.is_empty());
                assert!(args.timeout.is_none());
            }
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn parse_start_with_repeated_env() {
        let cli = Cli::parse_from([
            "stevedore", "start", "app:latest", "-e", "PORT=8080", "--env", "MODE=debug",
        ]);
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.env, vec!["PORT=8080", "MODE=debug"]);
            }
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn parse_start_with_timeout() {
        let cli = Cli::parse_from(["stevedore", "start", "nginx:latest", "--timeout", "3600"]);
        match cli.command {
            Commands::Start(args) => assert_eq!(args.timeout, Some(3600)),
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn parse_start_short_timeout_flag() {
        let cli = Cli::parse_from(["stevedore", "start", "nginx:latest", "-t", "60"]);
        match cli.command {
            Commands::Start(args) => assert_eq!(args.timeout, Some(60)),
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn non_numeric_timeout_is_a_parse_error() {
        let result = Cli::try_parse_from(["stevedore", "start", "nginx:latest", "--timeout", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_command_is_a_parse_error() {
        let result = Cli::try_parse_from(["stevedore", "frobnicate"]);
        assert!(result.is_err());
    }

    #[test]
    fn lifecycle_commands_take_one_id() {
        let cli = Cli::parse_from(["stevedore", "terminate", "some-id"]);
        match cli.command {
            Commands::Terminate { id } => assert_eq!(id, "some-id"),
            _ => panic!("expected terminate command"),
        }
    }

    #[test]
    fn action_names_every_command() {
        assert_eq!(Cli::parse_from(["stevedore", "health"]).command.action(), "check service health");
        assert_eq!(Cli::parse_from(["stevedore", "list"]).command.action(), "list containers");
        assert_eq!(
            Cli::parse_from(["stevedore", "pause", "x"]).command.action(),
            "pause container"
        );
    }

    #[test]
    fn format_from_json_flag() {
        assert_eq!(Format::from_json_flag(false), Format::Human);
        assert_eq!(Format::from_json_flag(true), Format::Json);
    }
}
