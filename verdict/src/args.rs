use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Render application errors as HTTP error responses
#[derive(Debug, Parser)]
#[command(name = "verdict", about = "Render application errors as HTTP error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "VERDICT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pin the runtime environment name instead of reading it from the process
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Log filter directive
    #[arg(long, default_value = "warn", env = "VERDICT_LOG")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a JSON error document as a status line and body
    Render(RenderArgs),
    /// Print the effective responder configuration as JSON
    ShowConfig,
}

#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// JSON error document; read from stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Replace the error code after it is derived
    #[arg(long)]
    pub code: Option<String>,

    /// Replace the status after the code is applied
    #[arg(long)]
    pub status: Option<u16>,

    /// JSON object of configuration overrides, e.g. `{"fallbackStatus": 418}`
    #[arg(long)]
    pub overrides: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let args = Args::try_parse_from([
            "verdict",
            "--environment",
            "development",
            "render",
            "--code",
            "X",
            "--status",
            "999",
        ])
        .unwrap();

        assert_eq!(args.environment.as_deref(), Some("development"));
        let Command::Render(render) = args.command else {
            panic!("expected render");
        };
        assert_eq!(render.code.as_deref(), Some("X"));
        assert_eq!(render.status, Some(999));
        assert!(render.input.is_none());
    }
}
