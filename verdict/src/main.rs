#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod render;
mod sink;

use args::{Args, Command};
use clap::Parser;
use verdict_config::Config;
use verdict_core::{FixedEnvironment, ResponderScope};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args.log_filter);

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut scope = ResponderScope::from_config(&config);
    if let Some(ref environment) = args.environment {
        scope = scope.with_environment(FixedEnvironment::new(environment.clone()));
    }

    tracing::debug!(environment = ?scope.environment_name(), "responder scope ready");

    match args.command {
        Command::Render(ref render_args) => {
            let input = render::read_input(render_args)?;
            render::run(&scope, render_args, &input, std::io::stdout().lock())
        }
        Command::ShowConfig => {
            let rendered = serde_json::to_string_pretty(&scope.config())?;
            println!("{rendered}");
            Ok(())
        }
    }
}

/// Plain `fmt` logging to stderr, keeping stdout for the rendered response
fn init_logging(filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
