use tracing_subscriber::EnvFilter;

mod command;
mod files;
mod model;

fn main() -> anyhow::Result<()> {
    // stdout carries JSON output, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    command::run()
}
