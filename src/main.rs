use tracing::info;

fn main() -> anyhow::Result<()> {
    // Init tracing to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("preloader starting");

    let cfg = preloader::config::load();
    preloader::window::run(cfg)?;
    Ok(())
}
