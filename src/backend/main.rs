/**
 * fanpub Server Entry Point
 *
 * Loads configuration, initializes tracing and serves the Axum app.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use fanpub::backend::server::{create_app, ServerConfig};
    use tracing_subscriber::EnvFilter;

    // Reads .env as well, so RUST_LOG set there applies below
    let config = ServerConfig::load()?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        "Starting fanpub (session backend: {:?}, session ttl: {:?})",
        config.session_backend,
        config.session_ttl
    );

    let app = create_app(&config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin fanpub-server --features ssr");
    std::process::exit(1);
}
