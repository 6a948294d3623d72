//! yagaw demo server.
//!
//! ```text
//!     Client Request ──▶ axum (timeout, trace) ──▶ body buffering ──▶ Router
//!                                                                      │
//!                                    exact literal? ── yes ──▶ handler │
//!                                          │ no                        │
//!                              first matching pattern? ── yes ──▶ handler
//!                                          │ no
//!                                   404 - Page not found
//! ```

use std::path::PathBuf;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use yagaw::config::{load_config, ServerConfig};
use yagaw::observability::init_logging;
use yagaw::routing::RouteError;
use yagaw::{HttpServer, RouteRequest, Router};

#[derive(Parser)]
#[command(name = "yagaw")]
#[command(about = "Minimal HTTP router demo server", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the demo routes (default)
    Serve,
    /// Print the registered route table and exit
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    let log = init_logging(&config.observability);
    let mut router = Router::with_logger(log);
    register_demo_routes(&mut router)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Routes => {
            for (method, route) in router.routes().iter() {
                println!("{:<8} {:<40} {}", method, route.path(), route.key().as_str());
            }
        }
        Commands::Serve => {
            tracing::info!(
                bind_address = %config.listener.bind_address,
                request_timeout_secs = config.timeouts.request_secs,
                routes = router.routes().len(),
                "Configuration loaded"
            );

            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            let server = HttpServer::new(config, router);
            server.run(listener).await?;

            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}

fn register_demo_routes(router: &mut Router) -> Result<(), RouteError> {
    router.get("/test", |_: &RouteRequest| {
        plain("Welcome to our custom HTTP server!\n".to_string())
    })?;

    router.get("/users/{id}", |req: &RouteRequest| {
        plain(format!("user {}\n", req.param("id").unwrap_or_default()))
    })?;

    router.post("/echo", |req: &RouteRequest| {
        plain(String::from_utf8_lossy(req.body()).into_owned())
    })?;

    Ok(())
}

fn plain(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
}
