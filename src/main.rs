use clap::Parser;
use log::{error, info};

use tinyserve::cli::Cli;
use tinyserve::HttpServer;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    info!(
        "Starting tinyserve on {protocol}://{address}",
        protocol = config.protocol,
        address = config.bind_address()
    );

    let server = HttpServer::new(config);
    if let Err(e) = server.start().await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
