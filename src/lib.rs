pub mod chunker;
pub mod cli;
pub mod error;
pub mod models;
pub mod server;
pub mod store;

use cli::ServeArgs;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: ServeArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Data File: {}", args.data_file.display());
    info!("Listen Address: {}", args.listen_addr());
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let server = Server::load(args)?;
    info!("Serving {} chunks", server.store().len());
    server.run().await?;

    Ok(())
}
