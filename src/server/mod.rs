pub mod api;

use crate::cli::ServeArgs;
use crate::error::ChunkError;
use crate::store::ChunkStore;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use log::{ info, error };

pub struct Server {
    store: Arc<ChunkStore>,
    args: ServeArgs,
}

impl Server {
    pub fn new(store: Arc<ChunkStore>, args: ServeArgs) -> Self {
        Self { store, args }
    }

    /// Loads the configured data file once. The resulting store is never reloaded.
    pub fn load(args: ServeArgs) -> Result<Self, ChunkError> {
        let store = ChunkStore::load(&args.data_file)?;
        Ok(Self::new(Arc::new(store), args))
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.args.listen_addr().parse::<SocketAddr>()?;
        let tls_paths = tls_paths(&self.args)?;
        let app = api::router(self.store.clone());

        match tls_paths {
            Some((cert_path, key_path)) => {
                info!(
                    "TLS enabled. Loading certificate from '{}' and key from '{}'",
                    cert_path,
                    key_path
                );
                let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                    cert_path,
                    key_path
                ).await?;

                info!("HTTPS server listening on: https://{}", addr);
                axum_server::bind_rustls(addr, tls_config).serve(app.into_make_service()).await?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
                    error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                    e
                })?;

                info!("HTTP server listening on: http://{}", addr);
                axum::serve(listener, app.into_make_service()).await?;
            }
        }

        Ok(())
    }
}

fn tls_paths(args: &ServeArgs) -> Result<Option<(&str, &str)>, ChunkError> {
    if !args.enable_tls {
        info!("TLS not enabled. Running plain HTTP server.");
        return Ok(None);
    }
    match (&args.tls_cert_path, &args.tls_key_path) {
        (Some(cert_path), Some(key_path)) => Ok(Some((cert_path.as_str(), key_path.as_str()))),
        (Some(_), None) | (None, Some(_)) => {
            Err(
                ChunkError::Config(
                    "Both --tls-cert-path and --tls-key-path must be provided to enable TLS.".into()
                )
            )
        }
        (None, None) => {
            Err(
                ChunkError::Config(
                    "--enable-tls was set but no certificate/key paths provided.".into()
                )
            )
        }
    }
}
