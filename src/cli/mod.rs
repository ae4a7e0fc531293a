use crate::chunker::{ ChunkLimit, DEFAULT_CHUNK_SIZE };
use crate::error::ChunkError;
use clap::Parser;
use std::path::PathBuf;

/// Split a conversation export into size-bounded chunks.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ChunkArgs {
    /// Path to the conversations export (e.g. conversations.json from an OpenAI export)
    pub input: PathBuf,

    /// Where to save the chunked data
    #[arg(long, default_value = "chunks.json")]
    pub output: PathBuf,

    /// Approximate maximum number of characters per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE as i64, allow_negative_numbers = true)]
    pub size: i64,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

impl ChunkArgs {
    pub fn limit(&self) -> Result<ChunkLimit, ChunkError> {
        ChunkLimit::new(self.size)
    }
}

/// Serve a chunk file over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServeArgs {
    /// Path to the chunk file produced by the chunker.
    #[arg(long, env = "DATA_FILE", default_value = "chunks.json")]
    pub data_file: PathBuf,

    /// Interface to bind. Defaults to all interfaces.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP server to listen on.
    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Optional path to the TLS certificate file (PEM format) for enabling HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl ServeArgs {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
