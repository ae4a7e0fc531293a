use clap::Parser;
use convo_chunks::chunker::chunk_file;
use convo_chunks::cli::ChunkArgs;
use dotenv::dotenv;
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = ChunkArgs::parse();
    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let limit = args.limit()?;
    info!("Chunking {} into {} (max {} chars per chunk)", args.input.display(), args.output.display(), limit.get());
    chunk_file(&args.input, &args.output, limit)?;

    Ok(())
}
