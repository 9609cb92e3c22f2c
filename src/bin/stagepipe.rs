use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser;
use stagepipe::error::{Error, Result};
use stagepipe::prelude::*;
use stagepipe::source::{ChunkSource, FsSource};
use stagepipe::text::{LineNumberer, LineSplitter, Utf8Decoder};
use tracing_subscriber::EnvFilter;

/// Print the lines of a file or URL, numbered from 0.
#[derive(Parser, Debug)]
#[command(name = "stagepipe", version)]
struct Cli {
    /// File path, or an http(s) URL
    origin: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stagepipe=warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli.origin).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stagepipe: {}: {err}", cli.origin);
            ExitCode::FAILURE
        }
    }
}

async fn run(origin: &str) -> Result<()> {
    let mut source = open(origin)?;

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut head = push_chain::<Bytes>()
        .stage(Utf8Decoder::new())
        .stage(LineSplitter::new())
        .stage(LineNumberer::new())
        .into_sink(PrintSink::stdout());

    drive(source.as_mut(), &mut head, &cancel).await
}

fn open(origin: &str) -> Result<Box<dyn ChunkSource>> {
    if origin.starts_with("http://") || origin.starts_with("https://") {
        #[cfg(feature = "http")]
        return Ok(Box::new(stagepipe::source::HttpSource::new(origin)));

        #[cfg(not(feature = "http"))]
        return Err(Error::pipeline("http origins need the `http` feature"));
    }
    if origin.is_empty() {
        return Err(Error::pipeline("empty origin"));
    }
    Ok(Box::new(FsSource::new(origin)))
}
