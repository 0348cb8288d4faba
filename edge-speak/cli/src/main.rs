use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use edge_speak_lib::{
    CollectOutcome, EdgeTtsBackend, EdgeTtsConfig, InputCollector, LogConfig, LogContext,
    SpeechBackend, SynthesisInvoker,
};

/// Interactive text-to-speech using the Microsoft Edge read-aloud service
///
/// Every synthesis setting is asked for interactively:
/// language, voice type, text, speech rate, output format and file name.
#[derive(Parser)]
#[command(name = "edge-speak")]
#[command(about = "Synthesize speech with the Edge read-aloud service", long_about = None)]
#[command(version)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    Cli::parse();

    let logging = LogContext::stderr(
        LogConfig::default()
            .with_ansi(io::stderr().is_terminal())
            .with_env_filter(true),
    );

    let stdin = io::stdin();
    let collector =
        InputCollector::new(stdin.lock(), io::stdout()).with_color(io::stdout().is_terminal());

    run(
        collector,
        EdgeTtsBackend::new(EdgeTtsConfig::default()),
        logging,
    )
    .await
}

/// Collects one request and synthesizes it.
///
/// Every outcome, including aborted input and failed synthesis, exits with
/// success; failures are only reported through the log.
async fn run<R, W, B>(
    mut collector: InputCollector<R, W>,
    backend: B,
    logging: LogContext,
) -> ExitCode
where
    R: BufRead,
    W: Write,
    B: SpeechBackend,
{
    let request = match collector.collect() {
        Ok(CollectOutcome::Ready(request)) => request,
        Ok(CollectOutcome::Aborted { language }) => {
            logging.in_scope(|| tracing::debug!(language = %language, "No voices for language"));
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            logging.in_scope(|| tracing::error!("Failed to read input: {error}"));
            return ExitCode::SUCCESS;
        }
    };

    SynthesisInvoker::new(backend, logging).invoke(&request).await;

    ExitCode::SUCCESS
}
