mod ai;
mod cli;
mod kubernetes;
mod types;
mod utils;

use std::io::Write;

use clap::Parser;
use kube::ResourceExt;
use tracing::{debug, info, warn};

use ai::{Completer, OpenAiClient};
use cli::Cli;
use kubernetes::{ClusterReader, client_from_kubeconfig, get_pending_pods, get_pod_events};
use types::Settings;
use utils::{build_prompt, format_answer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("{}", cli::parse_error_message(&e));
            std::process::exit(1);
        }
    };

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env(cli)?;
    if settings.openai_key.is_none() {
        warn!("OPENAI_KEY is not set, answers will be empty");
    }

    let client = client_from_kubeconfig(&settings.kubeconfig).await?;
    info!("Using kubeconfig {}", settings.kubeconfig.display());

    let ai = OpenAiClient::new(settings.openai_key.clone(), settings.model.clone());

    let mut stdout = std::io::stdout().lock();
    let processed = diagnose_pending_pods(&client, &ai, &settings.namespace, &mut stdout).await?;
    debug!("Processed {} pending pods", processed);

    Ok(())
}

/// Ask the model about every pending pod in `namespace`, one at a time, writing
/// one answer block per pod to `out`. Returns the number of pods processed.
async fn diagnose_pending_pods<C, A, W>(
    cluster: &C,
    ai: &A,
    namespace: &str,
    out: &mut W,
) -> anyhow::Result<usize>
where
    C: ClusterReader,
    A: Completer,
    W: Write,
{
    let pods = get_pending_pods(cluster, namespace).await?;
    info!("Found {} pending pods in namespace {}", pods.len(), namespace);

    for pod in &pods {
        let name = pod.name_any();
        let events = get_pod_events(cluster, namespace, &name).await?;
        let question = build_prompt(&name, &events);
        let answer = ai.ask_ai(&question).await;
        writeln!(out, "{}", format_answer(&name, &answer))?;
        out.flush()?;
    }

    Ok(pods.len())
}
