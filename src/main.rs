use clap::Parser;
use ipn_verify::{Notification, NotificationVerifier, Verdict, VerifierConfig};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Inspect and verify a payment notification body", long_about = None)]
struct Cli {
    /// File holding the raw notification body. Reads stdin when absent or `-`.
    payload: Option<PathBuf>,

    /// Echo the body to the processor and report its verdict.
    #[arg(long)]
    verify: bool,

    /// Verification endpoint.
    #[arg(long, env = "IPN_ENDPOINT", default_value = ipn_verify::config::SANDBOX_ENDPOINT)]
    endpoint: String,

    /// PEM bundle of trusted CA certificates. Replaces the bundled roots.
    #[arg(long, env = "IPN_CA_FILE", conflicts_with = "insecure")]
    ca_file: Option<PathBuf>,

    /// Skip TLS certificate verification. Local testing only.
    #[arg(long)]
    insecure: bool,

    /// Request timeout for verification, in seconds.
    #[arg(long, env = "IPN_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    summary: ipn_verify::domain::notification::NotificationSummary,
    fields: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = read_payload(cli.payload.as_deref()).into_diagnostic()?;
    let notification = Notification::parse(raw);

    let verdict = if cli.verify {
        let mut config = VerifierConfig::new(cli.endpoint)
            .with_timeout(Duration::from_secs(cli.timeout_secs));
        if let Some(ca_file) = cli.ca_file {
            config = config.with_ca_bundle_file(ca_file);
        }
        if cli.insecure {
            config = config.danger_skip_tls_verification();
        }

        let verifier = NotificationVerifier::new(config)?;
        Some(verifier.check(&notification).await?)
    } else {
        None
    };

    let report = Report {
        summary: notification.summary(),
        fields: notification.fields(),
        verdict,
    };
    let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
    println!("{json}");

    Ok(())
}

fn read_payload(path: Option<&std::path::Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read(path),
        _ => {
            let mut raw = Vec::new();
            io::stdin().lock().read_to_end(&mut raw)?;
            Ok(raw)
        }
    }
}
