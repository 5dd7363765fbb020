/// Meridian Trust - did:web verification card CLI
///
/// Builds a verification card for the DID or credential JWT given as the
/// first argument and prints it as JSON.
use anyhow::Context;
use meridian_trust::{did, VerificationCardBuilder, VerifierConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian_trust=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(target) = std::env::args().nth(1) else {
        eprintln!("usage: meridian-trust <did:web:... | credential-jwt>");
        std::process::exit(2);
    };

    let config = VerifierConfig::from_env()?;
    let builder = VerificationCardBuilder::new(config)?;

    let card = if did::is_did_web(&target) {
        builder.build_for_issuer(&target).await?
    } else {
        builder.build_for_credential(&target).await?
    };

    let json = serde_json::to_string_pretty(&card).context("failed to render card")?;
    println!("{}", json);

    Ok(())
}
