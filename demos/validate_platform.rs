//! Validate the bridges of a platform file against its kcli host.
//!
//! Run with:
//! ```sh
//! RUST_LOG=netif_validate=debug cargo run --example validate_platform -- platform.yaml
//! ```

use netif_validate::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "platform.yaml".to_string());

    let platform: BaremetalPlatform = PlatformLoader::new()
        .with_file(&path)
        .with_env_overrides("NETIF", "__")
        .load()?;

    let root = FieldPath::new("platform").child("baremetal");

    let mut errors = platform.validate(&root);
    if errors.is_empty() {
        errors = DynamicValidators::with_defaults()
            .validate(&platform, &root)
            .await;
    }

    if errors.is_empty() {
        println!("all interfaces present on {}", platform.libvirt_uri);
        return Ok(());
    }

    for err in &errors {
        eprintln!("{}", err);
    }
    errors.into_result()
}
