use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txgen::{config::Overrides, io};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let overrides = Overrides::from_env()
        .unwrap_or_else(|err| panic!("Couldn't read configuration from environment: {err}"));
    let output_path = overrides
        .output_path(std::env::args().nth(1))
        .unwrap_or_else(|err| panic!("Couldn't resolve output path: {err}"));
    let config = overrides
        .generator_config()
        .unwrap_or_else(|err| panic!("Invalid configuration: {err}"));

    let mut rng = match overrides.seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let transactions = config
        .generate(&mut rng)
        .unwrap_or_else(|err| panic!("Failed to generate transactions: {err}"));
    io::write_transactions_to_path(&output_path, &transactions).unwrap_or_else(|err| {
        panic!(
            "Failed to write transactions to {}: {err}",
            output_path.display()
        )
    });
}
