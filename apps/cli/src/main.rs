mod config;
mod main_lib;

use config::Config;
use main_lib::{build_options, build_pipeline, init_tracing, today};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    let pipeline = build_pipeline(&config);
    let options = build_options(&config, today());
    tracing::info!(
        "Reading subscriptions from {}",
        options.subscriptions_path.display()
    );

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = pipeline.run(&options, &mut stdout).await {
        tracing::error!("Report generation failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
