//! Pipeline execution command handler.

use std::path::{Path, PathBuf};
use tableau::{
    FileSystemAssetStore, GenerationOrchestrator, HttpImageFetcher, MidjourneyProxyClient,
    Script, TableauConfig, TableauResult,
};
use tracing::info;

/// Run the full pipeline for a script.
///
/// Item failures are reported but do not make the command fail.
pub async fn run_script(
    script_path: &Path,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> TableauResult<()> {
    let config = TableauConfig::load_with_override(config_path)?;
    let script = Script::from_file(script_path)?;
    let output = output.unwrap_or_else(|| config.output.dir.clone());

    info!(
        script = %script_path.display(),
        title = %script.title(),
        output = %output.display(),
        characters = script.characters().len(),
        scenes = script.scenes().len(),
        "Starting run"
    );

    let orchestrator = GenerationOrchestrator::new(
        MidjourneyProxyClient::from_config(&config.backend),
        HttpImageFetcher::new(),
        FileSystemAssetStore::new(&output),
    )
    .with_config(&config);

    let report = orchestrator.run(&script).await?;

    for outcome in report
        .characters()
        .outcomes()
        .iter()
        .chain(report.scenes().outcomes())
        .filter(|o| o.error().is_some())
    {
        println!(
            "failed: {} ({})",
            outcome.key(),
            outcome.error().as_deref().unwrap_or("unknown")
        );
    }
    println!("{}", report);
    Ok(())
}
