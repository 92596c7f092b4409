//! End-to-end run through the facade re-exports.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tableau::{
    AssetLayout, FileSystemAssetStore, GenerationOrchestrator, GenerationResult,
    GenerationResultBuilder, ImageBackend, ImageFetcher, ItemKind, Pacer, ProgressObserver,
    Script, TableauConfig, TableauResult, UpscaleRequest, VariationBuilder,
};
use tempfile::TempDir;

struct GridBackend {
    submissions: AtomicUsize,
}

#[async_trait]
impl ImageBackend for GridBackend {
    async fn connect(&self) -> TableauResult<()> {
        Ok(())
    }

    async fn submit_prompt(
        &self,
        _prompt: &str,
        _observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>> {
        let n = self.submissions.fetch_add(1, Ordering::SeqCst);
        let variation = VariationBuilder::default()
            .id(format!("grid-{}:0", n))
            .uri(format!("https://cdn.test/grid-{}.png", n))
            .build()
            .unwrap();
        Ok(Some(
            GenerationResultBuilder::default()
                .id(format!("grid-{}", n))
                .options(vec![variation])
                .build()
                .unwrap(),
        ))
    }

    async fn upscale(
        &self,
        request: &UpscaleRequest,
        _observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>> {
        Ok(Some(
            GenerationResultBuilder::default()
                .id(format!("{}-up", request.msg_id()))
                .uri(format!("https://cdn.test/{}-up.png", request.msg_id()))
                .build()
                .unwrap(),
        ))
    }

    async fn disconnect(&self) -> TableauResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "grid"
    }
}

struct BytesFetcher;

#[async_trait]
impl ImageFetcher for BytesFetcher {
    async fn fetch(&self, url: &str) -> TableauResult<Vec<u8>> {
        Ok(url.as_bytes().to_vec())
    }
}

const SCRIPT_JSON: &str = r#"{
    "title": "Lighthouse",
    "artStyle": "oil painting",
    "characters": [
        {"name": "Keeper", "description": "an old lighthouse keeper", "stylePrompt": "weathered"}
    ],
    "scenes": [
        {"sceneNumber": 12, "description": "storm", "characters": ["Keeper"],
         "setting": "the lamp room", "mood": "desperate", "cameraAngle": "low angle",
         "action": "the keeper relights the lamp"}
    ]
}"#;

#[tokio::test]
async fn test_reset_then_rerun_regenerates() {
    let temp_dir = TempDir::new().unwrap();
    let script_path = temp_dir.path().join("lighthouse.json");
    std::fs::write(&script_path, SCRIPT_JSON).unwrap();
    let script = Script::from_file(&script_path).unwrap();
    let output = temp_dir.path().join("output");

    let mut config = TableauConfig::default();
    config.pacing.delay_ms = 0;

    let orchestrator = GenerationOrchestrator::new(
        GridBackend {
            submissions: AtomicUsize::new(0),
        },
        BytesFetcher,
        FileSystemAssetStore::new(&output),
    )
    .with_config(&config)
    .with_pacer(Pacer::immediate());

    let report = orchestrator.run(&script).await.unwrap();
    assert!(report.is_complete());

    let layout = AssetLayout::new(&output);
    assert!(layout.artifact_path(ItemKind::Character, "Keeper").is_file());
    assert!(layout.artifact_path(ItemKind::Scene, "scene_012").is_file());
    assert_eq!(
        std::fs::read(layout.artifact_path(ItemKind::Scene, "scene_012")).unwrap(),
        b"https://cdn.test/grid-1-up.png"
    );

    // Resume: nothing to do
    orchestrator.run(&script).await.unwrap();
    assert_eq!(orchestrator.backend().submissions.load(Ordering::SeqCst), 2);

    // Reset: everything is generated again
    assert!(orchestrator.ledger().reset().await.unwrap());
    let report = orchestrator.run(&script).await.unwrap();
    assert_eq!(report.attempted(), 2);
    assert_eq!(orchestrator.backend().submissions.load(Ordering::SeqCst), 4);
}
