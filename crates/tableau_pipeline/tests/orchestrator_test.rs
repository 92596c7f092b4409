//! Integration tests for the generation orchestrator.
//!
//! The backend and fetcher are in-memory mocks; artifacts go to a temp dir.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tableau_core::{
    ArtifactMetadata, CharacterBuilder, GenerationResult, GenerationResultBuilder, ItemKind, Script,
    ScriptBuilder, VariationBuilder,
};
use tableau_error::{
    BackendError, BackendErrorKind, ScriptErrorKind, StorageError, StorageErrorKind, TableauErrorKind,
    TableauResult,
};
use tableau_interface::{ImageBackend, ImageFetcher, ProgressObserver, UpscaleRequest};
use tableau_pipeline::{GenerationOrchestrator, ProgressLedger, ReferenceSummary, SelectionPolicy};
use tableau_rate_limit::{Pacer, RetryPolicy};
use tableau_storage::{AssetLayout, AssetStore, FileSystemAssetStore, StoredArtifact};
use tempfile::TempDir;

const TWO_CHARACTERS: &str = r#"
title = "Night Courier"
artStyle = "ink and watercolor"

[[characters]]
name = "A"
description = "a lanky courier"
stylePrompt = "shaved head"

[[characters]]
name = "B"
description = "a retired cartographer"

[[scenes]]
sceneNumber = 1
description = "the handoff"
characters = ["A", "B"]
setting = "a flooded arcade"
mood = "tense"
action = "an envelope changes hands"
"#;

/// Mock backend that renders deterministic URLs and records every call.
struct MockBackend {
    variations: usize,
    fail_prompts_containing: Vec<String>,
    fail_first_submissions: usize,
    fail_upscale: bool,
    fail_connect: bool,
    counter: AtomicUsize,
    submit_calls: AtomicUsize,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    submissions: Mutex<Vec<String>>,
    upscales: Mutex<Vec<UpscaleRequest>>,
}

impl MockBackend {
    fn new(variations: usize) -> Self {
        Self {
            variations,
            fail_prompts_containing: Vec::new(),
            fail_first_submissions: 0,
            fail_upscale: false,
            fail_connect: false,
            counter: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            upscales: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, fragment: &str) -> Self {
        self.fail_prompts_containing.push(fragment.to_string());
        self
    }

    fn submissions(&self) -> Vec<String> {
        self.submissions.lock().unwrap().clone()
    }

    fn upscales(&self) -> Vec<UpscaleRequest> {
        self.upscales.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageBackend for MockBackend {
    async fn connect(&self) -> TableauResult<()> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect {
            return Err(BackendError::new(BackendErrorKind::Connection("refused".to_string())).into());
        }
        Ok(())
    }

    async fn submit_prompt(
        &self,
        prompt: &str,
        observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>> {
        let call = self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submissions.lock().unwrap().push(prompt.to_string());

        if call < self.fail_first_submissions
            || self
                .fail_prompts_containing
                .iter()
                .any(|f| prompt.contains(f.as_str()))
        {
            return Ok(None);
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let task = format!("task-{}", n);
        if let Some(observer) = observer {
            observer.on_progress(&format!("https://cdn.test/{}/preview.png", task), "50%");
        }

        let options = (0..self.variations)
            .map(|i| {
                VariationBuilder::default()
                    .id(format!("{}:{}", task, i))
                    .hash(format!("hash-{}", n))
                    .uri(format!("https://cdn.test/{}/{}.png", task, i))
                    .build()
                    .unwrap()
            })
            .collect::<Vec<_>>();

        Ok(Some(
            GenerationResultBuilder::default()
                .id(task.clone())
                .hash(format!("hash-{}", n))
                .flags(0u32)
                .uri(format!("https://cdn.test/{}/grid.png", task))
                .options(options)
                .build()
                .unwrap(),
        ))
    }

    async fn upscale(
        &self,
        request: &UpscaleRequest,
        _observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>> {
        self.upscales.lock().unwrap().push(request.clone());
        if self.fail_upscale {
            return Ok(None);
        }

        Ok(Some(
            GenerationResultBuilder::default()
                .id(format!("up-{}", request.msg_id()))
                .uri(format!(
                    "https://cdn.test/{}/upscaled_{}.png",
                    request.msg_id(),
                    request.index()
                ))
                .build()
                .unwrap(),
        ))
    }

    async fn disconnect(&self) -> TableauResult<()> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

/// Fetcher whose "image bytes" are the URL itself.
struct EchoFetcher;

#[async_trait]
impl ImageFetcher for EchoFetcher {
    async fn fetch(&self, url: &str) -> TableauResult<Vec<u8>> {
        Ok(url.as_bytes().to_vec())
    }
}

/// Store that refuses to write paths containing a fragment.
struct FailingStore {
    inner: FileSystemAssetStore,
    fragment: String,
}

#[async_trait]
impl AssetStore for FailingStore {
    fn layout(&self) -> &AssetLayout {
        self.inner.layout()
    }

    async fn scaffold(&self) -> TableauResult<()> {
        self.inner.scaffold().await
    }

    async fn persist_artifact(&self, bytes: &[u8], path: &Path) -> TableauResult<StoredArtifact> {
        if path.to_string_lossy().contains(&self.fragment) {
            return Err(StorageError::new(StorageErrorKind::FileWrite("disk full".to_string())).into());
        }
        self.inner.persist_artifact(bytes, path).await
    }

    async fn persist_metadata(&self, record: &ArtifactMetadata, path: &Path) -> TableauResult<()> {
        self.inner.persist_metadata(record, path).await
    }

    async fn read_metadata(&self, path: &Path) -> TableauResult<ArtifactMetadata> {
        self.inner.read_metadata(path).await
    }
}

fn orchestrator(
    backend: MockBackend,
    root: &Path,
) -> GenerationOrchestrator<MockBackend, EchoFetcher, FileSystemAssetStore> {
    GenerationOrchestrator::new(backend, EchoFetcher, FileSystemAssetStore::new(root))
        .with_pacer(Pacer::immediate())
        .with_retry(RetryPolicy::once())
}

fn read_metadata(path: PathBuf) -> ArtifactMetadata {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_end_to_end_two_characters_one_scene() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let orchestrator = orchestrator(MockBackend::new(2), temp_dir.path());

    let report = orchestrator.run(&script).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(report.to_string(), "3 of 3 items completed");

    let layout = AssetLayout::new(temp_dir.path());
    for name in ["A", "B"] {
        assert!(layout.artifact_path(ItemKind::Character, name).is_file());
        assert!(layout.metadata_path(ItemKind::Character, name).is_file());
    }
    assert!(layout.artifact_path(ItemKind::Scene, "scene_001").is_file());
    assert!(layout.metadata_path(ItemKind::Scene, "scene_001").is_file());

    let ledger = ProgressLedger::new(layout.ledger_path()).load().await.unwrap();
    assert_eq!(
        ledger.completed_characters().iter().collect::<Vec<_>>(),
        vec!["A", "B"]
    );
    assert_eq!(
        ledger.completed_scenes().iter().collect::<Vec<_>>(),
        vec!["scene_001"]
    );

    let submissions = orchestrator.backend().submissions();
    assert_eq!(submissions.len(), 3);
    let scene_prompt = &submissions[2];
    assert!(scene_prompt.contains(
        "--cref https://cdn.test/task-0/upscaled_1.png --cw 100 --cref https://cdn.test/task-1/upscaled_1.png"
    ));
    assert_eq!(scene_prompt.matches("--cw").count(), 1);

    let backend = orchestrator.backend();
    assert_eq!(backend.connects.load(Ordering::SeqCst), 1);
    assert_eq!(backend.disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upscale_targets_selected_variation() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let orchestrator = orchestrator(MockBackend::new(4), temp_dir.path())
        .with_selection(SelectionPolicy::Index(2));

    orchestrator.run(&script).await.unwrap();

    let upscales = orchestrator.backend().upscales();
    assert_eq!(upscales.len(), 3);
    assert_eq!(*upscales[0].index(), 3);
    assert_eq!(upscales[0].msg_id(), "task-0");
    assert_eq!(upscales[0].hash(), "hash-0");

    let layout = AssetLayout::new(temp_dir.path());
    let canonical = std::fs::read(layout.artifact_path(ItemKind::Character, "A")).unwrap();
    assert_eq!(canonical, b"https://cdn.test/task-0/upscaled_3.png");

    let metadata = read_metadata(layout.metadata_path(ItemKind::Character, "A"));
    assert_eq!(metadata.selected_variation_id(), "task-0:2");
    assert_eq!(
        metadata.reference_handle().as_deref(),
        Some("https://cdn.test/task-0/upscaled_3.png")
    );

    let summary = ReferenceSummary::load(&layout.reference_summary_path())
        .await
        .unwrap();
    assert_eq!(summary.handle("A"), Some("https://cdn.test/task-0/upscaled_3.png"));
    assert!(summary.files().contains_key("B"));
}

#[tokio::test]
async fn test_variation_selection_persists_all_and_picks_first() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let orchestrator = orchestrator(MockBackend::new(3), temp_dir.path()).with_upscale(false);

    orchestrator.run(&script).await.unwrap();

    let layout = AssetLayout::new(temp_dir.path());
    for i in 0..3 {
        let variation = std::fs::read(layout.variation_path(ItemKind::Character, "A", i)).unwrap();
        assert_eq!(variation, format!("https://cdn.test/task-0/{}.png", i).into_bytes());
    }

    let canonical = std::fs::read(layout.artifact_path(ItemKind::Character, "A")).unwrap();
    assert_eq!(canonical, b"https://cdn.test/task-0/0.png");

    let metadata = read_metadata(layout.metadata_path(ItemKind::Character, "A"));
    assert_eq!(metadata.generation_id(), "task-0");
    assert_eq!(metadata.selected_variation_id(), "task-0:0");
    assert_eq!(
        metadata.all_variation_ids(),
        &vec!["task-0:0".to_string(), "task-0:1".to_string(), "task-0:2".to_string()]
    );
    assert!(metadata.content_hash().is_some());
    assert!(orchestrator.backend().upscales().is_empty());

    // Without upscaling the variation URI is the reference handle
    let scene_prompt = &orchestrator.backend().submissions()[2];
    assert!(scene_prompt.contains("--cref https://cdn.test/task-0/0.png --cw 100"));
}

#[tokio::test]
async fn test_resume_over_complete_ledger_submits_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();

    let first = orchestrator(MockBackend::new(2), temp_dir.path());
    first.run(&script).await.unwrap();

    let second = orchestrator(MockBackend::new(2), temp_dir.path());
    let report = second.run(&script).await.unwrap();

    assert_eq!(second.backend().submit_calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.attempted(), 0);
    assert_eq!(report.characters().skipped(), 2);
    assert_eq!(report.scenes().skipped(), 1);
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_characters_precede_scenes() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = r#"
title = "Order"

[[characters]]
name = "A"
description = "first"

[[characters]]
name = "B"
description = "second"

[[scenes]]
sceneNumber = 1
description = "one"
characters = ["B"]
action = "opening"

[[scenes]]
sceneNumber = 2
description = "two"
characters = ["A", "B"]
action = "closing"
"#
    .parse()
    .unwrap();

    let orchestrator = orchestrator(MockBackend::new(1), temp_dir.path());
    orchestrator.run(&script).await.unwrap();

    let submissions = orchestrator.backend().submissions();
    assert_eq!(submissions.len(), 4);
    assert!(submissions[..2].iter().all(|p| p.contains("reference sheet")));
    assert!(submissions[2..].iter().all(|p| !p.contains("reference sheet")));

    // Every reference embedded in a scene was produced during the character phase
    let handles: Vec<String> = orchestrator
        .backend()
        .upscales()
        .iter()
        .take(2)
        .map(|r| format!("https://cdn.test/{}/upscaled_{}.png", r.msg_id(), r.index()))
        .collect();
    assert!(submissions[2].ends_with(&format!("--cref {} --cw 100", handles[1])));
    assert!(submissions[3].ends_with(&format!(
        "--cref {} --cw 100 --cref {}",
        handles[0], handles[1]
    )));
}

#[tokio::test]
async fn test_failed_character_does_not_stop_run() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = r#"
title = "Partial"

[[characters]]
name = "A"
description = "alpha look"

[[characters]]
name = "B"
description = "broken look"

[[characters]]
name = "C"
description = "gamma look"

[[scenes]]
sceneNumber = 1
description = "all three"
characters = ["B", "A", "C"]
"#
    .parse()
    .unwrap();

    let backend = MockBackend::new(2).failing_on("broken look, full-body");
    let orchestrator = orchestrator(backend, temp_dir.path());
    let report = orchestrator.run(&script).await.unwrap();

    assert_eq!(report.characters().completed(), 2);
    assert_eq!(report.characters().failed(), 1);
    assert_eq!(report.scenes().completed(), 1);
    assert_eq!(report.to_string(), "3 of 4 items completed");

    let layout = AssetLayout::new(temp_dir.path());
    let ledger = ProgressLedger::new(layout.ledger_path()).load().await.unwrap();
    assert_eq!(
        ledger.completed_characters().iter().collect::<Vec<_>>(),
        vec!["A", "C"]
    );
    assert!(!layout.artifact_path(ItemKind::Character, "B").exists());

    // B leads the scene but has no handle, so no reference carries the weight
    let scene_prompt = orchestrator.backend().submissions().pop().unwrap();
    assert!(scene_prompt.contains("B (broken look)"));
    assert_eq!(scene_prompt.matches("--cref").count(), 2);
    assert!(!scene_prompt.contains("--cw"));
}

#[tokio::test]
async fn test_unknown_scene_character_is_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = r#"
title = "Ghosts"

[[characters]]
name = "A"
description = "alpha look"

[[scenes]]
sceneNumber = 3
description = "haunting"
characters = ["Ghost", "A"]
action = "a chill"
"#
    .parse()
    .unwrap();
    assert_eq!(script.unknown_references().len(), 1);

    let orchestrator = orchestrator(MockBackend::new(1), temp_dir.path());
    let report = orchestrator.run(&script).await.unwrap();

    assert!(report.is_complete());
    let scene_prompt = orchestrator.backend().submissions().pop().unwrap();
    assert!(scene_prompt.contains("highly detailed, Ghost, A (alpha look), a chill"));
    assert_eq!(scene_prompt.matches("--cref").count(), 1);
    assert!(AssetLayout::new(temp_dir.path())
        .artifact_path(ItemKind::Scene, "scene_003")
        .is_file());
}

#[tokio::test]
async fn test_persistence_failure_is_item_failure() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let store = FailingStore {
        inner: FileSystemAssetStore::new(temp_dir.path()),
        fragment: "characters/a.png".to_string(),
    };
    let orchestrator = GenerationOrchestrator::new(MockBackend::new(2), EchoFetcher, store)
        .with_pacer(Pacer::immediate())
        .with_retry(RetryPolicy::once());

    let report = orchestrator.run(&script).await.unwrap();

    assert_eq!(report.characters().failed(), 1);
    assert_eq!(report.done(), 2);

    let layout = AssetLayout::new(temp_dir.path());
    let ledger = ProgressLedger::new(layout.ledger_path()).load().await.unwrap();
    assert!(!ledger.is_complete(ItemKind::Character, "A"));
    assert!(ledger.is_complete(ItemKind::Character, "B"));
    assert!(!layout.metadata_path(ItemKind::Character, "A").exists());
}

#[tokio::test]
async fn test_failed_upscale_is_item_failure() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let mut backend = MockBackend::new(2);
    backend.fail_upscale = true;
    let orchestrator = orchestrator(backend, temp_dir.path());

    let report = orchestrator.run(&script).await.unwrap();

    assert_eq!(report.failed(), 3);
    assert_eq!(report.done(), 0);
    // Variations were persisted before the upscale failed
    let layout = AssetLayout::new(temp_dir.path());
    assert!(layout.variation_path(ItemKind::Character, "A", 1).is_file());
    assert!(!layout.ledger_path().exists());
}

#[tokio::test]
async fn test_empty_variations_is_item_failure() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let orchestrator = orchestrator(MockBackend::new(0), temp_dir.path());

    let report = orchestrator.run(&script).await.unwrap();

    assert_eq!(report.failed(), 3);
    let error = report.characters().outcomes()[0].error().clone().unwrap();
    assert!(error.contains("no variations"));
}

#[tokio::test]
async fn test_absent_result_is_retried() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let mut backend = MockBackend::new(1);
    backend.fail_first_submissions = 1;
    let orchestrator = orchestrator(backend, temp_dir.path())
        .with_retry(RetryPolicy::new(2, Duration::from_millis(1)));

    let report = orchestrator.run(&script).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(orchestrator.backend().submit_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_resumed_scenes_receive_seeded_references() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();

    let first = orchestrator(
        MockBackend::new(1).failing_on("an envelope changes hands"),
        temp_dir.path(),
    );
    let report = first.run(&script).await.unwrap();
    assert_eq!(report.scenes().failed(), 1);

    let second = orchestrator(MockBackend::new(1), temp_dir.path());
    let report = second.run(&script).await.unwrap();

    assert!(report.is_complete());
    let submissions = second.backend().submissions();
    assert_eq!(submissions.len(), 1);
    assert!(submissions[0].contains(
        "--cref https://cdn.test/task-0/upscaled_1.png --cw 100 --cref https://cdn.test/task-1/upscaled_1.png"
    ));
}

#[tokio::test]
async fn test_summary_handles_without_ledger_entry_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let layout = AssetLayout::new(temp_dir.path());
    let mut summary = ReferenceSummary::new();
    summary.record("A", "https://stale/a.png", "characters/a.png");
    summary.save(&layout.reference_summary_path()).await.unwrap();

    let orchestrator = orchestrator(MockBackend::new(1), temp_dir.path());
    let state = orchestrator.prepare().await.unwrap();

    assert!(state.references().is_empty());
    assert_eq!(state.summary().handle("A"), Some("https://stale/a.png"));
}

#[tokio::test]
async fn test_connect_failure_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let mut backend = MockBackend::new(1);
    backend.fail_connect = true;
    let orchestrator = orchestrator(backend, temp_dir.path());

    let err = orchestrator.run(&script).await.unwrap_err();

    assert!(matches!(err.kind(), TableauErrorKind::Backend(_)));
    assert_eq!(orchestrator.backend().submit_calls.load(Ordering::SeqCst), 0);
    assert_eq!(orchestrator.backend().disconnects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_scaffold_failure_is_fatal_and_disconnects() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("output");
    std::fs::write(&root, b"in the way").unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let orchestrator = orchestrator(MockBackend::new(1), &root);

    let err = orchestrator.run(&script).await.unwrap_err();

    assert!(matches!(err.kind(), TableauErrorKind::Storage(_)));
    assert_eq!(orchestrator.backend().submit_calls.load(Ordering::SeqCst), 0);
    assert_eq!(orchestrator.backend().disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_corrupt_ledger_is_fatal_and_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let layout = AssetLayout::new(temp_dir.path());
    std::fs::write(layout.ledger_path(), b"{ half written").unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let orchestrator = orchestrator(MockBackend::new(1), temp_dir.path());

    let err = orchestrator.run(&script).await.unwrap_err();

    match err.kind() {
        TableauErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::Corrupt { .. }))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(orchestrator.backend().submit_calls.load(Ordering::SeqCst), 0);
    assert_eq!(orchestrator.backend().disconnects.load(Ordering::SeqCst), 1);
    assert_eq!(
        std::fs::read(layout.ledger_path()).unwrap(),
        b"{ half written"
    );
}

#[tokio::test]
async fn test_resolved_characters_carry_their_handles() {
    let temp_dir = TempDir::new().unwrap();
    let script: Script = TWO_CHARACTERS.parse().unwrap();
    let orchestrator = orchestrator(MockBackend::new(2), temp_dir.path());

    orchestrator.store().scaffold().await.unwrap();
    let mut state = orchestrator.prepare().await.unwrap();
    orchestrator.generate_characters(&script, &mut state).await;

    let names: Vec<_> = state.resolved().iter().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    for character in state.resolved() {
        assert_eq!(
            character.reference_handle().as_deref(),
            state.references().get(character.name()).map(String::as_str)
        );
        assert_eq!(
            character.description(),
            script.character(character.name()).unwrap().description()
        );
    }
}

#[tokio::test]
async fn test_names_sharing_a_file_are_rejected_before_connecting() {
    let temp_dir = TempDir::new().unwrap();
    let character = |name: &str, description: &str| {
        CharacterBuilder::default()
            .name(name)
            .description(description)
            .build()
            .unwrap()
    };
    let script = ScriptBuilder::default()
        .title("Twins")
        .characters(vec![
            character("Mara", "the courier"),
            character("MARA", "her namesake"),
        ])
        .build()
        .unwrap();
    let orchestrator = orchestrator(MockBackend::new(1), temp_dir.path());

    let err = orchestrator.run(&script).await.unwrap_err();

    match err.kind() {
        TableauErrorKind::Script(e) => {
            assert!(matches!(e.kind, ScriptErrorKind::FileNameCollision(..)))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(orchestrator.backend().connects.load(Ordering::SeqCst), 0);
    let layout = AssetLayout::new(temp_dir.path());
    assert!(!layout.metadata_path(ItemKind::Character, "Mara").exists());
    assert!(!layout.ledger_path().exists());
}
