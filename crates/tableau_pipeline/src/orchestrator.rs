//! Two-phase generation: every character first, then every scene.

use crate::{
    ItemOutcome, LedgerState, PhaseReport, ProgressLedger, PromptComposer, PromptStyle,
    ReferenceMap, ReferenceSummary, RunReport, SelectionPolicy,
};
use derive_getters::Getters;
use std::path::PathBuf;
use tableau_core::{
    ArtifactMetadataBuilder, Character, GenerationResult, ItemKind, ItemState, Scene, Script,
};
use tableau_error::{PipelineError, PipelineErrorKind, TableauResult};
use tableau_interface::{
    ImageBackend, ImageFetcher, LoggingObserver, ProgressObserver, UpscaleRequestBuilder,
};
use tableau_rate_limit::{Pacer, RetryPolicy, TableauConfig};
use tableau_storage::AssetStore;
use tracing::{debug, info, warn};

/// State owned by the orchestrator for the duration of one run.
#[derive(Debug, Clone, Default, Getters)]
pub struct RunState {
    /// Completed items, mirrored to the ledger file after every item
    ledger: LedgerState,
    /// Reference handles and files, mirrored to the summary file
    summary: ReferenceSummary,
    /// Handles available to scene prompts
    references: ReferenceMap,
    /// Characters resolved during this run, carrying their reference handles
    resolved: Vec<Character>,
}

impl RunState {
    /// Builds run state from persisted data.
    ///
    /// Only handles of characters the ledger marks complete are seeded into
    /// the reference map.
    pub fn seeded(ledger: LedgerState, summary: ReferenceSummary) -> Self {
        let references = summary
            .uris()
            .iter()
            .filter(|(name, _)| ledger.is_complete(ItemKind::Character, name))
            .map(|(name, handle)| (name.clone(), handle.clone()))
            .collect();

        Self {
            ledger,
            summary,
            references,
            resolved: Vec::new(),
        }
    }
}

struct PersistedItem {
    handle: String,
    local_path: PathBuf,
}

/// Drives a script through the backend and into the asset store.
///
/// Items are processed strictly one at a time. A failing item is logged and
/// left pending in the ledger; only setup failures (connect, scaffold,
/// unreadable ledger) abort a run.
///
/// # Example
///
/// ```rust,ignore
/// use tableau_pipeline::GenerationOrchestrator;
/// use tableau_rate_limit::Pacer;
/// use tableau_storage::FileSystemAssetStore;
///
/// let orchestrator = GenerationOrchestrator::new(backend, fetcher, FileSystemAssetStore::new("output"))
///     .with_pacer(Pacer::immediate())
///     .with_upscale(false);
///
/// let report = orchestrator.run(&script).await?;
/// assert!(report.is_complete());
/// ```
pub struct GenerationOrchestrator<B, F, S>
where
    B: ImageBackend,
    F: ImageFetcher,
    S: AssetStore,
{
    backend: B,
    fetcher: F,
    store: S,
    composer: PromptComposer,
    selection: SelectionPolicy,
    upscale: bool,
    pacer: Pacer,
    retry: RetryPolicy,
    ledger: ProgressLedger,
}

impl<B, F, S> GenerationOrchestrator<B, F, S>
where
    B: ImageBackend,
    F: ImageFetcher,
    S: AssetStore,
{
    /// Create an orchestrator with default prompt style, selection, pacing and retries.
    ///
    /// The ledger lives at the store's ledger path.
    pub fn new(backend: B, fetcher: F, store: S) -> Self {
        let ledger = ProgressLedger::new(store.layout().ledger_path());
        Self {
            backend,
            fetcher,
            store,
            composer: PromptComposer::default(),
            selection: SelectionPolicy::default(),
            upscale: true,
            pacer: Pacer::default(),
            retry: RetryPolicy::default(),
            ledger,
        }
    }

    /// Apply every setting from a loaded configuration.
    pub fn with_config(self, config: &TableauConfig) -> Self {
        self.with_composer(PromptComposer::new(
            PromptStyle::default().with_overrides(&config.prompt),
        ))
        .with_selection(SelectionPolicy::from_config(&config.selection))
        .with_upscale(config.selection.upscale)
        .with_pacer(Pacer::from_config(&config.pacing))
        .with_retry(RetryPolicy::from_config(&config.retry))
    }

    /// Replace the prompt composer.
    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Replace the variation selection policy.
    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Enable or disable upscaling of the selected variation.
    pub fn with_upscale(mut self, upscale: bool) -> Self {
        self.upscale = upscale;
        self
    }

    /// Replace the pacer.
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The backend handle.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The asset store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The progress ledger.
    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    /// Run both phases for `script`.
    ///
    /// Connects first and always disconnects once connected, whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the script is invalid, the backend cannot be
    /// reached, the output tree cannot be created, or the ledger or reference
    /// summary is unreadable.
    /// Individual item failures are reported in the [`RunReport`] instead.
    #[tracing::instrument(
        skip(self, script),
        fields(
            title = %script.title(),
            backend = self.backend.backend_name(),
            items = script.item_count()
        )
    )]
    pub async fn run(&self, script: &Script) -> TableauResult<RunReport> {
        script.validate()?;
        self.backend.connect().await?;
        info!("Connected to backend");

        let outcome = self.run_connected(script).await;

        if let Err(e) = self.backend.disconnect().await {
            warn!(error = %e, "Failed to disconnect from backend");
        }

        let report = outcome?;
        info!(
            completed = report.done(),
            total = report.total(),
            failed = report.failed(),
            "{}",
            report
        );
        Ok(report)
    }

    async fn run_connected(&self, script: &Script) -> TableauResult<RunReport> {
        self.store.scaffold().await?;

        for unknown in script.unknown_references() {
            warn!(
                scene = unknown.scene_number,
                name = %unknown.name,
                "Scene references an undeclared character"
            );
        }

        let mut state = self.prepare().await?;
        let characters = self.generate_characters(script, &mut state).await;
        let scenes = self.generate_scenes(script, &mut state).await;

        Ok(RunReport::new(characters, scenes))
    }

    /// Load the ledger and reference summary and seed the reference map.
    #[tracing::instrument(skip(self))]
    pub async fn prepare(&self) -> TableauResult<RunState> {
        let ledger = self.ledger.load().await?;
        let summary =
            ReferenceSummary::load(&self.store.layout().reference_summary_path()).await?;
        let state = RunState::seeded(ledger, summary);

        debug!(
            completed = state.ledger.len(),
            seeded_references = state.references.len(),
            "Prepared run state"
        );
        Ok(state)
    }

    /// Generate every pending character in declaration order.
    #[tracing::instrument(skip_all, fields(count = script.characters().len()))]
    pub async fn generate_characters(&self, script: &Script, state: &mut RunState) -> PhaseReport {
        let mut report = PhaseReport::new(ItemKind::Character);

        for character in script.characters() {
            let name = character.name();
            if state.ledger.is_complete(ItemKind::Character, name) {
                debug!(character = %name, "Already complete, skipping");
                report.push(ItemOutcome::skipped(name.clone()));
                continue;
            }

            match self.generate_character(script, character, state).await {
                Ok(()) => {
                    info!(character = %name, "Character reference resolved");
                    report.push(ItemOutcome::resolved(name.clone()));
                }
                Err(e) => {
                    warn!(character = %name, error = %e, "Character generation failed, continuing");
                    report.push(ItemOutcome::failed(name.clone(), e.to_string()));
                }
            }

            self.pacer.after_item().await;
        }

        report
    }

    /// Generate every pending scene in declaration order.
    ///
    /// Scene prompts reference whichever characters are in `state` at this
    /// point, so this must run after [`Self::generate_characters`].
    #[tracing::instrument(skip_all, fields(count = script.scenes().len()))]
    pub async fn generate_scenes(&self, script: &Script, state: &mut RunState) -> PhaseReport {
        let mut report = PhaseReport::new(ItemKind::Scene);

        for scene in script.scenes() {
            let key = scene.item_id();
            if state.ledger.is_complete(ItemKind::Scene, &key) {
                debug!(scene = %key, "Already complete, skipping");
                report.push(ItemOutcome::skipped(key));
                continue;
            }

            match self.generate_scene(script, scene, &key, state).await {
                Ok(()) => {
                    info!(scene = %key, "Scene generated");
                    report.push(ItemOutcome::resolved(key));
                }
                Err(e) => {
                    warn!(scene = %key, error = %e, "Scene generation failed, continuing");
                    report.push(ItemOutcome::failed(key, e.to_string()));
                }
            }

            self.pacer.after_item().await;
        }

        report
    }

    async fn generate_character(
        &self,
        script: &Script,
        character: &Character,
        state: &mut RunState,
    ) -> TableauResult<()> {
        let name = character.name();
        let prompt = self
            .composer
            .compose_character(character, script.art_style());
        let item = self.generate_item(ItemKind::Character, name, &prompt).await?;

        let mut summary = state.summary.clone();
        summary.record(
            name.clone(),
            item.handle.clone(),
            item.local_path.display().to_string(),
        );
        summary
            .save(&self.store.layout().reference_summary_path())
            .await?;

        let mut ledger = state.ledger.clone();
        ledger.mark_complete(ItemKind::Character, name.clone());
        self.ledger.save(&ledger).await?;

        state.summary = summary;
        state.ledger = ledger;
        state.resolved.push(character.with_reference(item.handle.clone()));
        state.references.insert(name.clone(), item.handle);
        Ok(())
    }

    async fn generate_scene(
        &self,
        script: &Script,
        scene: &Scene,
        key: &str,
        state: &mut RunState,
    ) -> TableauResult<()> {
        let prompt = self.composer.compose_scene(scene, script, &state.references);
        self.generate_item(ItemKind::Scene, key, &prompt).await?;

        let mut ledger = state.ledger.clone();
        ledger.mark_complete(ItemKind::Scene, key);
        self.ledger.save(&ledger).await?;

        state.ledger = ledger;
        Ok(())
    }

    /// Submit, persist every variation, materialise the canonical image and
    /// write its metadata. The ledger is left to the caller.
    #[tracing::instrument(skip(self, prompt))]
    async fn generate_item(
        &self,
        kind: ItemKind,
        key: &str,
        prompt: &str,
    ) -> TableauResult<PersistedItem> {
        debug!(state = %ItemState::Submitted, prompt, "Submitting prompt");
        let observer = LoggingObserver::new(key);

        let result = self
            .retry
            .execute(key, || self.submit_once(key, prompt, &observer))
            .await?;

        if result.options().is_empty() {
            return Err(
                PipelineError::new(PipelineErrorKind::EmptyVariations(key.to_string())).into(),
            );
        }

        let layout = self.store.layout();
        let mut variation_bytes = Vec::with_capacity(result.options().len());
        for (index, variation) in result.options().iter().enumerate() {
            let bytes = self.fetcher.fetch(variation.uri()).await?;
            self.store
                .persist_artifact(&bytes, &layout.variation_path(kind, key, index))
                .await?;
            variation_bytes.push(bytes);
        }

        let (index, selected) = self.selection.select(result.options()).ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::EmptyVariations(key.to_string()))
        })?;
        debug!(index, variation = %selected.id(), "Selected variation");

        let (handle, bytes) = if self.upscale {
            let handle = self.upscale_selected(key, &result, index, &observer).await?;
            let bytes = self.fetcher.fetch(&handle).await?;
            (handle, bytes)
        } else {
            (selected.uri().clone(), variation_bytes.swap_remove(index))
        };

        let stored = self
            .store
            .persist_artifact(&bytes, &layout.artifact_path(kind, key))
            .await?;

        let metadata = ArtifactMetadataBuilder::default()
            .prompt(prompt)
            .generation_id(result.id().clone())
            .selected_variation_id(selected.id().clone())
            .all_variation_ids(result.variation_ids())
            .local_path(stored.path().display().to_string())
            .content_hash(stored.content_hash().clone())
            .reference_handle(handle.clone())
            .build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::Builder(e.to_string())))?;
        self.store
            .persist_metadata(&metadata, &layout.metadata_path(kind, key))
            .await?;

        Ok(PersistedItem {
            handle,
            local_path: stored.path().clone(),
        })
    }

    async fn upscale_selected(
        &self,
        key: &str,
        result: &GenerationResult,
        index: usize,
        observer: &dyn ProgressObserver,
    ) -> TableauResult<String> {
        let request = UpscaleRequestBuilder::default()
            .index((index + 1) as u32)
            .msg_id(result.id().clone())
            .hash(result.hash().clone())
            .flags(*result.flags())
            .build()
            .map_err(|e| PipelineError::new(PipelineErrorKind::Builder(e.to_string())))?;

        debug!(index = request.index(), "Upscaling selected variation");
        self.retry
            .execute(key, || self.upscale_once(key, &request, observer))
            .await
    }

    async fn submit_once(
        &self,
        key: &str,
        prompt: &str,
        observer: &dyn ProgressObserver,
    ) -> TableauResult<GenerationResult> {
        self.pacer.before_submission().await;
        self.backend
            .submit_prompt(prompt, Some(observer))
            .await?
            .ok_or_else(|| PipelineError::new(PipelineErrorKind::NoResult(key.to_string())).into())
    }

    async fn upscale_once(
        &self,
        key: &str,
        request: &tableau_interface::UpscaleRequest,
        observer: &dyn ProgressObserver,
    ) -> TableauResult<String> {
        self.pacer.before_submission().await;
        match self.backend.upscale(request, Some(observer)).await? {
            Some(upscaled) if !upscaled.uri().trim().is_empty() => Ok(upscaled.uri().clone()),
            _ => Err(PipelineError::new(PipelineErrorKind::UpscaleFailed(key.to_string())).into()),
        }
    }
}
