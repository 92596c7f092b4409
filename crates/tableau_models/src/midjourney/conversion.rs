//! Conversions between proxy tasks and pipeline results.

use crate::midjourney::TaskDto;
use tableau_core::{GenerationResult, GenerationResultBuilder, Variation, VariationBuilder};
use tableau_error::{BackendError, BackendErrorKind, TableauResult};

/// Quadrants of an imagine grid.
pub const GRID_SIZE: usize = 4;

fn finished_image(task: &TaskDto) -> Option<&str> {
    if *task.status() != crate::midjourney::TaskStatus::Success {
        return None;
    }
    task.image_url().as_deref().filter(|url| !url.trim().is_empty())
}

fn builder_error(e: impl std::fmt::Display) -> BackendError {
    BackendError::new(BackendErrorKind::UnexpectedResponse(e.to_string()))
}

/// Map a finished imagine task to a result with one variation per grid quadrant.
///
/// Returns `Ok(None)` unless the task succeeded with an image.
pub fn grid_result(task: &TaskDto) -> TableauResult<Option<GenerationResult>> {
    let Some(image_url) = finished_image(task) else {
        return Ok(None);
    };

    let hash = task.properties().message_hash().clone().unwrap_or_default();
    let options = (0..GRID_SIZE)
        .map(|i| {
            VariationBuilder::default()
                .id(format!("{}:{}", task.id(), i))
                .hash(hash.clone())
                .uri(image_url)
                .build()
                .map_err(builder_error)
        })
        .collect::<Result<Vec<Variation>, _>>()?;

    let result = GenerationResultBuilder::default()
        .id(task.id().clone())
        .hash(hash)
        .flags(task.properties().flags().unwrap_or_default())
        .uri(image_url)
        .options(options)
        .build()
        .map_err(builder_error)?;
    Ok(Some(result))
}

/// Map a finished upscale task to a result whose `uri` is the upscaled image.
pub fn upscale_result(task: &TaskDto) -> TableauResult<Option<GenerationResult>> {
    let Some(image_url) = finished_image(task) else {
        return Ok(None);
    };

    let result = GenerationResultBuilder::default()
        .id(task.id().clone())
        .hash(task.properties().message_hash().clone().unwrap_or_default())
        .flags(task.properties().flags().unwrap_or_default())
        .uri(image_url)
        .build()
        .map_err(builder_error)?;
    Ok(Some(result))
}

/// Custom id of the `U<index>` button of a grid task.
pub fn upscale_custom_id(task: &TaskDto, index: u32) -> Option<&str> {
    let label = format!("U{}", index);
    let marker = format!("::upsample::{}::", index);
    task.buttons()
        .iter()
        .find(|b| b.label() == &label || b.custom_id().contains(&marker))
        .map(|b| b.custom_id().as_str())
}
