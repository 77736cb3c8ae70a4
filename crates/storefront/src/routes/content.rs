//! Editorial content route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::content::ProductContent;
use crate::error::Result;
use crate::state::AppState;

/// Fetch all CMS content for a product handle.
///
/// Products without content documents return an empty object; the view
/// layer simply skips the missing sections.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProductContent>> {
    let content = state.content().product_content(&handle).await?;
    Ok(Json(content))
}
