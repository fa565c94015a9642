//! Shared per-process state

use ecg_model::LinearLeadModel;
use std::path::PathBuf;
use std::sync::Arc;

/// State handed to every request handler
///
/// The model handle is read-only after startup; requests share nothing
/// else.
#[derive(Clone)]
pub struct AppState {
    /// Loaded generative model, absent when startup found none
    pub model: Option<Arc<LinearLeadModel>>,
    /// Directory searched by the record endpoint
    pub record_dir: PathBuf,
}
