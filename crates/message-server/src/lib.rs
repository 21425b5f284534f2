pub mod api;
pub mod error;
pub mod state;
pub mod views;

use domain::RecordStorage;
use state::AppState;
use std::sync::Arc;

pub fn setup_app_state(storage: Arc<dyn RecordStorage>) -> Arc<AppState> {
    Arc::new(AppState::new(storage))
}
