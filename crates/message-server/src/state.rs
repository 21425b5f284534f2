use application::DeviceMessageService;
use domain::RecordStorage;
use std::sync::Arc;

pub struct AppState {
    pub service: DeviceMessageService,
}

impl AppState {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self {
            service: DeviceMessageService::new(storage),
        }
    }
}
