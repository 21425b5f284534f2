mod service;

pub use service::DeviceMessageService;
