//! Application layer - Use cases and business workflows

pub mod device_message;

pub use device_message::DeviceMessageService;
