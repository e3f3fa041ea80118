pub mod record;
pub mod side_channel;

pub use record::{DecodeError, Detection, DetectionsPayload, UploadPayload};
pub use side_channel::SideChannel;
