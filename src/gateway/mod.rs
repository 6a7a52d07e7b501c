pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpGateway, LectureProcessor};
pub use error::GatewayError;
pub use types::ProcessLectureResponse;
