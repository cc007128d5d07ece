pub mod http;
pub mod roboflow;
