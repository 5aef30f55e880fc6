pub mod client;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod models;
pub mod normalize;
pub mod render;

pub use client::{HttpBackend, LookupError, TrackingBackend};
pub use controller::QueryController;
pub use normalize::{NormalizedResult, normalize};
