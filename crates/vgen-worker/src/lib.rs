//! Image-to-video generation worker.
//!
//! This crate provides:
//! - The request handler: one job in, one result out, never panics
//! - Worker configuration from the environment
//! - The queue-runtime adapter loop
//! - Graceful shutdown

pub mod config;
pub mod error;
pub mod handler;
pub mod runtime;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use handler::RequestHandler;
pub use runtime::QueueRuntime;
