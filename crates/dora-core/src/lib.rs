pub mod deployment;
pub mod error;
pub mod io;
pub mod metrics;
pub mod paths;
pub mod store;
pub mod tracker;

pub use error::{DoraError, Result};
