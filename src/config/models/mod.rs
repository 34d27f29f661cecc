//! Configuration models

mod pipeline;
mod remote;
mod secret;
mod suppliers;

pub use pipeline::{EmbeddingsConfig, ImportConfig};
pub use remote::RemoteConfig;
pub use secret::SecretString;
pub use suppliers::SupplierDirectory;
