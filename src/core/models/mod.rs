//! Data exchanged with the remote catalog store

mod product;
mod work;

pub use product::ProductRecord;
pub use work::{ProcessRequest, WorkCallResult};
