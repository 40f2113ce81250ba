//! Types shared by several resources.

mod address;

pub use address::{Address, DEFAULT_COUNTRY};
