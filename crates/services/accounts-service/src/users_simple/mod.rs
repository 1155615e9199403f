//! Conversion between a [`domain::Config`] and the legacy flat store.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::{simple_user, Writer};
