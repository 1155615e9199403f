//! Users configuration of a running Linux system.

mod parser;
mod reader;

pub use parser::{parse_group, parse_passwd, parse_shadow, DisabledMarkers};
pub use reader::Reader;
