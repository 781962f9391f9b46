//! Line-level parsing of LINE exports.
//!
//! - [`line`] - classification of raw lines
//! - [`events`] - system notice recognition
//! - [`assembler`] - the message state machine (pass 2)

pub mod assembler;
pub mod events;
pub mod line;

pub use assembler::{Assembler, HeaderSplit, assemble, split_header};
pub use events::{SystemEvent, SystemEvents};
pub use line::{LineKind, classify_line, header_remainder, split_lines};
