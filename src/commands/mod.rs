//! Command handlers for the nbheader CLI
//!
//! Each submodule implements one subcommand:
//!
//! - [`preview`]: print the header synthesized for a file name
//! - [`simulate`]: replay a lifecycle scenario against an in-memory host

pub mod preview;
pub mod simulate;
