//! CLI subcommand implementations for the magpie binary.

pub mod doctor;
pub mod grab_cmd;
pub mod pick_cmd;
