//! CLI subcommand modules.

pub(crate) mod render;
pub(crate) mod update;
