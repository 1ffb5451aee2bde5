use super::*;

pub mod add;
pub mod init;

pub use add::{add, AddArgs};
pub use init::{init, InitArgs};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// File a paper: download it, push it, and pin it to the board (default)
  Add(AddArgs),

  /// Write a configuration file
  Init(InitArgs),
}
