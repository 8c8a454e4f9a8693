//! CLI command implementations
//!
//! Implementations of the commands supported by the CLI application
//! using the Command pattern.

pub mod command_traits;
pub mod print_command;
pub mod repack_command;

pub use command_traits::{Command, CommandFactory};
pub use print_command::PrintCommand;
pub use repack_command::RepackCommand;

use clap::ArgMatches;

use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct TagkitCommandFactory;

impl TagkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TagkitCommandFactory
    }
}

impl Default for TagkitCommandFactory {
    fn default() -> Self {
        TagkitCommandFactory::new()
    }
}

impl<'a> CommandFactory<'a> for TagkitCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        logger: &'a Logger,
    ) -> TiffResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("print", sub_args)) => Ok(Box::new(PrintCommand::new(sub_args, logger)?)),
            Some(("repack", sub_args)) => Ok(Box::new(RepackCommand::new(sub_args, logger)?)),
            _ => Err(TiffError::GenericError("No command specified".to_string())),
        }
    }
}
