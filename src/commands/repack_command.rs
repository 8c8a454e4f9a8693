//! TIFF repack command
//!
//! Decodes a file into its IFD tree, applies the standard fixes,
//! prunes empty IFDs, and re-serializes the tree into a canonical
//! layout in a new file.

use std::fs;

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::spaces::TagSpace;
use crate::tiff::{get_header, get_ifd_tree, put_header, HEADER_SIZE};
use crate::utils::logger::Logger;

/// Command for re-serializing a TIFF file
pub struct RepackCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output file
    output_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> RepackCommand<'a> {
    /// Create a new repack command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TiffResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| TiffError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| TiffError::GenericError("Missing output file".to_string()))?
            .clone();

        Ok(RepackCommand { input_file, output_file, logger })
    }
}

impl<'a> Command for RepackCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        info!("Repacking {} into {}", self.input_file, self.output_file);
        let buf = fs::read(&self.input_file)?;
        let (order, ifd_pos) = get_header(&buf).ok_or(TiffError::InvalidHeader)?;
        let (mut root, errors) = get_ifd_tree(&buf, order, ifd_pos, TagSpace::Tiff)?;
        if !errors.is_empty() {
            // Best effort: repack whatever could be decoded.
            for error in errors.iter() {
                warn!("{}", error);
            }
            self.logger.log(&format!(
                "{}: {} problems found while parsing",
                self.input_file,
                errors.len()
            ))?;
        }

        root.fix();
        let root = root.delete_empty_ifds().ok_or_else(|| {
            TiffError::GenericError("file contains no non-empty IFDs".to_string())
        })?;

        let file_size = HEADER_SIZE + root.tree_size();
        let mut out = vec![0u8; file_size as usize];
        put_header(&mut out, order, HEADER_SIZE)?;
        let end = root.put_ifd_tree(&mut out, HEADER_SIZE)?;
        out.truncate(end as usize);
        fs::write(&self.output_file, &out)?;
        info!("Wrote {} bytes to {}", end, self.output_file);
        Ok(())
    }
}
