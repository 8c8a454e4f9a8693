//! TIFF structure dump command
//!
//! Reads a file, parses the full IFD tree including any maker notes,
//! and prints every field of every IFD with its decoded values.

use std::fs;

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::Field;
use crate::tiff::spaces::TagSpace;
use crate::tiff::tree::IfdNode;
use crate::tiff::{get_header, get_ifd_tree};
use crate::utils::logger::Logger;
use crate::utils::string_utils;
use crate::utils::tag_utils;

/// Command for dumping the IFD structure of a TIFF file
pub struct PrintCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Maximum values to print per field, 0 for no limit
    max_values: u32,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PrintCommand<'a> {
    /// Create a new print command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TiffResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| TiffError::GenericError("Missing input file".to_string()))?
            .clone();
        let max_values = args
            .get_one::<String>("max-values")
            .map(|value| value.parse::<u32>())
            .transpose()
            .map_err(|_| TiffError::GenericError("Invalid value for --max-values".to_string()))?
            .unwrap_or(20);

        Ok(PrintCommand { input_file, max_values, logger })
    }

    /// Print one node and everything it refers to
    fn print_node(&self, node: &IfdNode) {
        let fields = &node.ifd.fields;
        println!();
        println!(
            "{} IFD with {} {}:",
            node.space().name(),
            fields.len(),
            if fields.len() == 1 { "entry" } else { "entries" }
        );
        for field in fields {
            println!("{}", render_field(field, node.ifd.order, node.space(), self.max_values));
        }
        if node.ifd.image_data.is_empty() {
            println!("No image data");
        } else {
            println!("Image data:");
            for id in &node.ifd.image_data {
                let name = tag_utils::tag_name(node.space(), id.offset_tag)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{}", id.offset_tag));
                for (i, segment) in id.segments.iter().enumerate() {
                    println!("{}[{}] has length {}", name, i, segment.len());
                }
            }
        }
        for sub in &node.sub_ifds {
            self.print_node(&sub.node);
        }
        if let Some(next) = &node.next {
            self.print_node(next);
        }
    }
}

impl<'a> Command for PrintCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        info!("Printing structure of {}", self.input_file);
        let buf = fs::read(&self.input_file)?;
        let (order, ifd_pos) =
            get_header(&buf).ok_or(TiffError::InvalidHeader)?;
        let (root, errors) = get_ifd_tree(&buf, order, ifd_pos, TagSpace::Tiff)?;
        self.print_node(&root);
        if !errors.is_empty() {
            for error in errors.iter() {
                warn!("{}", error);
            }
            self.logger.log(&format!(
                "{}: {} problems found while parsing",
                self.input_file,
                errors.len()
            ))?;
        }
        Ok(())
    }
}

/// Render one field as a line: name, type, count, and the values up
/// to `limit` (0 for no limit)
fn render_field(field: &Field, order: ByteOrder, space: TagSpace, limit: u32) -> String {
    let mut line = match tag_utils::tag_name(space, field.tag) {
        Some(name) => format!("{} {}({})", name, field.field_type.name(), field.count),
        None => format!(
            "Unknown {}(0x{:X}) {}({})",
            field.tag,
            field.tag,
            field.field_type.name(),
            field.count
        ),
    };
    let shown = if limit > 0 { field.count.min(limit) } else { field.count };
    let truncated = limit > 0 && field.count > limit;
    if field.field_type == crate::tiff::types::FieldType::Ascii {
        // Dumps read better without the NUL padding some cameras
        // append after the terminator.
        let mut bytes = field.data.clone();
        string_utils::trim_trailing_nulls(&mut bytes);
        let text = String::from_utf8_lossy(&bytes).into_owned();
        if truncated && text.len() > limit as usize {
            let cut: String = text.chars().take(limit as usize).collect();
            line.push_str(&format!(" {:?}...", cut));
        } else {
            line.push_str(&format!(" {:?}", text));
        }
        return line;
    }
    if field.field_type.is_rational() {
        for i in 0..shown {
            let (n, d) = field.any_rational(i, order);
            line.push_str(&format!(" {}/{}", n, d));
        }
    } else if field.field_type.is_integral() {
        for i in 0..shown {
            line.push_str(&format!(" {}", field.any_integer(i, order)));
        }
    } else if field.field_type == crate::tiff::types::FieldType::Undefined {
        for i in 0..shown {
            line.push_str(&format!(" {:X}", field.data[i as usize]));
        }
    } else if field.field_type.is_float() {
        for i in 0..shown {
            line.push_str(&format!(" {:e}", field.any_float(i, order)));
        }
    } else {
        line.push_str(" unknown data type");
        return line;
    }
    if truncated {
        line.push_str("...");
    }
    line
}
