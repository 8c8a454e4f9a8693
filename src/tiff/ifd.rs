//! Image File Directory structure and methods
//!
//! An IFD is an ordered list of fields plus any image data its fields
//! address. TIFF files usually share one byte order across all IFDs,
//! but certain maker notes use a fixed or detected order instead, so
//! each IFD carries its own.

use log::{debug, trace};

use crate::io::byte_order::ByteOrder;
use crate::tiff::field::Field;
use crate::tiff::image_data::{ImageData, ImageDataSpec};
use crate::tiff::types::FieldType;

/// Fields and image data for a single IFD
#[derive(Debug, Clone)]
pub struct Ifd {
    /// Byte order of this IFD's values
    pub order: ByteOrder,
    /// Entries in this IFD
    pub fields: Vec<Field>,
    /// Image data addressed by this IFD's offset fields
    pub image_data: Vec<ImageData>,
}

impl Ifd {
    /// Create an empty IFD with the given byte order
    pub fn new(order: ByteOrder) -> Ifd {
        Ifd {
            order,
            fields: Vec::new(),
            image_data: Vec::new(),
        }
    }

    /// Serialized size of the IFD table alone: entry count, entries,
    /// and the position of the next IFD. External data is not
    /// included.
    pub fn table_size(&self) -> u32 {
        2 + self.fields.len() as u32 * 12 + 4
    }

    /// Return references to the fields that match the given tags
    ///
    /// The result may be shorter than `tags` if some tags are absent,
    /// or longer if there are duplicate tags (which is probably not
    /// valid).
    pub fn find_fields(&self, tags: &[u16]) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|field| tags.contains(&field.tag))
            .collect()
    }

    /// Return the index of the first field with the given tag
    pub fn find_field_index(&self, tag: u16) -> Option<usize> {
        self.fields.iter().position(|field| field.tag == tag)
    }

    /// Add fields to the IFD, keeping the list sorted by tag
    pub fn add_fields(&mut self, fields: Vec<Field>) {
        if fields.is_empty() {
            return;
        }
        self.fields.extend(fields);
        self.fields.sort_by_key(|field| field.tag);
    }

    /// Delete all fields with any of the given tags
    pub fn delete_fields(&mut self, tags: &[u16]) {
        self.fields.retain(|field| !tags.contains(&field.tag));
    }

    /// Apply TIFF fixes to this IFD
    ///
    /// Sorts the fields into ascending tag order; converts SHORT
    /// offset fields named in `specs` to LONG, since rewriting a file
    /// can move image data past the range a SHORT can address; and
    /// appends missing NUL terminators to ASCII field data. Applying
    /// the fixes twice is a no-op.
    pub fn fix(&mut self, specs: &[ImageDataSpec]) {
        self.fields.sort_by_key(|field| field.tag);
        let order = self.order;
        for field in &mut self.fields {
            if field.field_type == FieldType::Short
                && specs.iter().any(|spec| spec.offset_tag == field.tag)
            {
                debug!("Promoting SHORT offset field {} to LONG", field.tag);
                let offsets: Vec<u32> = (0..field.count)
                    .map(|k| field.short(k, order) as u32)
                    .collect();
                field.field_type = FieldType::Long;
                field.data = vec![0; 4 * field.count as usize];
                for (k, offset) in offsets.into_iter().enumerate() {
                    field.put_long(offset, k as u32, order);
                }
            } else if field.field_type == FieldType::Ascii && field.data.last() != Some(&0) {
                trace!("Appending missing NUL to ASCII field {}", field.tag);
                field.data.push(0);
                field.count = field.data.len() as u32;
            }
        }
    }
}
