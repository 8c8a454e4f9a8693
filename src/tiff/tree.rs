//! IFD tree walking
//!
//! Builds the logical tree of a TIFF file by recursing over sub-IFD
//! links and next pointers, and serializes a tree back into a buffer
//! with correct offsets and alignment. Recursion is pre-order: a
//! parent is read before its sub-IFDs, which are read before the next
//! IFD in the chain. Cycle detection keys on the pair of buffer length
//! and position, because maker note dialects reparse sub-slices of the
//! original buffer and a bare position would falsely report a cycle
//! across slices.

use std::collections::HashSet;

use log::{debug, warn};

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::{exif_tags, tags};
use crate::tiff::errors::{ErrorList, TiffError, TiffResult};
use crate::tiff::field::Field;
use crate::tiff::ifd::Ifd;
use crate::tiff::reader::read_ifd;
use crate::tiff::spaces::makernote::identify_maker_note;
use crate::tiff::spaces::{
    fujifilm, nikon, olympus, panasonic, sony, specs_for, Base, NextPolicy, SpaceRec, TagSpace,
};
use crate::tiff::types::FieldType;
use crate::tiff::writer::{align, put_ifd, SubIfdPos};

/// A TIFF IFD with links to the sub-IFDs referred to from its fields
/// and to the next IFD, if any
#[derive(Debug, Clone)]
pub struct IfdNode {
    pub ifd: Ifd,
    pub space_rec: SpaceRec,
    pub sub_ifds: Vec<SubIfd>,
    pub next: Option<Box<IfdNode>>,
}

/// A sub-IFD and the field in the parent that referred to it
#[derive(Debug, Clone)]
pub struct SubIfd {
    pub tag: u16,
    pub node: Box<IfdNode>,
}

/// State threaded through a recursive parse: the cycle detection set,
/// the camera identity captured from the TIFF IFD for maker note
/// classification, and the soft-error accumulator.
#[derive(Debug, Default)]
pub(crate) struct ParseCtx {
    pub(crate) visited: HashSet<(u32, u32)>,
    pub(crate) make: String,
    pub(crate) model: String,
    pub(crate) errors: ErrorList,
}

/// Create an IFD node tree by reading an IFD and every other IFD it
/// refers to
///
/// `pos` is the position of the root IFD in the buffer and `space` the
/// namespace to assign to it, usually `TagSpace::Tiff`. Returns the
/// tree together with the soft errors encountered; a damaged file
/// yields as much of the tree as could be decoded plus the
/// diagnostics. The only hard failure is a root IFD that cannot be
/// read at all.
pub fn get_ifd_tree(
    buf: &[u8],
    order: ByteOrder,
    pos: u32,
    space: TagSpace,
) -> TiffResult<(IfdNode, ErrorList)> {
    let mut ctx = ParseCtx::default();
    let mut node = IfdNode::new_with_order(space, order);
    node.read_tree(buf, pos, &mut ctx)?;
    debug!(
        "Parsed {} tree at {} with {} soft errors",
        space.name(),
        pos,
        ctx.errors.len()
    );
    Ok((node, ctx.errors))
}

impl IfdNode {
    /// Create an empty node with a given namespace
    ///
    /// The byte order defaults to little-endian; set `ifd.order` when
    /// building big-endian trees programmatically.
    pub fn new(space: TagSpace) -> IfdNode {
        IfdNode::new_with_order(space, ByteOrder::LittleEndian)
    }

    /// Create an empty node with a given namespace and byte order
    pub fn new_with_order(space: TagSpace, order: ByteOrder) -> IfdNode {
        IfdNode {
            ifd: Ifd::new(order),
            space_rec: SpaceRec::new(space),
            sub_ifds: Vec::new(),
            next: None,
        }
    }

    /// The namespace of this node
    pub fn space(&self) -> TagSpace {
        self.space_rec.space()
    }

    /// Dialect-aware recursive read: consume any label prefix, switch
    /// the byte order and buffer base as the dialect dictates, then
    /// read the table and descend.
    pub(crate) fn read_tree(&mut self, buf: &[u8], pos: u32, ctx: &mut ParseCtx) -> TiffResult<()> {
        if pos as usize > buf.len() {
            return Err(TiffError::IfdPositionOutOfRange(pos));
        }
        let base = {
            let IfdNode { ifd, space_rec, .. } = self;
            match space_rec {
                SpaceRec::Generic(_) | SpaceRec::Canon1(_) | SpaceRec::Nikon2Preview(_) => {
                    Base::Absolute(pos)
                }
                SpaceRec::Nikon1(_) => Base::Absolute(pos + nikon::NIKON1_LABEL.len() as u32),
                SpaceRec::Fujifilm1(rec) => fujifilm::read_prologue(rec, ifd, buf, pos)?,
                SpaceRec::Nikon2(rec) => nikon::read_nikon2_prologue(rec, ifd, buf, pos)?,
                SpaceRec::Olympus1(rec) => olympus::read_prologue(rec, ifd, buf, pos)?,
                SpaceRec::Panasonic1(_) => {
                    Base::Absolute(pos + panasonic::PANASONIC1_LABEL.len() as u32)
                }
                SpaceRec::Sony1(rec) => sony::read_prologue(rec, ifd, buf, pos)?,
            }
        };
        match base {
            Base::Absolute(table_pos) => self.read_body(buf, table_pos, ctx),
            Base::Relative { start, pos } => self.read_body(&buf[start as usize..], pos, ctx),
        }
    }

    /// Read the IFD table at `pos`, process each field for sub-IFD
    /// links, and follow the next pointer per the dialect's policy.
    fn read_body(&mut self, buf: &[u8], pos: u32, ctx: &mut ParseCtx) -> TiffResult<()> {
        let space = self.space();
        if !ctx.visited.insert((buf.len() as u32, pos)) {
            return Err(TiffError::CycleDetected { space, pos });
        }
        let policy = self.space_rec.next_policy();
        let table = read_ifd(
            buf,
            self.ifd.order,
            pos,
            specs_for(space),
            policy != NextPolicy::Ignored,
            &mut ctx.errors,
        )?;
        self.ifd.fields = table.fields;
        self.ifd.image_data = table.image_data;
        let order = self.ifd.order;
        for (i, &data_pos) in table.data_positions.iter().enumerate() {
            let subs = {
                let field = &self.ifd.fields[i];
                match &self.space_rec {
                    SpaceRec::Generic(_) => {
                        generic_take_field(space, buf, order, field, data_pos, ctx)
                    }
                    SpaceRec::Nikon2(_) => nikon::take_nikon2_field(buf, order, field, ctx),
                    SpaceRec::Nikon2Preview(_) => nikon::take_preview_field(buf, order, field, ctx),
                    SpaceRec::Olympus1(_) => olympus::take_field(buf, order, field, data_pos, ctx),
                    _ => Vec::new(),
                }
            };
            self.sub_ifds.extend(subs);
        }
        if table.next != 0 {
            match policy {
                NextPolicy::Chain => {
                    if let Some(node) = read_child(buf, order, table.next, space.next_space(), ctx)
                    {
                        self.next = Some(Box::new(node));
                    }
                }
                NextPolicy::Forbidden => {
                    ctx.errors.push(TiffError::UnexpectedNextPointer { space, pos });
                }
                NextPolicy::Ignored => {}
            }
        }
        Ok(())
    }

    /// Serialized size of this node alone: label and header prefix,
    /// table, external field data, and image data, but not the other
    /// nodes it refers to.
    pub fn node_size(&self) -> u32 {
        self.space_rec.prefix_size() + self.generic_size()
    }

    /// Size of the node without any dialect prefix
    pub(crate) fn generic_size(&self) -> u32 {
        let mut size = self.ifd.table_size();
        'fields: for field in &self.ifd.fields {
            // Don't count arrays that have been unpacked into
            // sub-IFDs, such as maker notes; the sub-tree is counted
            // on its own. Any sub-IFD field with a single-byte type is
            // such an array.
            for sub in &self.sub_ifds {
                if sub.tag == field.tag && field.field_type.size() == 1 {
                    continue 'fields;
                }
            }
            let fsize = field.size();
            if fsize > 4 {
                size += fsize;
            }
        }
        for id in &self.ifd.image_data {
            for segment in &id.segments {
                size += segment.len() as u32;
            }
        }
        size
    }

    /// Serialized size of this node and every node it refers to,
    /// including alignment padding between regions
    pub fn tree_size(&self) -> u32 {
        let mut size = self.node_size();
        for sub in &self.sub_ifds {
            size = align(size);
            size += sub.node.tree_size();
        }
        size = align(size);
        if let Some(next) = &self.next {
            size += next.tree_size();
        }
        size
    }

    /// Serialize this node and every node it refers to into `buf` at
    /// `pos`
    ///
    /// `buf` must represent a serialized TIFF file with the start of
    /// the file at the start of the slice and must be at least
    /// `pos + tree_size()` bytes long. `pos` must be word aligned and
    /// field tags must be ascending; run `fix` first to establish
    /// both. Returns the position following the last byte used.
    pub fn put_ifd_tree(&self, buf: &mut [u8], pos: u32) -> TiffResult<u32> {
        let needed = pos as u64 + self.tree_size() as u64;
        if (buf.len() as u64) < needed {
            return Err(TiffError::BufferTooSmall { needed: needed as usize, actual: buf.len() });
        }
        self.write_tree(buf, pos)
    }

    /// Dialect-aware recursive write
    pub(crate) fn write_tree(&self, buf: &mut [u8], pos: u32) -> TiffResult<u32> {
        match &self.space_rec {
            SpaceRec::Generic(_) | SpaceRec::Canon1(_) | SpaceRec::Nikon2Preview(_) => {
                self.generic_write_tree(buf, pos)
            }
            SpaceRec::Nikon1(_) => nikon::write_nikon1_tree(self, buf, pos),
            SpaceRec::Nikon2(rec) => nikon::write_nikon2_tree(rec, self, buf, pos),
            SpaceRec::Fujifilm1(rec) => fujifilm::write_tree(rec, self, buf, pos),
            SpaceRec::Olympus1(rec) => olympus::write_tree(rec, self, buf, pos),
            SpaceRec::Panasonic1(_) => {
                let label = &panasonic::PANASONIC1_LABEL;
                buf[pos as usize..pos as usize + label.len()].copy_from_slice(label);
                self.generic_write_tree(buf, pos + label.len() as u32)
            }
            SpaceRec::Sony1(rec) => sony::write_tree(rec, self, buf, pos),
        }
    }

    /// Write the sub-trees first, recording their positions, then the
    /// next chain, and finally this node's table with the recorded
    /// positions patched into its pointer fields.
    pub(crate) fn generic_write_tree(&self, buf: &mut [u8], pos: u32) -> TiffResult<u32> {
        let mut cursor = pos + self.generic_size();
        let mut sub_positions = Vec::with_capacity(self.sub_ifds.len());
        for sub in &self.sub_ifds {
            cursor = align(cursor);
            let start = cursor;
            cursor = sub.node.write_tree(buf, start)?;
            sub_positions.push(SubIfdPos { tag: sub.tag, pos: start, size: cursor - start });
        }
        let mut next_pos = 0;
        if let Some(next) = &self.next {
            cursor = align(cursor);
            next_pos = cursor;
            cursor = next.write_tree(buf, cursor)?;
        }
        put_ifd(buf, &self.ifd, pos, &sub_positions, next_pos)?;
        Ok(cursor)
    }

    /// Apply `Ifd::fix` to every IFD in the tree
    pub fn fix(&mut self) {
        self.ifd.fix(specs_for(self.space()));
        for sub in &mut self.sub_ifds {
            sub.node.fix();
        }
        if let Some(next) = &mut self.next {
            next.fix();
        }
    }

    /// Remove IFDs with no fields from the tree
    ///
    /// The TIFF specification requires at least one entry per IFD, and
    /// the writer refuses empty ones. When a sub-IFD is removed, the
    /// pointer field that referred to it loses one entry and is itself
    /// removed at zero; an empty node with a next IFD is replaced by
    /// it. Returns `None` when nothing remains.
    pub fn delete_empty_ifds(mut self) -> Option<IfdNode> {
        let subs = std::mem::take(&mut self.sub_ifds);
        for sub in subs {
            match (*sub.node).delete_empty_ifds() {
                Some(kept) => {
                    self.sub_ifds.push(SubIfd { tag: sub.tag, node: Box::new(kept) })
                }
                None => self.remove_sub_reference(sub.tag),
            }
        }
        if let Some(next) = self.next.take() {
            self.next = (*next).delete_empty_ifds().map(Box::new);
        }
        if self.ifd.fields.is_empty() {
            debug!("Dropping empty {} IFD", self.space().name());
            return self.next.take().map(|next| *next);
        }
        Some(self)
    }

    /// Remove the sub-IFDs introduced by `tag`
    ///
    /// The pointer field loses one entry per removed sub-IFD and is
    /// itself removed when no entries remain; an embedded-array field
    /// such as a maker note is removed outright.
    pub fn delete_sub_ifd(&mut self, tag: u16) {
        let before = self.sub_ifds.len();
        self.sub_ifds.retain(|sub| sub.tag != tag);
        for _ in self.sub_ifds.len()..before {
            self.remove_sub_reference(tag);
        }
    }

    /// Drop one sub-IFD reference from the field that introduced it
    fn remove_sub_reference(&mut self, tag: u16) {
        if let Some(idx) = self.ifd.find_field_index(tag) {
            let remove = {
                let field = &mut self.ifd.fields[idx];
                if field.field_type.size() == 1 {
                    // An embedded array such as a maker note holds
                    // exactly one sub-tree; without it the field is
                    // meaningless.
                    true
                } else {
                    field.count = field.count.saturating_sub(1);
                    let width = field.field_type.size() as usize;
                    field.data.truncate(field.count as usize * width);
                    field.count == 0
                }
            };
            if remove {
                self.ifd.fields.remove(idx);
            }
        }
    }
}

/// Read a child IFD tree, converting a failure into a recorded soft
/// error so the rest of the parse continues.
pub(crate) fn read_child(
    buf: &[u8],
    order: ByteOrder,
    pos: u32,
    space: TagSpace,
    ctx: &mut ParseCtx,
) -> Option<IfdNode> {
    let mut node = IfdNode::new_with_order(space, order);
    match node.read_tree(buf, pos, ctx) {
        Ok(()) => Some(node),
        Err(error) => {
            warn!("Dropping {} IFD at {}: {}", space.name(), pos, error);
            ctx.errors.push(error);
            None
        }
    }
}

/// Read the sub-IFDs a pointer field refers to
///
/// A field usually references a single IFD, but SubIFDs can point to
/// several. Short or damaged pointer arrays are tolerated.
pub(crate) fn recurse_sub_ifds(
    buf: &[u8],
    order: ByteOrder,
    field: &Field,
    subspace: TagSpace,
    ctx: &mut ParseCtx,
) -> Vec<SubIfd> {
    let mut subs = Vec::new();
    for j in 0..field.count {
        if (j as usize + 1) * 4 > field.data.len() {
            break;
        }
        let child_pos = field.long(j, order);
        if let Some(node) = read_child(buf, order, child_pos, subspace, ctx) {
            subs.push(SubIfd { tag: field.tag, node: Box::new(node) });
        }
    }
    subs
}

/// Field processing for the generic namespaces: capture the camera
/// identity from TIFF IFDs, classify maker notes in Exif IFDs, and
/// descend into the pointer fields the namespace defines.
fn generic_take_field(
    space: TagSpace,
    buf: &[u8],
    order: ByteOrder,
    field: &Field,
    data_pos: u32,
    ctx: &mut ParseCtx,
) -> Vec<SubIfd> {
    match space {
        TagSpace::Tiff => {
            if field.tag == tags::MAKE {
                ctx.make = field.ascii();
                return Vec::new();
            }
            if field.tag == tags::MODEL {
                ctx.model = field.ascii();
                return Vec::new();
            }
        }
        TagSpace::Exif => {
            if field.tag == exif_tags::MAKER_NOTE {
                return take_maker_note(buf, order, field, data_pos, ctx);
            }
        }
        _ => {}
    }
    let is_pointer = field.field_type == FieldType::Ifd
        || match space {
            TagSpace::Tiff => {
                matches!(field.tag, tags::SUB_IFDS | tags::EXIF_IFD | tags::GPS_IFD)
            }
            TagSpace::Exif => field.tag == exif_tags::INTEROP_IFD,
            _ => false,
        };
    if is_pointer {
        recurse_sub_ifds(buf, order, field, space.sub_space(field.tag), ctx)
    } else {
        Vec::new()
    }
}

/// Classify and unpack a maker note payload; unrecognized or
/// implausible payloads stay opaque.
fn take_maker_note(
    buf: &[u8],
    order: ByteOrder,
    field: &Field,
    data_pos: u32,
    ctx: &mut ParseCtx,
) -> Vec<SubIfd> {
    let make = ctx.make.clone();
    let model = ctx.model.clone();
    let space = match identify_maker_note(buf, data_pos, &make, &model) {
        Some(space) => space,
        None => return Vec::new(),
    };
    debug!("Maker note at {} identified as {}", data_pos, space.name());
    let labeled = space != TagSpace::Nikon2
        || buf[data_pos as usize..].starts_with(&nikon::NIKON2_LABEL_PREFIX);
    let mut node = IfdNode::new_with_order(space, order);
    match node.read_tree(buf, data_pos, ctx) {
        Ok(()) => {
            if !labeled && !nikon::looks_like_nikon2(&node) {
                debug!("Unlabeled maker note at {} does not look like Nikon2; leaving opaque", data_pos);
                return Vec::new();
            }
            vec![SubIfd { tag: field.tag, node: Box::new(node) }]
        }
        Err(error) => {
            warn!("Dropping unreadable maker note at {}: {}", data_pos, error);
            ctx.errors.push(error);
            Vec::new()
        }
    }
}
