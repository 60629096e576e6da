use std::collections::HashMap;

use crate::jt::bytes::Cursor;
use crate::jt::{FileHeader, Guid, JtError, Result};

/// One table-of-contents record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocEntry {
	/// Segment id, unique within the file.
	pub segment_id: Guid,
	/// Absolute byte offset of the segment.
	pub offset: u32,
	/// Byte length of the segment as stored.
	pub length: u32,
	/// Attribute flags; the high byte carries the segment type code.
	pub attributes: u32,
}

impl TocEntry {
	/// Size of one encoded record.
	pub const SIZE: usize = 28;

	/// Segment type code recorded in the attribute flags.
	pub fn segment_type_hint(&self) -> u32 {
		self.attributes >> 24
	}
}

/// Segment lookup table read from the TOC offset.
#[derive(Debug, Clone)]
pub struct Toc {
	entries: Vec<TocEntry>,
	by_id: HashMap<Guid, usize>,
}

impl Toc {
	/// Read the count-prefixed entry array the header points at.
	pub fn parse(bytes: &[u8], header: &FileHeader) -> Result<Self> {
		let offset = header.toc_offset;
		let truncated = |count| JtError::TruncatedToc { offset, count };

		let mut cursor = Cursor::at(bytes, offset as usize).map_err(|_| JtError::TocOffsetOutOfRange {
			offset,
			len: bytes.len(),
		})?;
		let count = cursor.read_u32_le().map_err(|_| truncated(0))?;
		let need = (count as usize).checked_mul(TocEntry::SIZE).unwrap_or(usize::MAX);
		if need > cursor.remaining() {
			return Err(truncated(count));
		}

		let mut entries = Vec::with_capacity(count as usize);
		for _ in 0..count {
			entries.push(TocEntry {
				segment_id: cursor.read_guid()?,
				offset: cursor.read_u32_le()?,
				length: cursor.read_u32_le()?,
				attributes: cursor.read_u32_le()?,
			});
		}

		let toc = Self::from_entries(entries)?;
		tracing::debug!(entries = toc.len(), offset, "read toc");
		Ok(toc)
	}

	/// Build a lookup table from entries in file order.
	pub fn from_entries(entries: Vec<TocEntry>) -> Result<Self> {
		let mut by_id = HashMap::with_capacity(entries.len());
		for (idx, entry) in entries.iter().enumerate() {
			if by_id.insert(entry.segment_id, idx).is_some() {
				return Err(JtError::DuplicateSegmentId { id: entry.segment_id });
			}
		}
		Ok(Self { entries, by_id })
	}

	/// Look up a segment entry by id.
	pub fn get(&self, id: &Guid) -> Option<&TocEntry> {
		let idx = self.by_id.get(id)?;
		self.entries.get(*idx)
	}

	/// Look up a segment entry, failing when the id is not listed.
	pub fn require(&self, id: &Guid) -> Result<&TocEntry> {
		self.get(id).ok_or(JtError::SegmentNotFound { id: *id })
	}

	/// Return entries in file order.
	pub fn entries(&self) -> &[TocEntry] {
		&self.entries
	}

	/// Return number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return whether the TOC lists no segments.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
