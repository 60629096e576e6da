use crate::jt::bytes::Cursor;
use crate::jt::element::{ObjectId, ReadFields};
use crate::jt::segment::SegmentKind;
use crate::jt::{Guid, Result};

/// Fields shared by every property atom.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePropertyAtomData {
	/// Base atom layout version.
	pub version: u16,
	/// State flag bits.
	pub state_flags: u32,
}

impl ReadFields for BasePropertyAtomData {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			version: cursor.read_u16_le()?,
			state_flags: cursor.read_u32_le()?,
		})
	}
}

/// Text property value.
#[derive(Debug, Clone, PartialEq)]
pub struct StringPropertyAtom {
	/// Base atom fields.
	pub base: BasePropertyAtomData,
	/// String atom layout version.
	pub version: u16,
	/// Decoded text.
	pub value: String,
}

impl ReadFields for StringPropertyAtom {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			base: BasePropertyAtomData::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			value: cursor.read_mb_string()?,
		})
	}
}

/// Scalar property value.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingPointPropertyAtom {
	/// Base atom fields.
	pub base: BasePropertyAtomData,
	/// Floating point atom layout version.
	pub version: u16,
	/// Stored value.
	pub value: f32,
}

impl ReadFields for FloatingPointPropertyAtom {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			base: BasePropertyAtomData::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			value: cursor.read_f32_le()?,
		})
	}
}

/// Pointer to content stored in another segment.
///
/// This is a plain value: nothing is read when it is inspected. Pass it to
/// [`JtFile::materialize`](crate::jt::JtFile::materialize) to decode the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LateLoadRef {
	/// Id of the segment holding the content.
	pub segment_id: Guid,
	/// Segment type code recorded alongside the id.
	pub segment_type: u32,
	/// Object id of the payload element inside that segment.
	pub payload_object_id: ObjectId,
}

impl LateLoadRef {
	/// Segment kind implied by the recorded type code.
	pub fn kind_hint(&self) -> Option<SegmentKind> {
		SegmentKind::from_code(self.segment_type)
	}
}

/// Property atom whose value is deferred to another segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LateLoadedPropertyAtom {
	/// Base atom fields.
	pub base: BasePropertyAtomData,
	/// Late-loaded atom layout version.
	pub version: u16,
	/// Deferred content location.
	pub reference: LateLoadRef,
	/// Reserved word.
	pub reserved: u32,
}

impl ReadFields for LateLoadedPropertyAtom {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		let base = BasePropertyAtomData::read_fields(cursor)?;
		let version = cursor.read_u16_le()?;
		let reference = LateLoadRef {
			segment_id: cursor.read_guid()?,
			segment_type: cursor.read_u32_le()?,
			payload_object_id: cursor.read_u32_le()?,
		};
		let reserved = cursor.read_u32_le()?;

		Ok(Self {
			base,
			version,
			reference,
			reserved,
		})
	}
}
