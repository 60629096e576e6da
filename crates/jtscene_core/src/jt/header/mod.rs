use crate::jt::bytes::Cursor;
use crate::jt::{Guid, JtError, Result};

/// Parsed container preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
	/// Version text with trailing padding removed (for example `Version 9.5 JT`).
	pub version: String,
	/// Raw byte-order flag; only `0` (little-endian) is accepted.
	pub byte_order: u8,
	/// Reserved preamble word.
	pub reserved: i32,
	/// Absolute byte offset of the table of contents.
	pub toc_offset: u32,
	/// Id of the segment holding the root logical scene graph.
	pub root_segment_id: Guid,
}

impl FileHeader {
	/// Fixed preamble size in bytes.
	pub const SIZE: usize = 105;
	/// Width of the version text field.
	pub const VERSION_LEN: usize = 80;

	/// Parse the preamble from the beginning of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let preamble = bytes.get(0..Self::SIZE).ok_or(JtError::TruncatedPreamble {
			need: Self::SIZE,
			have: bytes.len(),
		})?;

		let mut cursor = Cursor::new(preamble);
		let version = trim_version(cursor.read_exact(Self::VERSION_LEN)?);
		let byte_order = cursor.read_u8()?;
		if byte_order != 0 {
			return Err(JtError::BigEndianUnsupported { flag: byte_order });
		}

		let reserved = cursor.read_i32_le()?;
		let toc_offset = cursor.read_u32_le()?;
		let root_segment_id = cursor.read_guid()?;

		Ok(Self {
			version,
			byte_order,
			reserved,
			toc_offset,
			root_segment_id,
		})
	}

	/// Return `(major, minor)` when the version text reads `Version M.N ...`.
	pub fn format_version(&self) -> Option<(u8, u8)> {
		let rest = self.version.strip_prefix("Version")?.trim_start();
		let number = rest.split_whitespace().next()?;
		let (major, minor) = number.split_once('.')?;
		Some((major.parse().ok()?, minor.parse().ok()?))
	}
}

fn trim_version(raw: &[u8]) -> String {
	let text = String::from_utf8_lossy(raw);
	text.trim_end_matches(|ch: char| ch == '\0' || ch.is_whitespace()).to_owned()
}
