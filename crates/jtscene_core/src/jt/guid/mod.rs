use std::fmt;
use std::str::FromStr;

use crate::jt::JtError;

/// 16-byte identifier used for element types and segment ids.
///
/// Stored on disk in the little-endian GUID layout: the first three fields are
/// byte-swapped, the trailing eight bytes are kept as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid {
	/// First 32-bit field.
	pub data1: u32,
	/// Second 16-bit field.
	pub data2: u16,
	/// Third 16-bit field.
	pub data3: u16,
	/// Trailing eight bytes.
	pub data4: [u8; 8],
}

impl Guid {
	/// Identifier with every bit set; marks the end of an element list.
	pub const END_OF_ELEMENTS: Self = Self::from_fields(0xffff_ffff, 0xffff, 0xffff, [0xff; 8]);

	/// Build a GUID from its four fields.
	pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
		Self { data1, data2, data3, data4 }
	}

	/// Decode the little-endian on-disk layout.
	pub fn from_bytes_le(bytes: [u8; 16]) -> Self {
		let mut data4 = [0_u8; 8];
		data4.copy_from_slice(&bytes[8..16]);
		Self {
			data1: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
			data2: u16::from_le_bytes([bytes[4], bytes[5]]),
			data3: u16::from_le_bytes([bytes[6], bytes[7]]),
			data4,
		}
	}

	/// Encode into the little-endian on-disk layout.
	pub fn to_bytes_le(self) -> [u8; 16] {
		let mut out = [0_u8; 16];
		out[0..4].copy_from_slice(&self.data1.to_le_bytes());
		out[4..6].copy_from_slice(&self.data2.to_le_bytes());
		out[6..8].copy_from_slice(&self.data3.to_le_bytes());
		out[8..16].copy_from_slice(&self.data4);
		out
	}

	/// Return `true` for the end-of-elements sentinel.
	pub fn is_end_of_elements(&self) -> bool {
		*self == Self::END_OF_ELEMENTS
	}
}

impl fmt::Display for Guid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let d = &self.data4;
		write!(
			f,
			"{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
			self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
		)
	}
}

impl FromStr for Guid {
	type Err = JtError;

	/// Parse the canonical `8-4-4-4-12` hex form, with optional braces.
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let invalid = || JtError::InvalidGuidLiteral { value: value.to_owned() };

		let trimmed = value.trim().trim_start_matches('{').trim_end_matches('}');
		let groups: Vec<&str> = trimmed.split('-').collect();
		let lens = [8, 4, 4, 4, 12];
		if groups.len() != lens.len() || groups.iter().zip(lens).any(|(group, len)| group.len() != len) {
			return Err(invalid());
		}

		let data1 = u32::from_str_radix(groups[0], 16).map_err(|_| invalid())?;
		let data2 = u16::from_str_radix(groups[1], 16).map_err(|_| invalid())?;
		let data3 = u16::from_str_radix(groups[2], 16).map_err(|_| invalid())?;

		let tail = format!("{}{}", groups[3], groups[4]);
		let mut data4 = [0_u8; 8];
		for (idx, byte) in data4.iter_mut().enumerate() {
			let pair = tail.get(idx * 2..idx * 2 + 2).ok_or_else(invalid)?;
			*byte = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
		}

		Ok(Self::from_fields(data1, data2, data3, data4))
	}
}
