use crate::jt::bytes::Cursor;
use crate::jt::element::ReadFields;
use crate::jt::{JtError, Result};

/// Calendar timestamp stored as six 16-bit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaDate {
	/// Year.
	pub year: u16,
	/// Month.
	pub month: u16,
	/// Day of month.
	pub day: u16,
	/// Hour.
	pub hour: u16,
	/// Minute.
	pub minute: u16,
	/// Second.
	pub second: u16,
}

/// One typed metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
	/// Text value (kind 1).
	String(String),
	/// 32-bit integer (kind 2).
	I32(i32),
	/// 32-bit float (kind 3).
	F32(f32),
	/// Date tuple (kind 4).
	Date(MetaDate),
}

impl MetaValue {
	/// Stable lowercase kind label.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::String(_) => "string",
			Self::I32(_) => "i32",
			Self::F32(_) => "f32",
			Self::Date(_) => "date",
		}
	}
}

/// String-keyed property bag read until an empty key.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyProxyMetaData {
	/// Layout version.
	pub version: u16,
	/// Properties in stored order.
	pub properties: Vec<(String, MetaValue)>,
}

impl PropertyProxyMetaData {
	/// Return the first value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&MetaValue> {
		self.properties.iter().find(|(name, _)| name == key).map(|(_, value)| value)
	}
}

impl ReadFields for PropertyProxyMetaData {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		let version = cursor.read_u16_le()?;
		let mut properties = Vec::new();

		loop {
			let key = cursor.read_mb_string()?;
			if key.is_empty() {
				break;
			}

			let value = match cursor.read_u8()? {
				1 => MetaValue::String(cursor.read_mb_string()?),
				2 => MetaValue::I32(cursor.read_i32_le()?),
				3 => MetaValue::F32(cursor.read_f32_le()?),
				4 => MetaValue::Date(MetaDate {
					year: cursor.read_u16_le()?,
					month: cursor.read_u16_le()?,
					day: cursor.read_u16_le()?,
					hour: cursor.read_u16_le()?,
					minute: cursor.read_u16_le()?,
					second: cursor.read_u16_le()?,
				}),
				kind => return Err(JtError::UnknownMetadataValueKind { key, kind }),
			};
			properties.push((key, value));
		}

		Ok(Self { version, properties })
	}
}
