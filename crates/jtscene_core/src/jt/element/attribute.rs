use crate::jt::Result;
use crate::jt::bytes::Cursor;
use crate::jt::element::ReadFields;

/// Fields shared by every attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseAttributeData {
	/// Base attribute layout version.
	pub version: u16,
	/// State flag bits.
	pub state_flags: u8,
	/// Per-field inhibit bits.
	pub field_inhibit_flags: u32,
}

impl ReadFields for BaseAttributeData {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			version: cursor.read_u16_le()?,
			state_flags: cursor.read_u8()?,
			field_inhibit_flags: cursor.read_u32_le()?,
		})
	}
}

/// Surface material colors.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialAttribute {
	/// Base attribute fields.
	pub base: BaseAttributeData,
	/// Material layout version.
	pub version: u16,
	/// Data flag bits.
	pub data_flags: u16,
	/// Ambient RGBA.
	pub ambient_color: [f32; 4],
	/// Diffuse RGB plus alpha.
	pub diffuse_color_and_alpha: [f32; 4],
	/// Specular RGBA.
	pub specular_color: [f32; 4],
	/// Emission RGBA.
	pub emission_color: [f32; 4],
	/// Specular exponent.
	pub shininess: f32,
	/// Reflectivity, written by layout version 2.
	pub reflectivity: Option<f32>,
}

impl ReadFields for MaterialAttribute {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		let base = BaseAttributeData::read_fields(cursor)?;
		let version = cursor.read_u16_le()?;
		let data_flags = cursor.read_u16_le()?;
		let ambient_color = cursor.read_f32_array()?;
		let diffuse_color_and_alpha = cursor.read_f32_array()?;
		let specular_color = cursor.read_f32_array()?;
		let emission_color = cursor.read_f32_array()?;
		let shininess = cursor.read_f32_le()?;
		let reflectivity = if version == 2 { Some(cursor.read_f32_le()?) } else { None };

		Ok(Self {
			base,
			version,
			data_flags,
			ambient_color,
			diffuse_color_and_alpha,
			specular_color,
			emission_color,
			shininess,
			reflectivity,
		})
	}
}

/// Row-major 4×4 identity.
pub const IDENTITY: [f64; 16] = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];

/// Sparse 4×4 transform; elements absent from the mask keep their identity value.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricTransformAttribute {
	/// Base attribute fields.
	pub base: BaseAttributeData,
	/// Transform layout version.
	pub version: u16,
	/// One bit per stored element, most significant bit first.
	pub stored_values_mask: u16,
	/// Row-major matrix.
	pub matrix: [f64; 16],
}

impl ReadFields for GeometricTransformAttribute {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		let base = BaseAttributeData::read_fields(cursor)?;
		let version = cursor.read_u16_le()?;
		let stored_values_mask = cursor.read_u16_le()?;

		let mut matrix = IDENTITY;
		for (idx, value) in matrix.iter_mut().enumerate() {
			if stored_values_mask & (0x8000 >> idx) != 0 {
				*value = cursor.read_f64_le()?;
			}
		}

		Ok(Self {
			base,
			version,
			stored_values_mask,
			matrix,
		})
	}
}
