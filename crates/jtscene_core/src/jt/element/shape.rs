use crate::jt::Result;
use crate::jt::bytes::Cursor;
use crate::jt::element::node::QuantizationParameters;

/// Geometry representation held by a shape LOD element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeLodKind {
	/// Generic vertex shape.
	Vertex,
	/// Triangle strips.
	TriStripSet,
	/// Polylines.
	PolylineSet,
}

impl ShapeLodKind {
	/// Return whether the variant writes its own version after the vertex header.
	fn has_variant_version(self) -> bool {
		!matches!(self, Self::Vertex)
	}
}

/// Header of one shape level-of-detail element.
///
/// The compressed vertex/topology payload is kept as opaque bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLodElement {
	/// Geometry representation.
	pub kind: ShapeLodKind,
	/// Base shape LOD layout version.
	pub base_version: u16,
	/// Vertex shape LOD layout version.
	pub vertex_version: u16,
	/// Vertex attribute binding bits.
	pub vertex_binding: u64,
	/// Quantization settings.
	pub quantization: QuantizationParameters,
	/// Tri-strip or polyline layout version.
	pub variant_version: Option<u16>,
	/// Undecoded compressed geometry.
	pub compressed_rep: Vec<u8>,
}

impl ShapeLodElement {
	/// Read a shape LOD element of `kind`, taking the rest of the record as payload.
	pub fn read(cursor: &mut Cursor<'_>, kind: ShapeLodKind) -> Result<Self> {
		let base_version = cursor.read_u16_le()?;
		let vertex_version = cursor.read_u16_le()?;
		let vertex_binding = cursor.read_u64_le()?;
		let quantization = QuantizationParameters::read(cursor)?;
		let variant_version = if kind.has_variant_version() { Some(cursor.read_u16_le()?) } else { None };
		let compressed_rep = cursor.read_rest().to_vec();

		Ok(Self {
			kind,
			base_version,
			vertex_version,
			vertex_binding,
			quantization,
			variant_version,
			compressed_rep,
		})
	}
}
