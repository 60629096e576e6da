use crate::jt::bytes::Cursor;
use crate::jt::element::{BBox, CountRange, ObjectId, ReadFields};
use crate::jt::{ElementRef, Result};

/// Fields shared by every node.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseNodeData {
	/// Base node layout version.
	pub version: u16,
	/// Node flag bits.
	pub flags: u32,
	/// Attribute object ids as recorded.
	pub attribute_ids: Vec<ObjectId>,
	/// Attributes resolved from `attribute_ids`, same order.
	pub attributes: Vec<ElementRef>,
}

impl BaseNodeData {
	/// Node flag bit marking the node as ignored.
	pub const IGNORE: u32 = 0x0000_0001;
}

impl ReadFields for BaseNodeData {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			version: cursor.read_u16_le()?,
			flags: cursor.read_u32_le()?,
			attribute_ids: cursor.read_u32_vec()?,
			attributes: Vec::new(),
		})
	}
}

/// Node with an ordered child list.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNodeData {
	/// Base node fields.
	pub base: BaseNodeData,
	/// Group node layout version.
	pub version: u16,
	/// Child object ids as recorded.
	pub child_ids: Vec<ObjectId>,
	/// Children resolved from `child_ids`, same order.
	pub children: Vec<ElementRef>,
}

impl ReadFields for GroupNodeData {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			base: BaseNodeData::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			child_ids: cursor.read_u32_vec()?,
			children: Vec::new(),
		})
	}
}

/// Group node standing for an external file.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionNode {
	/// Group node fields.
	pub group: GroupNodeData,
	/// Partition flag bits.
	pub partition_flags: u32,
	/// Relative path of the referenced file.
	pub file_name: String,
	/// Transformed bounding box; absent when the slot is reserved.
	pub transformed_bbox: Option<BBox>,
	/// Surface area.
	pub area: f32,
	/// Vertex count range over all LODs.
	pub vertex_count_range: CountRange,
	/// Node count range over all LODs.
	pub node_count_range: CountRange,
	/// Polygon count range over all LODs.
	pub polygon_count_range: CountRange,
	/// Untransformed bounding box; present when flag bit 0 is set.
	pub untransformed_bbox: Option<BBox>,
}

impl PartitionNode {
	/// Flag bit selecting the untransformed bounding box layout.
	pub const UNTRANSFORMED_BBOX: u32 = 0x0000_0001;
}

impl ReadFields for PartitionNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		let group = GroupNodeData::read_fields(cursor)?;
		let partition_flags = cursor.read_u32_le()?;
		let file_name = cursor.read_mb_string()?;
		let untransformed = partition_flags & Self::UNTRANSFORMED_BBOX != 0;

		let first_bbox = BBox::read(cursor)?;
		let area = cursor.read_f32_le()?;
		let vertex_count_range = CountRange::read(cursor)?;
		let node_count_range = CountRange::read(cursor)?;
		let polygon_count_range = CountRange::read(cursor)?;
		let untransformed_bbox = if untransformed { Some(BBox::read(cursor)?) } else { None };

		Ok(Self {
			group,
			partition_flags,
			file_name,
			transformed_bbox: (!untransformed).then_some(first_bbox),
			area,
			vertex_count_range,
			node_count_range,
			polygon_count_range,
			untransformed_bbox,
		})
	}
}

/// Group node carrying metadata properties.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaDataNode {
	/// Group node fields.
	pub group: GroupNodeData,
	/// Metadata node layout version.
	pub version: u16,
}

impl ReadFields for MetaDataNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			group: GroupNodeData::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
		})
	}
}

/// Metadata node marking the root of a part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartNode {
	/// Metadata node fields.
	pub meta: MetaDataNode,
	/// Part node layout version.
	pub version: u16,
	/// Reserved word.
	pub reserved: u32,
}

impl ReadFields for PartNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			meta: MetaDataNode::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			reserved: cursor.read_u32_le()?,
		})
	}
}

/// Group node whose children are alternative levels of detail.
#[derive(Debug, Clone, PartialEq)]
pub struct LodNode {
	/// Group node fields.
	pub group: GroupNodeData,
	/// LOD node layout version.
	pub version: u16,
	/// Reserved vector.
	pub reserved_vector: Vec<f32>,
	/// Reserved word.
	pub reserved: u32,
}

impl ReadFields for LodNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			group: GroupNodeData::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			reserved_vector: cursor.read_f32_vec()?,
			reserved: cursor.read_u32_le()?,
		})
	}
}

/// LOD node selecting children by viewer distance.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeLodNode {
	/// LOD node fields.
	pub lod: LodNode,
	/// Range LOD node layout version.
	pub version: u16,
	/// Distance limits between consecutive children.
	pub range_limits: Vec<f32>,
	/// Center point distances are measured from.
	pub center: [f32; 3],
}

impl ReadFields for RangeLodNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			lod: LodNode::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			range_limits: cursor.read_f32_vec()?,
			center: cursor.read_f32_array()?,
		})
	}
}

/// Leaf node describing a piece of geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseShapeNode {
	/// Base node fields.
	pub base: BaseNodeData,
	/// Shape node layout version.
	pub version: u16,
	/// Transformed bounding box (reserved in current writers).
	pub transformed_bbox: BBox,
	/// Untransformed bounding box.
	pub untransformed_bbox: BBox,
	/// Surface area.
	pub area: f32,
	/// Vertex count range over all LODs.
	pub vertex_count_range: CountRange,
	/// Node count range over all LODs.
	pub node_count_range: CountRange,
	/// Polygon count range over all LODs.
	pub polygon_count_range: CountRange,
	/// Geometry payload size in bytes.
	pub size: u32,
	/// Compression level used for the geometry.
	pub compression_level: f32,
}

impl ReadFields for BaseShapeNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			base: BaseNodeData::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			transformed_bbox: BBox::read(cursor)?,
			untransformed_bbox: BBox::read(cursor)?,
			area: cursor.read_f32_le()?,
			vertex_count_range: CountRange::read(cursor)?,
			node_count_range: CountRange::read(cursor)?,
			polygon_count_range: CountRange::read(cursor)?,
			size: cursor.read_u32_le()?,
			compression_level: cursor.read_f32_le()?,
		})
	}
}

/// Quantization bit depths for vertex attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationParameters {
	/// Bits per vertex coordinate.
	pub bits_per_vertex: u8,
	/// Normal quantization factor.
	pub normal_bits_factor: u8,
	/// Bits per texture coordinate.
	pub bits_per_texture_coord: u8,
	/// Bits per color component.
	pub bits_per_color: u8,
}

impl QuantizationParameters {
	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let [bits_per_vertex, normal_bits_factor, bits_per_texture_coord, bits_per_color] = cursor.read_array()?;
		Ok(Self {
			bits_per_vertex,
			normal_bits_factor,
			bits_per_texture_coord,
			bits_per_color,
		})
	}
}

/// Shape node whose geometry is vertex based.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexShapeNode {
	/// Shape node fields.
	pub shape: BaseShapeNode,
	/// Vertex shape layout version.
	pub version: u16,
	/// Vertex attribute binding bits.
	pub vertex_binding: u64,
	/// Quantization settings.
	pub quantization: QuantizationParameters,
}

impl ReadFields for VertexShapeNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		let shape = BaseShapeNode::read_fields(cursor)?;
		let version = cursor.read_u16_le()?;
		let mut vertex_binding = cursor.read_u64_le()?;
		let quantization = QuantizationParameters::read(cursor)?;
		if version != 1 {
			vertex_binding = cursor.read_u64_le()?;
		}

		Ok(Self {
			shape,
			version,
			vertex_binding,
			quantization,
		})
	}
}

/// Vertex shape made of triangle strips.
#[derive(Debug, Clone, PartialEq)]
pub struct TriStripSetShapeNode {
	/// Vertex shape fields.
	pub vertex: VertexShapeNode,
}

impl ReadFields for TriStripSetShapeNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			vertex: VertexShapeNode::read_fields(cursor)?,
		})
	}
}

/// Vertex shape made of polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineSetShapeNode {
	/// Vertex shape fields.
	pub vertex: VertexShapeNode,
	/// Polyline set layout version.
	pub version: u16,
	/// Area factor.
	pub area_factor: f32,
	/// Vertex bindings word, written from version 2 on.
	pub vertex_bindings: Option<u64>,
}

impl ReadFields for PolylineSetShapeNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		let vertex = VertexShapeNode::read_fields(cursor)?;
		let version = cursor.read_u16_le()?;
		let area_factor = cursor.read_f32_le()?;
		let vertex_bindings = if version != 1 { Some(cursor.read_u64_le()?) } else { None };

		Ok(Self {
			vertex,
			version,
			area_factor,
			vertex_bindings,
		})
	}
}

/// Node reusing another node's subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceNode {
	/// Base node fields.
	pub base: BaseNodeData,
	/// Instance node layout version.
	pub version: u16,
	/// Instanced node object id as recorded.
	pub child_id: ObjectId,
	/// Instanced node, once resolved.
	pub child: Option<ElementRef>,
}

impl ReadFields for InstanceNode {
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			base: BaseNodeData::read_fields(cursor)?,
			version: cursor.read_u16_le()?,
			child_id: cursor.read_u32_le()?,
			child: None,
		})
	}
}
