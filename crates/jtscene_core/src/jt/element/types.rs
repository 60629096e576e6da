use crate::jt::bytes::Cursor;
use crate::jt::element::attribute::{GeometricTransformAttribute, MaterialAttribute};
use crate::jt::element::metadata::PropertyProxyMetaData;
use crate::jt::element::node::{
	BaseNodeData, BaseShapeNode, GroupNodeData, InstanceNode, LodNode, MetaDataNode, PartNode, PartitionNode, PolylineSetShapeNode,
	RangeLodNode, TriStripSetShapeNode, VertexShapeNode,
};
use crate::jt::element::property::{BasePropertyAtomData, FloatingPointPropertyAtom, LateLoadedPropertyAtom, StringPropertyAtom};
use crate::jt::element::shape::{ShapeLodElement, ShapeLodKind};
use crate::jt::element::{ElementBody, ReadFields};
use crate::jt::{Guid, Result};

const fn lsg(data1: u32) -> Guid {
	Guid::from_fields(data1, 0x2ac8, 0x11d1, [0x9b, 0x6b, 0x00, 0x80, 0xc7, 0xbb, 0x59, 0x97])
}

const fn meta(data1: u32) -> Guid {
	Guid::from_fields(data1, 0x38fb, 0x11d1, [0xa5, 0x06, 0x00, 0x60, 0x97, 0xbd, 0xc6, 0xe1])
}

/// Element variants known to the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
	/// Plain node with attributes only.
	BaseNode,
	/// Node with children.
	GroupNode,
	/// Node instancing another subtree.
	InstanceNode,
	/// Level-of-detail group.
	LodNode,
	/// Group carrying metadata.
	MetaDataNode,
	/// Part root.
	PartNode,
	/// External file reference group.
	PartitionNode,
	/// Distance-selected level-of-detail group.
	RangeLodNode,
	/// Geometry leaf.
	BaseShapeNode,
	/// Vertex-based geometry leaf.
	VertexShapeNode,
	/// Triangle-strip geometry leaf.
	TriStripSetShapeNode,
	/// Polyline geometry leaf.
	PolylineSetShapeNode,
	/// Material colors.
	MaterialAttribute,
	/// 4×4 transform.
	GeometricTransformAttribute,
	/// Property atom without a value.
	BasePropertyAtom,
	/// Text property.
	StringPropertyAtom,
	/// Scalar property.
	FloatingPointPropertyAtom,
	/// Property deferred to another segment.
	LateLoadedPropertyAtom,
	/// Vertex shape geometry payload.
	VertexShapeLod,
	/// Triangle-strip geometry payload.
	TriStripSetShapeLod,
	/// Polyline geometry payload.
	PolylineSetShapeLod,
	/// Metadata property bag.
	PropertyProxyMetaData,
}

/// Type identifier to variant mapping.
pub const DISPATCH_TABLE: &[(Guid, ElementType)] = &[
	(lsg(0x10dd_1035), ElementType::BaseNode),
	(lsg(0x10dd_101b), ElementType::GroupNode),
	(lsg(0x10dd_102a), ElementType::InstanceNode),
	(lsg(0x10dd_102c), ElementType::LodNode),
	(meta(0xce35_7245), ElementType::MetaDataNode),
	(meta(0xce35_7244), ElementType::PartNode),
	(lsg(0x10dd_103e), ElementType::PartitionNode),
	(lsg(0x10dd_104c), ElementType::RangeLodNode),
	(lsg(0x10dd_1059), ElementType::BaseShapeNode),
	(lsg(0x10dd_107f), ElementType::VertexShapeNode),
	(lsg(0x10dd_1077), ElementType::TriStripSetShapeNode),
	(lsg(0x10dd_1046), ElementType::PolylineSetShapeNode),
	(lsg(0x10dd_1030), ElementType::MaterialAttribute),
	(lsg(0x10dd_1083), ElementType::GeometricTransformAttribute),
	(lsg(0x10dd_104b), ElementType::BasePropertyAtom),
	(lsg(0x10dd_106e), ElementType::StringPropertyAtom),
	(lsg(0x10dd_1019), ElementType::FloatingPointPropertyAtom),
	(
		Guid::from_fields(0xe0b0_5be5, 0xfbbd, 0x11d1, [0xa3, 0xa7, 0x00, 0xaa, 0x00, 0xd1, 0x09, 0x54]),
		ElementType::LateLoadedPropertyAtom,
	),
	(lsg(0x10dd_10b0), ElementType::VertexShapeLod),
	(lsg(0x10dd_10ab), ElementType::TriStripSetShapeLod),
	(lsg(0x10dd_10a1), ElementType::PolylineSetShapeLod),
	(meta(0xce35_7247), ElementType::PropertyProxyMetaData),
];

impl ElementType {
	/// Look up the variant registered for a type identifier.
	pub fn from_guid(type_id: &Guid) -> Option<Self> {
		DISPATCH_TABLE.iter().find(|(guid, _)| guid == type_id).map(|(_, ty)| *ty)
	}

	/// Type identifier registered for this variant.
	pub fn guid(self) -> Guid {
		DISPATCH_TABLE
			.iter()
			.find(|(_, ty)| *ty == self)
			.map(|(guid, _)| *guid)
			.unwrap_or(Guid::END_OF_ELEMENTS)
	}

	/// Stable type name.
	pub fn name(self) -> &'static str {
		match self {
			Self::BaseNode => "BaseNode",
			Self::GroupNode => "GroupNode",
			Self::InstanceNode => "InstanceNode",
			Self::LodNode => "LodNode",
			Self::MetaDataNode => "MetaDataNode",
			Self::PartNode => "PartNode",
			Self::PartitionNode => "PartitionNode",
			Self::RangeLodNode => "RangeLodNode",
			Self::BaseShapeNode => "BaseShapeNode",
			Self::VertexShapeNode => "VertexShapeNode",
			Self::TriStripSetShapeNode => "TriStripSetShapeNode",
			Self::PolylineSetShapeNode => "PolylineSetShapeNode",
			Self::MaterialAttribute => "MaterialAttribute",
			Self::GeometricTransformAttribute => "GeometricTransformAttribute",
			Self::BasePropertyAtom => "BasePropertyAtom",
			Self::StringPropertyAtom => "StringPropertyAtom",
			Self::FloatingPointPropertyAtom => "FloatingPointPropertyAtom",
			Self::LateLoadedPropertyAtom => "LateLoadedPropertyAtom",
			Self::VertexShapeLod => "VertexShapeLod",
			Self::TriStripSetShapeLod => "TriStripSetShapeLod",
			Self::PolylineSetShapeLod => "PolylineSetShapeLod",
			Self::PropertyProxyMetaData => "PropertyProxyMetaData",
		}
	}

	/// Decode this variant's fields, base family first.
	pub(crate) fn decode_body(self, cursor: &mut Cursor<'_>) -> Result<ElementBody> {
		Ok(match self {
			Self::BaseNode => ElementBody::BaseNode(BaseNodeData::read_fields(cursor)?),
			Self::GroupNode => ElementBody::GroupNode(GroupNodeData::read_fields(cursor)?),
			Self::InstanceNode => ElementBody::InstanceNode(InstanceNode::read_fields(cursor)?),
			Self::LodNode => ElementBody::LodNode(LodNode::read_fields(cursor)?),
			Self::MetaDataNode => ElementBody::MetaDataNode(MetaDataNode::read_fields(cursor)?),
			Self::PartNode => ElementBody::PartNode(PartNode::read_fields(cursor)?),
			Self::PartitionNode => ElementBody::PartitionNode(PartitionNode::read_fields(cursor)?),
			Self::RangeLodNode => ElementBody::RangeLodNode(RangeLodNode::read_fields(cursor)?),
			Self::BaseShapeNode => ElementBody::BaseShapeNode(BaseShapeNode::read_fields(cursor)?),
			Self::VertexShapeNode => ElementBody::VertexShapeNode(VertexShapeNode::read_fields(cursor)?),
			Self::TriStripSetShapeNode => ElementBody::TriStripSetShapeNode(TriStripSetShapeNode::read_fields(cursor)?),
			Self::PolylineSetShapeNode => ElementBody::PolylineSetShapeNode(PolylineSetShapeNode::read_fields(cursor)?),
			Self::MaterialAttribute => ElementBody::MaterialAttribute(MaterialAttribute::read_fields(cursor)?),
			Self::GeometricTransformAttribute => ElementBody::GeometricTransformAttribute(GeometricTransformAttribute::read_fields(cursor)?),
			Self::BasePropertyAtom => ElementBody::BasePropertyAtom(BasePropertyAtomData::read_fields(cursor)?),
			Self::StringPropertyAtom => ElementBody::StringPropertyAtom(StringPropertyAtom::read_fields(cursor)?),
			Self::FloatingPointPropertyAtom => ElementBody::FloatingPointPropertyAtom(FloatingPointPropertyAtom::read_fields(cursor)?),
			Self::LateLoadedPropertyAtom => ElementBody::LateLoadedPropertyAtom(LateLoadedPropertyAtom::read_fields(cursor)?),
			Self::VertexShapeLod => ElementBody::ShapeLod(ShapeLodElement::read(cursor, ShapeLodKind::Vertex)?),
			Self::TriStripSetShapeLod => ElementBody::ShapeLod(ShapeLodElement::read(cursor, ShapeLodKind::TriStripSet)?),
			Self::PolylineSetShapeLod => ElementBody::ShapeLod(ShapeLodElement::read(cursor, ShapeLodKind::PolylineSet)?),
			Self::PropertyProxyMetaData => ElementBody::PropertyProxyMetaData(PropertyProxyMetaData::read_fields(cursor)?),
		})
	}
}
