use std::collections::BTreeMap;

use crate::jt::bytes::Cursor;
use crate::jt::{ElementRef, Guid, JtError, Result};

/// Attribute element bodies.
pub mod attribute;
/// Metadata property bags.
pub mod metadata;
/// Group and leaf node bodies.
pub mod node;
/// Property atoms and late-load references.
pub mod property;
/// Shape node and shape LOD bodies.
pub mod shape;
mod types;

pub use types::{DISPATCH_TABLE, ElementType};

use attribute::{BaseAttributeData, GeometricTransformAttribute, MaterialAttribute};
use metadata::PropertyProxyMetaData;
use node::{
	BaseNodeData, BaseShapeNode, GroupNodeData, InstanceNode, LodNode, MetaDataNode, PartNode, PartitionNode, PolylineSetShapeNode,
	RangeLodNode, TriStripSetShapeNode, VertexShapeNode,
};
use property::{BasePropertyAtomData, FloatingPointPropertyAtom, LateLoadRef, LateLoadedPropertyAtom, StringPropertyAtom};
use shape::ShapeLodElement;

/// Element identifier, unique within one decode session.
pub type ObjectId = u32;

/// Resolved property links: key atom to value atom.
pub type PropertyMap = BTreeMap<ElementRef, ElementRef>;

/// Fields read by one level of an element's layout.
///
/// Each implementation reads its parent level first, then its own fields.
pub trait ReadFields: Sized {
	/// Decode this level from the record window.
	fn read_fields(cursor: &mut Cursor<'_>) -> Result<Self>;
}

/// Axis-aligned box as min and max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
	/// Minimum corner.
	pub min: [f32; 3],
	/// Maximum corner.
	pub max: [f32; 3],
}

impl BBox {
	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			min: cursor.read_f32_array()?,
			max: cursor.read_f32_array()?,
		})
	}
}

/// Inclusive `[min, max]` count range across LODs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
	/// Smallest count.
	pub min: u32,
	/// Largest count.
	pub max: u32,
}

impl CountRange {
	pub(crate) fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			min: cursor.read_u32_le()?,
			max: cursor.read_u32_le()?,
		})
	}
}

/// Polymorphic family an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementFamily {
	/// Scene graph nodes.
	Node,
	/// Node attributes.
	Attribute,
	/// Property keys and values.
	PropertyAtom,
	/// Shape geometry payloads.
	ShapeLod,
	/// Metadata property bags.
	MetaData,
}

/// Type-specific element fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementBody {
	/// Plain node.
	BaseNode(BaseNodeData),
	/// Node with children.
	GroupNode(GroupNodeData),
	/// Instancing node.
	InstanceNode(InstanceNode),
	/// Level-of-detail group.
	LodNode(LodNode),
	/// Metadata group.
	MetaDataNode(MetaDataNode),
	/// Part root.
	PartNode(PartNode),
	/// External file group.
	PartitionNode(PartitionNode),
	/// Distance-selected level-of-detail group.
	RangeLodNode(RangeLodNode),
	/// Geometry leaf.
	BaseShapeNode(BaseShapeNode),
	/// Vertex geometry leaf.
	VertexShapeNode(VertexShapeNode),
	/// Triangle-strip geometry leaf.
	TriStripSetShapeNode(TriStripSetShapeNode),
	/// Polyline geometry leaf.
	PolylineSetShapeNode(PolylineSetShapeNode),
	/// Material colors.
	MaterialAttribute(MaterialAttribute),
	/// 4×4 transform.
	GeometricTransformAttribute(GeometricTransformAttribute),
	/// Property atom without a value.
	BasePropertyAtom(BasePropertyAtomData),
	/// Text property.
	StringPropertyAtom(StringPropertyAtom),
	/// Scalar property.
	FloatingPointPropertyAtom(FloatingPointPropertyAtom),
	/// Deferred property.
	LateLoadedPropertyAtom(LateLoadedPropertyAtom),
	/// Shape geometry payload.
	ShapeLod(ShapeLodElement),
	/// Metadata property bag.
	PropertyProxyMetaData(PropertyProxyMetaData),
}

impl ElementBody {
	/// Family this body belongs to.
	pub fn family(&self) -> ElementFamily {
		match self {
			Self::MaterialAttribute(_) | Self::GeometricTransformAttribute(_) => ElementFamily::Attribute,
			Self::BasePropertyAtom(_)
			| Self::StringPropertyAtom(_)
			| Self::FloatingPointPropertyAtom(_)
			| Self::LateLoadedPropertyAtom(_) => ElementFamily::PropertyAtom,
			Self::ShapeLod(_) => ElementFamily::ShapeLod,
			Self::PropertyProxyMetaData(_) => ElementFamily::MetaData,
			_ => ElementFamily::Node,
		}
	}

	/// Base node fields for node-family bodies.
	pub fn base_node(&self) -> Option<&BaseNodeData> {
		match self {
			Self::BaseNode(base) => Some(base),
			Self::InstanceNode(node) => Some(&node.base),
			Self::BaseShapeNode(shape) => Some(&shape.base),
			Self::VertexShapeNode(node) => Some(&node.shape.base),
			Self::TriStripSetShapeNode(node) => Some(&node.vertex.shape.base),
			Self::PolylineSetShapeNode(node) => Some(&node.vertex.shape.base),
			_ => self.group().map(|group| &group.base),
		}
	}

	/// Mutable base node fields for node-family bodies.
	pub fn base_node_mut(&mut self) -> Option<&mut BaseNodeData> {
		match self {
			Self::BaseNode(base) => Some(base),
			Self::InstanceNode(node) => Some(&mut node.base),
			Self::BaseShapeNode(shape) => Some(&mut shape.base),
			Self::VertexShapeNode(node) => Some(&mut node.shape.base),
			Self::TriStripSetShapeNode(node) => Some(&mut node.vertex.shape.base),
			Self::PolylineSetShapeNode(node) => Some(&mut node.vertex.shape.base),
			Self::GroupNode(group) => Some(&mut group.base),
			Self::LodNode(node) => Some(&mut node.group.base),
			Self::MetaDataNode(node) => Some(&mut node.group.base),
			Self::PartNode(node) => Some(&mut node.meta.group.base),
			Self::PartitionNode(node) => Some(&mut node.group.base),
			Self::RangeLodNode(node) => Some(&mut node.lod.group.base),
			_ => None,
		}
	}

	/// Group node fields for group-family bodies.
	pub fn group(&self) -> Option<&GroupNodeData> {
		match self {
			Self::GroupNode(group) => Some(group),
			Self::LodNode(node) => Some(&node.group),
			Self::MetaDataNode(node) => Some(&node.group),
			Self::PartNode(node) => Some(&node.meta.group),
			Self::PartitionNode(node) => Some(&node.group),
			Self::RangeLodNode(node) => Some(&node.lod.group),
			_ => None,
		}
	}

	/// Mutable group node fields for group-family bodies.
	pub fn group_mut(&mut self) -> Option<&mut GroupNodeData> {
		match self {
			Self::GroupNode(group) => Some(group),
			Self::LodNode(node) => Some(&mut node.group),
			Self::MetaDataNode(node) => Some(&mut node.group),
			Self::PartNode(node) => Some(&mut node.meta.group),
			Self::PartitionNode(node) => Some(&mut node.group),
			Self::RangeLodNode(node) => Some(&mut node.lod.group),
			_ => None,
		}
	}

	/// Base attribute fields for attribute-family bodies.
	pub fn base_attribute(&self) -> Option<&BaseAttributeData> {
		match self {
			Self::MaterialAttribute(attr) => Some(&attr.base),
			Self::GeometricTransformAttribute(attr) => Some(&attr.base),
			_ => None,
		}
	}

	/// Deferred content reference carried by a late-loaded atom.
	pub fn late_load(&self) -> Option<&LateLoadRef> {
		match self {
			Self::LateLoadedPropertyAtom(atom) => Some(&atom.reference),
			_ => None,
		}
	}
}

/// One decoded element with its logical header.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	/// Session-scoped object id.
	pub object_id: ObjectId,
	/// Raw base-type tag.
	pub base_type: u8,
	/// Dispatch-table variant the record was decoded as.
	pub element_type: ElementType,
	/// Type-specific fields.
	pub body: ElementBody,
	/// Property links replayed from the property table.
	pub properties: PropertyMap,
}

impl Element {
	/// Stable type name.
	pub fn type_name(&self) -> &'static str {
		self.element_type.name()
	}

	/// Family this element belongs to.
	pub fn family(&self) -> ElementFamily {
		self.body.family()
	}
}

/// Non-fatal condition noticed while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
	/// Known variant left bytes unread in its record.
	IncompleteFieldModel {
		/// Element type name.
		type_name: &'static str,
		/// Element object id.
		object_id: ObjectId,
		/// Unconsumed bytes.
		leftover: usize,
	},
}

/// Outcome of reading one element record.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementRead {
	/// End-of-elements sentinel.
	End,
	/// Decoded element plus unread record bytes.
	Element {
		/// Decoded element.
		element: Element,
		/// Bytes left in the record after the variant finished.
		leftover: usize,
	},
}

/// Read one length-prefixed element record.
///
/// The record's declared length bounds every field read; the outer cursor always
/// advances past the whole record.
pub fn read_element(cursor: &mut Cursor<'_>) -> Result<ElementRead> {
	let at = cursor.pos();
	let len = cursor.read_u32_le()? as usize;
	let mut record = cursor.window(len)?;

	let type_id: Guid = record.read_guid()?;
	if type_id.is_end_of_elements() {
		return Ok(ElementRead::End);
	}

	let element_type = ElementType::from_guid(&type_id).ok_or(JtError::UnknownElementType { type_id, at })?;
	let base_type = record.read_u8()?;
	let object_id = record.read_u32_le()?;
	let body = element_type.decode_body(&mut record)?;

	tracing::trace!(object_id, element_type = element_type.name(), "decoded element");

	Ok(ElementRead::Element {
		element: Element {
			object_id,
			base_type,
			element_type,
			body,
			properties: PropertyMap::new(),
		},
		leftover: record.remaining(),
	})
}
