use crate::jt::bytes::Cursor;
use crate::jt::element::ElementFamily;
use crate::jt::element::property::LateLoadRef;
use crate::jt::resolve::{PropertyTableSummary, apply_property_table, read_element_list, resolve_structure};
use crate::jt::{Anomaly, DecodeOptions, Element, ElementBody, ElementRef, Guid, ObjectId, PropertyMap, Registry, Result};

/// Fully linked logical scene graph of one segment.
#[derive(Debug, Clone)]
pub struct SceneGraph {
	segment_id: Guid,
	registry: Registry,
	property_table: PropertyTableSummary,
	anomalies: Vec<Anomaly>,
}

/// One node visited by [`SceneGraph::walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkItem {
	/// Distance from the walk root.
	pub depth: usize,
	/// Visited node.
	pub node: ElementRef,
}

impl SceneGraph {
	/// Decode the two element runs and the property table of a scene graph payload.
	pub(crate) fn decode(segment_id: Guid, cursor: &mut Cursor<'_>, options: &DecodeOptions) -> Result<Self> {
		let mut registry = Registry::new();
		let mut anomalies = Vec::new();

		let nodes = read_element_list(cursor, &mut registry, options, &mut anomalies)?;
		let atoms = read_element_list(cursor, &mut registry, options, &mut anomalies)?;
		resolve_structure(&mut registry)?;
		let property_table = apply_property_table(cursor, &mut registry)?;

		tracing::debug!(segment = %segment_id, nodes, atoms, anomalies = anomalies.len(), "resolved scene graph");

		Ok(Self {
			segment_id,
			registry,
			property_table,
			anomalies,
		})
	}

	/// Id of the segment the graph was decoded from.
	pub fn segment_id(&self) -> Guid {
		self.segment_id
	}

	/// Session registry holding every decoded element.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Property table header and link count.
	pub fn property_table(&self) -> PropertyTableSummary {
		self.property_table
	}

	/// Anomalies reported while decoding.
	pub fn anomalies(&self) -> &[Anomaly] {
		&self.anomalies
	}

	/// First node in stream order, which writers emit as the graph root.
	pub fn root(&self) -> Option<ElementRef> {
		self.registry
			.iter()
			.find(|(_, element)| element.family() == ElementFamily::Node)
			.map(|(handle, _)| handle)
	}

	/// Borrow an element by handle.
	pub fn get(&self, handle: ElementRef) -> &Element {
		self.registry.get(handle)
	}

	/// Borrow an element by object id.
	pub fn element(&self, object_id: ObjectId) -> Option<&Element> {
		self.registry.by_id(object_id)
	}

	/// Resolved children: the group child list, or the instanced node.
	pub fn children(&self, handle: ElementRef) -> &[ElementRef] {
		match &self.get(handle).body {
			ElementBody::InstanceNode(node) => node.child.as_slice(),
			body => body.group().map(|group| group.children.as_slice()).unwrap_or(&[]),
		}
	}

	/// Resolved attributes of a node.
	pub fn attributes(&self, handle: ElementRef) -> &[ElementRef] {
		self.get(handle)
			.body
			.base_node()
			.map(|base| base.attributes.as_slice())
			.unwrap_or(&[])
	}

	/// Property links owned by an element.
	pub fn properties(&self, handle: ElementRef) -> &PropertyMap {
		&self.get(handle).properties
	}

	/// Every late-loaded atom with its deferred reference.
	pub fn late_loaded(&self) -> impl Iterator<Item = (ElementRef, &LateLoadRef)> {
		self.registry
			.iter()
			.filter_map(|(handle, element)| element.body.late_load().map(|reference| (handle, reference)))
	}

	/// Depth-first, declared-order listing of the subtree under `root`.
	///
	/// A node already on the current path is skipped, so instance cycles terminate.
	pub fn walk(&self, root: ElementRef) -> Vec<WalkItem> {
		let mut out = Vec::new();
		let mut path: Vec<ElementRef> = Vec::new();
		let mut stack = vec![(root, 0_usize)];

		while let Some((node, depth)) = stack.pop() {
			path.truncate(depth);
			if path.contains(&node) {
				tracing::debug!(object_id = self.get(node).object_id, depth, "cut cycle in scene walk");
				continue;
			}

			out.push(WalkItem { depth, node });
			path.push(node);
			for child in self.children(node).iter().rev() {
				stack.push((*child, depth + 1));
			}
		}

		out
	}
}
