use std::collections::HashMap;

use crate::jt::bytes::Cursor;
use crate::jt::element::{ElementRead, read_element};
use crate::jt::{Anomaly, DecodeOptions, Element, ElementBody, ElementRef, JtError, ObjectId, Registry, Result};

/// Summary of a replayed property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTableSummary {
	/// Table layout version.
	pub version: u16,
	/// Number of owning-element entries.
	pub entries: u32,
	/// Number of key/value links inserted.
	pub links: usize,
}

/// Decode a sentinel-terminated element list into `registry`.
///
/// Links are left unresolved; call [`resolve_structure`] once every list of the
/// segment has been read. Returns the number of elements registered.
pub fn read_element_list(cursor: &mut Cursor<'_>, registry: &mut Registry, options: &DecodeOptions, anomalies: &mut Vec<Anomaly>) -> Result<usize> {
	let mut count = 0;
	loop {
		let ElementRead::Element { element, leftover } = read_element(cursor)? else {
			return Ok(count);
		};

		report_leftover(&element, leftover, options, anomalies)?;
		registry.insert(element)?;
		count += 1;
	}
}

/// Handle bytes a known variant left unread in its record.
///
/// Strict field mode turns them into an error; otherwise they are logged and recorded.
pub(crate) fn report_leftover(element: &Element, leftover: usize, options: &DecodeOptions, anomalies: &mut Vec<Anomaly>) -> Result<()> {
	if leftover == 0 {
		return Ok(());
	}

	let type_name = element.type_name();
	let object_id = element.object_id;
	if options.strict_fields {
		return Err(JtError::IncompleteFieldModel {
			type_name,
			object_id,
			leftover,
		});
	}

	tracing::warn!(object_id, type_name, leftover, "element record not fully decoded");
	anomalies.push(Anomaly::IncompleteFieldModel {
		type_name,
		object_id,
		leftover,
	});
	Ok(())
}

/// Replace recorded attribute, child, and instance ids with registry handles.
///
/// Every referenced id must be registered; forward references are fine because this
/// runs only after the whole element stream has been consumed.
pub fn resolve_structure(registry: &mut Registry) -> Result<()> {
	let (elements, by_id) = registry.parts_mut();

	for element in elements.iter_mut() {
		let from = element.object_id;

		if let Some(base) = element.body.base_node_mut() {
			base.attributes = resolve_ids(by_id, from, &base.attribute_ids, "attribute")?;
		}
		if let Some(group) = element.body.group_mut() {
			group.children = resolve_ids(by_id, from, &group.child_ids, "child")?;
		}
		if let ElementBody::InstanceNode(node) = &mut element.body {
			node.child = Some(resolve_id(by_id, from, node.child_id, "instance child")?);
		}
	}

	Ok(())
}

/// Read the property table and fill each owning element's property map.
///
/// Each entry is an owner id followed by `key, value` id pairs, ended by a zero key.
pub fn apply_property_table(cursor: &mut Cursor<'_>, registry: &mut Registry) -> Result<PropertyTableSummary> {
	let version = cursor.read_u16_le()?;
	let entries = cursor.read_u32_le()?;
	let mut links = 0;

	for _ in 0..entries {
		let owner_id = cursor.read_u32_le()?;
		let owner = registry.lookup(owner_id).ok_or(JtError::DanglingReference {
			from: owner_id,
			target: owner_id,
			relation: "property owner",
		})?;

		let mut key_id = cursor.read_u32_le()?;
		while key_id != 0 {
			let value_id = cursor.read_u32_le()?;
			let key = lookup(registry, owner_id, key_id, "property key")?;
			let value = lookup(registry, owner_id, value_id, "property value")?;
			registry.get_mut(owner).properties.insert(key, value);
			links += 1;
			key_id = cursor.read_u32_le()?;
		}
	}

	tracing::debug!(version, entries, links, "replayed property table");
	Ok(PropertyTableSummary { version, entries, links })
}

fn lookup(registry: &Registry, from: ObjectId, target: ObjectId, relation: &'static str) -> Result<ElementRef> {
	registry.lookup(target).ok_or(JtError::DanglingReference { from, target, relation })
}

fn resolve_id(by_id: &HashMap<ObjectId, ElementRef>, from: ObjectId, target: ObjectId, relation: &'static str) -> Result<ElementRef> {
	by_id.get(&target).copied().ok_or(JtError::DanglingReference { from, target, relation })
}

fn resolve_ids(by_id: &HashMap<ObjectId, ElementRef>, from: ObjectId, ids: &[ObjectId], relation: &'static str) -> Result<Vec<ElementRef>> {
	ids.iter().map(|id| resolve_id(by_id, from, *id, relation)).collect()
}

#[cfg(test)]
mod tests;
