use std::collections::HashMap;

use crate::jt::{Element, JtError, ObjectId, Result};

/// Handle to an element stored in a [`Registry`].
///
/// Handles are only meaningful for the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementRef(usize);

impl ElementRef {
	/// Registration position of the element.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Session-scoped arena of decoded elements, keyed by object id.
///
/// Every id can be registered once. Elements keep registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
	elements: Vec<Element>,
	by_id: HashMap<ObjectId, ElementRef>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Store an element under its object id.
	pub fn insert(&mut self, element: Element) -> Result<ElementRef> {
		let object_id = element.object_id;
		if self.by_id.contains_key(&object_id) {
			return Err(JtError::DuplicateObjectId { object_id });
		}

		let handle = ElementRef(self.elements.len());
		self.elements.push(element);
		self.by_id.insert(object_id, handle);
		Ok(handle)
	}

	/// Look up the handle registered for an object id.
	pub fn lookup(&self, object_id: ObjectId) -> Option<ElementRef> {
		self.by_id.get(&object_id).copied()
	}

	/// Borrow the element behind a handle.
	pub fn get(&self, handle: ElementRef) -> &Element {
		&self.elements[handle.0]
	}

	/// Borrow an element by object id.
	pub fn by_id(&self, object_id: ObjectId) -> Option<&Element> {
		self.lookup(object_id).map(|handle| self.get(handle))
	}

	/// Iterate handles and elements in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (ElementRef, &Element)> {
		self.elements.iter().enumerate().map(|(idx, element)| (ElementRef(idx), element))
	}

	/// Return number of registered elements.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Return whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Split into the element slice and id index for in-place link resolution.
	pub(crate) fn parts_mut(&mut self) -> (&mut [Element], &HashMap<ObjectId, ElementRef>) {
		(&mut self.elements, &self.by_id)
	}

	pub(crate) fn get_mut(&mut self, handle: ElementRef) -> &mut Element {
		&mut self.elements[handle.0]
	}
}
