use std::path::Path;

use crate::jt::element::property::LateLoadRef;
use crate::jt::{DecodeOptions, FileHeader, Guid, JtError, Result, SceneGraph, Segment, SegmentContent, SegmentKind, Toc};

/// Opened JT container with parsed header and TOC.
///
/// Segments are loaded and decoded on request; each decode gets its own registry.
#[derive(Debug, Clone)]
pub struct JtFile {
	header: FileHeader,
	toc: Toc,
	bytes: Vec<u8>,
}

impl JtFile {
	/// Read a file and parse its header and TOC.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		Self::from_bytes(bytes)
	}

	/// Parse header and TOC from in-memory bytes.
	///
	/// The root segment id must be listed in the TOC.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let header = FileHeader::parse(&bytes)?;
		let toc = Toc::parse(&bytes, &header)?;
		toc.require(&header.root_segment_id)?;

		Ok(Self { header, toc, bytes })
	}

	/// Parsed file header.
	pub fn header(&self) -> &FileHeader {
		&self.header
	}

	/// Parsed table of contents.
	pub fn toc(&self) -> &Toc {
		&self.toc
	}

	/// Raw container bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Root scene graph segment id.
	pub fn root_segment_id(&self) -> Guid {
		self.header.root_segment_id
	}

	/// Load and decompress one segment.
	pub fn load_segment(&self, id: &Guid, options: &DecodeOptions) -> Result<Segment> {
		let entry = self.toc.require(id)?;
		Segment::load(&self.bytes, entry, options)
	}

	/// Load and decode one segment in a fresh registry.
	pub fn decode_segment(&self, id: &Guid, options: &DecodeOptions) -> Result<SegmentContent> {
		self.load_segment(id, options)?.decode(options)
	}

	/// Decode and resolve the root logical scene graph.
	pub fn decode_scene(&self, options: &DecodeOptions) -> Result<SceneGraph> {
		let id = self.header.root_segment_id;
		let span = tracing::debug_span!("decode_scene", root = %id);
		let _enter = span.enter();

		let segment = self.load_segment(&id, options)?;
		if segment.kind != SegmentKind::LogicalSceneGraph {
			return Err(JtError::RootNotSceneGraph {
				id,
				kind: segment.kind.as_str(),
			});
		}

		match segment.decode(options)? {
			SegmentContent::SceneGraph(scene) => Ok(scene),
			_ => Err(JtError::RootNotSceneGraph {
				id,
				kind: segment.kind.as_str(),
			}),
		}
	}

	/// Decode the segment a late-loaded reference points at.
	///
	/// The target is located through this file's TOC and decoded independently of
	/// whatever session produced the reference.
	pub fn materialize(&self, reference: &LateLoadRef, options: &DecodeOptions) -> Result<SegmentContent> {
		let segment = self.load_segment(&reference.segment_id, options)?;
		if reference.kind_hint() != Some(segment.kind) {
			tracing::warn!(
				segment = %reference.segment_id,
				recorded = reference.segment_type,
				actual = segment.header.type_code,
				"late-load type hint disagrees with segment header"
			);
		}

		let content = segment.decode(options)?;
		if content.element(reference.payload_object_id).is_none() {
			tracing::debug!(
				segment = %reference.segment_id,
				payload = reference.payload_object_id,
				"late-load payload id not found in segment"
			);
		}
		Ok(content)
	}
}
