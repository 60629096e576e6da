use crate::jt::bytes::Cursor;
use crate::jt::compression::{COMPRESSED_FLAG, Compression, inflate};
use crate::jt::element::{ElementRead, read_element};
use crate::jt::resolve::{read_element_list, report_leftover, resolve_structure};
use crate::jt::{Anomaly, DecodeOptions, Element, Guid, JtError, ObjectId, Registry, Result, SceneGraph, TocEntry};

/// Kind of content a segment holds, from its type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
	/// Logical scene graph: node and atom element runs plus a property table.
	LogicalSceneGraph,
	/// Metadata element run.
	Metadata,
	/// Shape element without a level-of-detail index.
	Shape,
	/// Shape element for one level of detail.
	ShapeLod(u8),
}

impl SegmentKind {
	/// Map a segment type code.
	pub fn from_code(code: u32) -> Option<Self> {
		match code {
			1 => Some(Self::LogicalSceneGraph),
			4 => Some(Self::Metadata),
			6 => Some(Self::Shape),
			7..=16 => Some(Self::ShapeLod((code - 7) as u8)),
			_ => None,
		}
	}

	/// Segment type code for this kind.
	pub fn code(self) -> u32 {
		match self {
			Self::LogicalSceneGraph => 1,
			Self::Metadata => 4,
			Self::Shape => 6,
			Self::ShapeLod(lod) => 7 + u32::from(lod),
		}
	}

	/// Whether the segment header is followed by a compression header.
	pub fn is_compressible(self) -> bool {
		matches!(self, Self::LogicalSceneGraph | Self::Metadata)
	}

	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::LogicalSceneGraph => "lsg",
			Self::Metadata => "metadata",
			Self::Shape => "shape",
			Self::ShapeLod(_) => "shape-lod",
		}
	}
}

/// Fixed header at the start of every segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
	/// Segment id, equal to the TOC key.
	pub id: Guid,
	/// Raw segment type code.
	pub type_code: u32,
	/// Declared payload length after decompression.
	pub logical_len: u32,
}

impl SegmentHeader {
	/// Encoded header size.
	pub const SIZE: usize = 24;
}

/// Segment payload loaded into memory and decompressed.
#[derive(Debug, Clone)]
pub struct Segment {
	/// Segment header.
	pub header: SegmentHeader,
	/// Content kind.
	pub kind: SegmentKind,
	/// Payload compression; `None` for kinds without a compression header.
	pub compression: Option<Compression>,
	/// Stored payload length in the file.
	pub stored_len: usize,
	/// Decompressed payload.
	pub data: Vec<u8>,
}

impl Segment {
	/// Read, validate, and decompress the segment a TOC entry points at.
	pub fn load(file: &[u8], entry: &TocEntry, options: &DecodeOptions) -> Result<Self> {
		let start = entry.offset as usize;
		let end = start
			.checked_add(entry.length as usize)
			.filter(|end| *end <= file.len())
			.ok_or(JtError::SegmentOutOfRange {
				id: entry.segment_id,
				offset: entry.offset,
				len: entry.length,
				file_len: file.len(),
			})?;

		let mut cursor = Cursor::new(&file[start..end]);
		let header = SegmentHeader {
			id: cursor.read_guid()?,
			type_code: cursor.read_u32_le()?,
			logical_len: cursor.read_u32_le()?,
		};
		if header.id != entry.segment_id {
			return Err(JtError::SegmentIdMismatch {
				expected: entry.segment_id,
				got: header.id,
			});
		}

		let kind = SegmentKind::from_code(header.type_code).ok_or(JtError::UnsupportedSegmentKind {
			id: header.id,
			code: header.type_code,
		})?;

		let (compression, stored_len, data) = if kind.is_compressible() {
			let flag = cursor.read_u32_le()?;
			let compressed_len = cursor.read_u32_le()? as usize;
			let algorithm = cursor.read_u8()?;
			let compression = Compression::from_header(header.id, flag, algorithm)?;
			let stored = if flag == COMPRESSED_FLAG {
				// Writers may count the algorithm byte in the declared length.
				let available = compressed_len.min(cursor.remaining());
				cursor.read_exact(available)?
			} else {
				cursor.read_rest()
			};

			let data = match compression {
				Compression::Zlib => {
					let data = inflate(header.id, stored, options.max_decompressed_bytes)?;
					if options.strict_length && data.len() != header.logical_len as usize {
						return Err(JtError::DecompressedLengthMismatch {
							id: header.id,
							expected: header.logical_len as usize,
							got: data.len(),
						});
					}
					data
				}
				Compression::None => stored.to_vec(),
			};
			(Some(compression), stored.len(), data)
		} else {
			let stored = cursor.read_rest();
			(None, stored.len(), stored.to_vec())
		};

		tracing::debug!(
			segment = %header.id,
			kind = kind.as_str(),
			compression = compression.map(Compression::as_str).unwrap_or("-"),
			stored_len,
			decoded_len = data.len(),
			"loaded segment"
		);

		Ok(Self {
			header,
			kind,
			compression,
			stored_len,
			data,
		})
	}

	/// Segment id.
	pub fn id(&self) -> Guid {
		self.header.id
	}

	/// Decode the payload according to the segment kind.
	///
	/// Every call runs in a fresh registry, so object ids never leak between segments.
	pub fn decode(&self, options: &DecodeOptions) -> Result<SegmentContent> {
		let mut cursor = Cursor::new(&self.data);
		match self.kind {
			SegmentKind::LogicalSceneGraph => SceneGraph::decode(self.header.id, &mut cursor, options).map(SegmentContent::SceneGraph),
			SegmentKind::Metadata => {
				let mut registry = Registry::new();
				let mut anomalies = Vec::new();
				read_element_list(&mut cursor, &mut registry, options, &mut anomalies)?;
				resolve_structure(&mut registry)?;
				Ok(SegmentContent::Metadata { registry, anomalies })
			}
			SegmentKind::Shape | SegmentKind::ShapeLod(_) => {
				let ElementRead::Element { element, leftover } = read_element(&mut cursor)? else {
					return Err(JtError::EmptyShapeSegment { id: self.header.id });
				};
				let mut anomalies = Vec::new();
				report_leftover(&element, leftover, options, &mut anomalies)?;
				Ok(SegmentContent::Shape { element, anomalies })
			}
		}
	}
}

/// Decoded content of one segment.
#[derive(Debug, Clone)]
pub enum SegmentContent {
	/// Resolved logical scene graph.
	SceneGraph(SceneGraph),
	/// Resolved metadata elements.
	Metadata {
		/// Elements of the segment.
		registry: Registry,
		/// Anomalies reported while decoding.
		anomalies: Vec<Anomaly>,
	},
	/// Single shape element.
	Shape {
		/// The segment's element.
		element: Element,
		/// Anomalies reported while decoding.
		anomalies: Vec<Anomaly>,
	},
}

impl SegmentContent {
	/// Find a decoded element by object id.
	pub fn element(&self, object_id: ObjectId) -> Option<&Element> {
		match self {
			Self::SceneGraph(scene) => scene.registry().by_id(object_id),
			Self::Metadata { registry, .. } => registry.by_id(object_id),
			Self::Shape { element, .. } => (element.object_id == object_id).then_some(element),
		}
	}

	/// Anomalies reported while decoding.
	pub fn anomalies(&self) -> &[Anomaly] {
		match self {
			Self::SceneGraph(scene) => scene.anomalies(),
			Self::Metadata { anomalies, .. } | Self::Shape { anomalies, .. } => anomalies,
		}
	}
}
