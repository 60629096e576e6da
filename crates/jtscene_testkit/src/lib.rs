//! Shared test helpers for workspace crates.
//!
//! Builds synthetic JT containers byte by byte so tests never depend on checked-in
//! binary fixtures.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

/// Size of the fixed container preamble.
pub const PREAMBLE_SIZE: usize = 105;

/// Segment type code for logical scene graph segments.
pub const LSG_SEGMENT: u32 = 1;
/// Segment type code for metadata segments.
pub const METADATA_SEGMENT: u32 = 4;
/// Segment type code for shape LOD0 segments.
pub const SHAPE_LOD0_SEGMENT: u32 = 7;

/// Little-endian byte writer mirroring the decoder's read primitives.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
	bytes: Vec<u8>,
}

impl ByteWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append one byte.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.bytes.push(value);
		self
	}

	/// Append a little-endian `u16`.
	pub fn u16(&mut self, value: u16) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `u64`.
	pub fn u64(&mut self, value: u64) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `f32`.
	pub fn f32(&mut self, value: f32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `f64`.
	pub fn f64(&mut self, value: f64) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append several `f32` values without a count.
	pub fn f32s(&mut self, values: &[f32]) -> &mut Self {
		for value in values {
			self.f32(*value);
		}
		self
	}

	/// Append a `u32` count followed by the ids.
	pub fn ids(&mut self, ids: &[u32]) -> &mut Self {
		self.u32(ids.len() as u32);
		for id in ids {
			self.u32(*id);
		}
		self
	}

	/// Append a `u32` character count followed by UTF-16LE code units.
	pub fn mb_string(&mut self, value: &str) -> &mut Self {
		let units: Vec<u16> = value.encode_utf16().collect();
		self.u32(units.len() as u32);
		for unit in units {
			self.u16(unit);
		}
		self
	}

	/// Append raw bytes.
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Return written byte count.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return whether nothing was written.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Take the written bytes.
	pub fn finish(&self) -> Vec<u8> {
		self.bytes.clone()
	}
}

/// Encode one length-prefixed element record.
pub fn element_record(type_id: [u8; 16], base_type: u8, object_id: u32, body: &[u8]) -> Vec<u8> {
	let mut out = ByteWriter::new();
	out.u32((16 + 1 + 4 + body.len()) as u32);
	out.raw(&type_id).u8(base_type).u32(object_id).raw(body);
	out.finish()
}

/// Encode the end-of-elements record.
pub fn end_of_elements() -> Vec<u8> {
	let mut out = ByteWriter::new();
	out.u32(16).raw(&[0xff; 16]);
	out.finish()
}

/// Compress bytes as a zlib-wrapped DEFLATE stream.
pub fn zlib(bytes: &[u8]) -> Vec<u8> {
	let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(bytes).expect("in-memory zlib write");
	encoder.finish().expect("in-memory zlib finish")
}

/// How a segment body is stored after its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
	/// Compression header with flag 2 / algorithm 2, zlib body.
	Zlib,
	/// Compression header with flag 0, raw body.
	Stored,
	/// No compression header (shape segments).
	Bare,
}

/// One synthetic segment.
#[derive(Debug, Clone)]
pub struct SegmentSpec {
	/// Segment id written to both the TOC and the segment header.
	pub id: [u8; 16],
	/// Segment id written into the segment header when it must differ from the TOC key.
	pub header_id: Option<[u8; 16]>,
	/// Segment type code.
	pub type_code: u32,
	/// Decoded payload bytes.
	pub payload: Vec<u8>,
	/// Body storage.
	pub storage: Storage,
	/// Logical length override; defaults to the payload length.
	pub logical_len: Option<u32>,
	/// Algorithm byte override for zlib storage.
	pub algorithm: Option<u8>,
}

impl SegmentSpec {
	/// Build a segment with default storage for its type code.
	pub fn new(id: [u8; 16], type_code: u32, payload: Vec<u8>) -> Self {
		let storage = if type_code == LSG_SEGMENT || type_code == METADATA_SEGMENT {
			Storage::Zlib
		} else {
			Storage::Bare
		};
		Self {
			id,
			header_id: None,
			type_code,
			payload,
			storage,
			logical_len: None,
			algorithm: None,
		}
	}

	/// Encode header plus body.
	pub fn encode(&self) -> Vec<u8> {
		let mut out = ByteWriter::new();
		out.raw(&self.header_id.unwrap_or(self.id));
		out.u32(self.type_code);
		out.u32(self.logical_len.unwrap_or(self.payload.len() as u32));
		match self.storage {
			Storage::Zlib => {
				let compressed = zlib(&self.payload);
				out.u32(2).u32(compressed.len() as u32).u8(self.algorithm.unwrap_or(2));
				out.raw(&compressed);
			}
			Storage::Stored => {
				out.u32(0).u32(self.payload.len() as u32).u8(1);
				out.raw(&self.payload);
			}
			Storage::Bare => {
				out.raw(&self.payload);
			}
		}
		out.finish()
	}
}

/// Synthetic container assembled from segments.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
	/// Version string written into the 80-byte field.
	pub version: String,
	/// Byte-order flag.
	pub byte_order: u8,
	/// Root scene-graph segment id.
	pub root: [u8; 16],
	/// Segments in file order.
	pub segments: Vec<SegmentSpec>,
	/// Leave these segment ids out of the TOC.
	pub omit_from_toc: Vec<[u8; 16]>,
}

impl ContainerBuilder {
	/// Start a container whose root is `root`.
	pub fn new(root: [u8; 16]) -> Self {
		Self {
			version: "Version 9.5 JT".to_owned(),
			byte_order: 0,
			root,
			segments: Vec::new(),
			omit_from_toc: Vec::new(),
		}
	}

	/// Add a segment.
	pub fn segment(mut self, segment: SegmentSpec) -> Self {
		self.segments.push(segment);
		self
	}

	/// Encode the full container: preamble, segments, then TOC.
	pub fn build(&self) -> Vec<u8> {
		let mut body = Vec::new();
		let mut toc = Vec::new();
		for segment in &self.segments {
			let encoded = segment.encode();
			let offset = (PREAMBLE_SIZE + body.len()) as u32;
			if !self.omit_from_toc.contains(&segment.id) {
				toc.push((segment.id, offset, encoded.len() as u32, segment.type_code << 24));
			}
			body.extend_from_slice(&encoded);
		}

		let toc_offset = (PREAMBLE_SIZE + body.len()) as u32;
		let mut version = [b' '; 80];
		let take = self.version.len().min(79);
		version[..take].copy_from_slice(&self.version.as_bytes()[..take]);
		version[79] = b'\n';

		let mut out = ByteWriter::new();
		out.raw(&version).u8(self.byte_order).i32(0).u32(toc_offset).raw(&self.root);
		out.raw(&body);
		out.u32(toc.len() as u32);
		for (id, offset, len, attributes) in toc {
			out.raw(&id).u32(offset).u32(len).u32(attributes);
		}
		out.finish()
	}
}
