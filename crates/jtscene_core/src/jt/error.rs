use thiserror::Error;

use crate::jt::{Guid, ObjectId};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, JtError>;

/// Errors produced while reading, decoding, and resolving JT containers.
#[derive(Debug, Error)]
pub enum JtError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// File preamble was shorter than its fixed layout.
	#[error("truncated preamble: need {need} bytes, file has {have}")]
	TruncatedPreamble {
		/// Fixed preamble size.
		need: usize,
		/// Available bytes.
		have: usize,
	},
	/// Preamble byte-order flag selects big-endian storage.
	#[error("unsupported byte order flag {flag} (expected 0, little-endian)")]
	BigEndianUnsupported {
		/// Raw flag byte.
		flag: u8,
	},
	/// TOC offset points outside the file.
	#[error("toc offset {offset} out of range (file length {len})")]
	TocOffsetOutOfRange {
		/// Declared TOC offset.
		offset: u32,
		/// File length in bytes.
		len: usize,
	},
	/// TOC entry array was cut short.
	#[error("truncated toc: {count} entries declared at offset {offset}")]
	TruncatedToc {
		/// TOC offset.
		offset: u32,
		/// Declared entry count.
		count: u32,
	},
	/// Same segment id listed twice in the TOC.
	#[error("duplicate toc entry for segment {id}")]
	DuplicateSegmentId {
		/// Repeated segment id.
		id: Guid,
	},
	/// Requested segment id has no TOC entry.
	#[error("segment {id} not listed in toc")]
	SegmentNotFound {
		/// Missing segment id.
		id: Guid,
	},
	/// TOC entry points outside the file.
	#[error("segment {id} range {offset}+{len} exceeds file length {file_len}")]
	SegmentOutOfRange {
		/// Segment id.
		id: Guid,
		/// Declared byte offset.
		offset: u32,
		/// Declared byte length.
		len: u32,
		/// File length in bytes.
		file_len: usize,
	},
	/// Embedded segment id disagrees with its TOC key.
	#[error("segment id mismatch: toc={expected}, header={got}")]
	SegmentIdMismatch {
		/// Id recorded in the TOC.
		expected: Guid,
		/// Id embedded in the segment header.
		got: Guid,
	},
	/// Segment type code outside the supported kinds.
	#[error("unsupported segment kind {code} in segment {id}")]
	UnsupportedSegmentKind {
		/// Segment id.
		id: Guid,
		/// Raw segment type code.
		code: u32,
	},
	/// Compression algorithm id is not ZLIB.
	#[error("unsupported compression algorithm {algorithm} in segment {id}")]
	UnsupportedCompression {
		/// Segment id.
		id: Guid,
		/// Raw algorithm id.
		algorithm: u8,
	},
	/// DEFLATE stream could not be inflated.
	#[error("segment {id} inflate failed: {source}")]
	Inflate {
		/// Segment id.
		id: Guid,
		/// Underlying decoder failure.
		source: std::io::Error,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Inflated payload length disagrees with the declared logical length.
	#[error("segment {id} decompressed to {got} bytes, header declares {expected}")]
	DecompressedLengthMismatch {
		/// Segment id.
		id: Guid,
		/// Declared logical length.
		expected: usize,
		/// Actual inflated length.
		got: usize,
	},
	/// Shape segment held a sentinel instead of its element.
	#[error("shape segment {id} holds no element")]
	EmptyShapeSegment {
		/// Segment id.
		id: Guid,
	},
	/// Root segment id names a segment that is not a logical scene graph.
	#[error("root segment {id} is a {kind} segment, not a scene graph")]
	RootNotSceneGraph {
		/// Root segment id.
		id: Guid,
		/// Kind label of the segment found.
		kind: &'static str,
	},
	/// Object id registered twice in one session.
	#[error("duplicate object id {object_id}")]
	DuplicateObjectId {
		/// Repeated object id.
		object_id: ObjectId,
	},
	/// Metadata property value kind is not one of the four on-disk kinds.
	#[error("unknown metadata value kind {kind} for key {key:?}")]
	UnknownMetadataValueKind {
		/// Property key being decoded.
		key: String,
		/// Raw kind byte.
		kind: u8,
	},
	/// Type identifier absent from the dispatch table.
	#[error("unknown element type {type_id} at offset {at}")]
	UnknownElementType {
		/// Unrecognized type identifier.
		type_id: Guid,
		/// Offset of the record length prefix inside the segment payload.
		at: usize,
	},
	/// Strict field mode detected trailing undecoded bytes.
	#[error("incomplete field model for {type_name} (object {object_id}): leftover={leftover}")]
	IncompleteFieldModel {
		/// Element type name.
		type_name: &'static str,
		/// Element object id.
		object_id: ObjectId,
		/// Unconsumed bytes.
		leftover: usize,
	},
	/// Link target missing from the session registry.
	#[error("dangling {relation} reference from object {from} to object {target}")]
	DanglingReference {
		/// Referring object id.
		from: ObjectId,
		/// Missing object id.
		target: ObjectId,
		/// Link role (`attribute`, `child`, `property key`, ...).
		relation: &'static str,
	},
	/// GUID text could not be parsed.
	#[error("invalid guid literal: {value}")]
	InvalidGuidLiteral {
		/// Original user-provided text.
		value: String,
	},
}

/// Error categories surfaced to callers and mapped to process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Filesystem failure or out-of-bounds read.
	Io,
	/// Bad preamble, TOC, or missing segment.
	MalformedContainer,
	/// Segment-level inconsistency.
	SegmentIntegrity,
	/// Type identifier absent from the dispatch table.
	UnknownElementType,
	/// Known element left bytes unread.
	IncompleteFieldModel,
	/// Link target missing from the registry.
	DanglingReference,
	/// Caller-supplied value could not be parsed.
	InvalidArgument,
}

impl ErrorKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Io => "io",
			Self::MalformedContainer => "malformed_container",
			Self::SegmentIntegrity => "segment_integrity",
			Self::UnknownElementType => "unknown_element_type",
			Self::IncompleteFieldModel => "incomplete_field_model",
			Self::DanglingReference => "dangling_reference",
			Self::InvalidArgument => "invalid_argument",
		}
	}

	/// Process exit code for this category.
	pub fn exit_code(self) -> i32 {
		match self {
			Self::Io => 3,
			Self::MalformedContainer => 4,
			Self::SegmentIntegrity => 5,
			Self::UnknownElementType => 6,
			Self::IncompleteFieldModel => 7,
			Self::DanglingReference => 8,
			Self::InvalidArgument => 2,
		}
	}
}

impl JtError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) | Self::UnexpectedEof { .. } => ErrorKind::Io,
			Self::TruncatedPreamble { .. }
			| Self::BigEndianUnsupported { .. }
			| Self::TocOffsetOutOfRange { .. }
			| Self::TruncatedToc { .. }
			| Self::DuplicateSegmentId { .. }
			| Self::SegmentNotFound { .. }
			| Self::SegmentOutOfRange { .. }
			| Self::RootNotSceneGraph { .. } => ErrorKind::MalformedContainer,
			Self::SegmentIdMismatch { .. }
			| Self::UnsupportedSegmentKind { .. }
			| Self::UnsupportedCompression { .. }
			| Self::Inflate { .. }
			| Self::DecompressedTooLarge { .. }
			| Self::DecompressedLengthMismatch { .. }
			| Self::EmptyShapeSegment { .. }
			| Self::DuplicateObjectId { .. }
			| Self::UnknownMetadataValueKind { .. } => ErrorKind::SegmentIntegrity,
			Self::UnknownElementType { .. } => ErrorKind::UnknownElementType,
			Self::IncompleteFieldModel { .. } => ErrorKind::IncompleteFieldModel,
			Self::DanglingReference { .. } => ErrorKind::DanglingReference,
			Self::InvalidGuidLiteral { .. } => ErrorKind::InvalidArgument,
		}
	}
}
