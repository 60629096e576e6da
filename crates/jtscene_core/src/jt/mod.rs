mod bytes;
mod compression;
/// Element records and their typed bodies.
pub mod element;
mod error;
mod file;
mod guid;
mod header;
mod options;
mod registry;
mod resolve;
mod scene;
mod segment;
mod toc;

/// Bounded little-endian reader.
pub use bytes::Cursor;
/// Segment payload compression.
pub use compression::{COMPRESSED_FLAG, Compression, inflate};
/// Element decoding entry points and shared element types.
pub use element::{
	Anomaly, BBox, CountRange, DISPATCH_TABLE, Element, ElementBody, ElementFamily, ElementRead, ElementType, ObjectId, PropertyMap, ReadFields,
	property::LateLoadRef, read_element,
};
/// Error, category, and result aliases.
pub use error::{ErrorKind, JtError, Result};
/// Container session entry point.
pub use file::JtFile;
/// 16-byte identifiers.
pub use guid::Guid;
/// File preamble representation.
pub use header::FileHeader;
/// Decoding switches and limits.
pub use options::DecodeOptions;
/// Session-scoped element arena.
pub use registry::{ElementRef, Registry};
/// Two-phase link resolution.
pub use resolve::{PropertyTableSummary, apply_property_table, read_element_list, resolve_structure};
/// Resolved scene graph and traversal.
pub use scene::{SceneGraph, WalkItem};
/// Segment loading and per-kind decoding.
pub use segment::{Segment, SegmentContent, SegmentHeader, SegmentKind};
/// Table of contents.
pub use toc::{Toc, TocEntry};
