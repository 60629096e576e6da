use jtscene_testkit::zlib;

use crate::jt::compression::{Compression, inflate};
use crate::jt::{ErrorKind, Guid, JtError};

const SEGMENT: Guid = Guid::from_fields(1, 2, 3, [4; 8]);

#[test]
fn inflates_zlib_stream() {
	let payload: Vec<u8> = (0..2000_u32).map(|n| (n % 251) as u8).collect();
	let out = inflate(SEGMENT, &zlib(&payload), usize::MAX).expect("inflate");
	assert_eq!(out, payload);
}

#[test]
fn stops_at_output_limit() {
	let payload = vec![0_u8; 64 * 1024];
	let err = inflate(SEGMENT, &zlib(&payload), 1024).expect_err("limit exceeded");
	assert!(matches!(err, JtError::DecompressedTooLarge { limit: 1024 }));
	assert_eq!(err.kind(), ErrorKind::SegmentIntegrity);
}

#[test]
fn corrupt_stream_is_a_segment_error() {
	let err = inflate(SEGMENT, &[0x12, 0x34, 0x56, 0x78], usize::MAX).expect_err("not zlib");
	assert!(matches!(err, JtError::Inflate { id, .. } if id == SEGMENT));
}

#[test]
fn maps_header_flags() {
	assert_eq!(Compression::from_header(SEGMENT, 2, 2).expect("zlib"), Compression::Zlib);
	assert_eq!(Compression::from_header(SEGMENT, 2, 1).expect("none"), Compression::None);
	assert_eq!(Compression::from_header(SEGMENT, 0, 9).expect("flag off"), Compression::None);

	let err = Compression::from_header(SEGMENT, 2, 3).expect_err("lzma unsupported");
	assert!(matches!(err, JtError::UnsupportedCompression { algorithm: 3, .. }));
}
