use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::jt::{Guid, JtError, Result};

/// Compression flag value marking a compressed payload.
pub const COMPRESSED_FLAG: u32 = 2;

/// Payload compression algorithm named by a segment's compression header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw payload.
	None,
	/// zlib-wrapped DEFLATE payload.
	Zlib,
}

impl Compression {
	/// Map a compression flag and algorithm id.
	pub fn from_header(segment: Guid, flag: u32, algorithm: u8) -> Result<Self> {
		if flag != COMPRESSED_FLAG {
			return Ok(Self::None);
		}
		match algorithm {
			1 => Ok(Self::None),
			2 => Ok(Self::Zlib),
			_ => Err(JtError::UnsupportedCompression { id: segment, algorithm }),
		}
	}

	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zlib => "zlib",
		}
	}
}

/// Inflate a zlib stream, refusing to grow past `limit` bytes.
pub fn inflate(segment: Guid, raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let mut decoder = ZlibDecoder::new(raw);
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf).map_err(|source| JtError::Inflate { id: segment, source })?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(JtError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

#[cfg(test)]
mod tests;
