use crate::jt::{Guid, JtError, Result};

/// Simple bounded cursor over an immutable byte slice.
///
/// All multi-byte reads are little-endian; containers declaring another byte order are
/// rejected before any cursor is built over their payloads.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Create a cursor positioned at `pos`.
	pub fn at(bytes: &'a [u8], pos: usize) -> Result<Self> {
		if pos > bytes.len() {
			return Err(JtError::UnexpectedEof {
				at: pos,
				need: 0,
				rem: 0,
			});
		}
		Ok(Self { bytes, pos })
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(JtError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Split off the next `n` bytes as an independent cursor.
	///
	/// Reads on the returned window can never reach past its end, whatever follows it.
	pub fn window(&mut self, n: usize) -> Result<Cursor<'a>> {
		Ok(Cursor::new(self.read_exact(n)?))
	}

	/// Consume and return every unread byte.
	pub fn read_rest(&mut self) -> &'a [u8] {
		let start = self.pos.min(self.bytes.len());
		self.pos = self.bytes.len();
		&self.bytes[start..]
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f64`.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read a GUID in its little-endian on-disk layout.
	pub fn read_guid(&mut self) -> Result<Guid> {
		Ok(Guid::from_bytes_le(self.read_array()?))
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read `N` consecutive little-endian `f32` values.
	pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
		let mut out = [0_f32; N];
		for item in &mut out {
			*item = self.read_f32_le()?;
		}
		Ok(out)
	}

	/// Read a `u32` count followed by that many little-endian `u32` values.
	pub fn read_u32_vec(&mut self) -> Result<Vec<u32>> {
		let count = self.read_count(4)?;
		let mut out = Vec::with_capacity(count);
		for _ in 0..count {
			out.push(self.read_u32_le()?);
		}
		Ok(out)
	}

	/// Read a `u32` count followed by that many little-endian `f32` values.
	pub fn read_f32_vec(&mut self) -> Result<Vec<f32>> {
		let count = self.read_count(4)?;
		let mut out = Vec::with_capacity(count);
		for _ in 0..count {
			out.push(self.read_f32_le()?);
		}
		Ok(out)
	}

	/// Read a `u32` character count followed by that many UTF-16LE code units.
	///
	/// Unpaired surrogates are replaced rather than rejected.
	pub fn read_mb_string(&mut self) -> Result<String> {
		let count = self.read_count(2)?;
		let raw = self.read_exact(count * 2)?;
		let units: Vec<u16> = raw.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
		Ok(String::from_utf16_lossy(&units))
	}

	/// Read a `u32` element count and check that `count * elem_size` bytes remain.
	///
	/// This keeps a corrupt count from driving a huge allocation.
	fn read_count(&mut self, elem_size: usize) -> Result<usize> {
		let at = self.pos;
		let count = self.read_u32_le()? as usize;
		let need = count.checked_mul(elem_size).unwrap_or(usize::MAX);
		if need > self.remaining() {
			return Err(JtError::UnexpectedEof {
				at,
				need,
				rem: self.remaining(),
			});
		}
		Ok(count)
	}
}
