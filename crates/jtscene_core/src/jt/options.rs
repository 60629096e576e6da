/// Runtime limits and behavior switches for segment decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Error when an inflated payload differs from the declared logical length.
	pub strict_length: bool,
	/// Error when an element record leaves bytes unread instead of reporting it.
	pub strict_fields: bool,
	/// Maximum inflated bytes accepted for one segment.
	pub max_decompressed_bytes: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			strict_length: true,
			strict_fields: false,
			max_decompressed_bytes: 512 * 1024 * 1024,
		}
	}
}

impl DecodeOptions {
	/// Preset that accepts any inflated length and only reports incomplete records.
	pub fn lenient() -> Self {
		Self {
			strict_length: false,
			..Self::default()
		}
	}
}
