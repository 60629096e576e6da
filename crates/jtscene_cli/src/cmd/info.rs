use std::path::PathBuf;

use jtscene::jt::{JtFile, Result};

use crate::cmd::util::{emit_json, kind_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(serde::Serialize)]
struct TocEntryJson {
	segment_id: String,
	offset: u32,
	length: u32,
	type_code: u32,
	kind: &'static str,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	version: String,
	format_version: Option<String>,
	byte_order: &'static str,
	toc_offset: u32,
	root_segment: String,
	segment_count: usize,
	segments: Vec<TocEntryJson>,
}

/// Print header fields and TOC entries.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = JtFile::open(&path)?;
	let header = file.header();
	let format_version = header.format_version().map(|(major, minor)| format!("{major}.{minor}"));

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			version: header.version.clone(),
			format_version,
			byte_order: "little",
			toc_offset: header.toc_offset,
			root_segment: header.root_segment_id.to_string(),
			segment_count: file.toc().len(),
			segments: file
				.toc()
				.entries()
				.iter()
				.map(|entry| TocEntryJson {
					segment_id: entry.segment_id.to_string(),
					offset: entry.offset,
					length: entry.length,
					type_code: entry.segment_type_hint(),
					kind: kind_label(entry.segment_type_hint()),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("version: {}", header.version);
	println!("format_version: {}", format_version.as_deref().unwrap_or("-"));
	println!("byte_order: little");
	println!("toc_offset: {}", header.toc_offset);
	println!("root_segment: {}", header.root_segment_id);
	println!("segments: {}", file.toc().len());
	for entry in file.toc().entries() {
		println!(
			"  {} offset={} length={} kind={}",
			entry.segment_id,
			entry.offset,
			entry.length,
			kind_label(entry.segment_type_hint())
		);
	}

	Ok(())
}
