use std::path::PathBuf;

use jtscene::jt::{Element, Guid, JtFile, Result, SegmentContent};

use crate::cmd::util::{AnomalyJson, DecodeArgs, anomalies_json, atom_value, emit_json, parse_guid, print_anomalies};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Segment id in `8-4-4-4-12` form.
	#[arg(long, value_parser = parse_guid)]
	pub id: Guid,
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

#[derive(serde::Serialize)]
struct ElementJson {
	object_id: u32,
	#[serde(rename = "type")]
	type_name: &'static str,
	value: Option<String>,
}

#[derive(serde::Serialize)]
struct SegmentJson {
	segment_id: String,
	kind: &'static str,
	type_code: u32,
	compression: Option<&'static str>,
	stored_len: usize,
	decoded_len: usize,
	elements: Vec<ElementJson>,
	anomalies: Vec<AnomalyJson>,
}

/// Load and decode one segment, listing its elements.
pub fn run(args: Args) -> Result<()> {
	let Args { path, id, json, decode } = args;
	let options = decode.options();

	let file = JtFile::open(&path)?;
	let segment = file.load_segment(&id, &options)?;
	let content = segment.decode(&options)?;

	let elements: Vec<ElementJson> = match &content {
		SegmentContent::SceneGraph(scene) => scene.registry().iter().map(|(_, element)| element_json(element)).collect(),
		SegmentContent::Metadata { registry, .. } => registry.iter().map(|(_, element)| element_json(element)).collect(),
		SegmentContent::Shape { element, .. } => vec![element_json(element)],
	};

	if json {
		let payload = SegmentJson {
			segment_id: segment.id().to_string(),
			kind: segment.kind.as_str(),
			type_code: segment.header.type_code,
			compression: segment.compression.map(|compression| compression.as_str()),
			stored_len: segment.stored_len,
			decoded_len: segment.data.len(),
			elements,
			anomalies: anomalies_json(content.anomalies()),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("segment: {}", segment.id());
	println!("kind: {}", segment.kind.as_str());
	println!("compression: {}", segment.compression.map(|compression| compression.as_str()).unwrap_or("-"));
	println!("stored_len: {}", segment.stored_len);
	println!("decoded_len: {}", segment.data.len());
	println!("elements: {}", elements.len());
	for element in &elements {
		match &element.value {
			Some(value) => println!("  {} #{} = {value}", element.type_name, element.object_id),
			None => println!("  {} #{}", element.type_name, element.object_id),
		}
	}
	print_anomalies(content.anomalies());

	Ok(())
}

fn element_json(element: &Element) -> ElementJson {
	ElementJson {
		object_id: element.object_id,
		type_name: element.type_name(),
		value: atom_value(element),
	}
}
