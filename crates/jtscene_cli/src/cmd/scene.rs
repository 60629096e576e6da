use std::path::PathBuf;

use jtscene::jt::{ElementBody, ElementRef, JtFile, Result, SceneGraph};

use crate::cmd::util::{AnomalyJson, DecodeArgs, anomalies_json, atom_value, emit_json, kind_label, print_anomalies};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

#[derive(serde::Serialize)]
struct ElementRefJson {
	object_id: u32,
	#[serde(rename = "type")]
	type_name: &'static str,
}

#[derive(serde::Serialize)]
struct PropertyJson {
	key_id: u32,
	key: Option<String>,
	value_id: u32,
	value: Option<String>,
}

#[derive(serde::Serialize)]
struct NodeJson {
	depth: usize,
	object_id: u32,
	#[serde(rename = "type")]
	type_name: &'static str,
	detail: Option<String>,
	attributes: Vec<ElementRefJson>,
	properties: Vec<PropertyJson>,
}

#[derive(serde::Serialize)]
struct LateLoadJson {
	atom_id: u32,
	segment_id: String,
	segment_type: u32,
	kind: &'static str,
	payload_object_id: u32,
}

#[derive(serde::Serialize)]
struct PropertyTableJson {
	version: u16,
	entries: u32,
	links: usize,
}

#[derive(serde::Serialize)]
struct SceneJson {
	path: String,
	root_segment: String,
	element_count: usize,
	property_table: PropertyTableJson,
	nodes: Vec<NodeJson>,
	late_loaded: Vec<LateLoadJson>,
	anomalies: Vec<AnomalyJson>,
}

/// Decode the root scene graph and print its node tree.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json, decode } = args;

	let file = JtFile::open(&path)?;
	let scene = file.decode_scene(&decode.options())?;
	let nodes = scene.root().map(|root| collect_nodes(&scene, root)).unwrap_or_default();
	let late_loaded: Vec<LateLoadJson> = scene
		.late_loaded()
		.map(|(handle, reference)| LateLoadJson {
			atom_id: scene.get(handle).object_id,
			segment_id: reference.segment_id.to_string(),
			segment_type: reference.segment_type,
			kind: kind_label(reference.segment_type),
			payload_object_id: reference.payload_object_id,
		})
		.collect();
	let table = scene.property_table();

	if json {
		let payload = SceneJson {
			path: path.display().to_string(),
			root_segment: scene.segment_id().to_string(),
			element_count: scene.registry().len(),
			property_table: PropertyTableJson {
				version: table.version,
				entries: table.entries,
				links: table.links,
			},
			nodes,
			late_loaded,
			anomalies: anomalies_json(scene.anomalies()),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("root_segment: {}", scene.segment_id());
	println!("elements: {}", scene.registry().len());
	println!("property_table: version={} entries={} links={}", table.version, table.entries, table.links);
	println!("nodes:");
	for node in &nodes {
		let indent = "  ".repeat(node.depth + 1);
		match &node.detail {
			Some(detail) => println!("{indent}{} #{} {detail}", node.type_name, node.object_id),
			None => println!("{indent}{} #{}", node.type_name, node.object_id),
		}
		for attr in &node.attributes {
			println!("{indent}  @{} #{}", attr.type_name, attr.object_id);
		}
		for prop in &node.properties {
			println!(
				"{indent}  {} = {}",
				prop.key.as_deref().unwrap_or("?"),
				prop.value.as_deref().unwrap_or("?")
			);
		}
	}

	println!("late_loaded: {}", late_loaded.len());
	for item in &late_loaded {
		println!(
			"  atom #{} -> segment {} ({}) payload #{}",
			item.atom_id, item.segment_id, item.kind, item.payload_object_id
		);
	}
	print_anomalies(scene.anomalies());

	Ok(())
}

fn collect_nodes(scene: &SceneGraph, root: ElementRef) -> Vec<NodeJson> {
	scene
		.walk(root)
		.into_iter()
		.map(|item| {
			let element = scene.get(item.node);
			NodeJson {
				depth: item.depth,
				object_id: element.object_id,
				type_name: element.type_name(),
				detail: node_detail(&element.body),
				attributes: scene
					.attributes(item.node)
					.iter()
					.map(|attr| {
						let attr = scene.get(*attr);
						ElementRefJson {
							object_id: attr.object_id,
							type_name: attr.type_name(),
						}
					})
					.collect(),
				properties: scene
					.properties(item.node)
					.iter()
					.map(|(key, value)| {
						let key = scene.get(*key);
						let value = scene.get(*value);
						PropertyJson {
							key_id: key.object_id,
							key: atom_value(key),
							value_id: value.object_id,
							value: atom_value(value),
						}
					})
					.collect(),
			}
		})
		.collect()
}

fn node_detail(body: &ElementBody) -> Option<String> {
	match body {
		ElementBody::PartitionNode(node) => Some(format!("file={}", node.file_name)),
		ElementBody::RangeLodNode(node) => Some(format!("limits={:?}", node.range_limits)),
		ElementBody::InstanceNode(node) => Some(format!("instance_of=#{}", node.child_id)),
		_ => None,
	}
}
