use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use jtscene_testkit::{ByteWriter, ContainerBuilder, LSG_SEGMENT, METADATA_SEGMENT, SHAPE_LOD0_SEGMENT, SegmentSpec, element_record, end_of_elements};

const ROOT: &str = "10000001-0002-0003-0405-060708090a0b";
const SHAPE: &str = "20000001-0002-0003-0405-060708090a0b";
const META: &str = "30000001-0002-0003-0405-060708090a0b";

const GROUP: [u8; 16] = type_id(0x10dd_101b);
const PARTITION: [u8; 16] = type_id(0x10dd_103e);
const STRING_ATOM: [u8; 16] = type_id(0x10dd_106e);
const VERTEX_SHAPE_LOD: [u8; 16] = type_id(0x10dd_10b0);
const LATE_ATOM: [u8; 16] = [0xe5, 0x5b, 0xb0, 0xe0, 0xbd, 0xfb, 0xd1, 0x11, 0xa3, 0xa7, 0x00, 0xaa, 0x00, 0xd1, 0x09, 0x54];
const PROPERTY_PROXY: [u8; 16] = [0x47, 0x72, 0x35, 0xce, 0xfb, 0x38, 0xd1, 0x11, 0xa5, 0x06, 0x00, 0x60, 0x97, 0xbd, 0xc6, 0xe1];

const fn type_id(data1: u32) -> [u8; 16] {
	let d = data1.to_le_bytes();
	[d[0], d[1], d[2], d[3], 0xc8, 0x2a, 0xd1, 0x11, 0x9b, 0x6b, 0x00, 0x80, 0xc7, 0xbb, 0x59, 0x97]
}

fn guid_bytes(text: &str) -> [u8; 16] {
	let hex: String = text.chars().filter(|ch| *ch != '-').collect();
	let raw: Vec<u8> = (0..16).map(|idx| u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16).expect("hex")).collect();
	[
		raw[3], raw[2], raw[1], raw[0], raw[5], raw[4], raw[7], raw[6], raw[8], raw[9], raw[10], raw[11], raw[12], raw[13], raw[14], raw[15],
	]
}

fn group(object_id: u32, children: &[u32]) -> Vec<u8> {
	let body = ByteWriter::new().u16(1).u32(0).ids(&[]).u16(1).ids(children).finish();
	element_record(GROUP, 0, object_id, &body)
}

fn partition(object_id: u32, children: &[u32]) -> Vec<u8> {
	let body = ByteWriter::new()
		.u16(1)
		.u32(0)
		.ids(&[])
		.u16(1)
		.ids(children)
		.u32(0)
		.mb_string("wheel.jt")
		.f32s(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0])
		.f32(6.0)
		.u32(8)
		.u32(8)
		.u32(1)
		.u32(1)
		.u32(12)
		.u32(12)
		.finish();
	element_record(PARTITION, 0, object_id, &body)
}

fn string_atom(object_id: u32, value: &str) -> Vec<u8> {
	let body = ByteWriter::new().u16(1).u32(0).u16(1).mb_string(value).finish();
	element_record(STRING_ATOM, 0, object_id, &body)
}

fn late_atom(object_id: u32) -> Vec<u8> {
	let body = ByteWriter::new()
		.u16(1)
		.u32(0)
		.u16(1)
		.raw(&guid_bytes(SHAPE))
		.u32(SHAPE_LOD0_SEGMENT)
		.u32(40)
		.u32(0)
		.finish();
	element_record(LATE_ATOM, 0, object_id, &body)
}

fn scene_payload(nodes: &[Vec<u8>], atoms: &[Vec<u8>], table: &[u8]) -> Vec<u8> {
	let mut bytes = nodes.concat();
	bytes.extend(end_of_elements());
	bytes.extend(atoms.concat());
	bytes.extend(end_of_elements());
	bytes.extend_from_slice(table);
	bytes
}

fn sample_scene() -> Vec<u8> {
	let table = ByteWriter::new()
		.u16(1)
		.u32(2)
		.u32(1)
		.u32(30)
		.u32(31)
		.u32(0)
		.u32(2)
		.u32(32)
		.u32(33)
		.u32(0)
		.finish();
	scene_payload(
		&[partition(1, &[2]), group(2, &[])],
		&[string_atom(30, "Name"), string_atom(31, "wheel"), string_atom(32, "Geometry"), late_atom(33)],
		&table,
	)
}

fn shape_payload() -> Vec<u8> {
	let body = ByteWriter::new().u16(1).u16(1).u64(0).raw(&[12, 6, 8, 8]).raw(&[1, 2, 3]).finish();
	element_record(VERTEX_SHAPE_LOD, 0, 40, &body)
}

fn meta_payload() -> Vec<u8> {
	let body = ByteWriter::new().u16(1).mb_string("Author").u8(1).mb_string("jdoe").mb_string("").finish();
	let mut bytes = element_record(PROPERTY_PROXY, 0, 1, &body);
	bytes.extend(end_of_elements());
	bytes
}

fn sample_container() -> ContainerBuilder {
	ContainerBuilder::new(guid_bytes(ROOT))
		.segment(SegmentSpec::new(guid_bytes(ROOT), LSG_SEGMENT, sample_scene()))
		.segment(SegmentSpec::new(guid_bytes(SHAPE), SHAPE_LOD0_SEGMENT, shape_payload()))
		.segment(SegmentSpec::new(guid_bytes(META), METADATA_SEGMENT, meta_payload()))
}

fn write_container(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, bytes).expect("write container");
	path
}

fn run_jtscene(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_jtscene"))
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.expect("jtscene command executes")
}

fn run_jtscene_json(args: &[&str]) -> serde_json::Value {
	let output = run_jtscene(args);
	assert!(
		output.status.success(),
		"jtscene command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn exit_code(args: &[&str]) -> (Option<i32>, String) {
	let output = run_jtscene(args);
	(output.status.code(), String::from_utf8_lossy(&output.stderr).into_owned())
}

#[test]
fn info_json_lists_header_and_toc() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_container(dir.path(), "sample.jt", &sample_container().build());
	let path = path.to_string_lossy().into_owned();

	let json = run_jtscene_json(&["info", &path, "--json"]);
	assert_eq!(json["version"], "Version 9.5 JT");
	assert_eq!(json["format_version"], "9.5");
	assert_eq!(json["root_segment"], ROOT);
	assert_eq!(json["segment_count"], 3);
	let kinds: Vec<&str> = json["segments"]
		.as_array()
		.expect("segments array")
		.iter()
		.filter_map(|item| item["kind"].as_str())
		.collect();
	assert_eq!(kinds, vec!["lsg", "shape-lod", "metadata"]);
}

#[test]
fn scene_json_reports_tree_properties_and_late_loads() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_container(dir.path(), "sample.jt", &sample_container().build());
	let path = path.to_string_lossy().into_owned();

	let json = run_jtscene_json(&["scene", &path, "--json"]);
	assert_eq!(json["element_count"], 6);
	assert_eq!(json["property_table"]["links"], 2);

	let nodes = json["nodes"].as_array().expect("nodes array");
	assert_eq!(nodes.len(), 2);
	assert_eq!(nodes[0]["type"], "PartitionNode");
	assert_eq!(nodes[0]["depth"], 0);
	assert_eq!(nodes[0]["detail"], "file=wheel.jt");
	assert_eq!(nodes[0]["properties"][0]["key"], "Name");
	assert_eq!(nodes[0]["properties"][0]["value"], "wheel");
	assert_eq!(nodes[1]["object_id"], 2);
	assert_eq!(nodes[1]["depth"], 1);
	assert_eq!(nodes[1]["properties"][0]["key"], "Geometry");

	let late = json["late_loaded"].as_array().expect("late array");
	assert_eq!(late.len(), 1);
	assert_eq!(late[0]["segment_id"], SHAPE);
	assert_eq!(late[0]["kind"], "shape-lod");
	assert_eq!(late[0]["payload_object_id"], 40);
	assert!(json["anomalies"].as_array().is_some_and(|items| items.is_empty()));
}

#[test]
fn segment_json_materializes_shape_and_metadata() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_container(dir.path(), "sample.jt", &sample_container().build());
	let path = path.to_string_lossy().into_owned();

	let shape = run_jtscene_json(&["segment", &path, "--id", SHAPE, "--json"]);
	assert_eq!(shape["kind"], "shape-lod");
	assert!(shape["compression"].is_null());
	assert_eq!(shape["elements"][0]["object_id"], 40);
	assert_eq!(shape["elements"][0]["type"], "VertexShapeLod");

	let meta = run_jtscene_json(&["segment", &path, "--id", META, "--json"]);
	assert_eq!(meta["kind"], "metadata");
	assert_eq!(meta["compression"], "zlib");
	assert_eq!(meta["elements"][0]["value"], "Author=jdoe");
}

#[test]
fn root_missing_from_toc_exits_malformed() {
	let dir = tempfile::tempdir().expect("tempdir");
	let mut builder = sample_container();
	builder.omit_from_toc.push(guid_bytes(ROOT));
	let path = write_container(dir.path(), "orphan.jt", &builder.build());

	let path = path.to_string_lossy().into_owned();
	let (code, stderr) = exit_code(&["scene", &path]);
	assert_eq!(code, Some(4));
	assert!(stderr.starts_with("error:"), "stderr: {stderr}");
}

#[test]
fn unknown_element_type_exits_with_its_own_code() {
	let dir = tempfile::tempdir().expect("tempdir");
	let payload = scene_payload(&[element_record([0x42; 16], 0, 1, &[])], &[], &[]);
	let builder = ContainerBuilder::new(guid_bytes(ROOT)).segment(SegmentSpec::new(guid_bytes(ROOT), LSG_SEGMENT, payload));
	let path = write_container(dir.path(), "unknown.jt", &builder.build());

	let path = path.to_string_lossy().into_owned();
	let (code, _) = exit_code(&["scene", &path]);
	assert_eq!(code, Some(6));
}

#[test]
fn dangling_child_exits_with_reference_code() {
	let dir = tempfile::tempdir().expect("tempdir");
	let table = ByteWriter::new().u16(1).u32(0).finish();
	let payload = scene_payload(&[group(1, &[99])], &[], &table);
	let builder = ContainerBuilder::new(guid_bytes(ROOT)).segment(SegmentSpec::new(guid_bytes(ROOT), LSG_SEGMENT, payload));
	let path = write_container(dir.path(), "dangling.jt", &builder.build());

	let path = path.to_string_lossy().into_owned();
	let (code, stderr) = exit_code(&["scene", &path]);
	assert_eq!(code, Some(8));
	assert!(stderr.contains("dangling child reference"), "stderr: {stderr}");
}

#[test]
fn strict_fields_promotes_leftover_bytes() {
	let dir = tempfile::tempdir().expect("tempdir");
	let padded = ByteWriter::new().u16(1).u32(0).ids(&[]).u16(1).ids(&[]).raw(&[0; 4]).finish();
	let table = ByteWriter::new().u16(1).u32(0).finish();
	let payload = scene_payload(&[element_record(GROUP, 0, 1, &padded)], &[], &table);
	let builder = ContainerBuilder::new(guid_bytes(ROOT)).segment(SegmentSpec::new(guid_bytes(ROOT), LSG_SEGMENT, payload));
	let path = write_container(dir.path(), "padded.jt", &builder.build());
	let path = path.to_string_lossy().into_owned();

	let json = run_jtscene_json(&["scene", &path, "--json"]);
	assert_eq!(json["anomalies"][0]["kind"], "incomplete_field_model");
	assert_eq!(json["anomalies"][0]["leftover"], 4);

	let (code, _) = exit_code(&["scene", &path, "--strict-fields"]);
	assert_eq!(code, Some(7));
}

#[test]
fn length_mismatch_can_be_relaxed() {
	let dir = tempfile::tempdir().expect("tempdir");
	let mut spec = SegmentSpec::new(guid_bytes(ROOT), LSG_SEGMENT, sample_scene());
	spec.logical_len = Some(1);
	let builder = ContainerBuilder::new(guid_bytes(ROOT)).segment(spec);
	let path = write_container(dir.path(), "length.jt", &builder.build());
	let path = path.to_string_lossy().into_owned();

	let (code, _) = exit_code(&["scene", &path]);
	assert_eq!(code, Some(5));

	let json = run_jtscene_json(&["scene", &path, "--json", "--lenient-length"]);
	assert_eq!(json["nodes"].as_array().map(Vec::len), Some(2));
}

#[test]
fn missing_file_exits_io() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("absent.jt");
	let path = path.to_string_lossy().into_owned();
	let (code, _) = exit_code(&["info", &path]);
	assert_eq!(code, Some(3));
}

#[test]
fn malformed_guid_is_a_usage_error() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_container(dir.path(), "sample.jt", &sample_container().build());
	let path = path.to_string_lossy().into_owned();
	let (code, _) = exit_code(&["segment", &path, "--id", "not-a-guid"]);
	assert_eq!(code, Some(2));
}

#[test]
fn verbose_flag_logs_to_stderr() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_container(dir.path(), "sample.jt", &sample_container().build());
	let path = path.to_string_lossy().into_owned();

	let quiet = run_jtscene(&["info", &path, "--json"]);
	assert!(quiet.status.success());
	assert!(!String::from_utf8_lossy(&quiet.stderr).contains("running command"));

	let verbose = run_jtscene(&["info", &path, "--json", "-v"]);
	assert!(verbose.status.success());
	let stderr = String::from_utf8_lossy(&verbose.stderr);
	assert!(stderr.contains("running command"), "stderr: {stderr}");
	assert!(stderr.contains("command=\"info\"") || stderr.contains("command=info"), "stderr: {stderr}");
	serde_json::from_slice::<serde_json::Value>(&verbose.stdout).expect("stdout stays json");
}
