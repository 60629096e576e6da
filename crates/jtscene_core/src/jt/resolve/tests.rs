use jtscene_testkit::{ByteWriter, element_record, end_of_elements};

use crate::jt::bytes::Cursor;
use crate::jt::resolve::{apply_property_table, read_element_list, resolve_structure};
use crate::jt::{Anomaly, DecodeOptions, ElementBody, ElementType, ErrorKind, JtError, Registry};

fn group(object_id: u32, attributes: &[u32], children: &[u32]) -> Vec<u8> {
	let body = ByteWriter::new().u16(1).u32(0).ids(attributes).u16(1).ids(children).finish();
	element_record(ElementType::GroupNode.guid().to_bytes_le(), 0, object_id, &body)
}

fn instance(object_id: u32, child: u32) -> Vec<u8> {
	let body = ByteWriter::new().u16(1).u32(0).ids(&[]).u16(1).u32(child).finish();
	element_record(ElementType::InstanceNode.guid().to_bytes_le(), 0, object_id, &body)
}

fn atom(object_id: u32) -> Vec<u8> {
	let body = ByteWriter::new().u16(1).u32(0).finish();
	element_record(ElementType::BasePropertyAtom.guid().to_bytes_le(), 0, object_id, &body)
}

fn list(records: &[Vec<u8>]) -> Vec<u8> {
	let mut bytes: Vec<u8> = records.concat();
	bytes.extend(end_of_elements());
	bytes
}

fn load(bytes: &[u8]) -> Registry {
	let mut registry = Registry::new();
	let mut anomalies = Vec::new();
	let mut cursor = Cursor::new(bytes);
	read_element_list(&mut cursor, &mut registry, &DecodeOptions::default(), &mut anomalies).expect("element list");
	assert!(anomalies.is_empty());
	registry
}

#[test]
fn children_resolve_in_declared_order_with_forward_refs() {
	let bytes = list(&[group(1, &[], &[4, 2, 3]), atom(2), atom(3), atom(4)]);
	let mut registry = load(&bytes);
	resolve_structure(&mut registry).expect("resolve");

	let root = registry.by_id(1).expect("root");
	let group = root.body.group().expect("group fields");
	let ids: Vec<u32> = group.children.iter().map(|child| registry.get(*child).object_id).collect();
	assert_eq!(ids, vec![4, 2, 3]);
}

#[test]
fn attributes_and_instance_child_resolve() {
	let bytes = list(&[group(1, &[9], &[5]), instance(5, 1), atom(9)]);
	let mut registry = load(&bytes);
	resolve_structure(&mut registry).expect("resolve");

	let root = registry.by_id(1).expect("root");
	let attrs = &root.body.base_node().expect("base").attributes;
	assert_eq!(attrs.len(), 1);
	assert_eq!(registry.get(attrs[0]).object_id, 9);

	let ElementBody::InstanceNode(node) = &registry.by_id(5).expect("instance").body else {
		panic!("expected instance node");
	};
	assert_eq!(node.child, registry.lookup(1));
}

#[test]
fn missing_child_is_dangling() {
	let bytes = list(&[group(1, &[], &[2, 77])]);
	let mut registry = load(&bytes);
	let err = resolve_structure(&mut registry).expect_err("dangling child");
	assert!(matches!(
		err,
		JtError::DanglingReference {
			from: 1,
			target: 2,
			relation: "child"
		}
	));
	assert_eq!(err.kind(), ErrorKind::DanglingReference);
}

#[test]
fn duplicate_ids_abort_the_list() {
	let bytes = list(&[atom(3), atom(3)]);
	let mut registry = Registry::new();
	let mut anomalies = Vec::new();
	let err = read_element_list(&mut Cursor::new(&bytes), &mut registry, &DecodeOptions::default(), &mut anomalies).expect_err("duplicate");
	assert!(matches!(err, JtError::DuplicateObjectId { object_id: 3 }));
}

#[test]
fn leftover_bytes_are_anomalies_unless_strict() {
	let body = ByteWriter::new().u16(1).u32(0).raw(&[0xaa; 3]).finish();
	let bytes = list(&[element_record(ElementType::BasePropertyAtom.guid().to_bytes_le(), 0, 8, &body)]);

	let mut registry = Registry::new();
	let mut anomalies = Vec::new();
	let count = read_element_list(&mut Cursor::new(&bytes), &mut registry, &DecodeOptions::default(), &mut anomalies).expect("lenient");
	assert_eq!(count, 1);
	assert_eq!(
		anomalies,
		vec![Anomaly::IncompleteFieldModel {
			type_name: "BasePropertyAtom",
			object_id: 8,
			leftover: 3,
		}]
	);

	let strict = DecodeOptions {
		strict_fields: true,
		..DecodeOptions::default()
	};
	let err = read_element_list(&mut Cursor::new(&bytes), &mut Registry::new(), &strict, &mut Vec::new()).expect_err("strict");
	assert_eq!(err.kind(), ErrorKind::IncompleteFieldModel);
}

#[test]
fn property_chain_builds_one_entry_per_pair() {
	let bytes = list(&[atom(1), atom(5), atom(7), atom(9), atom(11)]);
	let mut registry = load(&bytes);
	resolve_structure(&mut registry).expect("resolve");

	let table = ByteWriter::new().u16(1).u32(1).u32(1).u32(5).u32(7).u32(9).u32(11).u32(0).finish();
	let summary = apply_property_table(&mut Cursor::new(&table), &mut registry).expect("table");
	assert_eq!(summary.version, 1);
	assert_eq!(summary.entries, 1);
	assert_eq!(summary.links, 2);

	let owner = registry.by_id(1).expect("owner");
	let pairs: Vec<(u32, u32)> = owner
		.properties
		.iter()
		.map(|(key, value)| (registry.get(*key).object_id, registry.get(*value).object_id))
		.collect();
	assert_eq!(pairs, vec![(5, 7), (9, 11)]);
	assert!(registry.by_id(5).expect("key").properties.is_empty());
}

fn owner_pairs(registry: &Registry, owner: u32) -> Vec<(u32, u32)> {
	registry
		.by_id(owner)
		.expect("owner")
		.properties
		.iter()
		.map(|(key, value)| (registry.get(*key).object_id, registry.get(*value).object_id))
		.collect()
}

#[test]
fn property_entries_are_independent_of_table_order() {
	let records = [atom(1), atom(3), atom(5), atom(7), atom(9), atom(11)];
	let forward = ByteWriter::new().u16(1).u32(2).u32(1).u32(5).u32(7).u32(0).u32(3).u32(9).u32(11).u32(0).finish();
	let reversed = ByteWriter::new().u16(1).u32(2).u32(3).u32(9).u32(11).u32(0).u32(1).u32(5).u32(7).u32(0).finish();

	let mut in_order = load(&list(&records));
	let mut out_of_order = load(&list(&records));
	apply_property_table(&mut Cursor::new(&forward), &mut in_order).expect("forward table");
	let summary = apply_property_table(&mut Cursor::new(&reversed), &mut out_of_order).expect("reversed table");
	assert_eq!(summary.entries, 2);
	assert_eq!(summary.links, 2);

	assert_eq!(owner_pairs(&out_of_order, 1), vec![(5, 7)]);
	assert_eq!(owner_pairs(&out_of_order, 3), vec![(9, 11)]);
	for owner in [1, 3] {
		assert_eq!(owner_pairs(&in_order, owner), owner_pairs(&out_of_order, owner));
	}
}

#[test]
fn property_value_must_exist() {
	let bytes = list(&[atom(1), atom(5)]);
	let mut registry = load(&bytes);

	let table = ByteWriter::new().u16(1).u32(1).u32(1).u32(5).u32(6).u32(0).finish();
	let err = apply_property_table(&mut Cursor::new(&table), &mut registry).expect_err("dangling value");
	assert!(matches!(
		err,
		JtError::DanglingReference {
			from: 1,
			target: 6,
			relation: "property value"
		}
	));
}

#[test]
fn property_owner_must_exist() {
	let mut registry = load(&list(&[atom(1)]));
	let table = ByteWriter::new().u16(1).u32(1).u32(42).u32(0).finish();
	let err = apply_property_table(&mut Cursor::new(&table), &mut registry).expect_err("dangling owner");
	assert!(matches!(err, JtError::DanglingReference { target: 42, relation: "property owner", .. }));
}

#[test]
fn truncated_property_table_is_eof() {
	let mut registry = load(&list(&[atom(1), atom(5)]));
	let table = ByteWriter::new().u16(1).u32(1).u32(1).u32(5).finish();
	let err = apply_property_table(&mut Cursor::new(&table), &mut registry).expect_err("truncated");
	assert!(matches!(err, JtError::UnexpectedEof { .. }));
}
