use jtscene::jt::element::metadata::MetaValue;
use jtscene::jt::element::property::LateLoadRef;
use jtscene::jt::{Anomaly, DecodeOptions, Element, ElementBody, Guid, JtError, SegmentKind};

/// Decode switches shared by commands that decode segments.
#[derive(clap::Args)]
pub struct DecodeArgs {
	/// Accept inflated payloads whose length differs from the segment header.
	#[arg(long)]
	pub lenient_length: bool,
	/// Fail on element records that leave bytes unread.
	#[arg(long)]
	pub strict_fields: bool,
}

impl DecodeArgs {
	pub(crate) fn options(&self) -> DecodeOptions {
		DecodeOptions {
			strict_length: !self.lenient_length,
			strict_fields: self.strict_fields,
			..DecodeOptions::default()
		}
	}
}

/// Parse a GUID argument in `8-4-4-4-12` form.
pub(crate) fn parse_guid(value: &str) -> Result<Guid, JtError> {
	value.parse()
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

/// Render a segment kind label for a raw type code.
pub(crate) fn kind_label(code: u32) -> &'static str {
	SegmentKind::from_code(code).map(SegmentKind::as_str).unwrap_or("unknown")
}

/// Short display value for property atoms and metadata bags.
pub(crate) fn atom_value(element: &Element) -> Option<String> {
	match &element.body {
		ElementBody::StringPropertyAtom(atom) => Some(atom.value.clone()),
		ElementBody::FloatingPointPropertyAtom(atom) => Some(atom.value.to_string()),
		ElementBody::LateLoadedPropertyAtom(atom) => Some(late_label(&atom.reference)),
		ElementBody::PropertyProxyMetaData(bag) => Some(
			bag.properties
				.iter()
				.map(|(key, value)| format!("{key}={}", meta_label(value)))
				.collect::<Vec<_>>()
				.join(", "),
		),
		_ => None,
	}
}

fn meta_label(value: &MetaValue) -> String {
	match value {
		MetaValue::String(text) => text.clone(),
		MetaValue::I32(number) => number.to_string(),
		MetaValue::F32(number) => number.to_string(),
		MetaValue::Date(date) => format!(
			"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
			date.year, date.month, date.day, date.hour, date.minute, date.second
		),
	}
}

/// Render a late-load reference target.
pub(crate) fn late_label(reference: &LateLoadRef) -> String {
	format!("late:{}#{}", reference.segment_id, reference.payload_object_id)
}

#[derive(serde::Serialize)]
pub(crate) struct AnomalyJson {
	pub kind: &'static str,
	pub type_name: &'static str,
	pub object_id: u32,
	pub leftover: usize,
}

pub(crate) fn anomalies_json(anomalies: &[Anomaly]) -> Vec<AnomalyJson> {
	anomalies
		.iter()
		.map(|anomaly| match anomaly {
			Anomaly::IncompleteFieldModel {
				type_name,
				object_id,
				leftover,
			} => AnomalyJson {
				kind: "incomplete_field_model",
				type_name: *type_name,
				object_id: *object_id,
				leftover: *leftover,
			},
		})
		.collect()
}

pub(crate) fn print_anomalies(anomalies: &[Anomaly]) {
	println!("anomalies: {}", anomalies.len());
	for anomaly in anomalies {
		let Anomaly::IncompleteFieldModel {
			type_name,
			object_id,
			leftover,
		} = anomaly;
		println!("  incomplete_field_model {type_name} #{object_id} leftover={leftover}");
	}
}
