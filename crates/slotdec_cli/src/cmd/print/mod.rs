use std::fmt::Write as _;

use slotdec::data::Value;

use crate::cmd::util::truncate;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/structs.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree to stdout.
pub fn print_value(value: &Value, indent: usize, options: PrintOptions) {
	print!("{}", render_value(value, indent, options));
}

/// Render one decoded value tree as indented text.
pub fn render_value(value: &Value, indent: usize, options: PrintOptions) -> String {
	let mut out = String::new();
	render_into(&mut out, value, indent, 0, options);
	out
}

fn render_into(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Absent => {
			let _ = writeln!(out, "{pad}<absent>");
		}
		Value::Unrecognized => {
			let _ = writeln!(out, "{pad}<unrecognized>");
		}
		Value::Bool(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::Uint(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::Int(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::Address(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::String(v) => {
			let _ = writeln!(out, "{pad}\"{}\"", truncate(v, options.max_string_len));
		}
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}[... {} items]", items.len());
				return;
			}
			let _ = writeln!(out, "{pad}[");
			for item in items.iter().take(options.max_array_items) {
				render_into(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				let _ = writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items);
			}
			let _ = writeln!(out, "{pad}]");
		}
		Value::Struct(item) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{} {{ ... }}", item.type_name);
				return;
			}
			let _ = writeln!(out, "{pad}{} {{", item.type_name);
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				let _ = write!(out, "{pad}  {} = ", field.name);
				if matches!(field.value, Value::Struct(_) | Value::Array(_)) {
					out.push('\n');
					render_into(out, &field.value, indent + 4, depth + 1, options);
				} else {
					render_into(out, &field.value, 0, depth + 1, options);
				}
			}
			if item.fields.len() > options.max_fields_per_struct {
				let _ = writeln!(out, "{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_struct);
			}
			let _ = writeln!(out, "{pad}}}");
		}
	}
}

/// Convert a decoded value into JSON, keeping 256-bit integers as decimal strings.
pub fn value_to_json_value(value: &Value) -> serde_json::Value {
	use serde_json::{Map, Value as JsonValue};

	match value {
		Value::Absent => JsonValue::Null,
		Value::Unrecognized => serde_json::json!({ "unrecognized": true }),
		Value::Bool(v) => serde_json::json!(v),
		Value::Uint(v) => serde_json::json!(v.to_string()),
		Value::Int(v) => serde_json::json!(v.to_string()),
		Value::Address(v) => serde_json::json!(v.as_ref()),
		Value::String(v) => serde_json::json!(v.as_ref()),
		Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json_value).collect()),
		Value::Struct(item) => {
			let fields: Map<String, JsonValue> = item
				.fields
				.iter()
				.map(|field| (field.name.to_string(), value_to_json_value(&field.value)))
				.collect();

			let mut out = Map::new();
			out.insert("type".to_owned(), serde_json::json!(item.type_name.as_ref()));
			out.insert("fields".to_owned(), JsonValue::Object(fields));
			JsonValue::Object(out)
		}
	}
}
