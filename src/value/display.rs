// Mon Oct 19 2026 - Alex

use crate::value::Value;
use ahash::AHashSet;
use std::fmt;

/// Short human-readable rendering used in traces and failure reports.
///
/// Composites render as `{ Name: value, ... }`, sequences as `[a, b]`. A reference
/// already being rendered higher up prints as `<circular>`.
pub fn to_primitive_string(value: &Value) -> String {
    let mut out = String::new();
    let mut visiting = AHashSet::new();
    render(value, &mut out, &mut visiting);
    out
}

fn render(value: &Value, out: &mut String, visiting: &mut AHashSet<usize>) {
    use std::fmt::Write;

    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        Value::Char(v) => {
            let _ = write!(out, "'{}'", v);
        }
        Value::Str(v) | Value::Uri(v) => {
            let _ = write!(out, "{:?}", v);
        }
        Value::DateTime(v) => {
            let _ = write!(out, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f"));
        }
        Value::DateTimeOffset(v) => out.push_str(&v.to_rfc3339()),
        Value::Duration(v) => {
            let _ = write!(out, "{}", v);
        }
        Value::Guid(v) => {
            let _ = write!(out, "{}", v.hyphenated());
        }
        Value::I8(v) => push_display(out, v),
        Value::I16(v) => push_display(out, v),
        Value::I32(v) => push_display(out, v),
        Value::I64(v) => push_display(out, v),
        Value::U8(v) => push_display(out, v),
        Value::U16(v) => push_display(out, v),
        Value::U32(v) => push_display(out, v),
        Value::U64(v) => push_display(out, v),
        Value::F32(v) => push_display(out, v),
        Value::F64(v) => push_display(out, v),
        Value::Decimal(v) => push_display(out, v),
        Value::Enum(v) => {
            let _ = write!(out, "{}.{}", v.runtime_type().name(), v.name());
        }
        Value::Record(_) | Value::Object(_) | Value::Seq(_) => render_composite(value, out, visiting),
    }
}

fn push_display(out: &mut String, value: &impl fmt::Display) {
    use std::fmt::Write;
    let _ = write!(out, "{}", value);
}

fn render_composite(value: &Value, out: &mut String, visiting: &mut AHashSet<usize>) {
    let id = value.reference_id();
    if let Some(id) = id {
        if !visiting.insert(id) {
            out.push_str("<circular>");
            return;
        }
    }

    match value {
        Value::Seq(seq) => {
            out.push('[');
            for (i, item) in seq.items().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render(item, out, visiting);
            }
            out.push(']');
        }
        Value::Record(instance) | Value::Object(instance) => {
            let members = instance.runtime_type().data_members();
            if members.is_empty() {
                out.push_str("{}");
            } else {
                out.push_str("{ ");
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(member.name());
                    out.push_str(": ");
                    let member_value = member.get(value).unwrap_or(Value::Null);
                    render(&member_value, out, visiting);
                }
                out.push_str(" }");
            }
        }
        _ => {}
    }

    if let Some(id) = id {
        visiting.remove(&id);
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_primitive_string(self))
    }
}
