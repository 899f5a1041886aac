//! Deterministic JSON text for identity keys and fingerprints.
//!
//! Output is compact JSON with mapping keys sorted bytewise. Numbers are
//! written exactly as `serde_json` holds them, so 64-bit integers never lose
//! precision and `1` and `1.0` stay distinct, matching [`Value`] equality.
//! Keys are sorted here whether or not `serde_json` was built with
//! `preserve_order`.

use serde_json::Value;

/// Encode `value` as canonical JSON text.
pub(crate) fn to_canonical_string(value: &Value) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value) -> Result<(), serde_json::Error> {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (position, item) in items.iter().enumerate() {
                if position > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|left, right| left.0.cmp(right.0));
            out.push('{');
            for (position, (key, item)) in entries.into_iter().enumerate() {
                if position > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_value(out, item)?;
            }
            out.push('}');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::to_canonical_string;

    #[rstest]
    #[case::sorted_keys(json!({"b": 1, "a": [true, null]}), r#"{"a":[true,null],"b":1}"#)]
    #[case::nested(json!({"z": {"y": 1, "x": 2}}), r#"{"z":{"x":2,"y":1}}"#)]
    #[case::escaped(json!({"q\"": "line\n"}), r#"{"q\"":"line\n"}"#)]
    #[case::large_unsigned(json!(18_446_744_073_709_551_615_u64), "18446744073709551615")]
    #[case::large_signed(json!(-9_007_199_254_740_993_i64), "-9007199254740993")]
    #[case::integer(json!(1), "1")]
    #[case::float(json!(1.0), "1.0")]
    fn encodes_compactly_and_exactly(#[case] value: Value, #[case] expected: &str) -> Result<()> {
        let encoded = to_canonical_string(&value)?;
        ensure!(encoded == expected, "expected {expected}, got {encoded}");
        Ok(())
    }
}
