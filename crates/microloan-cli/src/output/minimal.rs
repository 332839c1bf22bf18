use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Quotes print the monthly installment (or the first warning while the
/// quote is not ready); other envelopes fall back to the first field.
pub fn print_minimal(value: &Value) {
    if let Some(line) = quote_line(value) {
        println!("{}", line);
        return;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result").or_else(|| m.get("template_params")))
        .unwrap_or(value);

    let priority_keys = ["monthly_installment", "total_repayable", "kind"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn quote_line(value: &Value) -> Option<String> {
    let envelope = value.as_object()?;
    let result = envelope.get("result")?.as_object()?;
    let ready = result.get("ready")?.as_bool()?;
    if ready {
        let shown = envelope
            .get("display")
            .and_then(|d| d.get("monthly_installment"))
            .or_else(|| result.get("monthly_installment"))?;
        return Some(format_minimal(shown));
    }
    let first_warning = envelope.get("warnings")?.as_array()?.first()?;
    Some(format!("not ready: {}", format_minimal(first_warning)))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
