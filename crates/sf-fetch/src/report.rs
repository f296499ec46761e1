//! Human-readable output of a fetched record.

use crate::client::Record;
use serde_json::Value;
use std::io::{self, Write};

/// Write the raw body, then `Id` and each requested field on its own line.
///
/// ```text
/// {"Id":"001Dn00000Gi7HJIAZ","Name":"Acme",...}
/// Account Id = 001Dn00000Gi7HJIAZ
/// Name = Acme
/// AccountNumber = AN-1
/// ```
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_record<W: Write>(out: &mut W, resource_type: &str, record: &Record) -> io::Result<()> {
    writeln!(out, "{}", record.raw)?;
    writeln!(out, "{resource_type} Id = {}", record.id)?;
    for (name, value) in &record.fields {
        writeln!(out, "{name} = {}", display_value(value))?;
    }
    Ok(())
}

// Strings print bare; everything else keeps its JSON form.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_record() {
        let body = json!({"Id": "001Dn00000Gi7HJIAZ", "AccountNumber": "AN-1", "Name": "Acme"});
        let record = Record::from_body(
            body,
            &["Name".to_string(), "AccountNumber".to_string()],
        )
        .unwrap();

        let mut out = Vec::new();
        write_record(&mut out, "Account", &record).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(text.starts_with('{'));
        assert!(text.contains("\"Name\":\"Acme\""));
        assert!(text.ends_with(
            "Account Id = 001Dn00000Gi7HJIAZ\nName = Acme\nAccountNumber = AN-1\n"
        ));
    }

    #[test]
    fn test_display_value_non_strings() {
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&json!(true)), "true");
    }
}
