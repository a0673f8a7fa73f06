//! Minimal CSV writer for the export tables.

use std::io::{self, Write};

/// Quote a field when it holds a delimiter, quote, or line break
pub fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write one header line followed by one line per record
pub fn write_table<W, I>(out: &mut W, header: &[&str], rows: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    writeln!(out, "{}", header.join(","))?;
    let mut written = 0;
    for row in rows {
        let line: Vec<String> = row.iter().map(|f| escape(f)).collect();
        writeln!(out, "{}", line.join(","))?;
        written += 1;
    }
    Ok(written)
}
