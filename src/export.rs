//! CSV export of waveform captures
//!
//! One persisted artifact: `Time,Amplitude` rows in time order, with the
//! `eye_diagram_<scheme>_<bitRate>bps.csv` filename convention. The
//! parser exists so exported captures round-trip deterministically.

use std::io::Write;
use std::path::Path;

use crate::error::{EyeSimError, Result};
use crate::linecode::LineCode;
use crate::types::Waveform;

/// CSV column header
pub const CSV_HEADER: &str = "Time,Amplitude";

/// Conventional filename for an exported capture
pub fn export_filename(line_code: LineCode, bit_rate: f64) -> String {
    format!("eye_diagram_{}_{}bps.csv", line_code.as_str(), bit_rate)
}

/// Render a waveform as CSV text
pub fn csv_string(waveform: &Waveform) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + waveform.len() * 24);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for (t, a) in waveform.time_axis.iter().zip(&waveform.samples) {
        out.push_str(&format!("{},{}\n", t, a));
    }
    out
}

/// Write a waveform as CSV to any writer
pub fn write_csv<W: Write>(writer: &mut W, waveform: &Waveform) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for (t, a) in waveform.time_axis.iter().zip(&waveform.samples) {
        writeln!(writer, "{},{}", t, a)?;
    }
    Ok(())
}

/// Write a waveform as a CSV file
pub fn write_csv_file<P: AsRef<Path>>(path: P, waveform: &Waveform) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_csv(&mut writer, waveform)?;
    writer.flush()?;
    Ok(())
}

/// Parse CSV text produced by [`csv_string`] back into a waveform.
///
/// The header is required; each remaining non-empty line must hold two
/// comma-separated floats. Order is preserved.
pub fn parse_csv(content: &str) -> Result<Waveform> {
    let mut lines = content.lines();
    match lines.next() {
        Some(header) if header.trim() == CSV_HEADER => {}
        other => {
            return Err(EyeSimError::ParseError(format!(
                "expected '{}' header, got {:?}",
                CSV_HEADER, other
            )))
        }
    }

    let mut time_axis = Vec::new();
    let mut samples = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (t, a) = line.split_once(',').ok_or_else(|| {
            EyeSimError::ParseError(format!("line {}: missing ',' separator", index + 2))
        })?;
        let t: f64 = t.trim().parse().map_err(|e| {
            EyeSimError::ParseError(format!("line {}: bad time value: {}", index + 2, e))
        })?;
        let a: f64 = a.trim().parse().map_err(|e| {
            EyeSimError::ParseError(format!("line {}: bad amplitude value: {}", index + 2, e))
        })?;
        time_axis.push(t);
        samples.push(a);
    }

    Ok(Waveform { samples, time_axis })
}
