use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::{History, Params};

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush a completed run to the given output directory.
///
/// Creates the directory if it does not exist. Writes 2 files:
/// - `history.jsonl` — one HistoryRecord per line, in timestep order
/// - `params.json` — the parameters the run was produced with
pub fn flush_to_jsonl(history: &History, params: &Params, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("history.jsonl"), history.iter())?;

    let mut writer = BufWriter::new(File::create(output_dir.join("params.json"))?);
    serde_json::to_writer_pretty(&mut writer, params)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
