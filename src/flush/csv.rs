use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::History;

pub const CSV_HEADER: &str = "t,M,L,U,S,C,R,repression,legitimacy,shock";

/// Write the history as a CSV table, one row per timestep.
///
/// Column names follow the faction/institution letters; `shock` is
/// `True`/`False` so the file loads the same way as earlier exports.
pub fn write_csv(history: &History, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv_to(history, &mut writer)?;
    writer.flush()
}

/// Same layout as [`write_csv`] into any writer.
pub fn write_csv_to<W: Write>(history: &History, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for r in history {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{}",
            r.t,
            r.m,
            r.l,
            r.u,
            r.s,
            r.c,
            r.r,
            r.repression,
            r.legitimacy,
            if r.shock_occurred { "True" } else { "False" },
        )?;
    }
    Ok(())
}
