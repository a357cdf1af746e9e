mod csv;
mod jsonl;

pub use csv::{CSV_HEADER, write_csv, write_csv_to};
pub use jsonl::flush_to_jsonl;
