//! Delimited text loading.

mod options;
mod reader;

pub use options::{Encoding, LoadOptions};
pub use reader::{MAX_CSV_FILE_SIZE, read_dataset, read_dataset_from_bytes};
