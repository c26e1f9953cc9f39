//! Delimited file reading into a polars `DataFrame`.

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

use super::options::{Encoding, LoadOptions};

/// Maximum file size for loading (500 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads a delimited file from disk.
///
/// # Errors
///
/// Fails when the file is missing, too large, not decodable in the requested
/// encoding, empty, or not parseable with the requested separator.
pub fn read_dataset(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    check_file_size(path, MAX_CSV_FILE_SIZE)?;
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    read_dataset_from_bytes(&bytes, options, &path.display().to_string())
}

/// Reads a delimited file that is already in memory, such as an upload.
///
/// `source_name` only appears in errors and logs.
pub fn read_dataset_from_bytes(
    bytes: &[u8],
    options: &LoadOptions,
    source_name: &str,
) -> Result<DataFrame> {
    let start = Instant::now();
    let text = decode(bytes, options.encoding, source_name)?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            source_name: source_name.to_string(),
        });
    }

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .with_parse_options(CsvParseOptions::default().with_separator(options.separator))
        .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
        .finish()
        .map_err(parse_error)?;

    validate_dataframe_shape(&df, source_name)?;
    info!(
        source = %source_name,
        rows = df.height(),
        columns = df.width(),
        separator = %char::from(options.separator).escape_default(),
        encoding = %options.encoding,
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(df)
}

fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Decodes raw bytes, rejecting UTF-16 input outright.
fn decode<'a>(bytes: &'a [u8], encoding: Encoding, source_name: &str) -> Result<Cow<'a, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            source_name: source_name.to_string(),
            encoding: "UTF-16",
        });
    }
    match encoding {
        Encoding::Utf8 => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(body)
                .ok_or_else(|| IngestError::Decode {
                    source_name: source_name.to_string(),
                    encoding: encoding.name(),
                })
        }
        Encoding::Latin1 => {
            let (text, had_errors) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            if had_errors {
                debug!(source = %source_name, "replacement characters while decoding Latin-1");
            }
            Ok(text)
        }
    }
}

/// Rejects frames that cannot be mapped: no rows or blank column names.
fn validate_dataframe_shape(df: &DataFrame, source_name: &str) -> Result<()> {
    if df.width() == 0 || df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            source_name: source_name.to_string(),
        });
    }
    if df.width() == 1 {
        warn!(
            source = %source_name,
            "dataset has a single column - is the separator right?"
        );
    }
    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                source_name: source_name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_strips_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFsector\nzorg\n";
        let text = decode(bytes, Encoding::Utf8, "test").unwrap();
        assert!(text.starts_with("sector"));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let bytes = b"regio\nFrysl\xE2n\n";
        let err = decode(bytes, Encoding::Utf8, "test").unwrap_err();
        assert!(matches!(err, IngestError::Decode { .. }));
    }

    #[test]
    fn decode_latin1_accepts_any_byte() {
        let bytes = b"regio\nFrysl\xE2n\n";
        let text = decode(bytes, Encoding::Latin1, "test").unwrap();
        assert!(text.contains("Fryslân"));
    }

    #[test]
    fn decode_rejects_utf16_bom() {
        let err = decode(&[0xFF, 0xFE, b'a', 0], Encoding::Utf8, "test").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn reads_semicolon_separated_bytes() {
        let bytes = b"SECTOR;AANTAL\nzorg;10\nict;5\n";
        let options = LoadOptions::default().with_separator(b';');
        let df = read_dataset_from_bytes(bytes, &options, "upload").unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert!(df.column("AANTAL").unwrap().dtype().is_integer());
    }

    #[test]
    fn empty_input_is_reported() {
        let err = read_dataset_from_bytes(b"  \n", &LoadOptions::default(), "upload").unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }

    #[test]
    fn header_only_input_is_empty() {
        let err =
            read_dataset_from_bytes(b"A,B\n", &LoadOptions::default(), "upload").unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }
}
