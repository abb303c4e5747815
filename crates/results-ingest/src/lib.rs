#![deny(unsafe_code)]

pub mod columns;
pub mod extract;
pub mod header;
pub mod reader;
pub mod table;

pub use columns::{HeaderMap, normalize_header, resolve_columns};
pub use extract::{ExtractOutcome, extract_rows};
pub use header::locate_header_row;
pub use reader::{read_csv_sheet, read_excel_sheet, read_sheet};
pub use table::{RawCell, RawRow, format_number};
