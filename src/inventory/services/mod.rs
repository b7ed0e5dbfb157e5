mod row_encoder;
mod row_locator;
mod row_parser;

pub use row_encoder::RowEncoder;
pub use row_locator::RowLocator;
pub use row_parser::{ParsedRows, RowError, RowParser};
