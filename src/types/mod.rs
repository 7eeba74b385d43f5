pub mod error;
pub mod record;

pub use error::{DotcursorError, IoResultExt, Result};
pub use record::{DirectoryRecord, FileRecord};
