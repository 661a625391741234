//! CLI command handlers module
//!
//! - analyze: single review
//! - batch: CSV column analysis
//! - wordcloud: word cloud from a text file
//! - serve: API server
//! - info: configuration display

pub mod analyze;
pub mod batch;
pub mod info;
pub mod serve;
pub mod wordcloud;

pub use analyze::*;
pub use batch::*;
pub use info::*;
pub use serve::*;
pub use wordcloud::*;

use std::io::Read;
use std::path::Path;

use crate::Result;

/// Read a text input file, or stdin when the path is "-"
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
