use std::path::PathBuf;

use crate::errors::Error;

/// Matches collected by a search, plus the error that cut it short, if any.
#[derive(Debug, Default)]
pub struct SearchReport {
    pub matches: Vec<PathBuf>,
    pub error: Option<Error>,
}
