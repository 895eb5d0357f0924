use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
    #[error("line {line} is not valid UTF-8")]
    Encoding { line: usize },
    #[error("line {line} is malformed: {content:?}")]
    Malformed { line: usize, content: String },
}
