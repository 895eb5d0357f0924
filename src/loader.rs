use std::path::Path;

use bytes::BytesMut;
use log::{debug, info};
use tokio::fs::File;
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, FramedRead};

use crate::{course::CourseRecord, error::LoadError, parser::parse_course};

static BUFFER_SIZE: usize = 64 * 1024;

/// Splits a byte stream into course records, one per line.
#[derive(Debug, Default)]
pub struct CourseDecoder {
    line: usize,
}

impl CourseDecoder {
    fn parse_line(&mut self, raw: &[u8]) -> Result<Option<CourseRecord>, LoadError> {
        self.line += 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.iter().all(u8::is_ascii_whitespace) {
            debug!("skipping blank line {}", self.line);
            return Ok(None);
        }
        let text = std::str::from_utf8(raw).map_err(|_| LoadError::Encoding { line: self.line })?;
        match parse_course(text) {
            Some(record) => Ok(Some(record)),
            None => Err(LoadError::Malformed {
                line: self.line,
                content: text.to_string(),
            }),
        }
    }
}

impl Decoder for CourseDecoder {
    type Item = CourseRecord;
    type Error = LoadError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(index) = memchr::memchr(b'\n', src) {
            let line = src.split_to(index + 1);
            if let Some(record) = self.parse_line(&line[..index])? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(record) = self.decode(src)? {
            return Ok(Some(record));
        }
        if src.is_empty() {
            return Ok(None);
        }
        let line = src.split_to(src.len());
        self.parse_line(&line)
    }
}

/// Reads every record from `path`. Nothing is returned unless the whole file parses.
pub async fn read_courses(path: &Path) -> Result<Vec<CourseRecord>, LoadError> {
    let file = File::open(path).await.map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut framed = FramedRead::with_capacity(file, CourseDecoder::default(), BUFFER_SIZE);
    let mut records = Vec::new();
    while let Some(record) = framed.next().await {
        records.push(record?);
    }
    info!("read {} courses from {}", records.len(), path.display());
    Ok(records)
}

/// Blocking entry point for [`read_courses`].
#[tokio::main]
pub async fn load_courses(path: &Path) -> Result<Vec<CourseRecord>, LoadError> {
    read_courses(path).await
}
