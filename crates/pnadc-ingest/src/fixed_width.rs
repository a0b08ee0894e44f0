//! Fixed-width extraction into raw text columns.
//!
//! Each data line is sliced by byte range, decoded with the configured
//! encoding and trimmed. Blank fields become nulls and empty lines are
//! skipped. Lines are gathered in
//! chunks and each chunk is appended to the output frame, so memory use is
//! bounded by the chunk size plus the output itself; the result does not
//! depend on the chunk size.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use polars::prelude::*;
use tracing::{debug, trace};

use pnadc_model::ReaderOptions;

use crate::error::{LoadError, MicrodataParseError, Result};
use crate::fields::FieldDescriptor;

/// Reads fixed-width records into a frame of `String` columns.
#[derive(Debug)]
pub struct FixedWidthReader<'a> {
    fields: &'a [FieldDescriptor],
    encoding: &'static Encoding,
    row_limit: Option<usize>,
    chunk_size: usize,
    /// Field with the largest end offset; every line must reach it.
    widest: Option<&'a FieldDescriptor>,
}

impl<'a> FixedWidthReader<'a> {
    pub fn new(fields: &'a [FieldDescriptor], options: &ReaderOptions) -> Result<Self> {
        Ok(Self {
            fields,
            encoding: resolve_encoding(options.encoding.as_deref())?,
            row_limit: options.row_limit,
            chunk_size: options.effective_chunk_size(),
            widest: fields.iter().max_by_key(|field| field.end()),
        })
    }

    /// Minimum line length in bytes.
    pub fn required_length(&self) -> usize {
        self.widest.map_or(0, FieldDescriptor::end)
    }

    /// Read a file. The handle is dropped when this returns, on success or error.
    pub fn read_path(&self, path: &Path) -> Result<DataFrame> {
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    pub fn read<R: BufRead>(&self, mut reader: R) -> Result<DataFrame> {
        let required = self.required_length();
        let mut frame = self.chunk_frame(&mut self.empty_buffers())?;
        let mut buffers = self.empty_buffers();
        let mut line = Vec::new();
        let mut line_number = 0usize;
        let mut records = 0usize;
        let mut pending = 0usize;

        loop {
            if self.row_limit.is_some_and(|limit| records >= limit) {
                break;
            }
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_number += 1;
            strip_line_ending(&mut line);
            if line.is_empty() {
                trace!(line = line_number, "skipped empty line");
                continue;
            }

            if line.len() < required {
                return Err(MicrodataParseError::LineTooShort {
                    line: line_number,
                    length: line.len(),
                    required,
                    column: self.widest.map(|f| f.name.clone()).unwrap_or_default(),
                }
                .into());
            }
            for (field, buffer) in self.fields.iter().zip(buffers.iter_mut()) {
                buffer.push(self.decode(&line[field.offset..field.end()]));
            }
            records += 1;
            pending += 1;

            if pending == self.chunk_size {
                frame.vstack_mut(&self.chunk_frame(&mut buffers)?)?;
                trace!(records, "appended chunk");
                pending = 0;
            }
        }
        if pending > 0 {
            frame.vstack_mut(&self.chunk_frame(&mut buffers)?)?;
        }
        debug!(
            lines = line_number,
            records,
            columns = self.fields.len(),
            encoding = self.encoding.name(),
            "fixed-width extraction finished"
        );
        Ok(frame)
    }

    fn empty_buffers(&self) -> Vec<Vec<Option<String>>> {
        self.fields
            .iter()
            .map(|_| Vec::with_capacity(self.chunk_size.min(8192)))
            .collect()
    }

    /// Move buffered values into a frame, leaving the buffers empty.
    fn chunk_frame(&self, buffers: &mut [Vec<Option<String>>]) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .fields
            .iter()
            .zip(buffers.iter_mut())
            .map(|(field, buffer)| {
                Series::new(field.name.as_str().into(), std::mem::take(buffer)).into_column()
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, _) = self.encoding.decode_without_bom_handling(bytes);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Look up a WHATWG encoding label; UTF-8 when none is given.
pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        None => Ok(UTF_8),
        Some(label) => Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            LoadError::UnsupportedEncoding {
                label: label.to_string(),
            }
        }),
    }
}

fn strip_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}
