use crate::error::Result;
use std::io::prelude::*;
use std::path::Path;

#[derive(Debug)]
pub struct DataFile {
    buf: String,
}

impl DataFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DataFile> {
        let mut file = std::fs::File::open(path)?;
        DataFile::from_reader(&mut file)
    }

    pub fn from_reader<B: Read>(reader: &mut B) -> Result<DataFile> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(DataFile { buf: String::from_utf8_lossy(&buf).into_owned() })
    }

    pub fn text(&self) -> &str {
        &self.buf
    }
}

const HEADER_PREFIX: &str = "name,code";
const SEPARATOR_PREFIX: &str = "-----";

/// Comma separated records of a turnpoint file, skipping blank lines, the
/// header row and separator rows.
pub fn records(text: &str) -> RecordIter<'_> {
    RecordIter {
        lines: text.lines().enumerate(),
    }
}

use std::iter::Enumerate;
use std::str::Lines;
pub struct RecordIter<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Record<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (i, line) = self.lines.next()?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(HEADER_PREFIX) || line.starts_with(SEPARATOR_PREFIX) {
                continue;
            }
            break Some(Record {
                line: i + 1,
                fields: line.split(',').map(|f| f.trim().trim_matches('"')).collect::<Vec<_>>(),
            });
        }
    }
}

#[derive(Debug)]
pub struct Record<'a> {
    pub line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&'a str> {
        self.fields.get(i).copied()
    }
}

use std::ops::Index;
impl<'a> Index<usize> for Record<'a> {
    type Output = &'a str;

    fn index(&self, i: usize) -> &Self::Output {
        &self.fields[i]
    }
}
