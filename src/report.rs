use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    record::Record,
};

/// Appends query results to a report file.
///
/// The file is opened for each query and closed again once that query's
/// block (result lines plus a blank line) has been written.
#[derive(Clone, Debug)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empties the report file, creating it if needed.
    pub fn truncate(&self) -> Result<()> {
        File::create(&self.path)
            .map(drop)
            .map_err(|source| self.error(source))
    }

    /// Appends one query's block: a line per record, or a single NOTFOUND
    /// line when `records` is empty.
    pub fn append(&self, key: &str, records: &[&Record]) -> Result<()> {
        self.append_with(|out| write_block(out, key, records))
    }

    /// Appends a line per record and the blank separator, with no NOTFOUND
    /// marker when `records` is empty.
    pub fn append_records(&self, key: &str, records: &[&Record]) -> Result<()> {
        self.append_with(|out| write_records(out, key, records))
    }

    fn append_with<F>(&self, write: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.error(source))?;
        let mut out = BufWriter::new(file);
        write(&mut out)
            .and_then(|()| out.flush())
            .map_err(|source| self.error(source))
    }

    fn error(&self, source: io::Error) -> Error {
        Error::Report {
            path: self.path.clone(),
            source,
        }
    }
}

pub fn write_block<W: Write>(out: &mut W, key: &str, records: &[&Record]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "{key} --> NOTFOUND")?;
    }
    write_records(out, key, records)
}

pub fn write_records<W: Write>(out: &mut W, key: &str, records: &[&Record]) -> io::Result<()> {
    for record in records {
        write_record(out, key, record)?;
    }
    writeln!(out)
}

pub fn write_record<W: Write>(out: &mut W, key: &str, record: &Record) -> io::Result<()> {
    writeln!(
        out,
        "{key} --> Census year: {} || Block ID: {} || Property ID: {} || \
         Base property ID: {} || CLUE small area: {} || Trading Name: {} || \
         Industry (ANZSIC4) code: {} || Industry (ANZSIC4) description: {} || \
         x coordinate: {:.4} || y coordinate: {:.4} || Location: {} || ",
        record.census_year,
        record.block_id,
        record.property_id,
        record.base_property_id,
        record.clue_small_area,
        record.trading_name,
        record.industry_code,
        record.industry_description,
        record.point.x,
        record.point.y,
        record.location,
    )
}
