use std::io::{BufRead, Write};

use clap::ValueEnum;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    error::Result,
    index::SpatialIndex,
    point::Point,
    record::{parse_or_zero, Record},
    report::ReportWriter,
};

/// How query lines are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// `x y` is a nearest query, `x y radius` a radius query.
    #[default]
    Auto,
    /// Every line is a nearest query; values past the second are ignored.
    Nearest,
    /// Every line is a radius query; a missing radius is zero.
    Radius,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QueryKind {
    Nearest,
    Radius(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    /// The input line up to the first line break, echoed in every output.
    pub key: String,
    pub point: Point,
    pub kind: QueryKind,
}

impl Query {
    /// Parses a whitespace-separated query line. Values that are not
    /// numbers read as zero. Returns `None` for a blank line.
    #[must_use]
    pub fn parse(line: &str, mode: QueryMode) -> Option<Query> {
        let key = line.split(|c: char| c == '\r' || c == '\n').next().unwrap_or("");
        let values = key.split_whitespace().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }

        let value = |i: usize| values.get(i).map_or(0.0, |text| parse_or_zero(text));
        let kind = match mode {
            QueryMode::Auto if values.len() > 2 => QueryKind::Radius(value(2)),
            QueryMode::Auto | QueryMode::Nearest => QueryKind::Nearest,
            QueryMode::Radius => QueryKind::Radius(value(2)),
        };
        Some(Query {
            key: key.to_string(),
            point: Point::new(value(0), value(1)),
            kind,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub queries: usize,
    pub comparisons: usize,
}

/// Runs queries read line by line against a finished index.
pub struct QueryDriver<'a, I> {
    index: &'a I,
    report: ReportWriter,
    mode: QueryMode,
}

impl<'a, I: SpatialIndex<Record>> QueryDriver<'a, I> {
    pub fn new(index: &'a I, report: ReportWriter, mode: QueryMode) -> Self {
        Self {
            index,
            report,
            mode,
        }
    }

    /// Answers every query in `input` until it is exhausted, writing one
    /// `<key> --> <comparisons>` line per query to `status`.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut status: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            // Bytes that are not UTF-8 become U+FFFD and parse as zero.
            let line = String::from_utf8_lossy(&buf);
            let Some(query) = Query::parse(&line, self.mode) else {
                debug!("Skipping blank query line");
                continue;
            };
            let comparisons = self.execute(&query)?;
            writeln!(status, "{} --> {}", query.key, comparisons)?;

            summary.queries += 1;
            summary.comparisons += comparisons;
        }
        status.flush()?;

        info!(
            "Answered {} queries with {} comparisons",
            summary.queries, summary.comparisons
        );
        Ok(summary)
    }

    /// Answers one query, appends its block to the report and returns the
    /// number of comparisons made.
    ///
    /// A nearest query on a non-empty index only misses when its point is
    /// NaN; that block holds no lines at all rather than NOTFOUND.
    pub fn execute(&self, query: &Query) -> Result<usize> {
        let mut matched: Vec<&Record> = Vec::new();
        let mark_missing = query.kind != QueryKind::Nearest || self.index.is_empty();
        let comparisons = match query.kind {
            QueryKind::Nearest => {
                let (chain, comparisons) = self.index.nearest(&query.point);
                if let Some(chain) = chain {
                    matched.extend(chain.iter());
                }
                comparisons
            }
            QueryKind::Radius(radius) => {
                self.index
                    .within_radius(&query.point, radius, |chain| matched.extend(chain.iter()))
            }
        };
        debug!(
            "Query '{}' matched {} records after {} comparisons",
            query.key,
            matched.len(),
            comparisons
        );

        if mark_missing {
            self.report.append(&query.key, &matched)?;
        } else {
            self.report.append_records(&query.key, &matched)?;
        }
        Ok(comparisons)
    }
}
