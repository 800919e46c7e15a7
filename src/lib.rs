//! Cluemap: a 2-d tree over geocoded CLUE business records answering
//! nearest-point and radius queries, with the number of tree nodes each
//! search visited.

mod config;
mod distance;
mod error;
mod index;
mod ingest;
mod kdtree;
#[allow(clippy::module_name_repetitions)]
mod linear;
mod node;
mod point;
mod query;
mod record;
mod report;

pub use config::{Config, IngestConfig, LogConfig, QueryConfig};
pub use distance::euclidean;
pub use error::{Error, Result};
pub use index::SpatialIndex;
pub use ingest::{build_index, read_records};
pub use kdtree::KdTree;
pub use linear::LinearIndex;
pub use node::Chain;
pub use point::{Point, DIMENSION, EPSILON};
pub use query::{Query, QueryDriver, QueryKind, QueryMode, RunSummary};
pub use record::{parse_or_zero, Record};
pub use report::{write_block, write_record, write_records, ReportWriter};
