use std::io::Read;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::{
    config::IngestConfig, error::Result, index::SpatialIndex, kdtree::KdTree, record::Record,
};

/// Reads every record of a CLUE CSV export, in file order.
///
/// Quoted fields may contain the delimiter, doubled quotes and line breaks.
pub fn read_records<R: Read>(reader: R, config: &IngestConfig) -> Result<Vec<Record>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter_byte()?)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        if row.len() != Record::NUM_FIELDS {
            debug!(
                "Row at line {} has {} fields",
                row.position().map_or(0, csv::Position::line),
                row.len()
            );
        }
        records.push(Record::from_fields(row.iter()));
    }
    Ok(records)
}

/// Builds the index by inserting records one by one in file order.
pub fn build_index<R: Read>(reader: R, config: &IngestConfig) -> Result<KdTree<Record>> {
    let records = read_records(reader, config)?;
    info!("Read {} records", records.len());

    let mut tree = KdTree::new();
    for record in records {
        tree.insert(record.point, record);
    }

    info!(
        "Index built with {} records in {} nodes (height {})",
        tree.len(),
        tree.num_nodes(),
        tree.height()
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::{build_index, read_records};
    use crate::{config::IngestConfig, index::SpatialIndex, point::Point};

    const DATASET: &str = "\
census_year,block_id,property_id,base_property_id,clue_small_area,trading_name,industry_anzsic4_code,industry_anzsic4_description,x_coord,y_coord,location
2018,1,100,100,Melbourne (CBD),\"Grill'd, Burgers\",4511,Cafes and Restaurants,144.96,-37.81,\"(-37.81, 144.96)\"
2018,1,100,100,Melbourne (CBD),\"The \"\"Quoted\"\" Bar\",4520,Pubs,144.96,-37.81,\"(-37.81, 144.96)\"
2018,2,200,200,Carlton,\"Two
Lines\",4511,Cafes and Restaurants,144.97,-37.80,\"(-37.80, 144.97)\"
";

    #[test]
    fn quoted_fields() {
        let records = read_records(DATASET.as_bytes(), &IngestConfig::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].trading_name, "Grill'd, Burgers");
        assert_eq!(records[0].location, "(-37.81, 144.96)");
        assert_eq!(records[1].trading_name, "The \"Quoted\" Bar");
        assert_eq!(records[2].trading_name, "Two\nLines");
        assert_eq!(records[2].point, Point::new(144.97, -37.80));
    }

    #[test]
    fn same_address_shares_a_node() {
        let tree = build_index(DATASET.as_bytes(), &IngestConfig::default()).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.num_nodes(), 2);

        let (chain, _) = tree.nearest(&Point::new(144.96, -37.81));
        let names = chain
            .unwrap()
            .iter()
            .map(|record| record.trading_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["The \"Quoted\" Bar", "Grill'd, Burgers"]);
    }

    #[test]
    fn custom_delimiter() {
        let config = IngestConfig {
            delimiter: ';',
            has_headers: false,
        };
        let row = "2020;3;4;5;Docklands;Cafe;1;Food;1.5;2.5;here\n";
        let records = read_records(row.as_bytes(), &config).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].clue_small_area, "Docklands");
        assert_eq!(records[0].point, Point::new(1.5, 2.5));
    }
}
