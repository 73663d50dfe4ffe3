//! Benchmark run records and their CSV emission.
//!
//! This schema is the compatibility surface toward the offline statistics
//! tool: one row per solved level, partitioned into one file per
//! `(category, heuristic)` pair named `<category>_<heuristic>.csv`. Column
//! names and order must stay stable.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::heuristic::Heuristic;

/// One benchmark run of one level.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub id: u32,
    pub size: u32,
    /// Wall-clock solve duration, averaged over the runner's repeats.
    pub duration_nanos: u64,
    /// Recursive search invocations during the first repeat.
    pub steps_taken: usize,
    pub solved: bool,
}

/// File path for a `(category, heuristic)` record partition.
pub fn record_path(out_dir: &Path, category: &str, heuristic: Heuristic) -> PathBuf {
    out_dir.join(format!("{}_{}.csv", category, heuristic.name()))
}

/// Writes records as CSV with a header row derived from the field names.
pub fn write_records_csv(records: &[RunRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_layout_is_stable() {
        let records = vec![
            RunRecord {
                id: 3,
                size: 8,
                duration_nanos: 1250,
                steps_taken: 17,
                solved: true,
            },
            RunRecord {
                id: 4,
                size: 9,
                duration_nanos: 9000,
                steps_taken: 41,
                solved: false,
            },
        ];

        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in &records {
            writer.serialize(record).unwrap();
        }
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert_eq!(
            output,
            "id,size,duration_nanos,steps_taken,solved\n\
             3,8,1250,17,true\n\
             4,9,9000,41,false\n"
        );
    }

    #[test]
    fn test_record_path_partitions_by_category_and_heuristic() {
        let path = record_path(Path::new("stats"), "base", Heuristic::FewestRemainingRegions);
        assert_eq!(
            path,
            Path::new("stats").join("base_fewest-remaining-regions.csv")
        );
    }
}
