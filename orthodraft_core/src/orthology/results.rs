//! In-memory alignment result sets and the on-disk cache of raw blast output
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::orthology::record::AlignmentRecord;

/// Raw blast output: one list of outfmt-10 lines per reference gene, in the
/// order the tool emitted them
pub type RawAlignmentOutput = IndexMap<String, Vec<String>>;

/// Parsed alignment records grouped by reference gene
#[derive(Clone, Debug, Default)]
pub struct AlignmentResultSet {
    results: IndexMap<String, Vec<AlignmentRecord>>,
}

impl AlignmentResultSet {
    pub fn new() -> AlignmentResultSet {
        AlignmentResultSet::default()
    }

    /// Parse raw per-gene output lines into records
    ///
    /// Lines with the wrong field count are excluded here; that is the only
    /// form of malformed input this stage rejects.
    pub fn from_raw(raw: &RawAlignmentOutput) -> AlignmentResultSet {
        let mut results: IndexMap<String, Vec<AlignmentRecord>> = IndexMap::new();
        for (gene_id, lines) in raw {
            let mut records = Vec::new();
            for line in lines {
                match AlignmentRecord::parse(line) {
                    Ok(record) => records.push(record),
                    Err(err) => debug!("Skipping malformed line for {}: {}", gene_id, err),
                }
            }
            results.insert(gene_id.clone(), records);
        }
        AlignmentResultSet { results }
    }

    pub fn insert(&mut self, gene_id: String, records: Vec<AlignmentRecord>) {
        self.results.insert(gene_id, records);
    }

    pub fn get(&self, gene_id: &str) -> Option<&[AlignmentRecord]> {
        self.results.get(gene_id).map(Vec::as_slice)
    }

    /// Iterate over (reference gene, records) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<AlignmentRecord>)> {
        self.results.iter()
    }

    /// Iterate over every record, regardless of which gene it belongs to
    pub fn records(&self) -> impl Iterator<Item = &AlignmentRecord> {
        self.results.values().flatten()
    }

    /// Number of reference genes with a (possibly empty) record list
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Read a raw blast output cache written by [`write_cache`]
pub fn read_cache<P: AsRef<Path>>(path: P) -> Result<RawAlignmentOutput, CacheError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => return Err(CacheError::UnableToRead(format!("{:?}", err))),
    };
    match serde_json::from_str(&data) {
        Ok(raw) => Ok(raw),
        Err(err) => Err(CacheError::UnableToParse(format!("{:?}", err))),
    }
}

/// Persist raw blast output so later runs can skip the blast step
pub fn write_cache<P: AsRef<Path>>(path: P, raw: &RawAlignmentOutput) -> Result<(), CacheError> {
    let data = serde_json::to_string(raw).map_err(|err| CacheError::UnableToParse(format!("{:?}", err)))?;
    fs::write(path, data).map_err(|err| CacheError::UnableToWrite(format!("{:?}", err)))?;
    Ok(())
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Unable to read cache file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse cache due to {0}")]
    UnableToParse(String),
    #[error("Unable to write cache file due to {0}")]
    UnableToWrite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_fixture() -> RawAlignmentOutput {
        let mut raw = RawAlignmentOutput::new();
        raw.insert(
            "AT4G29130".to_string(),
            vec![
                "AT4G29130,300,Solyc01g005100,290,280,154,55,200,1e-120,310".to_string(),
                "AT4G29130,300,Solyc02g081220,150,140,60,42,90,3e-40,120".to_string(),
            ],
        );
        raw.insert("AT1G47840".to_string(), Vec::new());
        raw
    }

    #[test]
    fn from_raw_parses_in_order() {
        let results = AlignmentResultSet::from_raw(&raw_fixture());
        assert_eq!(results.len(), 2);
        let records = results.get("AT4G29130").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject_id, "Solyc01g005100");
        assert_eq!(records[1].subject_id, "Solyc02g081220");
        assert_eq!(results.get("AT1G47840").unwrap().len(), 0);
        assert!(results.get("AT9G99999").is_none());
    }

    #[test]
    fn from_raw_skips_malformed_lines() {
        let mut raw = raw_fixture();
        raw.get_mut("AT1G47840")
            .unwrap()
            .push("truncated,line".to_string());
        let results = AlignmentResultSet::from_raw(&raw);
        assert_eq!(results.get("AT1G47840").unwrap().len(), 0);
    }

    #[test]
    fn records_flattens_all_genes() {
        let results = AlignmentResultSet::from_raw(&raw_fixture());
        assert_eq!(results.records().count(), 2);
    }

    #[test]
    fn cache_round_trip() {
        let raw = raw_fixture();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resBlastp.json");
        write_cache(&path, &raw).unwrap();
        let reread = read_cache(&path).unwrap();
        assert_eq!(raw, reread);
        // Key order survives the round trip (IndexMap serde)
        assert_eq!(
            raw.keys().collect::<Vec<_>>(),
            reread.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn read_cache_missing_file() {
        let err = read_cache("/nonexistent/resBlastp.json").unwrap_err();
        assert!(matches!(err, CacheError::UnableToRead(_)));
    }
}
