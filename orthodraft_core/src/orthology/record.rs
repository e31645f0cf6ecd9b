//! Parsing of tabular blastp output lines into alignment records
use thiserror::Error;

/// Number of comma-delimited fields in a `blastp -outfmt 10` line, field order
/// `qseqid, qlen, sseqid, slen, length, nident, pident, score, evalue, bitscore`
pub const FIELD_COUNT: usize = 10;

/// A field that may or may not have parsed as a number
///
/// Numeric parsing is tolerant: a field that fails to parse is kept as text
/// and simply never satisfies a numeric comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl Field {
    fn parse(raw: &str) -> Field {
        match raw.trim().parse::<f64>() {
            Ok(value) => Field::Number(value),
            Err(_) => Field::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(value) => Some(*value),
            Field::Text(_) => None,
        }
    }
}

/// One reported alignment between a query (reference) sequence and a subject
/// (candidate ortholog) sequence
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentRecord {
    /// Query (reference gene) identifier
    pub query_id: String,
    /// Subject (candidate ortholog) identifier
    pub subject_id: String,
    query_len: Field,
    subject_len: Field,
    align_len: Field,
    identical: Field,
    pct_identity: Field,
    score: Field,
    e_value: Field,
    bit_score: Field,
}

impl AlignmentRecord {
    /// Parse one comma-delimited output line
    ///
    /// A line with the wrong field count is a format error; non-numeric
    /// values in numeric columns are not.
    pub fn parse(line: &str) -> Result<AlignmentRecord, RecordError> {
        let fields: Vec<&str> = line.trim_end().split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        }
        Ok(AlignmentRecord {
            query_id: fields[0].to_string(),
            query_len: Field::parse(fields[1]),
            subject_id: fields[2].to_string(),
            subject_len: Field::parse(fields[3]),
            align_len: Field::parse(fields[4]),
            identical: Field::parse(fields[5]),
            pct_identity: Field::parse(fields[6]),
            score: Field::parse(fields[7]),
            e_value: Field::parse(fields[8]),
            bit_score: Field::parse(fields[9]),
        })
    }

    pub fn query_len(&self) -> Option<f64> {
        self.query_len.as_number()
    }

    pub fn subject_len(&self) -> Option<f64> {
        self.subject_len.as_number()
    }

    pub fn align_len(&self) -> Option<f64> {
        self.align_len.as_number()
    }

    pub fn identical(&self) -> Option<f64> {
        self.identical.as_number()
    }

    pub fn pct_identity(&self) -> Option<f64> {
        self.pct_identity.as_number()
    }

    pub fn score(&self) -> Option<f64> {
        self.score.as_number()
    }

    pub fn e_value(&self) -> Option<f64> {
        self.e_value.as_number()
    }

    pub fn bit_score(&self) -> Option<f64> {
        self.bit_score.as_number()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Expected 10 comma-delimited fields, found {found}")]
    FieldCount { found: usize },
}
