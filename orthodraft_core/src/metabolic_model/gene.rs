//! This module provides the Gene struct, representing a gene, and the GeneRule
//! struct, representing a flat gene-reaction association rule
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// Structure Representing a Gene
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Gene {
    /// Used to identify the gene
    pub id: String,
    /// Human Readable Gene Name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Notes about the gene
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Gene Annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

impl Gene {
    pub fn new(
        id: String,
        name: Option<String>,
        notes: Option<String>,
        annotation: Option<String>,
    ) -> Gene {
        GeneBuilder::default()
            .id(id)
            .name(name)
            .notes(notes)
            .annotation(annotation)
            .build()
            .unwrap()
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Gene-reaction association rule as a flat disjunction of gene identifiers
///
/// The textual form is the gene ids joined with `" or "`. An empty rule means
/// the reaction has no gene association (spontaneous/unconstrained). There is
/// deliberately no support for `and` groups or parentheses, matching the rule
/// format the reconstruction pipeline consumes and produces.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GeneRule {
    genes: Vec<String>,
}

impl GeneRule {
    pub fn new(genes: Vec<String>) -> GeneRule {
        GeneRule { genes }
    }

    /// Parse a rule string by splitting on the `" or "` separator
    ///
    /// An empty or whitespace-only string parses to the empty rule.
    pub fn parse(rule: &str) -> GeneRule {
        let genes = rule
            .split(" or ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        GeneRule { genes }
    }

    /// Gene identifiers in the disjunction, in rule order
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// True when the rule carries no gene association
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn push(&mut self, gene: impl Into<String>) {
        self.genes.push(gene.into());
    }
}

impl Display for GeneRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.genes.join(" or "))
    }
}
