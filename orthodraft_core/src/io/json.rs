//! Module providing JSON IO for orthodraft Models
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::metabolic_model::gene::{Gene, GeneRule};
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder, ReactionBuilderError};

// region JSON Model
/// Represents a JSON serialized model, used for reading and writing models in json format
#[derive(Serialize, Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    genes: Vec<JsonGene>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: f64,
    upper_bound: f64,
    gene_reaction_rule: String,
    subsystem: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonGene {
    id: String,
    name: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}
// endregion JSON Model

// region Conversions
impl From<JsonGene> for Gene {
    fn from(g: JsonGene) -> Self {
        /* Notes and annotations are kept as JSON strings: the data is too
        loosely structured to unpack further without a lot of maintenance. */
        Self {
            id: g.id,
            name: g.name,
            notes: g.notes.map(|v| v.to_string()),
            annotation: g.annotation.map(|v| v.to_string()),
        }
    }
}

impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            notes: m.notes.map(|v| v.to_string()),
            annotation: m.annotation.map(|v| v.to_string()),
        }
    }
}

impl From<Gene> for JsonGene {
    fn from(g: Gene) -> Self {
        Self {
            id: g.id,
            name: g.name,
            notes: g
                .notes
                .map(|n| serde_json::from_str(&n).unwrap_or(Value::String(n))),
            annotation: g
                .annotation
                .map(|a| serde_json::from_str(&a).unwrap_or(Value::String(a))),
        }
    }
}

impl From<Metabolite> for JsonMetabolite {
    fn from(m: Metabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: Some(m.charge),
            formula: m.formula,
            notes: m
                .notes
                .map(|n| serde_json::from_str(&n).unwrap_or(Value::String(n))),
            annotation: m
                .annotation
                .map(|a| serde_json::from_str(&a).unwrap_or(Value::String(a))),
        }
    }
}

impl Model {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json_model = match serde_json::from_str::<JsonModel>(&model_str) {
            Ok(model) => model,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Model::from_json(json_model)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let json_model = self.to_json();
        let model_string = serde_json::to_string(&json_model)?;
        fs::write(path, model_string)?;
        Ok(())
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut reactions: IndexMap<String, Reaction> = IndexMap::new();
        let mut genes: IndexMap<String, Gene> = IndexMap::new();
        let mut metabolites: IndexMap<String, Metabolite> = IndexMap::new();
        // Start by converting the genes and metabolites using the From methods
        json_model.genes.into_iter().for_each(|g| {
            genes.insert(g.id.clone(), Gene::from(g));
        });
        json_model.metabolites.into_iter().for_each(|m| {
            metabolites.insert(m.id.clone(), Metabolite::from(m));
        });
        /* Now, iterate through the reactions, parsing rules along the way.
        Genes referenced by a rule but missing from the gene list are inserted
        so every rule token resolves within the model. */
        for rxn in json_model.reactions {
            let rule = GeneRule::parse(&rxn.gene_reaction_rule);
            for gene_id in rule.genes() {
                if !genes.contains_key(gene_id) {
                    genes.insert(
                        gene_id.clone(),
                        Gene::new(gene_id.clone(), None, None, None),
                    );
                }
            }
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id.clone())
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .rule(rule)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .subsystem(rxn.subsystem)
                .notes(rxn.notes.map(|v| v.to_string()))
                .annotation(rxn.annotation.map(|v| v.to_string()))
                .build()?;
            reactions.insert(rxn.id, new_reaction);
        }
        Ok(Model {
            reactions,
            genes,
            metabolites,
            id: json_model.id,
            compartments: json_model.compartments,
            version: json_model.version,
        })
    }

    fn to_json(&self) -> JsonModel {
        let json_genes: Vec<JsonGene> = self.genes.iter().map(|(_, g)| g.clone().into()).collect();
        let json_metabolites: Vec<JsonMetabolite> = self
            .metabolites
            .iter()
            .map(|(_, m)| m.clone().into())
            .collect();
        let mut json_reactions: Vec<JsonReaction> = Vec::new();
        for (_, r) in &self.reactions {
            json_reactions.push(JsonReaction {
                id: r.id.clone(),
                name: r.name.clone(),
                metabolites: r.metabolites.clone(),
                lower_bound: r.lower_bound,
                upper_bound: r.upper_bound,
                gene_reaction_rule: r.rule.to_string(),
                subsystem: r.subsystem.clone(),
                notes: r
                    .notes
                    .clone()
                    .map(|n| serde_json::from_str(&n).unwrap_or(Value::String(n))),
                annotation: r
                    .annotation
                    .clone()
                    .map(|a| serde_json::from_str(&a).unwrap_or(Value::String(a))),
            })
        }

        JsonModel {
            metabolites: json_metabolites,
            reactions: json_reactions,
            genes: json_genes,
            id: self.id.clone(),
            compartments: self.compartments.clone(),
            version: self.version.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
// endregion Conversions

#[cfg(test)]
mod json_tests {
    use super::*;

    #[test]
    fn json_metabolite() {
        let data = r#"{
"id":"glc_c",
"name":"D-Glucose",
"compartment":"c",
"charge":0,
"formula":"C6H12O6",
"notes":null,
"annotation":{
"kegg.compound":["C00031"]
}
}"#;
        let met: JsonMetabolite = serde_json::from_str(data).unwrap();
        assert_eq!(met.id, "glc_c");
        assert_eq!(met.name.unwrap(), "D-Glucose");
        assert_eq!(met.compartment.unwrap(), "c");
        assert_eq!(met.charge.unwrap(), 0);
        assert_eq!(met.formula.unwrap(), "C6H12O6");
    }

    #[test]
    fn json_reaction() {
        let data = r#"{
"id":"HEX1",
"name":"Hexokinase",
"metabolites":{
"glc_c":-1.0,
"atp_c":-1.0,
"g6p_c":1.0,
"adp_c":1.0
},
"lower_bound":0.0,
"upper_bound":1000.0,
"gene_reaction_rule":"AT4G29130 or AT1G47840",
"subsystem":"Glycolysis"
}"#;
        let reaction: JsonReaction = serde_json::from_str(data).unwrap();
        assert_eq!(reaction.id, "HEX1");
        assert_eq!(reaction.name.unwrap(), "Hexokinase");
        assert_eq!(reaction.metabolites.len(), 4);
        assert!((reaction.metabolites["glc_c"] + 1.0).abs() < 1e-25);
        assert!((reaction.lower_bound - 0.0).abs() < 1e-25);
        assert!((reaction.upper_bound - 1000.0).abs() < 1e-25);
        assert_eq!(reaction.gene_reaction_rule, "AT4G29130 or AT1G47840");
        assert_eq!(reaction.subsystem.unwrap(), "Glycolysis");
    }

    #[test]
    fn json_gene() {
        let data = r#"{
"id":"AT4G29130",
"name":"HXK1",
"notes":null,
"annotation":null
}"#;
        let gene: JsonGene = serde_json::from_str(data).unwrap();
        assert_eq!(gene.id, "AT4G29130");
        assert_eq!(gene.name.unwrap(), "HXK1");
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;
    use std::path::PathBuf;

    fn test_model_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("test_models")
            .join("ara_mini.json")
    }

    #[test]
    fn read_json() {
        let model = Model::read_json(test_model_path()).unwrap();

        assert_eq!(model.id.clone().unwrap(), "ara_mini");
        assert_eq!(model.version.clone().unwrap(), "1");

        let mut expected_compartments: IndexMap<String, String> = IndexMap::new();
        expected_compartments.insert("c".to_string(), "cytosol".to_string());
        expected_compartments.insert("e".to_string(), "extracellular space".to_string());
        assert_eq!(model.compartments.clone().unwrap(), expected_compartments);

        let reaction = &model.reactions["HEX1"];
        assert_eq!(reaction.name.clone().unwrap(), "Hexokinase");
        assert_eq!(
            reaction.gene_ids(),
            &["AT4G29130".to_string(), "AT1G47840".to_string()]
        );
        assert!((reaction.metabolites["atp_c"] + 1.0).abs() < 1e-25);
        assert!((reaction.lower_bound - 0.0).abs() < 1e-25);
        assert!((reaction.upper_bound - 1000.0).abs() < 1e-25);

        // Spontaneous reactions have an empty rule
        assert!(model.reactions["GLCtex"].is_spontaneous());

        let gene = &model.genes["AT4G29130"];
        assert_eq!(gene.name.clone().unwrap(), "HXK1");

        let met = &model.metabolites["glc_c"];
        assert_eq!(met.name.clone().unwrap(), "D-Glucose");
        assert_eq!(met.compartment.clone().unwrap(), "c");
        assert_eq!(met.formula.clone().unwrap(), "C6H12O6");
    }

    #[test]
    fn rule_genes_inserted_when_missing() {
        // AT5G42740 appears only in the PGI rule, not in the gene list
        let model = Model::read_json(test_model_path()).unwrap();
        assert!(model.genes.contains_key("AT5G42740"));
    }

    #[test]
    fn write_then_read_round_trip() {
        let model = Model::read_json(test_model_path()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("round_trip.json");
        model.write_json(&out).unwrap();
        let reread = Model::read_json(&out).unwrap();

        assert_eq!(model.reaction_ids(), reread.reaction_ids());
        assert_eq!(model.id, reread.id);
        assert_eq!(model.compartments, reread.compartments);
        assert_eq!(model.genes.len(), reread.genes.len());
        for (id, reaction) in &model.reactions {
            let other = &reread.reactions[id];
            assert_eq!(reaction.rule, other.rule);
            assert_eq!(reaction.metabolites, other.metabolites);
        }
    }
}
