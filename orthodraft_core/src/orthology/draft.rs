//! Assembly of a draft model from a reference model and filtered matches
use crate::metabolic_model::gene::{Gene, GeneRule};
use crate::metabolic_model::model::Model;
use crate::orthology::filter::GeneMatchMap;

/// Build a draft model by rewriting each reference reaction's gene rule
/// through the match map
///
/// A reaction survives only if at least one of its rule's genes has matches;
/// its new rule is the concatenation of all matched subject ids, in rule
/// order then match order. Subject ids are not de-duplicated: two reference
/// genes mapping to the same subject leave it in the rule twice, and
/// consumers must tolerate that. Surviving reactions bring their metabolites
/// along, and each distinct subject id becomes a gene of the draft.
pub fn build_draft(reference: &Model, matches: &GeneMatchMap, name: &str) -> Model {
    let mut draft = Model::new_empty();
    draft.id = Some(name.to_string());
    draft.compartments = reference.compartments.clone();
    draft.version = reference.version.clone();

    for (_, reaction) in &reference.reactions {
        let mut orthologs: Vec<String> = Vec::new();
        for gene_id in reaction.gene_ids() {
            if let Some(subjects) = matches.get(gene_id) {
                orthologs.extend(subjects.iter().cloned());
            }
        }
        // No surviving gene association: the reaction is dropped, never kept
        // with an empty rule
        if orthologs.is_empty() {
            continue;
        }

        for subject_id in &orthologs {
            if !draft.genes.contains_key(subject_id) {
                draft.add_gene(Gene::new(subject_id.clone(), None, None, None));
            }
        }
        for metabolite_id in reaction.metabolites.keys() {
            if !draft.metabolites.contains_key(metabolite_id) {
                if let Some(metabolite) = reference.metabolites.get(metabolite_id) {
                    draft.add_metabolite(metabolite.clone());
                }
            }
        }

        let mut new_reaction = reaction.clone();
        new_reaction.rule = GeneRule::new(orthologs);
        draft.add_reaction(new_reaction);
    }

    draft
}
