//! Core crate of orthodraft, a tool for ortholog-based reconstruction of draft
//! genome-scale metabolic models from a reference model and protein alignments.
#![allow(unused)]

pub mod configuration;
pub mod io;
pub mod metabolic_model;
pub mod orthology;
pub mod report;
