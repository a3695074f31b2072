pub mod alignment;
pub mod approximate_match;
pub mod conservation;
pub mod entropy;
pub mod error;
pub mod gap_resolver;
pub mod msa_parser;
pub mod peptide_locator;
pub mod peptide_table;
pub mod score;
pub mod struct_helper;
