pub mod pair_scores;
pub mod partition_search;
pub mod triple_scores;
