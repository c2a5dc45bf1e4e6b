//! Table scoring
//!
//! Pure scoring primitives and the bounded combination search built on top
//! of them. Everything here is deterministic and side-effect free.

pub mod combination;
pub mod score;

pub use combination::{find_combinations, TableCombination};
pub use score::{rank_tables, score_table, ScoredTable, TableScore};
