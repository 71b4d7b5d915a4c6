//! Surprisal arithmetic and a file-backed scoring oracle

pub mod table;

pub use table::{ScoreTable, ScoredToken};

/// Surprisal in bits of an event with probability `p`
pub fn surprisal(p: f64) -> f64 {
    -p.log2()
}
