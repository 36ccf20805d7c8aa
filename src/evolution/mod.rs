//! Evolution loop: round-robin tournament, truncation selection,
//! repopulation and mutation, plus the reporting boundary and rolling
//! metrics used by drivers.

pub mod metrics;
pub mod population;
pub mod report;
pub mod selection;
pub mod tournament;

pub use metrics::EvolutionMetrics;
pub use population::{Population, PopulationConfig};
pub use report::{GenerationReport, GenerationSummary, LeaderboardEntry, Reporter};
pub use tournament::{play_match, MatchRecord, Tournament, TournamentConfig};
