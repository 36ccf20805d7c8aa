use std::fmt;
use std::sync::mpsc;

use serde::Serialize;

use crate::ai::Agent;

/// One row of a generation's leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position after selection.
    pub rank: usize,
    pub score: u64,
    /// Percentage of the agent's moves this generation that were defections.
    pub defection_rate: f64,
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rank {}: Score {} | Defection Rate: {:.2}%",
            self.rank, self.score, self.defection_rate
        )
    }
}

/// Whole-population statistics for one generation, taken before selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub best_score: u64,
    pub mean_score: f64,
    pub mean_defection_rate: f64,
}

impl GenerationSummary {
    pub fn from_agents(agents: &[Agent]) -> Self {
        if agents.is_empty() {
            return GenerationSummary::default();
        }
        let n = agents.len() as f64;
        GenerationSummary {
            best_score: agents.iter().map(Agent::score).max().unwrap_or(0),
            mean_score: agents.iter().map(|a| a.score() as f64).sum::<f64>() / n,
            mean_defection_rate: agents.iter().map(Agent::defection_rate).sum::<f64>() / n,
        }
    }
}

/// Everything the evolution loop publishes after a generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// 1-based number of the generation just played.
    pub generation: usize,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub summary: GenerationSummary,
}

/// Consumer of generation reports. Nothing flows back into the population.
pub trait Reporter {
    fn report(&mut self, report: &GenerationReport);
}

/// Forward reports to another thread. A disconnected receiver is ignored.
impl Reporter for mpsc::Sender<GenerationReport> {
    fn report(&mut self, report: &GenerationReport) {
        let _ = self.send(report.clone());
    }
}
