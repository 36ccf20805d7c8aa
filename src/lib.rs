//! # Neuro Dilemma
//!
//! Evolves small feedforward neural networks that play the iterated
//! prisoner's dilemma, using a generational genetic algorithm with
//! round-robin tournaments, truncation selection and random-perturbation
//! mutation.
//!
//! ## Modules
//!
//! - [`algebra`] — Immutable vectors and row-major matrices
//! - [`ai`] — Feedforward network, agent decision/mutation, feature encoding
//! - [`game`] — Moves, fixed payoff table, per-match history
//! - [`evolution`] — Tournament, selection, population, reporting, metrics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod algebra;
pub mod config;
pub mod error;
pub mod evolution;
pub mod game;
