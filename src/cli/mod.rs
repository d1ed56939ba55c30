//! CLI infrastructure for the tictactoe binary
//!
//! This module provides the command-line interface for playing matches
//! against the optimal engine and analyzing positions.

pub mod commands;
pub mod output;
