//! Core types for the scene-director library
//!
//! This module contains the fundamental types that form the public API:
//! - Script: ordered scene steps and the values they carry
//! - State: position and recorded results
//! - Action: transitions accepted by the reducer

pub mod action;
pub mod script;
pub mod state;

pub use action::Action;
pub use script::{
    ChoiceOption, GameId, ResultCategory, Script, Speaker, Step, StepIndex, StepKind,
    UnknownResultCategory, Variable,
};
pub use state::State;
