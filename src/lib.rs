//! Meye Core - Character progression and XP economy engine.
//!
//! This crate implements the campaign, character (PJ) and session aggregates
//! of a tabletop RPG campaign manager, together with the asynchronous
//! hand-off that credits experience awarded in a session to a character.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
