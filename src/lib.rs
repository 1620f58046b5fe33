//! Travel Planner - Conversational travel preference collection
//!
//! This crate gathers a traveler's preferences through a language-model
//! dialogue, one question per turn, and turns them into a detailed
//! day-by-day itinerary once enough is known.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
