//! Core functionality modules
//!
//! This module contains all core business logic organized into logical layers:
//! - `models`: the song entity and enrichment payload
//! - `verses`: verse segmentation and pagination of lyric text
//! - `filter`: request filters and their normalization
//! - `data`: query construction and the SQLite record store
//! - `services`: the song details client and its local stand-in
//! - `catalog`: create/update/delete/read orchestration

pub mod catalog;
pub mod data;
pub mod filter;
pub mod models;
pub mod services;
pub mod verses;

