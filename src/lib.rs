//! newsbrief: a small web RSS reader.
//!
//! Aggregates the feeds listed in a plain-text sources file into one
//! paginated, searchable listing, and summarizes linked articles with an
//! extractive summary and a sentiment score.

pub mod config;
pub mod content;
pub mod feed;
pub mod storage;
pub mod util;
pub mod web;
