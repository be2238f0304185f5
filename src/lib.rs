pub mod assign;
pub mod cell;
pub mod classify;
pub mod cli;
pub mod config;
pub mod consolidate;
pub mod document;
pub mod engine;
pub mod export;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod util;
