pub mod api;
pub mod cli;
pub mod clients;
pub mod content;
pub mod core;
pub mod domain;
pub mod infra;
pub mod prep;
pub mod tools;
