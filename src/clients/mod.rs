pub mod gemini;
pub mod web;
