#![allow(clippy::collapsible_if)]
pub mod config;
pub mod naming;
pub mod pipeline;
pub mod prompt;
