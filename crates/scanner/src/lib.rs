#![allow(clippy::collapsible_if)]
pub mod parser;
pub mod walk;
