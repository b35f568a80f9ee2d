pub mod file;
pub mod snapshot;
pub mod stdin;
