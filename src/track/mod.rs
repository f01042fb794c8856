//! The recording facade: operation indices, the group stack, save/restore
//! brackets, dependency resolution, and the terminal export.

pub mod tracker;
