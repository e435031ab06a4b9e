// src/collector/mod.rs

pub mod disk;
pub mod sys;

pub use sys::get_timestamp;

pub use disk::{StorageSample, statfs};
