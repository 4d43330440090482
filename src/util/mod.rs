// src/util/mod.rs
pub mod testing;
