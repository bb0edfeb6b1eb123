// stance_core/src/utils/mod.rs

pub mod rotations;
