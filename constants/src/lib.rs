/// Detector geometry and memory layout shared by the simulator stages
pub mod coordinate_system;
pub mod lane;
pub mod memory;
