pub mod exposure;
pub mod gate;
pub mod sharpness;
