pub mod calibrator;
pub mod skin;
