pub mod classifier;
pub mod reference;
pub mod tone;
