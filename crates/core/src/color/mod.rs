pub mod adapt;
pub mod cct;
pub mod convert;
pub mod matrix;
