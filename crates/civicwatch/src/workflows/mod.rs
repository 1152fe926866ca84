pub mod accountability;
pub mod imports;
