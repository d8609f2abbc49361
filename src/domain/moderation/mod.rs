pub mod duplicate;
pub mod format;
pub mod normalize;
pub mod similarity;
