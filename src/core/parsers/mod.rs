pub mod json;
pub mod jsx;
