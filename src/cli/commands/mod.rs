pub mod check;
mod command_result;
pub mod helper;
pub mod inject;
pub mod replace;
pub mod translate;

pub use command_result::*;
