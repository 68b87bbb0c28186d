pub mod contributions;
pub mod log;
