pub mod course;
pub mod error;
pub mod index;
pub mod loader;
pub mod logger;
pub mod parser;
pub mod shell;
