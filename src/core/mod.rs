// Core modules: error modeling and input validation.
pub mod error;
pub mod validate;
