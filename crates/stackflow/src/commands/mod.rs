pub mod context;
pub mod name;
pub mod validate;
