pub mod alias;
pub mod constants;
pub mod core_types;
