pub mod get_args;
pub mod calculate_conservation;
