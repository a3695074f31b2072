pub mod get_args;
pub mod window_entropy;
