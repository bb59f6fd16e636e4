pub mod constants;
pub mod env_state;
pub mod errors;
pub mod horizons;
pub mod refine;
pub mod time;
pub mod trajectory;
