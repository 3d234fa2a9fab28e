pub mod block;
pub mod errors;
