pub mod assembler;
pub mod chain;
pub mod validation;
