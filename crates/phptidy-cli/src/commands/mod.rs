pub mod check;
pub mod decode;
pub mod fmt;

#[cfg(test)]
mod decode_tests;
