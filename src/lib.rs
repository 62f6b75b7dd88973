#[macro_use]
extern crate log;

#[cfg(test)]
mod test_utils;

pub mod batch;
pub mod config;
pub mod dwt;
pub mod errors;
pub mod fingerprint;
pub mod pipeline;
pub mod runtime_setup;
pub mod sample_reader;
pub mod verify;
pub mod wav;
