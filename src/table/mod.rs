//! Table module - delimited-text I/O and column pruning

pub mod io;
pub mod prune;

pub use io::*;
pub use prune::*;
