//! Pipeline module - the conversion stages and the batch driver that chains them

pub mod batch;
pub mod filter;
pub mod mapper;
pub mod resolver;
pub mod run_log;
pub mod transcode;

pub use batch::*;
pub use filter::*;
pub use mapper::*;
pub use resolver::*;
pub use run_log::*;
pub use transcode::*;
