pub mod builder;
pub mod cassandra;
pub mod config;
pub mod sink;
pub mod utils;
pub mod writer;

pub use builder::BatchWriterBuilder;
pub use cassandra::CassandraSink;
pub use config::Config;
pub use sink::{Sink, WriteTask};
pub use writer::{BatchCompleted, BatchFailure, BatchWriter, WriterOptions};
