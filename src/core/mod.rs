//! Core configuration functionality: the retriever chain and the facade over it.

mod configuration;
mod retriever;

pub use configuration::Configuration;
pub use retriever::PropertyRetriever;
