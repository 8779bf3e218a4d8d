mod error;
pub use self::error::{Error, Result};
mod common;
pub use self::common::*;
pub mod graph;
pub use self::graph::LinkGraph;
pub mod corpus;

pub mod page_rank;
pub use self::page_rank::{iterate_rank, sample_rank, sample_rank_with, transition};
