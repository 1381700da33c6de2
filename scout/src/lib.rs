#[macro_use]
extern crate tracing;

pub mod aggregate;
pub mod links;
pub mod metrics;
pub mod sink;

pub use aggregate::{
    AggregationInputError,
    Aggregator,
    FetchError,
    Roster,
};
pub use metrics::PlayerSummary;
