//! Stats module - grouped counts, sums, rankings and extremes

mod aggregate;

pub use aggregate::{
    count_by_key, summarize_entity, summarize_extremes, top_entity_excluding, top_n_by_sum,
    AggregateError, EntitySummary, KeyExtremes,
};
