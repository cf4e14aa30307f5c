//! Analytics module for word trend analysis

pub mod word_trends;

pub use word_trends::{
    aggregate_trends, bucket_for, week_start_of, TrendAggregationService, WordTrend, WordTrends,
};
