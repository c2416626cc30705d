// Consultant catalog: profile normalization, expected-score heuristic and the
// filter/sort pipeline behind the listing page.
// Everything except `handlers` is pure and synchronous.

pub mod filter;
pub mod handlers;
pub mod options;
pub mod pipeline;
pub mod profile;
pub mod review_stats;
pub mod scoring;
