// Review intake and moderation. Submitted reviews stay unpublished until an
// admin approves them; only approved reviews reach the catalog.

pub mod handlers;
pub mod meta;
pub mod submission;
