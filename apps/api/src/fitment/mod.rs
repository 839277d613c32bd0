// Fitment engine: catalog, profile validation, scoring, ranking.
// Scoring is pure and synchronous; handlers call it directly without locking.

pub mod catalog;
pub mod handlers;
pub mod profile;
pub mod ranking;
pub mod scoring;

#[cfg(test)]
pub(crate) mod test_support;
