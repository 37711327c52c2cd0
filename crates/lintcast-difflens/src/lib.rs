//! Pull-request change sets.
//!
//! Derives changed line ranges from unified-diff hunk headers and decides
//! whether a finding lands on a line the pull request touched.

pub mod changeset;
pub mod parser;
