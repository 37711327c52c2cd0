//! Report parsing, comment composition, and GitHub publishing.
//!
//! Turns cppcheck and clang-tidy text reports into one Markdown comment per
//! severity category and posts the selected comments to a pull request.

pub mod compose;
pub mod format;
pub mod github;
pub mod pipeline;
pub mod report;
