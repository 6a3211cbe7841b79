//! # msbuild-analysis
//!
//! Static analysis for MSBuild project files.
//!
//! The analyzer parses project-file text with a tolerant XML layer, wraps
//! the result in typed MSBuild element views, validates them against the
//! built-in element and task schemas, and parses every embedded condition
//! expression. Malformed input never fails; it produces a best-effort tree
//! plus a list of [`issues::Issue`] diagnostics with document spans.
//!
//! ## Example
//!
//! ```rust
//! use msbuild_analysis::documents;
//!
//! let document = documents::parse(r#"<Project Xmlns="x"><Steak/></Project>"#);
//! assert!(document.project().is_some());
//! assert_eq!(document.issues().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod issues;
pub mod span;

// Tolerant XML layer
pub mod xml;

// Expression and element models
pub mod elements;
pub mod expressions;

// Validation and assembly
pub mod documents;
pub mod validators;

// Re-exports for convenience
pub use documents::{parse, Document};
pub use error::{Error, Result};
pub use issues::{Issue, IssueKind};
pub use span::Span;

/// Version of the msbuild-analysis library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The MSBuild 2003 project namespace
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";
