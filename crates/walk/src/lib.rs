#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic filesystem traversal behind the `-R`
//! option of `getpanfsacl` and `setpanfsacl`. The walker yields the root and
//! then every descendant exactly once, depth-first, with directory entries
//! sorted lexicographically so repeated runs visit paths in the same order.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the traversal.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values. A
//!   directory is reported before its contents, and its contents are only
//!   read once the caller moves past it.
//! - [`WalkError`] describes I/O failures. Errors capture the offending path
//!   so higher layers can surface actionable diagnostics.
//!
//! # Invariants
//!
//! - Symbolic links are yielded as entries and never followed, including a
//!   symlinked root.
//! - Entry paths are the root as given joined with the names below it, so
//!   diagnostics match what the user typed.
//! - A directory that cannot be read yields a single error item; traversal
//!   then resumes with the next sibling. An entry that cannot be read yields
//!   an error item without hiding its siblings. Traversal never panics.
//!
//! # Errors
//!
//! [`WalkBuilder::build`] fails when the root cannot be inspected. Iteration
//! yields [`WalkError`] items when a directory or entry cannot be read.
//!
//! # Examples
//!
//! ```
//! use walk::WalkBuilder;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! fs::create_dir_all(root.join("nested"))?;
//! fs::write(root.join("file.txt"), b"data")?;
//!
//! let seen: Vec<_> = WalkBuilder::new(&root)
//!     .build()?
//!     .map(|entry| entry.map(|entry| entry.path().to_path_buf()))
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(seen, [root.clone(), root.join("file.txt"), root.join("nested")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod walker;

pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
