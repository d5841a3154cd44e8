//! Binary codec for the versioned NAV2 navigation file format
//!
//! A NAV2 file is a flat, offset-addressed snapshot of a navigation graph:
//! fixed-size record arrays cross-reference each other through indices
//! rather than pointers. This crate reads and writes those records for
//! every supported format revision; turning them into a navigable graph is
//! the job of the `nav2-graph` crate.

mod nav_file;
mod records;
mod version;


pub use nav_file::{NavFile, HEADER_SIZE};
pub use records::{
    EdictKey, FileEdict, FileLink, FileNode, FileNodeOrigin, FileTraversal, NO_TRAVERSAL,
};
pub use version::{FormatVersion, NAV2_MAGIC};
