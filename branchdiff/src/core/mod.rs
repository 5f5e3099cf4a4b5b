//! Pure diff logic: parsing, report building and text rendering.
//!
//! Nothing in here touches the filesystem, the clock or a subprocess.

pub mod patch;
pub mod report;
pub mod summary;
