//! Individual lint check groups

pub mod flow;
pub mod protocol;
pub mod quality;
pub mod references;
