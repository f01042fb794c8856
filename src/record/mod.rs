//! The intercepting proxy layer: the explicit surface capability interface
//! and the recorder that instruments calls before delegating.

pub mod recorder;
pub mod surface;
