//! Procedural lightning: single bolts and the field that keeps respawning them.

pub(crate) mod bolt;
pub(crate) mod field;
pub(crate) mod outline;
