//! Vector frame assembly and the per-mode plotters that draw into it.

pub(crate) mod canvas;
pub(crate) mod plot;
