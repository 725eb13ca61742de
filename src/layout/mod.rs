pub(crate) mod aspect;
pub(crate) mod cache;
pub(crate) mod filmback;
pub(crate) mod pad;
pub(crate) mod pan_scan;
pub(crate) mod safe_area;
pub(crate) mod solver;
