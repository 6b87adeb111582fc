pub mod curve;
pub mod radial;
