pub mod mount;
pub mod raster;
pub mod svg;
pub mod transition;
