pub mod model;
pub mod zoom;
