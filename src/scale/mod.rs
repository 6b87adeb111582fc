pub mod linear;
pub mod set;
