pub mod body;
pub mod constants;
pub mod gravity;
pub mod vector;

pub use body::Body;
pub use vector::Vector3D;
