pub mod entity;
pub mod error;
pub mod fluid;
pub mod vec3;

pub use entity::StoneId;
pub use error::SkipError;
pub use fluid::{FluidProperties, FluidTable, Medium};
pub use vec3::Vec3;
