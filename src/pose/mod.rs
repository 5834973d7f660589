pub mod landmark;
pub mod view;

pub use landmark::{Landmark, LandmarkIndex, LandmarkSet};
pub use view::{View, ViewSet};
