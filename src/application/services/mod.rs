pub mod photos;

pub use photos::{PhotoService, PhotoSource};
