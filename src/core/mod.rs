// Resource declaration shared by every CRUD endpoint

pub mod traits;

pub use traits::{CRUDResource, MergeIntoActiveModel};
