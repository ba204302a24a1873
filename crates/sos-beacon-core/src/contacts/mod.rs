mod registry;

pub use registry::{Contact, ContactRegistry};
