pub use hammer_core::*;
