pub use edgegate_types::prelude::*;

// vim: ts=4
