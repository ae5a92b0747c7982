mod classify;

pub use classify::{TransparencyClass, TransparencyMode, classify, resolve_transparency};
