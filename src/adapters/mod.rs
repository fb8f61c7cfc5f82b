// Adapters layer: concrete implementations for external systems.

pub mod xmp;

pub use xmp::XmpMarkerSource;
