//! Descriptor ingestion utilities.
//!
//! A descriptor is a TOML file describing one build. A directory may hold
//! several variants of the same build (`<variant>.nativeplan.toml`); each is
//! loaded on its own so a broken variant does not hide the others.

mod load;

pub use load::{
    DESCRIPTOR_FILE_NAME, DEFAULT_VARIANT, DescriptorLoadError, LoadedDescriptor,
    VARIANT_SUFFIX, discover_variants, load_descriptor, parse_descriptor,
};
