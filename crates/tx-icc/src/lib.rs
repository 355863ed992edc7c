//! Inspection of embedded ICC color profiles.
//!
//! Only the fixed header, the tag table and the `desc` text are decoded; the
//! goal is deciding whether an image is already in standard sRGB. Every read
//! goes through [`ByteCursor`], so malformed blobs surface as
//! [`ProfileError`] and never read out of bounds.

mod cursor;
mod profile;

pub use cursor::ByteCursor;
pub use profile::{
    DESC_TAG, PROFILE_MAGIC, ProfileHeader, SRGB_DESCRIPTIONS, TagEntry, Tags, description,
    is_standard_srgb,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("profile truncated: {len} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        len: usize,
        available: usize,
    },
    #[error("missing `acsp` profile signature")]
    BadMagic,
    #[error("`desc` tag of {length} bytes is shorter than its type header")]
    ShortTag { length: u32 },
    #[error("no `desc` tag")]
    MissingDescription,
}
