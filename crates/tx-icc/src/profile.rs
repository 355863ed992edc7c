use crate::ProfileError;
use crate::cursor::{ByteCursor, slice_at};

pub const PROFILE_MAGIC: [u8; 4] = *b"acsp";
pub const DESC_TAG: [u8; 4] = *b"desc";

const MAGIC_OFFSET: usize = 36;
const TAG_COUNT_OFFSET: usize = 128;
const TAG_TABLE_OFFSET: usize = 132;
const TAG_ENTRY_LEN: usize = 12;
/// Type signature plus reserved word plus ASCII count.
const DESC_TEXT_OFFSET: usize = 12;
const MAX_DESC_LEN: usize = 255;

/// Descriptions that identify the standard sRGB profile.
pub const SRGB_DESCRIPTIONS: [&str; 4] = [
    "sRGB IEC61966-2.1",
    "sRGB IEC61966-2-1",
    "sRGB IEC61966",
    "* wsRGB",
];

/// Fixed header fields of an embedded ICC profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileHeader {
    pub size: u32,
    pub cmm_type: [u8; 4],
    pub version: u32,
    pub device_class: [u8; 4],
    pub color_space: [u8; 4],
    pub connection_space: [u8; 4],
    pub tag_count: u32,
}

impl ProfileHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, ProfileError> {
        let magic = slice_at(bytes, MAGIC_OFFSET, 4)?;
        if magic != PROFILE_MAGIC {
            return Err(ProfileError::BadMagic);
        }

        let mut cur = ByteCursor::new(bytes);
        let size = cur.read_u32_be()?;
        let cmm_type = cur.read_signature()?;
        let version = cur.read_u32_be()?;
        let device_class = cur.read_signature()?;
        let color_space = cur.read_signature()?;
        let connection_space = cur.read_signature()?;
        cur.seek(TAG_COUNT_OFFSET);
        let tag_count = cur.read_u32_be()?;

        Ok(Self {
            size,
            cmm_type,
            version,
            device_class,
            color_space,
            connection_space,
            tag_count,
        })
    }

    /// `(major, minor)` from the BCD-encoded version field.
    pub fn version_parts(&self) -> (u8, u8) {
        let [major, minor, ..] = self.version.to_be_bytes();
        (major, minor >> 4)
    }

    /// Walks the tag table; stops after the first entry that runs past the
    /// end of `bytes`.
    pub fn tags<'a>(&self, bytes: &'a [u8]) -> Tags<'a> {
        Tags {
            cursor: ByteCursor::at(bytes, TAG_TABLE_OFFSET),
            left: self.tag_count,
        }
    }
}

/// One row of the tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    pub signature: [u8; 4],
    pub offset: u32,
    pub length: u32,
}

impl TagEntry {
    /// The tagged region, bounds-checked against `bytes`.
    pub fn data<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8], ProfileError> {
        slice_at(bytes, self.offset as usize, self.length as usize)
    }
}

#[derive(Debug, Clone)]
pub struct Tags<'a> {
    cursor: ByteCursor<'a>,
    left: u32,
}

impl Iterator for Tags<'_> {
    type Item = Result<TagEntry, ProfileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;

        let entry = self.cursor.read_bytes(TAG_ENTRY_LEN).and_then(|row| {
            let mut row = ByteCursor::new(row);
            Ok(TagEntry {
                signature: row.read_signature()?,
                offset: row.read_u32_be()?,
                length: row.read_u32_be()?,
            })
        });
        if entry.is_err() {
            self.left = 0;
        }
        Some(entry)
    }
}

/// Text of the `desc` tag: at most 255 bytes, cut at the first NUL.
pub fn description(bytes: &[u8]) -> Result<String, ProfileError> {
    let header = ProfileHeader::parse(bytes)?;
    for tag in header.tags(bytes) {
        let tag = tag?;
        if tag.signature != DESC_TAG {
            continue;
        }

        let data = tag.data(bytes)?;
        let text = data
            .get(DESC_TEXT_OFFSET..)
            .ok_or(ProfileError::ShortTag {
                length: tag.length,
            })?;
        let text = &text[..text.len().min(MAX_DESC_LEN)];
        let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        return Ok(String::from_utf8_lossy(&text[..end]).into_owned());
    }
    Err(ProfileError::MissingDescription)
}

/// Whether the profile describes itself as standard sRGB.
///
/// Malformed or truncated profiles answer `false`.
pub fn is_standard_srgb(bytes: &[u8]) -> bool {
    match description(bytes) {
        Ok(text) => SRGB_DESCRIPTIONS.contains(&text.as_str()),
        Err(err) => {
            tracing::debug!(%err, "color profile is not standard sRGB");
            false
        }
    }
}
