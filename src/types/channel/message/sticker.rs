use crate::{
    entity_codec,
    types::{
        id::{
            marker::{GuildMarker, StickerMarker, StickerPackMarker},
            Id,
        },
        user::User,
        util::{is_false, value_codec, CDN_URL},
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// File format of a sticker's image.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[non_exhaustive]
#[serde(from = "u8", into = "u8")]
pub enum StickerFormatType {
    Png,
    Apng,
    Lottie,
    Gif,
    Unknown(u8),
}

impl StickerFormatType {
    /// File extension of the sticker's CDN asset.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Lottie => "json",
            Self::Gif => "gif",
            _ => "png",
        }
    }
}

impl Default for StickerFormatType {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl From<u8> for StickerFormatType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Png,
            2 => Self::Apng,
            3 => Self::Lottie,
            4 => Self::Gif,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<StickerFormatType> for u8 {
    fn from(value: StickerFormatType) -> Self {
        match value {
            StickerFormatType::Png => 1,
            StickerFormatType::Apng => 2,
            StickerFormatType::Lottie => 3,
            StickerFormatType::Gif => 4,
            StickerFormatType::Unknown(unknown) => unknown,
        }
    }
}

/// Kind of sticker.
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum StickerType {
    /// Official sticker in a pack, part of Nitro or in a removed purchasable
    /// pack.
    #[default]
    Standard = 1,
    /// Sticker uploaded to a boosted guild for the guild's members.
    Guild = 2,
}

impl TryFrom<u8> for StickerType {
    /// The unknown value.
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Standard),
            2 => Ok(Self::Guild),
            unknown => Err(unknown),
        }
    }
}

impl From<StickerType> for u8 {
    fn from(value: StickerType) -> Self {
        value as u8
    }
}

value_codec!(
    StickerFormatType => "sticker format type",
    StickerType => "sticker type",
);

fn sticker_url(id: Id<StickerMarker>, format: StickerFormatType) -> String {
    format!("{CDN_URL}/stickers/{id}.{}", format.extension())
}

/// Partial sticker data sent with messages.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct StickerItem {
    pub id: Id<StickerMarker>,
    pub name: String,
    pub format_type: StickerFormatType,
}

entity_codec!(StickerItem {
    id: "id" => always,
    name: "name" => always,
    format_type: "format_type" => always,
});

impl StickerItem {
    /// CDN URL of the sticker's image.
    pub fn url(&self) -> String {
        sticker_url(self.id, self.format_type)
    }
}

/// A sticker that can be sent in messages.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Sticker {
    pub id: Id<StickerMarker>,
    /// Set for standard stickers.
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub pack_id: Id<StickerPackMarker>,
    pub name: String,
    pub description: String,
    /// Comma separated autocomplete keywords.
    pub tags: String,
    /// `None` when Discord sent `null` or left the field out.
    #[serde(rename = "type")]
    pub kind: Option<StickerType>,
    pub format_type: StickerFormatType,
    /// Whether a guild sticker can be used; may be false due to loss of
    /// server boosts.
    #[serde(skip_serializing_if = "is_false")]
    pub available: bool,
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub guild_id: Id<GuildMarker>,
    /// User that uploaded a guild sticker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Sort order within a standard sticker's pack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_value: Option<u32>,
}

entity_codec!(Sticker {
    id: "id" => always,
    pack_id: "pack_id" => omit_empty,
    name: "name" => always,
    description: "description" => always,
    tags: "tags" => always,
    kind: "type" => always,
    format_type: "format_type" => always,
    available: "available" => omit_empty,
    guild_id: "guild_id" => omit_empty,
    user: "user" => omit_empty,
    sort_value: "sort_value" => omit_empty,
});

impl Sticker {
    /// Tags with surrounding whitespace trimmed and empty tags removed.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// CDN URL of the sticker's image.
    pub fn url(&self) -> String {
        sticker_url(self.id, self.format_type)
    }

    /// When the sticker was created.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.id.created_at()
    }

    /// When the sticker's pack was created, if it belongs to one.
    pub fn pack_created_at(&self) -> Option<DateTime<Utc>> {
        self.pack_id.created_at()
    }
}
