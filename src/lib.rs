//! Client-side model and streaming JSON codec for Discord API entities.
//!
//! Entities such as [`Emoji`] and [`Message`] decode straight from payload
//! bytes through [`codec::Entity::from_json`] and encode back to canonical
//! JSON with [`codec::Entity::to_json`]. Every entity also implements
//! `serde`'s traits with the same omission rules, so either path can be
//! used by a transport.

pub mod codec;
pub mod types;

pub use self::types::{
    channel::{
        message::{
            Attachment, Embed, Message, MessageFlags, MessageType, Reaction, Sticker, StickerItem,
        },
        ChannelMention, ChannelType,
    },
    emoji::Emoji,
    id::Id,
    user::{GuildUser, Member, User},
    util::Timestamp,
};
