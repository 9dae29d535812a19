//! Channels and the messages sent in them.

pub mod message;

use crate::{
    entity_codec,
    types::{
        id::{
            marker::{ChannelMarker, GuildMarker},
            Id,
        },
        util::value_codec,
    },
};
use serde::{Deserialize, Serialize};

/// Type of a channel.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[non_exhaustive]
#[serde(from = "u8", into = "u8")]
pub enum ChannelType {
    #[default]
    GuildText,
    Private,
    GuildVoice,
    Group,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    Unknown(u8),
}

impl From<u8> for ChannelType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Private,
            2 => Self::GuildVoice,
            3 => Self::Group,
            4 => Self::GuildCategory,
            5 => Self::GuildAnnouncement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::GuildStageVoice,
            14 => Self::GuildDirectory,
            15 => Self::GuildForum,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ChannelType> for u8 {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::GuildText => 0,
            ChannelType::Private => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::Group => 3,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildAnnouncement => 5,
            ChannelType::AnnouncementThread => 10,
            ChannelType::PublicThread => 11,
            ChannelType::PrivateThread => 12,
            ChannelType::GuildStageVoice => 13,
            ChannelType::GuildDirectory => 14,
            ChannelType::GuildForum => 15,
            ChannelType::Unknown(unknown) => unknown,
        }
    }
}

impl ChannelType {
    /// Whether the channel is a thread.
    pub const fn is_thread(self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }
}

value_codec!(ChannelType => "channel type");

/// A channel mentioned in a crossposted message.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ChannelMention {
    pub id: Id<ChannelMarker>,
    pub guild_id: Id<GuildMarker>,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    pub name: String,
}

entity_codec!(ChannelMention {
    id: "id" => always,
    guild_id: "guild_id" => always,
    kind: "type" => always,
    name: "name" => always,
});

impl ChannelMention {
    /// Text that mentions the channel in a message.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelMention, ChannelType};
    use crate::{
        codec::{from_slice, to_vec, Entity},
        types::id::Id,
    };
    use serde_test::Token;

    #[test]
    fn channel_type_values() {
        assert_eq!(ChannelType::from(15), ChannelType::GuildForum);
        assert_eq!(ChannelType::from(99), ChannelType::Unknown(99));
        assert_eq!(u8::from(ChannelType::Unknown(99)), 99);
        assert!(ChannelType::PublicThread.is_thread());

        assert_eq!(from_slice::<ChannelType>(b"11").unwrap(), ChannelType::PublicThread);
        assert_eq!(from_slice::<ChannelType>(b"42").unwrap(), ChannelType::Unknown(42));
        assert!(from_slice::<ChannelType>(b"256").is_err());
        assert_eq!(to_vec(&ChannelType::GuildVoice).unwrap(), b"2");

        serde_test::assert_tokens(&ChannelType::GuildCategory, &[Token::U8(4)]);
    }

    #[test]
    fn channel_mention() {
        let mention = ChannelMention::from_json(
            br#"{"id":"278325129692446722","guild_id":"278325129692446720","name":"big-news","type":5}"#,
        )
        .unwrap();

        assert_eq!(mention.id, Id::new(278_325_129_692_446_722));
        assert_eq!(mention.kind, ChannelType::GuildAnnouncement);
        assert_eq!(mention.mention(), "<#278325129692446722>");
        assert_eq!(
            mention.to_json().unwrap(),
            br#"{"id":"278325129692446722","guild_id":"278325129692446720","type":5,"name":"big-news"}"#
        );
        assert_eq!(serde_json::to_vec(&mention).unwrap(), mention.to_json().unwrap());
    }
}
