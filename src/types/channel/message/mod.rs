//! Messages and the objects embedded in them.

mod attachment;
mod embed;
mod interaction;
mod reaction;
mod sticker;

pub use self::{
    attachment::Attachment,
    embed::{
        Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, EmbedProvider, EmbedThumbnail,
        EmbedVideo,
    },
    interaction::{InteractionType, MessageInteraction},
    reaction::Reaction,
    sticker::{Sticker, StickerFormatType, StickerItem, StickerType},
};

use crate::{
    codec::{parse_u64, Buffer, Decode, DecodeError, Encode, EncodeError, Lexer, Token},
    entity_codec,
    types::{
        channel::ChannelMention,
        id::{
            marker::{
                ApplicationMarker, ChannelMarker, GuildMarker, MessageMarker, RoleMarker,
                UserMarker, WebhookMarker,
            },
            Id,
        },
        user::{GuildUser, User},
        util::{value_codec, Timestamp},
    },
};
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A message sent in a channel.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Message {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    /// Unset for messages sent in private channels, and for messages
    /// received over the gateway's message create event.
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub guild_id: Id<GuildMarker>,
    #[serde(rename = "type")]
    pub kind: MessageType,
    /// `None` when Discord sent `null` or left the field out.
    pub flags: Option<MessageFlags>,
    pub tts: bool,
    pub pinned: bool,
    pub mention_everyone: bool,
    /// Users specifically mentioned, with partial member data when the
    /// message was sent in a guild.
    pub mentions: Vec<GuildUser>,
    pub mention_roles: Vec<Id<RoleMarker>>,
    /// Channels mentioned in a crossposted message.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mention_channels: Vec<ChannelMention>,
    /// Author of the message. For webhook messages this is the webhook's
    /// ID, username and avatar rather than a real user.
    pub author: User,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<Timestamp>,
    pub attachments: Vec<Attachment>,
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    /// Message components, kept as raw JSON.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub components: Value,
    /// Used for validating that a message was sent.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nonce: String,
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub webhook_id: Id<WebhookMarker>,
    /// Sent with Rich Presence-related chat embeds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<MessageActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<MessageApplication>,
    /// Set if the message is an interaction response or application-owned
    /// webhook.
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub application_id: Id<ApplicationMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    /// The message this one replies to, if Discord resolved it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_message: Option<Box<Message>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<MessageInteraction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sticker_items: Vec<StickerItem>,
}

entity_codec!(Message {
    id: "id" => always,
    channel_id: "channel_id" => always,
    guild_id: "guild_id" => omit_empty,
    kind: "type" => always,
    flags: "flags" => always,
    tts: "tts" => always,
    pinned: "pinned" => always,
    mention_everyone: "mention_everyone" => always,
    mentions: "mentions" => always,
    mention_roles: "mention_roles" => always,
    mention_channels: "mention_channels" => omit_empty,
    author: "author" => always,
    content: "content" => always,
    timestamp: "timestamp" => omit_empty,
    edited_timestamp: "edited_timestamp" => omit_empty,
    attachments: "attachments" => always,
    embeds: "embeds" => always,
    reactions: "reactions" => omit_empty,
    components: "components" => omit_empty,
    nonce: "nonce" => omit_empty,
    webhook_id: "webhook_id" => omit_empty,
    activity: "activity" => omit_empty,
    application: "application" => omit_empty,
    application_id: "application_id" => omit_empty,
    message_reference: "message_reference" => omit_empty,
    referenced_message: "referenced_message" => omit_empty,
    interaction: "interaction" => omit_empty,
    sticker_items: "sticker_items" => omit_empty,
});

impl Message {
    /// Client URL of the message. Messages outside of a guild link to the
    /// `@me` guild.
    pub fn url(&self) -> String {
        let guild = if self.guild_id.is_set() {
            self.guild_id.to_string()
        } else {
            "@me".to_owned()
        };

        format!(
            "https://discord.com/channels/{guild}/{}/{}",
            self.channel_id, self.id
        )
    }

    /// When the message was sent, derived from its ID.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.id.created_at()
    }

    /// Whether the given user is mentioned in the message.
    pub fn mentions_user(&self, user_id: Id<UserMarker>) -> bool {
        self.mentions.iter().any(|mention| mention.user.id == user_id)
    }
}

// ---------------------------------------------------------------------------
// MessageType
// ---------------------------------------------------------------------------

/// Type of a message.
#[derive(Clone, Copy, Debug, Default, serde::Deserialize, Eq, Hash, PartialEq, serde::Serialize)]
#[non_exhaustive]
#[serde(from = "u8", into = "u8")]
pub enum MessageType {
    #[default]
    Regular,
    RecipientAdd,
    RecipientRemove,
    Call,
    ChannelNameChange,
    ChannelIconChange,
    ChannelMessagePinned,
    UserJoin,
    GuildBoost,
    GuildBoostTier1,
    GuildBoostTier2,
    GuildBoostTier3,
    ChannelFollowAdd,
    GuildDiscoveryDisqualified,
    GuildDiscoveryRequalified,
    GuildDiscoveryGracePeriodInitialWarning,
    GuildDiscoveryGracePeriodFinalWarning,
    /// Sent to the parent channel when a thread is created from an older
    /// message.
    ThreadCreated,
    Reply,
    ChatInputCommand,
    /// First message of a thread started from an existing message.
    ThreadStarterMessage,
    GuildInviteReminder,
    ContextMenuCommand,
    Unknown(u8),
}

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Regular,
            1 => Self::RecipientAdd,
            2 => Self::RecipientRemove,
            3 => Self::Call,
            4 => Self::ChannelNameChange,
            5 => Self::ChannelIconChange,
            6 => Self::ChannelMessagePinned,
            7 => Self::UserJoin,
            8 => Self::GuildBoost,
            9 => Self::GuildBoostTier1,
            10 => Self::GuildBoostTier2,
            11 => Self::GuildBoostTier3,
            12 => Self::ChannelFollowAdd,
            14 => Self::GuildDiscoveryDisqualified,
            15 => Self::GuildDiscoveryRequalified,
            16 => Self::GuildDiscoveryGracePeriodInitialWarning,
            17 => Self::GuildDiscoveryGracePeriodFinalWarning,
            18 => Self::ThreadCreated,
            19 => Self::Reply,
            20 => Self::ChatInputCommand,
            21 => Self::ThreadStarterMessage,
            22 => Self::GuildInviteReminder,
            23 => Self::ContextMenuCommand,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self {
        match value {
            MessageType::Regular => 0,
            MessageType::RecipientAdd => 1,
            MessageType::RecipientRemove => 2,
            MessageType::Call => 3,
            MessageType::ChannelNameChange => 4,
            MessageType::ChannelIconChange => 5,
            MessageType::ChannelMessagePinned => 6,
            MessageType::UserJoin => 7,
            MessageType::GuildBoost => 8,
            MessageType::GuildBoostTier1 => 9,
            MessageType::GuildBoostTier2 => 10,
            MessageType::GuildBoostTier3 => 11,
            MessageType::ChannelFollowAdd => 12,
            MessageType::GuildDiscoveryDisqualified => 14,
            MessageType::GuildDiscoveryRequalified => 15,
            MessageType::GuildDiscoveryGracePeriodInitialWarning => 16,
            MessageType::GuildDiscoveryGracePeriodFinalWarning => 17,
            MessageType::ThreadCreated => 18,
            MessageType::Reply => 19,
            MessageType::ChatInputCommand => 20,
            MessageType::ThreadStarterMessage => 21,
            MessageType::GuildInviteReminder => 22,
            MessageType::ContextMenuCommand => 23,
            MessageType::Unknown(unknown) => unknown,
        }
    }
}

value_codec!(MessageType => "message type");

// ---------------------------------------------------------------------------
// MessageFlags
// ---------------------------------------------------------------------------

bitflags! {
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        /// Published to subscribed channels through channel following.
        const CROSSPOSTED = 1;
        /// Originated from a message in another channel through channel
        /// following.
        const IS_CROSSPOST = 1 << 1;
        /// Embeds are not included when serializing the message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Source message of the crosspost has been deleted.
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        /// Came from the urgent message system.
        const URGENT = 1 << 4;
        /// Has an associated thread with the same ID as the message.
        const HAS_THREAD = 1 << 5;
        /// Only visible to the user who invoked the interaction.
        const EPHEMERAL = 1 << 6;
        /// Interaction response whose bot is "thinking".
        const LOADING = 1 << 7;
        const FAILED_TO_MENTION_SOME_ROLES_IN_THREAD = 1 << 8;
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
        const IS_VOICE_MESSAGE = 1 << 13;
    }
}

impl Default for MessageFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_retain(u64::deserialize(deserializer)?))
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

/// Unknown bits are kept so that re-encoding is lossless.
impl Decode for MessageFlags {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        match token {
            Token::Null => Ok(()),
            Token::Integer => {
                let bits = parse_u64(lexer.output())
                    .ok_or_else(|| lexer.malformed("message flags", token))?;
                *self = Self::from_bits_retain(bits);

                Ok(())
            }
            other => Err(lexer.type_mismatch("message flags", other)),
        }
    }
}

impl Encode for MessageFlags {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        buf.write_u64(self.bits());

        Ok(())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Activity, application and references
// ---------------------------------------------------------------------------

/// Kind of Rich Presence activity a message invites to.
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum MessageActivityType {
    #[default]
    Join = 1,
    Spectate = 2,
    Listen = 3,
    JoinRequest = 5,
}

impl TryFrom<u8> for MessageActivityType {
    /// The unknown value.
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Join),
            2 => Ok(Self::Spectate),
            3 => Ok(Self::Listen),
            5 => Ok(Self::JoinRequest),
            unknown => Err(unknown),
        }
    }
}

impl From<MessageActivityType> for u8 {
    fn from(value: MessageActivityType) -> Self {
        value as u8
    }
}

value_codec!(MessageActivityType => "message activity type");

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MessageActivity {
    /// `None` when Discord sent `null` or left the field out.
    #[serde(rename = "type")]
    pub kind: Option<MessageActivityType>,
    /// Party ID from a Rich Presence event.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub party_id: String,
}

entity_codec!(MessageActivity {
    kind: "type" => always,
    party_id: "party_id" => omit_empty,
});

/// Application that sent a Rich Presence chat embed.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MessageApplication {
    pub id: Id<ApplicationMarker>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cover_image: String,
    pub description: String,
    pub icon: String,
    pub name: String,
}

entity_codec!(MessageApplication {
    id: "id" => always,
    cover_image: "cover_image" => omit_empty,
    description: "description" => always,
    icon: "icon" => always,
    name: "name" => always,
});

impl MessageApplication {
    /// When the application was created.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.id.created_at()
    }
}

/// Source of a crosspost, channel follow, pin or reply.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MessageReference {
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub message_id: Id<MessageMarker>,
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub channel_id: Id<ChannelMarker>,
    #[serde(skip_serializing_if = "Id::is_unset")]
    pub guild_id: Id<GuildMarker>,
}

entity_codec!(MessageReference {
    message_id: "message_id" => omit_empty,
    channel_id: "channel_id" => omit_empty,
    guild_id: "guild_id" => omit_empty,
});

#[cfg(test)]
mod tests {
    use super::{
        Message, MessageActivity, MessageActivityType, MessageFlags, MessageType, StickerFormatType,
    };
    use crate::{
        codec::{to_vec, DecodeErrorType, Entity},
        types::{channel::message::StickerItem, id::Id},
    };
    use serde_json::json;
    use static_assertions::assert_impl_all;
    use std::fmt::Debug;

    assert_impl_all!(Message: Clone, Debug, Default, PartialEq, Send, Sync);

    const REPLY: &str = r#"{
        "id": "334385199974967042",
        "channel_id": "290926798999357250",
        "guild_id": "290926798626357250",
        "type": 19,
        "flags": 4,
        "tts": false,
        "pinned": false,
        "mention_everyone": false,
        "mentions": [
            {
                "id": "53908099506183680",
                "username": "Mason",
                "discriminator": "9999",
                "member": {"roles": ["290926798626357999"], "joined_at": "2017-03-13T19:19:14.040000+00:00"}
            }
        ],
        "mention_roles": [],
        "author": {
            "id": "53908099506183680",
            "username": "Mason",
            "discriminator": "9999",
            "avatar": "a_bab14f271d565501444b2ca3be944b25"
        },
        "content": "Supa Hot",
        "timestamp": "2017-07-11T17:27:07.299000+00:00",
        "edited_timestamp": null,
        "attachments": [],
        "embeds": [],
        "reactions": [{"count": 1, "me": false, "emoji": {"id": null, "name": "🔥"}}],
        "components": [{"type": 1, "components": [{"type": 2, "style": 1, "label": "Click", "custom_id": "click"}]}],
        "nonce": "1234",
        "message_reference": {
            "message_id": "334385199974967041",
            "channel_id": "290926798999357250",
            "guild_id": "290926798626357250"
        },
        "referenced_message": {
            "id": "334385199974967041",
            "channel_id": "290926798999357250",
            "type": 0,
            "content": "hot?",
            "author": {"id": "1", "username": "x", "discriminator": "0"},
            "attachments": [],
            "embeds": [],
            "mentions": [],
            "mention_roles": [],
            "pinned": false,
            "mention_everyone": false,
            "tts": false,
            "timestamp": "2017-07-11T17:27:00+00:00",
            "flags": 0
        },
        "sticker_items": [{"id": "749054660769218631", "name": "Wave", "format_type": 3}],
        "position": 3
    }"#;

    #[test]
    fn decode_reply() {
        let message = Message::from_json(REPLY.as_bytes()).unwrap();

        assert_eq!(message.id, Id::new(334_385_199_974_967_042));
        assert_eq!(message.kind, MessageType::Reply);
        assert_eq!(message.flags, Some(MessageFlags::SUPPRESS_EMBEDS));
        assert_eq!(message.content, "Supa Hot");
        assert!(message.edited_timestamp.is_none());
        assert!(message.mentions_user(Id::new(53_908_099_506_183_680)));
        assert!(!message.mentions_user(Id::new(1)));
        assert_eq!(
            message.mentions[0].member.as_ref().unwrap().roles,
            [Id::new(290_926_798_626_357_999)]
        );
        assert_eq!(message.reactions[0].emoji.name, "🔥");
        assert_eq!(message.components[0]["components"][0]["custom_id"], json!("click"));
        assert_eq!(
            message.sticker_items,
            [StickerItem {
                id: Id::new(749_054_660_769_218_631),
                name: "Wave".to_owned(),
                format_type: StickerFormatType::Lottie,
            }]
        );

        let reference = message.message_reference.as_ref().unwrap();
        assert_eq!(reference.message_id, Id::new(334_385_199_974_967_041));

        let replied = message.referenced_message.as_deref().unwrap();
        assert_eq!(replied.content, "hot?");
        assert_eq!(replied.kind, MessageType::Regular);
        assert!(replied.referenced_message.is_none());
    }

    #[test]
    fn url() {
        let mut message = Message::from_json(REPLY.as_bytes()).unwrap();
        assert_eq!(
            message.url(),
            "https://discord.com/channels/290926798626357250/290926798999357250/334385199974967042"
        );

        message.guild_id = Id::UNSET;
        assert_eq!(
            message.url(),
            "https://discord.com/channels/@me/290926798999357250/334385199974967042"
        );
        assert_eq!(
            message.created_at().unwrap().to_rfc3339(),
            "2017-07-11T17:27:24.250+00:00"
        );
    }

    #[test]
    fn round_trip() {
        let message = Message::from_json(REPLY.as_bytes()).unwrap();
        let encoded = message.to_json().unwrap();

        assert_eq!(Message::from_json(&encoded).unwrap(), message);
        assert_eq!(serde_json::to_vec(&message).unwrap(), encoded);
        assert_eq!(serde_json::from_slice::<Message>(&encoded).unwrap(), message);
    }

    #[test]
    fn default_message_writes_required_fields() {
        let message = Message::default();

        assert_eq!(
            message.to_json().unwrap(),
            br#"{"id":null,"channel_id":null,"type":0,"flags":null,"tts":false,"pinned":false,"mention_everyone":false,"mentions":[],"mention_roles":[],"author":{"id":null,"username":"","discriminator":""},"content":"","attachments":[],"embeds":[]}"#
        );
        assert_eq!(serde_json::to_vec(&message).unwrap(), message.to_json().unwrap());
    }

    #[test]
    fn null_sequences_decode_empty() {
        let message =
            Message::from_json(br#"{"mentions":null,"attachments":null,"reactions":null}"#)
                .unwrap();

        assert!(message.mentions.is_empty());
        assert!(message.attachments.is_empty());
        assert!(message.reactions.is_empty());
    }

    #[test]
    fn unknown_flag_bits_are_kept() {
        let message = Message::from_json(br#"{"flags": 1048580}"#).unwrap();
        let flags = message.flags.unwrap();

        assert!(flags.contains(MessageFlags::SUPPRESS_EMBEDS));
        assert_eq!(flags.bits(), 1_048_580);
        assert_eq!(to_vec(&flags).unwrap(), b"1048580");
    }

    #[test]
    fn null_flags_stay_null() {
        let message = Message::from_json(br#"{"flags":null}"#).unwrap();
        assert_eq!(message.flags, None);

        let encoded = message.to_json().unwrap();
        assert!(encoded
            .windows(br#""flags":null"#.len())
            .any(|window| window == br#""flags":null"#));
        assert_eq!(serde_json::to_vec(&message).unwrap(), encoded);

        let message = Message::from_json(br#"{"flags":0}"#).unwrap();
        assert_eq!(message.flags, Some(MessageFlags::empty()));
        assert_eq!(Message::from_json(&message.to_json().unwrap()).unwrap(), message);
    }

    #[test]
    fn nested_errors_propagate_unchanged() {
        let err = Message::from_json(br#"{"reactions":[{"emoji":{"animated":"no"}}]}"#)
            .unwrap_err();

        assert!(matches!(
            err.kind(),
            DecodeErrorType::TypeMismatch { expected: "bool", .. }
        ));

        let err = Message::from_json(br#"{"timestamp":"not a timestamp at all, really"}"#)
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::NestedDecode { codec: "timestamp" }
        );

        let err = Message::from_json(br#"{"activity":{"type":4}}"#).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::MalformedScalar {
                expected: "message activity type"
            }
        );
    }

    #[test]
    fn activity() {
        let activity = MessageActivity::from_json(br#"{"type":5,"party_id":"spotify:1"}"#)
            .unwrap();

        assert_eq!(activity.kind, Some(MessageActivityType::JoinRequest));
        assert_eq!(
            activity.to_json().unwrap(),
            br#"{"type":5,"party_id":"spotify:1"}"#
        );

        let unset = MessageActivity::from_json(br#"{"party_id":"spotify:1"}"#).unwrap();
        assert_eq!(unset.kind, None);
        assert_eq!(
            unset.to_json().unwrap(),
            br#"{"type":null,"party_id":"spotify:1"}"#
        );
        assert_eq!(serde_json::to_vec(&unset).unwrap(), unset.to_json().unwrap());
    }
}
