//! Users and guild members.

use crate::{
    codec::{
        decode_nested, encode_entity, Buffer, Decode, DecodeError, Encode, EncodeError, Entity,
        Lexer, ObjectWriter, Token, WireKey,
    },
    entity_codec,
    types::{
        id::{
            marker::{RoleMarker, UserMarker},
            Id,
        },
        util::{is_false, is_zero_u64, Timestamp, CDN_URL},
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    pub id: Id<UserMarker>,
    pub username: String,
    pub discriminator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub bot: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub system: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mfa_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub flags: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<u8>,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub public_flags: u64,
}

entity_codec!(User {
    id: "id" => always,
    username: "username" => always,
    discriminator: "discriminator" => always,
    avatar: "avatar" => omit_empty,
    global_name: "global_name" => omit_empty,
    bot: "bot" => omit_empty,
    system: "system" => omit_empty,
    mfa_enabled: "mfa_enabled" => omit_empty,
    banner: "banner" => omit_empty,
    accent_color: "accent_color" => omit_empty,
    locale: "locale" => omit_empty,
    verified: "verified" => omit_empty,
    email: "email" => omit_empty,
    flags: "flags" => omit_empty,
    premium_type: "premium_type" => omit_empty,
    public_flags: "public_flags" => omit_empty,
});

impl User {
    /// CDN URL of the user's avatar, or `None` if no avatar is set.
    ///
    /// Animated avatars (hashes prefixed with `a_`) link to a GIF.
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            let extension = if hash.starts_with("a_") { "gif" } else { "png" };

            format!("{CDN_URL}/avatars/{}/{hash}.{extension}", self.id)
        })
    }

    /// `Username#Discriminator`, or just `Username` for the new username
    /// system.
    pub fn tag(&self) -> String {
        match self.discriminator.as_str() {
            "0" | "" => self.username.clone(),
            discriminator => format!("{}#{discriminator}", self.username),
        }
    }

    /// Text that mentions the user in a message.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// When the account was created.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.id.created_at()
    }
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A user's membership in a guild.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Member {
    /// Absent when the member is embedded in a [`GuildUser`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub roles: Vec<Id<RoleMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<Timestamp>,
    #[serde(skip_serializing_if = "is_false")]
    pub deaf: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mute: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_disabled_until: Option<Timestamp>,
}

entity_codec!(Member {
    user: "user" => omit_empty,
    nick: "nick" => omit_empty,
    avatar: "avatar" => omit_empty,
    roles: "roles" => always,
    joined_at: "joined_at" => omit_empty,
    premium_since: "premium_since" => omit_empty,
    deaf: "deaf" => omit_empty,
    mute: "mute" => omit_empty,
    pending: "pending" => omit_empty,
    communication_disabled_until: "communication_disabled_until" => omit_empty,
});

impl Member {
    /// Nickname if one is set, otherwise the user's global or user name.
    pub fn display_name(&self) -> Option<&str> {
        self.nick.as_deref().or_else(|| {
            let user = self.user.as_ref()?;

            Some(user.global_name.as_deref().unwrap_or(&user.username))
        })
    }
}

// ---------------------------------------------------------------------------
// GuildUser
// ---------------------------------------------------------------------------

/// A user with the optional partial member object that accompanies
/// mentions in guild messages.
///
/// On the wire the member sits next to the user's own keys rather than
/// wrapping them.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GuildUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
}

impl GuildUser {
    /// Index of `member` in [`KEYS`](Entity::KEYS), right after the
    /// embedded user's keys.
    const MEMBER: usize = 16;
}

impl Entity for GuildUser {
    const NAME: &'static str = "GuildUser";

    const KEYS: &'static [WireKey] = &[
        WireKey::new("id"),
        WireKey::new("username"),
        WireKey::new("discriminator"),
        WireKey::new("avatar"),
        WireKey::new("global_name"),
        WireKey::new("bot"),
        WireKey::new("system"),
        WireKey::new("mfa_enabled"),
        WireKey::new("banner"),
        WireKey::new("accent_color"),
        WireKey::new("locale"),
        WireKey::new("verified"),
        WireKey::new("email"),
        WireKey::new("flags"),
        WireKey::new("premium_type"),
        WireKey::new("public_flags"),
        WireKey::new("member"),
    ];

    fn decode_field(
        &mut self,
        index: usize,
        lexer: &mut Lexer<'_>,
        token: Token,
    ) -> Result<(), DecodeError> {
        match index {
            Self::MEMBER => self.member.decode_into(lexer, token),
            index if index < Self::MEMBER => self.user.decode_field(index, lexer, token),
            _ => lexer.skip_value(token),
        }
    }

    fn encode_fields(&self, object: &mut ObjectWriter<'_>) -> Result<(), EncodeError> {
        self.user.encode_fields(object)?;

        object.omit_empty("member", &self.member)
    }
}

impl Decode for GuildUser {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        decode_nested(self, lexer, token)
    }
}

impl Encode for GuildUser {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        encode_entity(self, buf)
    }
}
