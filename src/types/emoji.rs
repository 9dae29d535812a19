//! Custom and Unicode emojis.

use crate::{
    entity_codec,
    types::{
        id::{
            marker::{EmojiMarker, RoleMarker},
            Id,
        },
        user::User,
        util::{is_false, CDN_URL},
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An emoji as used in reactions and guild emoji lists.
///
/// Unicode emojis have an unset `id` and carry the emoji itself as `name`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Emoji {
    /// Unset for Unicode emojis.
    pub id: Id<EmojiMarker>,
    pub name: String,
    /// Roles allowed to use the emoji.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Id<RoleMarker>>,
    /// User that created the emoji.
    pub user: Option<User>,
    /// Whether the emoji must be wrapped in colons.
    #[serde(skip_serializing_if = "is_false")]
    pub require_colons: bool,
    /// Whether the emoji is managed by an integration.
    #[serde(skip_serializing_if = "is_false")]
    pub managed: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub animated: bool,
    /// May be false due to loss of server boosts.
    #[serde(skip_serializing_if = "is_false")]
    pub available: bool,
}

entity_codec!(Emoji {
    id: "id" => always,
    name: "name" => always,
    roles: "roles" => omit_empty,
    user: "user" => always,
    require_colons: "require_colons" => omit_empty,
    managed: "managed" => omit_empty,
    animated: "animated" => omit_empty,
    available: "available" => omit_empty,
});

impl Emoji {
    /// Whether this is a guild's custom emoji.
    pub const fn is_custom(&self) -> bool {
        self.id.is_set()
    }

    /// Whether this is a Unicode emoji.
    pub const fn is_unicode(&self) -> bool {
        !self.is_custom()
    }

    /// CDN URL of a custom emoji's image, or `None` for Unicode emojis.
    pub fn url(&self) -> Option<String> {
        if !self.is_custom() {
            return None;
        }

        let extension = if self.animated { "gif" } else { "png" };

        Some(format!("{CDN_URL}/emojis/{}.{extension}", self.id))
    }

    /// Form used in reaction endpoints: the Unicode emoji itself, or
    /// `name:id` for custom emojis.
    pub fn api_string(&self) -> String {
        if self.is_custom() {
            format!("{}:{}", self.name, self.id)
        } else {
            self.name.clone()
        }
    }

    /// Text that renders the emoji in a message.
    pub fn mention(&self) -> String {
        match (self.is_custom(), self.animated) {
            (false, _) => self.name.clone(),
            (true, false) => format!("<:{}:{}>", self.name, self.id),
            (true, true) => format!("<a:{}:{}>", self.name, self.id),
        }
    }

    /// When a custom emoji was created, or `None` for Unicode emojis.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.id.created_at()
    }
}

#[cfg(test)]
mod tests {
    use super::Emoji;
    use crate::{
        codec::{from_slice, CodecConfig, DecodeErrorType, Entity, KeyMatching, Token},
        types::{id::Id, user::User},
    };
    use static_assertions::assert_impl_all;
    use std::fmt::Debug;

    assert_impl_all!(Emoji: Clone, Debug, Default, Eq, PartialEq, Send, Sync);

    const GUILD_EMOJI: &[u8] = br#"{"id":"41771983429993937","name":"test","user":{"username":"Luigi","discriminator":"0002","id":"96008815106887111","avatar":"5500909a3274e1812beb4e8de6631111"},"require_colons":true,"animated":false}"#;

    #[test]
    fn decode_custom_emoji() {
        let emoji = Emoji::from_json(GUILD_EMOJI).unwrap();

        assert_eq!(emoji.id, Id::new(41_771_983_429_993_937));
        assert_eq!(emoji.name, "test");
        assert!(emoji.require_colons);
        assert!(!emoji.animated);
        assert!(!emoji.managed);
        assert!(!emoji.available);
        assert!(emoji.roles.is_empty());

        let user = emoji.user.as_ref().unwrap();
        assert_eq!(user.id, Id::new(96_008_815_106_887_111));
        assert_eq!(user.tag(), "Luigi#0002");

        assert!(emoji.is_custom());
        assert_eq!(emoji.api_string(), "test:41771983429993937");
        assert_eq!(emoji.mention(), "<:test:41771983429993937>");
        assert_eq!(
            emoji.url().as_deref(),
            Some("https://cdn.discordapp.com/emojis/41771983429993937.png")
        );
        assert!(emoji.created_at().is_some());
    }

    #[test]
    fn decode_unicode_emoji() {
        let emoji = Emoji::from_json(r#"{"id":null,"name":"🔥"}"#.as_bytes()).unwrap();

        assert!(emoji.is_unicode());
        assert_eq!(emoji.api_string(), "🔥");
        assert_eq!(emoji.mention(), "🔥");
        assert!(emoji.url().is_none());
        assert!(emoji.created_at().is_none());
    }

    #[test]
    fn round_trip() {
        let emoji = Emoji {
            id: Id::new(1),
            name: "blob".to_owned(),
            roles: vec![Id::new(2), Id::new(3)],
            user: Some(User {
                id: Id::new(4),
                username: "u".to_owned(),
                ..User::default()
            }),
            require_colons: true,
            managed: true,
            animated: true,
            available: true,
        };
        let encoded = emoji.to_json().unwrap();

        assert_eq!(Emoji::from_json(&encoded).unwrap(), emoji);
        assert_eq!(serde_json::to_vec(&emoji).unwrap(), encoded);
        assert_eq!(emoji.mention(), "<a:blob:1>");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let emoji = Emoji::from_json(
            br#"{"nonce": 5, "id": "7", "extra": {"nested": [1, {"deep": null}]}, "tags": ["a", "b"], "name": "x", "weight": -1.5e3}"#,
        )
        .unwrap();

        assert_eq!(emoji.id, Id::new(7));
        assert_eq!(emoji.name, "x");
    }

    #[test]
    fn unknown_keys_must_hold_valid_json() {
        let err = Emoji::from_json(br#"{"x":[1 2 ,, 3],"name":"a"}"#).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::StructuralToken {
                expected: "','",
                found: Token::Integer,
            }
        );

        let err = Emoji::from_json(br#"{"x":{"a" "b"},"name":"a"}"#).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::StructuralToken {
                expected: "':'",
                found: Token::String,
            }
        );
    }

    #[test]
    fn ids_decode_from_strings_and_integers() {
        let quoted = Emoji::from_json(br#"{"id":"123","roles":["9"]}"#).unwrap();
        let bare = Emoji::from_json(br#"{"id":123,"roles":[9]}"#).unwrap();

        assert_eq!(quoted, bare);
        assert_eq!(bare.roles, [Id::new(9)]);
    }

    #[test]
    fn null_roles_decode_empty() {
        let emoji = Emoji::from_json(br#"{"roles":null}"#).unwrap();

        assert!(emoji.roles.is_empty());
        assert_eq!(emoji.to_json().unwrap(), br#"{"id":null,"name":"","user":null}"#);
    }

    #[test]
    fn false_booleans_are_omitted() {
        let emoji = Emoji {
            id: Id::new(41_771_983_429_993_937),
            name: "test".to_owned(),
            ..Emoji::default()
        };

        assert_eq!(
            emoji.to_json().unwrap(),
            br#"{"id":"41771983429993937","name":"test","user":null}"#
        );
        assert_eq!(serde_json::to_vec(&emoji).unwrap(), emoji.to_json().unwrap());
    }

    #[test]
    fn lenient_key_matching() {
        let emoji = Emoji::from_json(br#"{"Name":"x","requireColons":true,"ANIMATED":true}"#)
            .unwrap();

        assert_eq!(emoji.name, "x");
        assert!(emoji.require_colons);
        assert!(emoji.animated);

        let exact = CodecConfig {
            key_matching: KeyMatching::Exact,
        };
        let emoji = Emoji::from_json_with(br#"{"Name":"x","requireColons":true}"#, exact).unwrap();
        assert_eq!(emoji, Emoji::default());
    }

    #[test]
    fn bool_rejects_other_tokens() {
        let err = Emoji::from_json(br#"{"managed":"yes"}"#).unwrap_err();

        assert_eq!(
            err.kind(),
            &DecodeErrorType::TypeMismatch {
                expected: "bool",
                found: Token::String,
            }
        );
        assert_eq!(err.output(), Some("yes"));

        let emoji = Emoji::from_json(br#"{"managed":null,"animated":true}"#).unwrap();
        assert!(!emoji.managed);
        assert!(emoji.animated);
    }

    #[test]
    fn malformed_literal_is_named() {
        let err = Emoji::from_json(br#"{"id": tru}"#).unwrap_err();

        assert_eq!(
            err.kind(),
            &DecodeErrorType::MalformedScalar { expected: "literal" }
        );
        assert_eq!(err.output(), Some("tru"));
        assert_eq!(err.offset(), 7);
        assert!(err.to_string().contains("tru"));
    }

    #[test]
    fn structural_errors() {
        let err = Emoji::from_json(br#"{"name" "x"}"#).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::StructuralToken {
                expected: "':'",
                found: Token::String,
            }
        );

        let err = Emoji::from_json(br#"{"name":"x" "id":"1"}"#).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::StructuralToken {
                expected: "','",
                found: Token::String,
            }
        );

        let err = Emoji::from_json(br#"{"name":"x""#).unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorType::StructuralToken { found: Token::Eof, .. }));

        let err = Emoji::from_json(br#"{1:"x"}"#).unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorType::StructuralToken { expected: "string", .. }));
    }

    #[test]
    fn nested_user_errors_propagate() {
        let err = Emoji::from_json(br#"{"user":{"bot":1}}"#).unwrap_err();

        assert_eq!(
            err.kind(),
            &DecodeErrorType::TypeMismatch {
                expected: "bool",
                found: Token::Integer,
            }
        );
    }

    #[test]
    fn option_accepts_null_entity() {
        let emoji: Option<Emoji> = from_slice(b"null").unwrap();
        assert!(emoji.is_none());
    }
}
