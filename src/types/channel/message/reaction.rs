use crate::{entity_codec, types::emoji::Emoji};
use serde::{Deserialize, Serialize};

/// Reactions of one emoji on a message.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Reaction {
    /// Times the emoji has been used to react.
    pub count: u32,
    /// Whether the current user reacted using this emoji.
    pub me: bool,
    pub emoji: Emoji,
}

entity_codec!(Reaction {
    count: "count" => always,
    me: "me" => always,
    emoji: "emoji" => always,
});
