use crate::{
    entity_codec,
    types::{
        id::{marker::InteractionMarker, Id},
        user::{Member, User},
        util::value_codec,
    },
};
use serde::{Deserialize, Serialize};

/// Type of an interaction.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[non_exhaustive]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    ApplicationCommandAutocomplete,
    ModalSubmit,
    Unknown(u8),
}

impl Default for InteractionType {
    fn default() -> Self {
        Self::Unknown(0)
    }
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutocomplete,
            5 => Self::ModalSubmit,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::ApplicationCommandAutocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Unknown(unknown) => unknown,
        }
    }
}

value_codec!(InteractionType => "interaction type");

/// Sent on a message that is the response to an interaction.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct MessageInteraction {
    pub id: Id<InteractionMarker>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Name of the invoked application command.
    pub name: String,
    /// User who invoked the interaction.
    pub user: User,
    /// Member who invoked the interaction, if it was invoked in a guild.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
}

entity_codec!(MessageInteraction {
    id: "id" => always,
    kind: "type" => always,
    name: "name" => always,
    user: "user" => always,
    member: "member" => omit_empty,
});
