//! Markers for the resource types an [`Id`] can identify.
//!
//! Markers perform no logical action. They only keep, say, a role's ID from
//! being used where a user's ID is required.
//!
//! [`Id`]: super::Id

/// Marker for application IDs.
///
/// Types such as [`Message::application_id`] or [`MessageApplication`] use
/// this ID marker.
///
/// [`Message::application_id`]: crate::types::channel::message::Message::application_id
/// [`MessageApplication`]: crate::types::channel::message::MessageApplication
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for attachment IDs.
///
/// Types such as [`Attachment`] use this ID marker.
///
/// [`Attachment`]: crate::types::channel::message::Attachment
#[derive(Debug)]
#[non_exhaustive]
pub struct AttachmentMarker;

/// Marker for channel IDs.
///
/// Types such as [`Message`] or [`ChannelMention`] use this ID marker.
///
/// [`ChannelMention`]: crate::types::channel::ChannelMention
/// [`Message`]: crate::types::channel::message::Message
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for emoji IDs.
///
/// Types such as [`Emoji`] use this ID marker.
///
/// [`Emoji`]: crate::types::emoji::Emoji
#[derive(Debug)]
#[non_exhaustive]
pub struct EmojiMarker;

/// Marker for guild IDs.
///
/// Types such as [`Message`] or [`Sticker`] use this ID marker.
///
/// [`Message`]: crate::types::channel::message::Message
/// [`Sticker`]: crate::types::channel::message::Sticker
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for interaction IDs.
///
/// Types such as [`MessageInteraction`] use this ID marker.
///
/// [`MessageInteraction`]: crate::types::channel::message::MessageInteraction
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for message IDs.
///
/// Types such as [`Message`] or [`MessageReference`] use this ID marker.
///
/// [`Message`]: crate::types::channel::message::Message
/// [`MessageReference`]: crate::types::channel::message::MessageReference
#[derive(Debug)]
#[non_exhaustive]
pub struct MessageMarker;

/// Marker for role IDs.
///
/// Types such as [`Emoji`] or [`Member`] use this ID marker.
///
/// [`Emoji`]: crate::types::emoji::Emoji
/// [`Member`]: crate::types::user::Member
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for sticker IDs.
///
/// Types such as [`Sticker`] or [`StickerItem`] use this ID marker.
///
/// [`Sticker`]: crate::types::channel::message::Sticker
/// [`StickerItem`]: crate::types::channel::message::StickerItem
#[derive(Debug)]
#[non_exhaustive]
pub struct StickerMarker;

/// Marker for sticker pack IDs.
///
/// Types such as [`Sticker`] use this ID marker.
///
/// [`Sticker`]: crate::types::channel::message::Sticker
#[derive(Debug)]
#[non_exhaustive]
pub struct StickerPackMarker;

/// Marker for user IDs.
///
/// Types such as [`User`] use this ID marker.
///
/// [`User`]: crate::types::user::User
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;

/// Marker for webhook IDs.
///
/// Types such as [`Message::webhook_id`] use this ID marker.
///
/// [`Message::webhook_id`]: crate::types::channel::message::Message::webhook_id
#[derive(Debug)]
#[non_exhaustive]
pub struct WebhookMarker;
