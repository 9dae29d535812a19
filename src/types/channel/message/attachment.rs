use crate::{
    entity_codec,
    types::{
        id::{marker::AttachmentMarker, Id},
        util::{is_false, is_zero_u32},
    },
};
use serde::{Deserialize, Serialize};

/// A file attached to a message.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Attachment {
    pub id: Id<AttachmentMarker>,
    pub filename: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Media type of the file.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    /// Size of the file in bytes.
    pub size: u64,
    pub url: String,
    pub proxy_url: String,
    /// Zero unless the file is an image.
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub height: u32,
    /// Zero unless the file is an image.
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub width: u32,
    /// Ephemeral attachments are removed after a set period of time.
    #[serde(skip_serializing_if = "is_false")]
    pub ephemeral: bool,
}

entity_codec!(Attachment {
    id: "id" => always,
    filename: "filename" => always,
    description: "description" => omit_empty,
    content_type: "content_type" => omit_empty,
    size: "size" => always,
    url: "url" => always,
    proxy_url: "proxy_url" => always,
    height: "height" => omit_empty,
    width: "width" => omit_empty,
    ephemeral: "ephemeral" => omit_empty,
});

impl Attachment {
    /// Whether the attachment has image dimensions.
    pub const fn is_image(&self) -> bool {
        self.height != 0 && self.width != 0
    }
}
