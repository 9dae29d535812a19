use crate::{
    entity_codec,
    types::util::{is_false, Timestamp},
};
use serde::{Deserialize, Serialize};

/// Rich content attached to a message.
///
/// Every field is optional and omitted from the output when unset.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Always `rich` for embeds sent by bots.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedVideo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<EmbedProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

entity_codec!(Embed {
    title: "title" => omit_empty,
    kind: "type" => omit_empty,
    description: "description" => omit_empty,
    url: "url" => omit_empty,
    timestamp: "timestamp" => omit_empty,
    color: "color" => omit_empty,
    footer: "footer" => omit_empty,
    image: "image" => omit_empty,
    thumbnail: "thumbnail" => omit_empty,
    video: "video" => omit_empty,
    provider: "provider" => omit_empty,
    author: "author" => omit_empty,
    fields: "fields" => omit_empty,
});

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

entity_codec!(EmbedFooter {
    text: "text" => always,
    icon_url: "icon_url" => omit_empty,
    proxy_icon_url: "proxy_icon_url" => omit_empty,
});

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmbedImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

entity_codec!(EmbedImage {
    url: "url" => always,
    proxy_url: "proxy_url" => omit_empty,
    height: "height" => omit_empty,
    width: "width" => omit_empty,
});

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmbedThumbnail {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

entity_codec!(EmbedThumbnail {
    url: "url" => always,
    proxy_url: "proxy_url" => omit_empty,
    height: "height" => omit_empty,
    width: "width" => omit_empty,
});

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmbedVideo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

entity_codec!(EmbedVideo {
    url: "url" => omit_empty,
    proxy_url: "proxy_url" => omit_empty,
    height: "height" => omit_empty,
    width: "width" => omit_empty,
});

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmbedProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

entity_codec!(EmbedProvider {
    name: "name" => omit_empty,
    url: "url" => omit_empty,
});

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

entity_codec!(EmbedAuthor {
    name: "name" => always,
    url: "url" => omit_empty,
    icon_url: "icon_url" => omit_empty,
    proxy_icon_url: "proxy_icon_url" => omit_empty,
});

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    /// Whether the field is displayed next to its neighbours.
    #[serde(skip_serializing_if = "is_false")]
    pub inline: bool,
}

entity_codec!(EmbedField {
    name: "name" => always,
    value: "value" => always,
    inline: "inline" => omit_empty,
});

#[cfg(test)]
mod tests {
    use super::{Embed, EmbedField, EmbedFooter};
    use crate::codec::Entity;

    #[test]
    fn empty_embed() {
        assert_eq!(Embed::default().to_json().unwrap(), b"{}");
        assert_eq!(Embed::from_json(b"{}").unwrap(), Embed::default());
    }

    #[test]
    fn rich_embed() {
        let embed = Embed::from_json(
            br#"{
                "type": "rich",
                "title": "Release",
                "color": 5814783,
                "timestamp": "2021-08-10T11:16:37.020000+00:00",
                "footer": {"text": "v1"},
                "fields": [
                    {"name": "Added", "value": "codec", "inline": true},
                    {"name": "Removed", "value": "nothing"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(embed.kind.as_deref(), Some("rich"));
        assert_eq!(embed.color, Some(5_814_783));
        assert_eq!(
            embed.footer,
            Some(EmbedFooter {
                text: "v1".to_owned(),
                ..EmbedFooter::default()
            })
        );
        assert_eq!(
            embed.fields[1],
            EmbedField {
                name: "Removed".to_owned(),
                value: "nothing".to_owned(),
                inline: false,
            }
        );

        let encoded = embed.to_json().unwrap();
        assert_eq!(
            encoded,
            br#"{"title":"Release","type":"rich","timestamp":"2021-08-10T11:16:37.020000+00:00","color":5814783,"footer":{"text":"v1"},"fields":[{"name":"Added","value":"codec","inline":true},{"name":"Removed","value":"nothing"}]}"#
        );
        assert_eq!(serde_json::to_vec(&embed).unwrap(), encoded);
        assert_eq!(Embed::from_json(&encoded).unwrap(), embed);
    }
}
