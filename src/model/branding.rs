use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity, contact and social settings loaded from `branding.json`.
///
/// Two shapes are accepted: the fields nested under a top-level `brand` key,
/// or the same fields placed directly at the top level. Both deserialize into
/// this one flat value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingDocument {
    pub organization_name: Option<String>,
    pub site_title: Option<String>,
    pub slogan: Option<String>,
    pub logo: Option<Logo>,
    /// Top-level favicon, used when `logo` does not carry one.
    pub favicon: Option<String>,
    pub contact: Option<Contact>,
    /// Legacy flat contact email, superseded by `contact.email`.
    pub email: Option<String>,
    /// Legacy flat contact phone, superseded by `contact.mobile`.
    pub mobile: Option<String>,
    pub social_media: HashMap<String, Option<String>>,
    pub chatbot: Option<Chatbot>,
}

/// Either a bare image URL or a pair of title/favicon image URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Logo {
    Url(String),
    Assets {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        favicon: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chatbot {
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub face: Option<String>,
}

impl<'de> Deserialize<'de> for BrandingDocument {
    /// Accepts both `{ "brand": { ... } }` and the flat legacy layout. When a
    /// `brand` object is present it wins and top-level fields are ignored.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Default, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        struct Fields {
            organization_name: Option<String>,
            site_title: Option<String>,
            slogan: Option<String>,
            logo: Option<Logo>,
            favicon: Option<String>,
            contact: Option<Contact>,
            email: Option<String>,
            #[serde(deserialize_with = "string_or_number")]
            mobile: Option<String>,
            social_media: Option<HashMap<String, Option<String>>>,
            chatbot: Option<Chatbot>,
        }

        #[derive(Deserialize)]
        struct Proxy {
            #[serde(default)]
            brand: Option<Fields>,
            #[serde(flatten)]
            flat: Fields,
        }

        let proxy = Proxy::deserialize(deserializer)?;
        let fields = proxy.brand.unwrap_or(proxy.flat);

        Ok(BrandingDocument {
            organization_name: fields.organization_name,
            site_title: fields.site_title,
            slogan: fields.slogan,
            logo: fields.logo,
            favicon: fields.favicon,
            contact: fields.contact,
            email: fields.email,
            mobile: fields.mobile,
            social_media: fields.social_media.unwrap_or_default(),
            chatbot: fields.chatbot,
        })
    }
}

// Phone numbers show up as JSON numbers in some older branding files.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
