use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 发布状态（页面与元素共用）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContentStatus::Draft),
            "published" => Ok(ContentStatus::Published),
            "archived" => Ok(ContentStatus::Archived),
            _ => Err(format!(
                "Invalid content status: '{s}'. Supported: draft, published, archived"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ContentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// 元素类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub enum ElementType {
    Text,
    RichText,
    Image,
    Link,
    Button,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::RichText => "rich_text",
            ElementType::Image => "image",
            ElementType::Link => "link",
            ElementType::Button => "button",
        }
    }

    /// 检查元素内容是否满足该类型的要求
    pub fn check_payload(&self, payload: &ElementPayload<'_>) -> Result<(), String> {
        let has = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());

        match self {
            ElementType::Text | ElementType::RichText => {
                if !has(payload.content_ar) && !has(payload.content_en) {
                    return Err(format!(
                        "A {} element needs Arabic or English content",
                        self.as_str()
                    ));
                }
            }
            ElementType::Image => {
                if payload.media_id.is_none() && !has(payload.url) {
                    return Err("An image element needs a media item or a URL".to_string());
                }
            }
            ElementType::Link | ElementType::Button => {
                if !has(payload.url) {
                    return Err(format!("A {} element needs a URL", self.as_str()));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ElementType::Text),
            "rich_text" => Ok(ElementType::RichText),
            "image" => Ok(ElementType::Image),
            "link" => Ok(ElementType::Link),
            "button" => Ok(ElementType::Button),
            _ => Err(format!(
                "Invalid element type: '{s}'. Supported: text, rich_text, image, link, button"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 元素内容视图（用于类型校验）
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementPayload<'a> {
    pub content_ar: Option<&'a str>,
    pub content_en: Option<&'a str>,
    pub media_id: Option<i64>,
    pub url: Option<&'a str>,
}

// 内容页面
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ContentPage {
    pub id: i64,
    pub slug: String,
    pub title_ar: String,
    pub title_en: String,
    pub description: Option<String>,
    pub status: ContentStatus,
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 页面元素，rich_text 的内容为编辑器产出的 HTML
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ContentElement {
    pub id: i64,
    pub page_id: i64,
    pub element_key: String,
    pub element_type: ElementType,
    pub content_ar: Option<String>,
    pub content_en: Option<String>,
    pub media_id: Option<i64>,
    pub url: Option<String>,
    pub status: ContentStatus,
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ContentElement {
    pub fn payload(&self) -> ElementPayload<'_> {
        ElementPayload {
            content_ar: self.content_ar.as_deref(),
            content_en: self.content_en.as_deref(),
            media_id: self.media_id,
            url: self.url.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_requires_url() {
        let payload = ElementPayload {
            content_en: Some("Apply now"),
            ..Default::default()
        };
        assert!(ElementType::Link.check_payload(&payload).is_err());
        assert!(ElementType::Button.check_payload(&payload).is_err());

        let payload = ElementPayload {
            url: Some("https://example.edu/apply"),
            ..payload
        };
        assert!(ElementType::Link.check_payload(&payload).is_ok());
    }

    #[test]
    fn test_image_accepts_media_or_url() {
        let empty = ElementPayload::default();
        assert!(ElementType::Image.check_payload(&empty).is_err());
        let with_media = ElementPayload {
            media_id: Some(3),
            ..Default::default()
        };
        assert!(ElementType::Image.check_payload(&with_media).is_ok());
    }

    #[test]
    fn test_text_needs_some_content() {
        let blank = ElementPayload {
            content_ar: Some("   "),
            ..Default::default()
        };
        assert!(ElementType::Text.check_payload(&blank).is_err());
        let arabic_only = ElementPayload {
            content_ar: Some("<p>مرحبا</p>"),
            ..Default::default()
        };
        assert!(ElementType::RichText.check_payload(&arabic_only).is_ok());
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("rich_text".parse::<ElementType>(), Ok(ElementType::RichText));
        assert!("video".parse::<ElementType>().is_err());
        assert_eq!(
            serde_json::to_string(&ElementType::RichText).unwrap(),
            "\"rich_text\""
        );
    }
}
