use html_escape::decode_html_entities;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[content]").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

/// Open Graph preview metadata of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<OgImage>,
}

/// A structured `og:image`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OgImageObject {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_url: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// The image property exactly as pages (and metadata services) shape it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OgImage {
    Url(String),
    // lists first: serde also reads a struct from a sequence
    Urls(Vec<String>),
    Object(OgImageObject),
    Objects(Vec<OgImageObject>),
}

impl OgImage {
    /// The single image URL an item should use.
    ///
    /// A string is used as is, an object gives its `url`, and a list gives
    /// its first element. Empty values give nothing.
    pub fn primary_url(&self) -> Option<&str> {
        let url = match self {
            OgImage::Url(url) => url.as_str(),
            OgImage::Object(image) => image.url.as_str(),
            OgImage::Urls(urls) => urls.first()?.as_str(),
            OgImage::Objects(images) => images.first()?.url.as_str(),
        };
        let url = url.trim();
        if url.is_empty() {
            None
        } else {
            Some(url)
        }
    }
}

#[derive(Default)]
struct ImageEntry {
    url: Option<String>,
    details: OgImageObject,
}

impl ImageEntry {
    fn has_details(&self) -> bool {
        let d = &self.details;
        d.secure_url.is_some()
            || d.image_type.is_some()
            || d.width.is_some()
            || d.height.is_some()
            || d.alt.is_some()
    }

    fn into_object(self) -> Option<OgImageObject> {
        let url = self.url?;
        Some(OgImageObject { url, ..self.details })
    }
}

/// Reads `og:*` meta tags from a parsed document.
///
/// Scalar properties keep their first value. Each `og:image` starts a new
/// image and the `og:image:*` properties that follow describe it. The page
/// `<title>`, `description` meta and `twitter:image` fill in when the
/// matching Open Graph tag is missing.
pub fn parse_open_graph(document: &Html) -> OpenGraph {
    let mut og = OpenGraph::default();
    let mut images: Vec<ImageEntry> = Vec::new();
    let mut meta_description = None;
    let mut twitter_image = None;

    for element in document.select(&META_SELECTOR) {
        let meta = element.value();
        let Some(property) = meta.attr("property").or_else(|| meta.attr("name")) else {
            continue;
        };
        let Some(content) = meta.attr("content").map(clean_content) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }

        match property.trim().to_ascii_lowercase().as_str() {
            "og:title" => set_once(&mut og.title, content),
            "og:description" => set_once(&mut og.description, content),
            "og:site_name" => set_once(&mut og.site_name, content),
            "og:type" => set_once(&mut og.og_type, content),
            "og:url" => set_once(&mut og.url, content),
            "og:locale" => set_once(&mut og.locale, content),
            "og:image" | "og:image:url" => images.push(ImageEntry {
                url: Some(content),
                ..Default::default()
            }),
            "og:image:secure_url" => current_image(&mut images).details.secure_url = Some(content),
            "og:image:type" => current_image(&mut images).details.image_type = Some(content),
            "og:image:width" => current_image(&mut images).details.width = content.parse().ok(),
            "og:image:height" => current_image(&mut images).details.height = content.parse().ok(),
            "og:image:alt" => current_image(&mut images).details.alt = Some(content),
            "description" => set_once(&mut meta_description, content),
            "twitter:image" | "twitter:image:src" => set_once(&mut twitter_image, content),
            _ => {}
        }
    }

    if og.title.is_none() {
        og.title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| clean_content(&el.text().collect::<String>()))
            .filter(|title| !title.is_empty());
    }
    if og.description.is_none() {
        og.description = meta_description;
    }

    og.image = shape_images(images).or(twitter_image.map(OgImage::Url));
    og
}

fn shape_images(entries: Vec<ImageEntry>) -> Option<OgImage> {
    let entries: Vec<ImageEntry> = entries.into_iter().filter(|e| e.url.is_some()).collect();
    let detailed = entries.iter().any(ImageEntry::has_details);

    match (entries.len(), detailed) {
        (0, _) => None,
        (1, false) => entries.into_iter().next().and_then(|e| e.url).map(OgImage::Url),
        (1, true) => entries
            .into_iter()
            .next()
            .and_then(ImageEntry::into_object)
            .map(OgImage::Object),
        (_, false) => Some(OgImage::Urls(
            entries.into_iter().filter_map(|e| e.url).collect(),
        )),
        (_, true) => Some(OgImage::Objects(
            entries.into_iter().filter_map(ImageEntry::into_object).collect(),
        )),
    }
}

fn current_image(images: &mut Vec<ImageEntry>) -> &mut ImageEntry {
    if images.is_empty() {
        images.push(ImageEntry::default());
    }
    let last = images.len() - 1;
    &mut images[last]
}

fn set_once(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// The parser already decoded entities once; pages that double-encode
/// (`&amp;amp;`) need a second pass.
fn clean_content(text: &str) -> String {
    decode_html_entities(text.trim()).into_owned()
}
