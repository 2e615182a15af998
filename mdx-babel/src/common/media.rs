//! Media normalization for the two embeddable components.
//!
//! `ImageFigure` and `VideoEmbed` are the only places where author-controlled
//! URLs reach rendered markup, so every embed passes through here before it
//! becomes a node. A `None` result means "reject this embed"; the block parser
//! then treats the line as ordinary paragraph text.
//!
//! Video URLs are resolved through a fixed provider table and rewritten to the
//! provider's canonical embed URL:
//!
//! | Input shape                      | Canonical URL                          |
//! |----------------------------------|----------------------------------------|
//! | `youtube.com/watch?v=ID`         | `https://www.youtube.com/embed/ID`     |
//! | `youtube.com/embed/ID`           | `https://www.youtube.com/embed/ID`     |
//! | `youtu.be/ID`                    | `https://www.youtube.com/embed/ID`     |
//! | `vimeo.com/ID`                   | `https://player.vimeo.com/video/ID`    |
//! | `player.vimeo.com/video/ID`      | `https://player.vimeo.com/video/ID`    |
//!
//! Any other host is rejected.

use super::attributes::{AttributeValue, Attributes};
use crate::ir::nodes::{ImageFigure, VideoEmbed, VideoProvider};
use url::Url;

pub const IMAGE_COMPONENT: &str = "ImageFigure";
pub const VIDEO_COMPONENT: &str = "VideoEmbed";

/// Tunables for media normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaOptions {
    pub image_width_min: u32,
    pub image_width_max: u32,
    pub default_aspect_ratio: f64,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            image_width_min: 240,
            image_width_max: 1200,
            default_aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl MediaOptions {
    /// Clamp a requested width into the configured range.
    pub fn clamp_width(&self, requested: f64) -> Option<u32> {
        if !requested.is_finite() {
            return None;
        }
        let (low, high) = if self.image_width_min <= self.image_width_max {
            (self.image_width_min, self.image_width_max)
        } else {
            (self.image_width_max, self.image_width_min)
        };
        let clamped = requested.round().clamp(f64::from(low), f64::from(high));
        Some(clamped as u32)
    }
}

/// Build an [`ImageFigure`] from parsed attributes.
///
/// Requires a non-empty `src` with an `http` or `https` scheme.
pub fn normalize_image(attrs: &Attributes, options: &MediaOptions) -> Option<ImageFigure> {
    let src = string_attr(attrs, "src").map(str::trim).unwrap_or_default();
    if src.is_empty() {
        tracing::debug!(component = IMAGE_COMPONENT, "rejecting embed without src");
        return None;
    }
    if parse_web_url(src).is_none() {
        tracing::debug!(component = IMAGE_COMPONENT, src, "rejecting embed with disallowed src");
        return None;
    }

    let width = attrs.get("width").and_then(|value| match value {
        AttributeValue::Number(number) => options.clamp_width(*number),
        AttributeValue::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|number| options.clamp_width(number)),
        _ => None,
    });

    Some(ImageFigure {
        src: src.to_string(),
        alt: string_attr(attrs, "alt").unwrap_or_default().to_string(),
        caption: string_attr(attrs, "caption").unwrap_or_default().to_string(),
        width,
    })
}

/// Build a [`VideoEmbed`] from parsed attributes.
///
/// The `src` must resolve through the provider table; the `provider`
/// attribute, if present, is ignored in favour of the derived one.
pub fn normalize_video(attrs: &Attributes, options: &MediaOptions) -> Option<VideoEmbed> {
    let src = string_attr(attrs, "src").map(str::trim).unwrap_or_default();
    let Some(url) = parse_web_url(src) else {
        tracing::debug!(component = VIDEO_COMPONENT, src, "rejecting embed with disallowed src");
        return None;
    };
    let Some((provider, canonical)) = canonical_embed(&url) else {
        tracing::debug!(component = VIDEO_COMPONENT, src, "rejecting embed from unknown provider");
        return None;
    };

    let aspect_ratio = attrs
        .get("aspectRatio")
        .and_then(AttributeValue::as_f64)
        .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
        .unwrap_or(options.default_aspect_ratio);

    Some(VideoEmbed {
        src: canonical,
        title: string_attr(attrs, "title").unwrap_or_default().to_string(),
        provider,
        aspect_ratio,
    })
}

/// Resolve any accepted video URL shape to `(provider, canonical embed URL)`.
pub fn canonical_embed(url: &Url) -> Option<(VideoProvider, String)> {
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());

    match host.as_str() {
        "youtube.com" | "www.youtube.com" | "m.youtube.com" => {
            let id = match segments.next()? {
                "watch" => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())?,
                "embed" => segments.next()?.to_string(),
                _ => return None,
            };
            youtube_embed(&id)
        }
        "youtu.be" => youtube_embed(segments.next()?),
        "vimeo.com" | "www.vimeo.com" => vimeo_embed(segments.next()?),
        "player.vimeo.com" => match segments.next()? {
            "video" => vimeo_embed(segments.next()?),
            _ => None,
        },
        _ => None,
    }
}

fn youtube_embed(id: &str) -> Option<(VideoProvider, String)> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| {
        (
            VideoProvider::Youtube,
            format!("https://www.youtube.com/embed/{id}"),
        )
    })
}

fn vimeo_embed(id: &str) -> Option<(VideoProvider, String)> {
    let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_digit());
    valid.then(|| {
        (
            VideoProvider::Vimeo,
            format!("https://player.vimeo.com/video/{id}"),
        )
    })
}

/// Parse a URL and accept it only for the `http` and `https` schemes.
fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn string_attr<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    attrs.get(key).and_then(AttributeValue::as_str)
}
