//! Media staged for publishing.

use derive_getters::Getters;

/// Kind of media the console accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    /// Still image (`image/*`)
    Image,
    /// Video (`video/*`)
    Video,
}

impl MediaKind {
    /// Classify a MIME type; anything other than `image/*` or `video/*` yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_core::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_content_type("image/png"), Some(MediaKind::Image));
    /// assert_eq!(MediaKind::from_content_type("VIDEO/MP4"), Some(MediaKind::Video));
    /// assert_eq!(MediaKind::from_content_type("application/pdf"), None);
    /// assert_eq!(MediaKind::from_content_type("image/"), None);
    /// ```
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        normalize_content_type(content_type).map(|(kind, _)| kind)
    }
}

/// Lowercased `type/subtype` essence of an image or video MIME type.
///
/// Surrounding whitespace and parameters are dropped. The subtype must be a
/// non-empty MIME token.
///
/// # Examples
///
/// ```
/// use pagecast_core::{MediaKind, normalize_content_type};
///
/// assert_eq!(
///     normalize_content_type(" Image/JPEG; charset=binary"),
///     Some((MediaKind::Image, "image/jpeg".to_string()))
/// );
/// assert_eq!(normalize_content_type("video/ mp4"), None);
/// ```
pub fn normalize_content_type(raw: &str) -> Option<(MediaKind, String)> {
    let essence = raw.split(';').next()?.trim().to_ascii_lowercase();
    let (top, subtype) = essence.split_once('/')?;
    let kind = match top {
        "image" => MediaKind::Image,
        "video" => MediaKind::Video,
        _ => return None,
    };
    let is_token = |c: char| c.is_ascii_alphanumeric() || "!#$&^_.+-".contains(c);
    if subtype.is_empty() || !subtype.chars().all(is_token) {
        return None;
    }
    Some((kind, essence))
}

/// A user-selected file pending submission.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MediaAsset {
    file_name: String,
    content_type: String,
    kind: MediaKind,
    bytes: Vec<u8>,
}

impl MediaAsset {
    /// Wrap a file if its content type is a well-formed image or video type.
    ///
    /// The stored content type is the normalized essence, so it is always
    /// accepted again when the file is sent.
    pub fn from_file(
        file_name: impl Into<String>,
        content_type: impl AsRef<str>,
        bytes: Vec<u8>,
    ) -> Option<Self> {
        let (kind, content_type) = normalize_content_type(content_type.as_ref())?;
        Some(Self {
            file_name: file_name.into(),
            content_type,
            kind,
            bytes,
        })
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
