//! Media waiting to be published.

use pagecast_core::MediaAsset;

/// Ordered list of staged media files.
///
/// Only images and videos are accepted; anything else is dropped without
/// an error.
///
/// # Examples
///
/// ```
/// use pagecast_workflow::MediaStagingArea;
///
/// let mut staging = MediaStagingArea::default();
/// assert!(staging.add("a.png", "image/png", vec![1]));
/// assert!(!staging.add("notes.txt", "text/plain", vec![2]));
/// assert!(!staging.add("broken", "image/", vec![3]));
/// assert_eq!(staging.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MediaStagingArea {
    assets: Vec<MediaAsset>,
}

impl MediaStagingArea {
    /// Stage a file; returns whether it was accepted.
    pub fn add(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl AsRef<str>,
        bytes: Vec<u8>,
    ) -> bool {
        match MediaAsset::from_file(file_name, content_type, bytes) {
            Some(asset) => {
                self.assets.push(asset);
                true
            }
            None => {
                tracing::debug!("Ignoring unsupported media type");
                false
            }
        }
    }

    /// Remove the asset at `index`, keeping the order of the others.
    pub fn remove_at(&mut self, index: usize) -> Option<MediaAsset> {
        if index < self.assets.len() {
            Some(self.assets.remove(index))
        } else {
            None
        }
    }

    /// Drop every staged file.
    pub fn clear(&mut self) {
        self.assets.clear();
    }

    /// Staged files in insertion order.
    pub fn assets(&self) -> &[MediaAsset] {
        &self.assets
    }

    /// Number of staged files.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Combined size of the staged files.
    pub fn total_bytes(&self) -> usize {
        self.assets.iter().map(MediaAsset::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(names: &[&str]) -> MediaStagingArea {
        let mut staging = MediaStagingArea::default();
        for name in names {
            staging.add(*name, "image/jpeg", vec![0; 3]);
        }
        staging
    }

    #[test]
    fn remove_keeps_order() {
        let mut staging = staged(&["a", "b", "c"]);
        let removed = staging.remove_at(1).unwrap();
        assert_eq!(removed.file_name(), "b");
        let names: Vec<_> = staging.assets().iter().map(|a| a.file_name().as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn out_of_range_remove_is_a_no_op() {
        let mut staging = staged(&["a"]);
        assert!(staging.remove_at(5).is_none());
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn videos_are_accepted() {
        let mut staging = MediaStagingArea::default();
        assert!(staging.add("clip.mp4", "video/mp4", vec![0; 10]));
        assert_eq!(staging.total_bytes(), 10);
    }

    #[test]
    fn malformed_types_are_dropped_and_padded_ones_normalized() {
        let mut staging = MediaStagingArea::default();
        assert!(!staging.add("broken.png", "image/", vec![1]));
        assert!(!staging.add("spaced.png", "image/ png", vec![1]));
        assert!(staging.add("photo.png", " IMAGE/PNG ", vec![1]));
        assert_eq!(staging.len(), 1);
        assert_eq!(staging.assets()[0].content_type(), "image/png");
    }
}
