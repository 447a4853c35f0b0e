use crate::fill::*;

///
/// Maps between the image references used by fills and the identifiers used to
/// persist them in the tree. Providers are borrowed for the duration of a
/// single encode or decode and are never retained.
///
pub trait ImageProvider {
    ///
    /// Resolves a persisted identifier to an image reference, or None if the
    /// image is unknown
    ///
    fn image_for_identifier(&self, identifier: &str) -> Option<ImageReference>;

    ///
    /// Returns the identifier to persist for an image reference
    ///
    fn identifier_for_image(&self, image: &ImageReference) -> String;
}

///
/// Image provider for documents that contain no image fills
///
pub struct NoImages;

impl ImageProvider for NoImages {
    fn image_for_identifier(&self, _identifier: &str) -> Option<ImageReference> {
        None
    }

    fn identifier_for_image(&self, image: &ImageReference) -> String {
        image.identifier.clone()
    }
}
