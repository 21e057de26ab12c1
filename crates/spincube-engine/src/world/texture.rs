/// Handle to a texture slot in a [`Scene`](super::Scene).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) usize);

impl TextureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Largest edge accepted by [`TextureImage::decode`]: the 2D texture limit
/// every wgpu device supports, including WebGL2-class ones.
pub const MAX_TEXTURE_DIMENSION: u32 = 2048;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode texture image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("texture image has zero size")]
    Empty,

    #[error("texture image is {width}x{height}, larger than {max} on a side")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decodes PNG or JPEG bytes.
    ///
    /// Images with an edge over [`MAX_TEXTURE_DIMENSION`] are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let image = Self { width, height, rgba: img.into_raw() };
        if !image.fits(MAX_TEXTURE_DIMENSION) {
            return Err(TextureError::TooLarge { width, height, max: MAX_TEXTURE_DIMENSION });
        }
        Ok(image)
    }

    /// True if neither edge exceeds `max_dimension`.
    #[inline]
    pub fn fits(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }

    /// A single opaque white texel.
    pub fn white() -> Self {
        Self { width: 1, height: 1, rgba: vec![255; 4] }
    }
}
