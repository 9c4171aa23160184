//! Image capability consumed by [`Tilesheet`](crate::Tilesheet).

use macroquad::math::Rect;
use macroquad::texture::Image;

use crate::error::ImageError;

/// Minimal image surface a tilesheet needs: decode, measure and crop.
pub trait AtlasImage: Sized {
    /// Decode an encoded image (format sniffed from the bytes).
    fn decode(bytes: &[u8]) -> Result<Self, ImageError>;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Axis-aligned `w`x`h` crop with its top-left corner at `(x, y)`.
    ///
    /// Fails with [`ImageError::OutOfBounds`] if any part of the rectangle
    /// lies outside the image.
    fn subregion(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Self, ImageError>;
}

/// Bounds check shared by implementations. Uses widened arithmetic so huge
/// tile ids can't wrap back inside the image.
pub(crate) fn check_bounds(
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    image_width: u32,
    image_height: u32,
) -> Result<(), ImageError> {
    let fits_x = u64::from(x) + u64::from(w) <= u64::from(image_width);
    let fits_y = u64::from(y) + u64::from(h) <= u64::from(image_height);
    if fits_x && fits_y {
        Ok(())
    } else {
        Err(ImageError::OutOfBounds {
            x,
            y,
            width: w,
            height: h,
            image_width,
            image_height,
        })
    }
}

impl AtlasImage for Image {
    fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let img = Image::from_file_with_format(bytes, None)
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        // width/height are u16 in macroquad and wrap silently on larger images
        let expected = 4 * usize::from(img.width) * usize::from(img.height);
        if img.bytes.len() != expected {
            return Err(ImageError::Decode("image dimensions exceed u16".into()));
        }
        Ok(img)
    }

    #[inline]
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    #[inline]
    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn subregion(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Self, ImageError> {
        // sub_image doesn't check bounds: it panics or reads the next row
        check_bounds(x, y, w, h, AtlasImage::width(self), AtlasImage::height(self))?;
        Ok(self.sub_image(Rect::new(x as f32, y as f32, w as f32, h as f32)))
    }
}
