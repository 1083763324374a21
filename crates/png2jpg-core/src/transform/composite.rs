//! Flattening transparency onto a white background.

use crate::decode::RasterImage;

/// Opaque white, written over fully transparent pixels.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Paint every fully transparent pixel opaque white.
///
/// Pixels with any non-zero alpha are copied unchanged, including their alpha.
/// Partial transparency is not blended; JPEG encoding drops the alpha channel
/// afterwards.
///
/// The input is not modified; a new image with identical bounds is returned.
pub fn composite_onto_white(image: &RasterImage) -> RasterImage {
    let mut pixels = image.pixels.clone();

    for px in pixels.chunks_exact_mut(RasterImage::CHANNELS) {
        if px[3] == 0 {
            px.copy_from_slice(&WHITE);
        }
    }

    RasterImage::new(image.width, image.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_pixel_becomes_white() {
        let img = RasterImage::new(2, 1, vec![10, 20, 30, 0, 40, 50, 60, 255]);
        let out = composite_onto_white(&img);

        assert_eq!(out.pixel(0, 0), WHITE);
        assert_eq!(out.pixel(1, 0), [40, 50, 60, 255]);
    }

    #[test]
    fn test_partial_alpha_is_not_blended() {
        let img = RasterImage::new(1, 1, vec![200, 100, 50, 128]);
        let out = composite_onto_white(&img);
        assert_eq!(out.pixel(0, 0), [200, 100, 50, 128]);
    }

    #[test]
    fn test_alpha_one_is_kept() {
        let img = RasterImage::new(1, 1, vec![0, 0, 0, 1]);
        let out = composite_onto_white(&img);
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 1]);
    }

    #[test]
    fn test_bounds_preserved() {
        let img = RasterImage::filled(13, 7, [0, 0, 0, 0]);
        let out = composite_onto_white(&img);

        assert_eq!((out.width, out.height), (13, 7));
        assert!(out.pixels.chunks_exact(4).all(|px| px == WHITE));
    }

    #[test]
    fn test_input_untouched() {
        let img = RasterImage::filled(2, 2, [5, 5, 5, 0]);
        let _ = composite_onto_white(&img);
        assert_eq!(img.pixel(0, 0), [5, 5, 5, 0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = RasterImage> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let size = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| RasterImage::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: opaque images pass through unchanged.
        #[test]
        fn prop_opaque_is_identity(mut img in image_strategy()) {
            for px in img.pixels.chunks_exact_mut(4) {
                px[3] = 255;
            }
            prop_assert_eq!(composite_onto_white(&img), img);
        }

        /// Property: transparent pixels become white, all others are untouched.
        #[test]
        fn prop_only_transparent_pixels_change(img in image_strategy()) {
            let out = composite_onto_white(&img);
            prop_assert_eq!((out.width, out.height), (img.width, img.height));

            for (src, dst) in img.pixels.chunks_exact(4).zip(out.pixels.chunks_exact(4)) {
                if src[3] == 0 {
                    prop_assert_eq!(dst, &WHITE[..]);
                } else {
                    prop_assert_eq!(dst, src);
                }
            }
        }
    }
}
