//! Dominant-color extraction and hue conversion.
//!
//! A cover's "dominant color" is the area-average of all its pixels,
//! computed by resampling the image down to a single pixel with a
//! quality-preserving filter. The hue of that color is what the mosaic's
//! gradient mode sorts by; saturation and value are discarded.

use image::RgbImage;
use image::imageops::FilterType;

/// Area-average color of an image, as one RGB triple.
///
/// Implemented as a Lanczos3 resize to 1×1, which averages every source
/// pixel weighted by the resampling kernel. Callers convert to [`RgbImage`]
/// first, so grayscale and palette sources arrive already expanded to three
/// channels.
pub fn dominant_color(img: &RgbImage) -> [u8; 3] {
    let tiny = image::imageops::resize(img, 1, 1, FilterType::Lanczos3);
    tiny.get_pixel(0, 0).0
}

/// Hue component of an RGB color, in `[0, 1)`.
///
/// Standard RGB→HSV transform, hue only. Achromatic colors (max == min)
/// have no defined hue and map to 0.0, which sorts them first in gradient
/// mode.
pub fn hue_of(rgb: [u8; 3]) -> f64 {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0.0 {
        return 0.0;
    }

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (sector / 6.0).rem_euclid(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    // =========================================================================
    // dominant_color
    // =========================================================================

    #[test]
    fn solid_image_yields_its_color() {
        let img = RgbImage::from_pixel(20, 30, Rgb([200, 40, 10]));
        assert_eq!(dominant_color(&img), [200, 40, 10]);
    }

    #[test]
    fn half_and_half_averages() {
        // Left half black, right half white: the average should land near
        // mid-gray. The Lanczos kernel over/undershoots slightly, so allow
        // a small band rather than an exact value.
        let img = RgbImage::from_fn(100, 100, |x, _| {
            if x < 50 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        let [r, g, b] = dominant_color(&img);
        for channel in [r, g, b] {
            assert!((100..=155).contains(&channel), "channel {channel} not near mid-gray");
        }
    }

    #[test]
    fn grayscale_source_expands_to_three_channels() {
        let gray = image::GrayImage::from_pixel(8, 8, image::Luma([90]));
        let rgb: RgbImage = image::DynamicImage::ImageLuma8(gray).to_rgb8();
        assert_eq!(dominant_color(&rgb), [90, 90, 90]);
    }

    // =========================================================================
    // hue_of
    // =========================================================================

    #[test]
    fn primary_hues() {
        assert_eq!(hue_of([255, 0, 0]), 0.0);
        assert!((hue_of([0, 255, 0]) - 1.0 / 3.0).abs() < 1e-9);
        assert!((hue_of([0, 0, 255]) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn secondary_hues() {
        assert!((hue_of([255, 255, 0]) - 1.0 / 6.0).abs() < 1e-9); // yellow
        assert!((hue_of([0, 255, 255]) - 0.5).abs() < 1e-9); // cyan
        assert!((hue_of([255, 0, 255]) - 5.0 / 6.0).abs() < 1e-9); // magenta
    }

    #[test]
    fn achromatic_is_zero() {
        assert_eq!(hue_of([0, 0, 0]), 0.0);
        assert_eq!(hue_of([128, 128, 128]), 0.0);
        assert_eq!(hue_of([255, 255, 255]), 0.0);
    }

    #[test]
    fn hue_stays_in_unit_range() {
        // Red-dominant colors with b > g produce a negative sector before
        // wrapping; the result must still land in [0, 1).
        for rgb in [[255u8, 0, 1], [255, 10, 200], [200, 0, 100]] {
            let h = hue_of(rgb);
            assert!((0.0..1.0).contains(&h), "hue {h} out of range for {rgb:?}");
        }
    }
}
