//! Centered crop geometry.

/// A rectangle inside a source image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Largest rectangle of aspect `aspect_w : aspect_h` centered in a
/// `width x height` source.
///
/// With a 1:1 aspect this is the centered square of side
/// `min(width, height)`.
///
/// ```
/// use pixel_grid::{center_crop, CropRect};
///
/// let crop = center_crop(1920, 1080, 1, 1);
/// assert_eq!(crop, CropRect { x: 420, y: 0, width: 1080, height: 1080 });
/// ```
pub fn center_crop(width: usize, height: usize, aspect_w: usize, aspect_h: usize) -> CropRect {
    let (w, h) = (width as u64, height as u64);
    let (aw, ah) = (aspect_w.max(1) as u64, aspect_h.max(1) as u64);

    let (crop_w, crop_h) = if w * ah > h * aw {
        // Source is wider than the target: keep full height
        (((h * aw + ah / 2) / ah).clamp(1, w), h)
    } else {
        (w, ((w * ah + aw / 2) / aw).clamp(1, h))
    };

    CropRect {
        x: ((w - crop_w) / 2) as usize,
        y: ((h - crop_h) / 2) as usize,
        width: crop_w as usize,
        height: crop_h as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_crop() {
        assert_eq!(
            center_crop(100, 60, 1, 1),
            CropRect {
                x: 20,
                y: 0,
                width: 60,
                height: 60
            }
        );
        assert_eq!(
            center_crop(60, 100, 1, 1),
            CropRect {
                x: 0,
                y: 20,
                width: 60,
                height: 60
            }
        );
        assert_eq!(
            center_crop(50, 50, 128, 128),
            CropRect {
                x: 0,
                y: 0,
                width: 50,
                height: 50
            }
        );
    }

    #[test]
    fn test_wide_target_on_square_source() {
        // 16:9 slot from a 1000x1000 photo
        assert_eq!(
            center_crop(1000, 1000, 16, 9),
            CropRect {
                x: 0,
                y: 218,
                width: 1000,
                height: 563
            }
        );
    }

    #[test]
    fn test_tall_target_on_wide_source() {
        assert_eq!(
            center_crop(400, 300, 1, 2),
            CropRect {
                x: 125,
                y: 0,
                width: 150,
                height: 300
            }
        );
    }

    #[test]
    fn test_crop_never_empty() {
        let crop = center_crop(1, 1000, 1000, 1);
        assert_eq!(crop.width, 1);
        assert_eq!(crop.height, 1);
    }
}
