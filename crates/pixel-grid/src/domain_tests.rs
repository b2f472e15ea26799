//! Domain-critical regression tests for pixel-grid.
//!
//! These exercise the sampler and quantizer together, the way callers use
//! them, rather than one function at a time.

#[cfg(test)]
mod domain_tests {
    use crate::color::Srgb;
    use crate::grid::IntensityGrid;
    use crate::palette::{Palette, Role};
    use crate::quantize::{bucket, colorize, QuantizationStrategy, Quantized};
    use crate::sample::{sample_square, Bitmap, RgbImage};

    fn gradient_bitmap(width: usize, height: usize) -> Bitmap {
        let mut data = Vec::with_capacity(width * height * 4);
        for _y in 0..height {
            for x in 0..width {
                let v = (x * 255 / (width - 1)) as u8;
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Bitmap::new(width, height, data).unwrap()
    }

    fn levels_of(image: &RgbImage, levels: u16) -> IntensityGrid {
        let strategy = QuantizationStrategy::Luminance { levels };
        match strategy.quantize(image).unwrap() {
            Quantized::Levels(grid) => grid,
            Quantized::Colors(_) => panic!("luminance strategy produced colors"),
        }
    }

    /// If this breaks, it means: the sampler smooths or blends pixels. A
    /// two-tone checkerboard must come out containing only the two source
    /// colors, however it is scaled.
    #[test]
    fn test_sampling_never_invents_colors() {
        let (w, h) = (37, 23);
        let mut data = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let bitmap = Bitmap::new(w, h, data).unwrap();

        for n in [1, 5, 16, 64, 128] {
            let sampled = sample_square(&bitmap, n).unwrap();
            assert_eq!(sampled.pixels().len(), n * n);
            assert!(
                sampled
                    .pixels()
                    .iter()
                    .all(|&p| p == Srgb::BLACK || p == Srgb::WHITE),
                "n={n} produced an interpolated color"
            );
        }
    }

    /// If this breaks, it means: a left-to-right gradient no longer yields
    /// non-decreasing levels along each row.
    #[test]
    fn test_gradient_levels_monotonic() {
        let bitmap = gradient_bitmap(200, 200);
        let sampled = sample_square(&bitmap, 32).unwrap();
        let grid = levels_of(&sampled, 16);

        for row in grid.rows() {
            assert!(row.windows(2).all(|w| w[0] <= w[1]), "row not monotonic");
            assert!(row[0] <= 1);
            assert!(row[31] >= 14);
        }
    }

    /// If this breaks, it means: colorizing a gradient no longer walks the
    /// roles in primary -> secondary -> accent order.
    #[test]
    fn test_gradient_colorizes_in_role_order() {
        let palette = Palette::new(
            Srgb::new(1, 0, 0),
            Srgb::new(2, 0, 0),
            Srgb::new(3, 0, 0),
            Srgb::WHITE,
            Srgb::BLACK,
        );
        let bitmap = gradient_bitmap(128, 128);
        let grid = levels_of(&sample_square(&bitmap, 16).unwrap(), 16);
        let pixels = colorize(&grid, &palette);

        let first_row: Vec<u8> = pixels.pixels()[..16].iter().map(|p| p.r).collect();
        assert!(first_row.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(first_row[0], 1);
        assert_eq!(first_row[15], 3);
        assert!(first_row.contains(&2));
    }

    /// If this breaks, it means: the nearest-color path returns something
    /// other than one of the five theme colors.
    #[test]
    fn test_nearest_color_output_is_closed_over_palette() {
        let palette = Palette::from_strs(
            "#1e293b",
            "hsl(215, 20%, 65%)",
            "#f59e0b",
            "0 0% 100%",
            "rgb(15, 23, 42)",
        )
        .unwrap();
        let bitmap = gradient_bitmap(64, 64);
        let sampled = sample_square(&bitmap, 16).unwrap();

        let Quantized::Colors(out) = QuantizationStrategy::NearestColor(palette)
            .quantize(&sampled)
            .unwrap()
        else {
            panic!("expected colors");
        };
        let allowed: Vec<Srgb> = palette.iter().map(|(_, c)| c).collect();
        assert!(out.pixels().iter().all(|p| allowed.contains(p)));
    }

    /// If this breaks, it means: the 16-level bucket boundaries drifted.
    #[test]
    fn test_bucket_boundaries_for_default_levels() {
        assert_eq!(bucket(0, 16), Role::Primary);
        assert_eq!(bucket(4, 16), Role::Primary);
        assert_eq!(bucket(5, 16), Role::Secondary);
        assert_eq!(bucket(9, 16), Role::Secondary);
        assert_eq!(bucket(10, 16), Role::Accent);
        assert_eq!(bucket(15, 16), Role::Accent);
    }
}
