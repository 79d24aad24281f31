//! Tests for pinned tiles, the island layout and prefill images

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;
    use tilecollapse::GenerationError;
    use tilecollapse::io::configuration::TILE_PALETTE;
    use tilecollapse::io::prefill::{PrefillData, PrefillPlacement};
    use tilecollapse::spatial::TileType;

    // Tests pins are kept in insertion order
    // Verified by storing pins in a set
    #[test]
    fn test_push_and_placements() {
        let mut prefill = PrefillData::new();
        assert!(prefill.is_empty());

        prefill.push(2, 1, TileType::Grass);
        prefill.push(0, 0, TileType::Water);

        assert_eq!(prefill.len(), 2);
        assert_eq!(
            prefill.placements(),
            &[
                PrefillPlacement {
                    position: [2, 1],
                    tile: TileType::Grass,
                },
                PrefillPlacement {
                    position: [0, 0],
                    tile: TileType::Water,
                },
            ]
        );
    }

    // Tests the island pins water on every border cell and stone in the centre
    // Verified by skipping the bottom border
    #[test]
    fn test_island_layout() {
        let prefill = PrefillData::island(5, 4);

        for placement in prefill.placements() {
            let [x, y] = placement.position;
            let on_border = x == 0 || y == 0 || x == 4 || y == 3;
            if on_border {
                assert_eq!(placement.tile, TileType::Water);
            } else {
                assert_eq!(placement.position, [2, 2]);
                assert_eq!(placement.tile, TileType::Stone);
            }
        }

        for x in 0..5 {
            for y in [0, 3] {
                assert!(prefill.placements().iter().any(|p| p.position == [x, y]));
            }
        }
        assert!(
            prefill
                .placements()
                .iter()
                .any(|p| p.position == [2, 2] && p.tile == TileType::Stone)
        );
    }

    // Tests an island on an empty map has no pins
    // Verified by removing the zero dimension guard
    #[test]
    fn test_island_empty_map() {
        assert!(PrefillData::island(0, 3).is_empty());
    }

    // Tests palette pixels become pins and other pixels stay free
    // Verified by pinning every pixel regardless of colour
    #[test]
    fn test_from_png() -> tilecollapse::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("pins.png");

        let mut img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        img.put_pixel(0, 0, Rgba(TILE_PALETTE[TileType::Water.index()]));
        img.put_pixel(2, 1, Rgba(TILE_PALETTE[TileType::Stone.index()]));
        img.save(&path)?;

        let prefill = PrefillData::from_png(&path, &TILE_PALETTE)?;
        assert_eq!(prefill.len(), 2);
        assert!(prefill.placements().contains(&PrefillPlacement {
            position: [0, 0],
            tile: TileType::Water,
        }));
        assert!(prefill.placements().contains(&PrefillPlacement {
            position: [2, 1],
            tile: TileType::Stone,
        }));
        Ok(())
    }

    // Tests an image without palette colours is rejected
    // Verified by returning an empty prefill
    #[test]
    fn test_from_png_without_palette_colours() -> tilecollapse::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("blank.png");
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])).save(&path)?;

        assert!(matches!(
            PrefillData::from_png(&path, &TILE_PALETTE),
            Err(GenerationError::InvalidParameter { .. })
        ));
        Ok(())
    }

    // Tests a missing file reports an image load error
    // Verified by mapping load failures to FileSystem errors
    #[test]
    fn test_from_png_missing_file() {
        let result = PrefillData::from_png(
            std::path::Path::new("/nonexistent/pins.png"),
            &TILE_PALETTE,
        );
        assert!(matches!(result, Err(GenerationError::ImageLoad { .. })));
    }
}
