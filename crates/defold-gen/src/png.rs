// PNG encoding for projected rasters.

use anyhow::{Result, bail};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use import_core::Raster;

/// Encode a raster's RGBA pixels as a PNG blob. The pixel buffer must
/// hold exactly `4 * width * height` bytes.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    // PngEncoder::write_image panics on a length mismatch rather than
    // returning an error.
    let expected = 4 * raster.width as usize * raster.height as usize;
    if raster.rgba.len() != expected {
        bail!(
            "Raster {} is {} bytes, expected {}",
            raster.name,
            raster.rgba.len(),
            expected
        );
    }
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        &raster.rgba,
        raster.width,
        raster.height,
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_round_trips_pixels() {
        let raster = Raster {
            name: "img/test.png".into(),
            width: 2,
            height: 2,
            rgba: vec![
                255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 128,
            ],
        };
        let png = encode_png(&raster).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), raster.rgba);
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let raster = Raster {
            name: "img/bad.png".into(),
            width: 2,
            height: 2,
            rgba: vec![0; 4],
        };
        let err = encode_png(&raster).unwrap_err();
        assert!(err.to_string().contains("expected 16"), "{err}");
    }
}
