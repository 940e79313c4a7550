use eframe::egui::IconData;
use image::{ImageBuffer, Rgba};

const ICON_SIZE: u32 = 32;

/// Procedural application icon: a red radar ring on a dark disc.
pub fn create_app_icon() -> IconData {
    let width = ICON_SIZE;
    let height = ICON_SIZE;
    let mut img = ImageBuffer::<Rgba<u8>, Vec<u8>>::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = (x as f32 / width as f32 - 0.5) * 2.0;
        let dy = (y as f32 / height as f32 - 0.5) * 2.0;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance > 1.0 {
            *pixel = Rgba([0, 0, 0, 0]);
            continue;
        }

        let mut rgb = [30u8, 34, 42];
        // Rings at 1/3, 2/3 and the rim
        let ring = (distance * 3.0).fract();
        if ring < 0.12 || distance > 0.9 {
            rgb = [229, 57, 53];
        }
        // Center dot
        if distance < 0.15 {
            rgb = [255, 235, 238];
        }

        *pixel = Rgba([rgb[0], rgb[1], rgb[2], 255]);
    }

    IconData {
        rgba: img.into_raw(),
        width,
        height,
    }
}
