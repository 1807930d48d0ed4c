use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use seeker_vision::{BlobLocator, VisionConfig};

fn main() {
    // White canvas with a red disc at (120, 80), r = 15, and a few red specks.
    let mut image = RgbImage::from_pixel(200, 160, Rgb([255, 255, 255]));
    draw_filled_circle_mut(&mut image, (120, 80), 15, Rgb([255, 0, 0]));
    for (x, y) in [(10, 10), (30, 140), (180, 20)] {
        image.put_pixel(x, y, Rgb([230, 10, 10]));
    }

    let locator = match BlobLocator::new(VisionConfig::default()) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Invalid vision config: {}", e);
            return;
        }
    };

    let (detection, mask) = locator.locate_with_mask(&image);
    let lit = mask.pixels().filter(|p| p.0[0] > 0).count();
    println!("Mask pixels after cleanup: {}", lit);

    match detection {
        Some(d) => println!(
            "Blob at ({:.1}, {:.1}), radius {:.1} px, area {:.0} px²",
            d.x, d.y, d.radius, d.area
        ),
        None => println!("No blob detected."),
    }
}
