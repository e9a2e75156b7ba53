use marker_vision::{Pixel, Raster};

pub const BLACK: Pixel = Pixel {
    red: 0,
    green: 0,
    blue: 0,
    alpha: 255,
};
pub const GREEN: Pixel = Pixel {
    red: 0,
    green: 255,
    blue: 0,
    alpha: 255,
};
pub const RED: Pixel = Pixel {
    red: 255,
    green: 0,
    blue: 0,
    alpha: 255,
};
pub const BLUE: Pixel = Pixel {
    red: 0,
    green: 0,
    blue: 255,
    alpha: 255,
};

/// A black canvas of the given size.
pub fn black(width: u32, height: u32) -> Raster {
    Raster::filled(width, height, BLACK)
}

/// A deterministic pseudo-random scatter of markers, payloads and noise.
///
/// Uses a fixed LCG so every run produces the same image.
pub fn cluttered(width: u32, height: u32, seed: u64) -> Raster {
    let mut raster = black(width, height);
    let mut state = seed;
    let mut next = |bound: u32| -> u32 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % bound as u64) as u32
    };

    for _ in 0..40 {
        let color = match next(4) {
            0 => GREEN,
            1 => RED,
            2 => BLUE,
            _ => Pixel::rgb(250, 250, 0),
        };
        let (x, y) = (next(width), next(height));
        let (w, h) = (1 + next(30), 1 + next(30));
        raster.fill_rect(x, y, w, h, color);
    }
    raster
}
