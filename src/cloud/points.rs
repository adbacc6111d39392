use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub index: usize,
    pub position: Vec3,
    pub color: Color,
}

/// Scatters `n` points uniformly in the cube `[-spread_bound, spread_bound]^3`,
/// each with a uniformly random 24-bit color.
pub fn generate_points<R: Rng + ?Sized>(n: usize, spread_bound: f32, rng: &mut R) -> Vec<Point> {
    (0..n)
        .map(|index| {
            let x = rng.gen_range(-spread_bound..=spread_bound);
            let y = rng.gen_range(-spread_bound..=spread_bound);
            let z = rng.gen_range(-spread_bound..=spread_bound);
            let packed: u32 = rng.gen_range(0..=0xFF_FFFF);
            Point {
                index,
                position: Vec3::new(x, y, z),
                color: unpack_rgb(packed),
            }
        })
        .collect()
}

/// `0xRRGGBB` to an sRGB color.
pub fn unpack_rgb(packed: u32) -> Color {
    Color::srgb_u8((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
}
