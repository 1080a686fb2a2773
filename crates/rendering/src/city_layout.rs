//! Static layout of the ordinary (non-venue) city buildings.
//!
//! Venue buildings come from `VenueRegistry`; everything here is scenery.

/// One box-shaped building. `x`/`z` is the footprint centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingSpec {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    /// sRGB hex.
    pub color: u32,
}

const fn b(x: f32, z: f32, width: f32, depth: f32, height: f32, color: u32) -> BuildingSpec {
    BuildingSpec {
        x,
        z,
        width,
        depth,
        height,
        color,
    }
}

pub const CITY_BUILDINGS: &[BuildingSpec] = &[
    // Office towers
    b(-150.0, -60.0, 25.0, 25.0, 60.0, 0x808080),
    b(-150.0, 60.0, 22.0, 22.0, 55.0, 0x696969),
    b(150.0, -60.0, 24.0, 24.0, 58.0, 0x778899),
    b(150.0, 60.0, 26.0, 26.0, 52.0, 0x708090),
    // Shopping centres
    b(-60.0, -150.0, 30.0, 20.0, 40.0, 0x4169e1),
    b(60.0, -150.0, 28.0, 22.0, 42.0, 0x1e90ff),
    b(-60.0, 150.0, 32.0, 18.0, 38.0, 0x00bfff),
    b(60.0, 150.0, 26.0, 24.0, 44.0, 0x87ceeb),
    // Residential blocks
    b(-160.0, -130.0, 18.0, 18.0, 35.0, 0xdaa520),
    b(-160.0, -30.0, 20.0, 20.0, 32.0, 0xcd853f),
    b(160.0, -130.0, 18.0, 18.0, 36.0, 0xbc8f8f),
    b(160.0, 30.0, 21.0, 21.0, 33.0, 0xa0522d),
    // Centre, south-west block
    b(-60.0, -60.0, 20.0, 20.0, 48.0, 0x9370db),
    b(-70.0, -30.0, 18.0, 18.0, 40.0, 0x9f8faf),
    b(-45.0, -45.0, 14.0, 14.0, 32.0, 0x9f7faf),
    b(-20.0, -50.0, 13.0, 13.0, 28.0, 0x8b6f9b),
    // Centre, south-east block
    b(60.0, -60.0, 22.0, 22.0, 46.0, 0x8a2be2),
    b(30.0, -70.0, 17.0, 17.0, 38.0, 0x9370db),
    b(70.0, -30.0, 19.0, 19.0, 42.0, 0x7b68ee),
    b(20.0, -50.0, 14.0, 14.0, 29.0, 0x8b6fbb),
    // Centre, north-west block
    b(-60.0, 60.0, 21.0, 21.0, 44.0, 0x9932cc),
    b(-30.0, 70.0, 16.0, 16.0, 36.0, 0x8b008b),
    b(-20.0, 50.0, 13.0, 13.0, 30.0, 0x9b3bb0),
    // Centre, north-east block
    b(30.0, 70.0, 17.0, 17.0, 37.0, 0xda70d6),
    b(70.0, 30.0, 19.0, 19.0, 43.0, 0xc71585),
    b(45.0, 45.0, 15.0, 15.0, 35.0, 0xd465dd),
    // Southern infill
    b(-130.0, -150.0, 15.0, 15.0, 28.0, 0xa9a9a9),
    b(-30.0, -150.0, 16.0, 16.0, 30.0, 0xb0b0b0),
    b(-130.0, -165.0, 14.0, 14.0, 24.0, 0x969696),
    b(30.0, -165.0, 13.0, 13.0, 22.0, 0xa8a8a8),
    // Northern infill
    b(-130.0, 150.0, 15.0, 15.0, 29.0, 0xa0a0a0),
    b(130.0, 150.0, 14.0, 14.0, 31.0, 0x888888),
    b(-70.0, 165.0, 13.0, 13.0, 25.0, 0x9a9a9a),
    b(70.0, 165.0, 14.0, 14.0, 23.0, 0xaaaaaa),
    // Western infill
    b(-150.0, -130.0, 16.0, 16.0, 34.0, 0x2f4f4f),
    b(-150.0, -30.0, 18.0, 18.0, 36.0, 0x556b2f),
    b(-150.0, 70.0, 15.0, 15.0, 32.0, 0x483d8b),
    b(-165.0, -70.0, 14.0, 14.0, 28.0, 0x3f5f5f),
    // Eastern infill
    b(150.0, -130.0, 17.0, 17.0, 35.0, 0x8b4513),
    b(150.0, 130.0, 16.0, 16.0, 37.0, 0x4b0082),
    b(165.0, -70.0, 14.0, 14.0, 31.0, 0x7a5230),
    b(165.0, 70.0, 15.0, 15.0, 29.0, 0x5a7c1a),
    // Corner landmarks
    b(-130.0, -130.0, 18.0, 18.0, 40.0, 0x5f9ea0),
    b(130.0, -130.0, 19.0, 19.0, 42.0, 0x20b2aa),
    b(-130.0, 130.0, 17.0, 17.0, 38.0, 0x48d1cc),
    b(130.0, 130.0, 20.0, 20.0, 41.0, 0x40e0d0),
    // West side
    b(-130.0, -60.0, 16.0, 16.0, 30.0, 0xc0c0c0),
    b(-130.0, 60.0, 17.0, 17.0, 32.0, 0xd3d3d3),
    b(-165.0, -30.0, 13.0, 13.0, 26.0, 0xb8b8b8),
    b(-165.0, 30.0, 14.0, 14.0, 28.0, 0xcccccc),
    // East side
    b(130.0, -60.0, 15.0, 15.0, 31.0, 0xdcdcdc),
    b(130.0, 60.0, 18.0, 18.0, 29.0, 0xc8c8c8),
    b(165.0, -30.0, 13.0, 13.0, 27.0, 0xe0e0e0),
    b(165.0, 30.0, 14.0, 14.0, 25.0, 0xd0d0d0),
    // South side
    b(-60.0, -130.0, 14.0, 14.0, 25.0, 0xffa07a),
    b(60.0, -130.0, 15.0, 15.0, 27.0, 0xfa8072),
    b(-30.0, -165.0, 12.0, 12.0, 23.0, 0xffa500),
    b(30.0, -165.0, 13.0, 13.0, 24.0, 0xff8c69),
    // North side
    b(-60.0, 130.0, 16.0, 16.0, 26.0, 0xe9967a),
    b(60.0, 130.0, 14.0, 14.0, 28.0, 0xf08080),
    b(-30.0, 165.0, 12.0, 12.0, 24.0, 0xffa07a),
    b(30.0, 165.0, 13.0, 13.0, 25.0, 0xff7f50),
];

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::config::GROUND_SIZE;

    #[test]
    fn test_buildings_stand_on_the_ground_plane() {
        let half = GROUND_SIZE / 2.0;
        for spec in CITY_BUILDINGS {
            assert!(spec.x.abs() + spec.width / 2.0 <= half, "{spec:?}");
            assert!(spec.z.abs() + spec.depth / 2.0 <= half, "{spec:?}");
            assert!(spec.height > 0.0);
        }
    }

    #[test]
    fn test_layout_size() {
        assert_eq!(CITY_BUILDINGS.len(), 62);
    }
}
