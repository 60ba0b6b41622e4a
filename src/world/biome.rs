use serde::{Deserialize, Serialize};

use super::WorldGenConfig;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Beach,
    Plains,
    Highland,
    Mountain,
}

impl Biome {
    pub fn name(&self) -> &'static str {
        match self {
            Biome::Beach => "Beach",
            Biome::Plains => "Plains",
            Biome::Highland => "Highland",
            Biome::Mountain => "Mountain",
        }
    }

    /// Linear RGBA used for terrain vertex colours.
    pub fn color(&self) -> [f32; 4] {
        match self {
            Biome::Beach => [0.76, 0.70, 0.50, 1.0],
            Biome::Plains => [0.21, 0.37, 0.23, 1.0],
            Biome::Highland => [0.36, 0.42, 0.22, 1.0],
            Biome::Mountain => [0.45, 0.43, 0.40, 1.0],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeThresholds {
    pub water_level: f32,
    pub beach_margin: f32,
    pub mountain_slope: f32,
    pub highland_fraction: f32,
}

impl BiomeThresholds {
    pub fn from_config(config: &WorldGenConfig) -> Self {
        Self {
            water_level: config.water_level,
            beach_margin: config.beach_margin,
            mountain_slope: config.mountain_slope,
            highland_fraction: config.highland_fraction,
        }
    }

    /// `chunk_max_height` is the tallest sample of the chunk being classified,
    /// so the highland band is chunk-relative and can seam at chunk borders.
    pub fn classify(&self, height: f32, slope: f32, chunk_max_height: f32) -> Biome {
        if height < self.water_level + self.beach_margin {
            Biome::Beach
        } else if slope > self.mountain_slope {
            Biome::Mountain
        } else if height > chunk_max_height * self.highland_fraction {
            Biome::Highland
        } else {
            Biome::Plains
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> BiomeThresholds {
        BiomeThresholds {
            water_level: 0.0,
            beach_margin: 0.5,
            mountain_slope: 0.7,
            highland_fraction: 0.7,
        }
    }

    #[test]
    fn low_ground_is_beach_even_when_steep() {
        assert_eq!(thresholds().classify(0.2, 2.0, 10.0), Biome::Beach);
    }

    #[test]
    fn steep_ground_is_mountain() {
        assert_eq!(thresholds().classify(3.0, 0.8, 10.0), Biome::Mountain);
    }

    #[test]
    fn highland_is_relative_to_chunk_maximum() {
        let t = thresholds();
        assert_eq!(t.classify(8.0, 0.1, 10.0), Biome::Highland);
        // Same height in a taller chunk reads as plains.
        assert_eq!(t.classify(8.0, 0.1, 20.0), Biome::Plains);
    }

    #[test]
    fn everything_else_is_plains() {
        assert_eq!(thresholds().classify(2.0, 0.3, 10.0), Biome::Plains);
    }
}
