use crate::geometry::GridPoint;

/// Per-vertex opacity parallel to the ribbon vertex buffer.
///
/// Values only ever decrease for the lifetime of one ribbon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonVisibility {
    opacity: Vec<f32>,
}

impl RibbonVisibility {
    pub fn opaque(vertex_count: usize) -> Self {
        Self {
            opacity: vec![1.0; vertex_count],
        }
    }

    pub fn opacity(&self) -> &[f32] {
        &self.opacity
    }

    /// Erase vertices near `vehicle` with a quadratic falloff.
    ///
    /// Returns whether any opacity changed.
    pub fn fade(&mut self, positions: &[[f32; 3]], vehicle: GridPoint, fade_distance: f32) -> bool {
        let mut changed = false;
        for (alpha, p) in self.opacity.iter_mut().zip(positions) {
            let distance = (p[0] - vehicle.x).hypot(p[2] - vehicle.z);
            if distance >= fade_distance {
                continue;
            }
            let ratio = distance / fade_distance;
            let faded = alpha.min(ratio * ratio);
            if faded < *alpha {
                *alpha = faded;
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> Vec<[f32; 3]> {
        (0..n).map(|i| [0.0, 2.0, i as f32]).collect()
    }

    #[test]
    fn test_quadratic_falloff_inside_fade_distance() {
        let positions = row(60);
        let mut visibility = RibbonVisibility::opaque(positions.len());
        assert!(visibility.fade(&positions, GridPoint::new(0.0, 0.0), 25.0));
        let alpha = visibility.opacity();
        assert_eq!(alpha[0], 0.0);
        assert!((alpha[10] - 0.16).abs() < 1e-6);
        assert_eq!(alpha[25], 1.0);
        assert_eq!(alpha[59], 1.0);
    }

    #[test]
    fn test_opacity_never_increases() {
        let positions = row(100);
        let mut visibility = RibbonVisibility::opaque(positions.len());
        let mut previous = visibility.opacity().to_vec();
        for step in 0..200 {
            // Drive forward, then back again; faded vertices must stay faded.
            let z = if step < 100 { step as f32 } else { (200 - step) as f32 };
            visibility.fade(&positions, GridPoint::new(0.0, z), 25.0);
            for (now, before) in visibility.opacity().iter().zip(&previous) {
                assert!(now <= before);
            }
            previous = visibility.opacity().to_vec();
        }
        assert!(previous.iter().all(|&a| a < 1.0));
    }

    #[test]
    fn test_far_vehicle_changes_nothing() {
        let positions = row(10);
        let mut visibility = RibbonVisibility::opaque(positions.len());
        assert!(!visibility.fade(&positions, GridPoint::new(500.0, 500.0), 25.0));
        assert!(visibility.opacity().iter().all(|&a| a == 1.0));
    }
}
