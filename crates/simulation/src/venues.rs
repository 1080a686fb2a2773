//! The three destinations and where their routes start and end.
//!
//! Route endpoints sit on the road grid next to each venue; start points are
//! on the opposite side of the city so every trip crosses the centre.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::GridPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestinationId {
    Wedding,
    Groom,
    Bride,
}

impl DestinationId {
    pub const ALL: [DestinationId; 3] = [
        DestinationId::Wedding,
        DestinationId::Groom,
        DestinationId::Bride,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DestinationId::Wedding => "Wedding venue",
            DestinationId::Groom => "Groom's home",
            DestinationId::Bride => "Bride's home",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: DestinationId,
    pub name: &'static str,
    /// Centre of the building footprint.
    pub position: GridPoint,
    /// Width (x) and depth (z).
    pub footprint: (f32, f32),
    pub height: f32,
    /// sRGB hex, e.g. `0xff69b4`.
    pub color: u32,
    pub route_start: GridPoint,
    pub route_end: GridPoint,
}

#[derive(Resource, Debug, Clone)]
pub struct VenueRegistry {
    venues: Vec<Venue>,
}

impl Default for VenueRegistry {
    fn default() -> Self {
        Self::from_venues(vec![
            Venue {
                id: DestinationId::Wedding,
                name: "Wedding venue - Nanyang Meixi International Hotel",
                position: GridPoint::new(-150.0, -150.0),
                footprint: (35.0, 35.0),
                height: 55.0,
                color: 0xff69b4,
                route_start: GridPoint::new(200.0, 200.0),
                route_end: GridPoint::new(-150.0, -100.0),
            },
            Venue {
                id: DestinationId::Groom,
                name: "Groom's home",
                position: GridPoint::new(150.0, -150.0),
                footprint: (28.0, 28.0),
                height: 45.0,
                color: 0x1e90ff,
                route_start: GridPoint::new(-200.0, 200.0),
                route_end: GridPoint::new(150.0, -100.0),
            },
            Venue {
                id: DestinationId::Bride,
                name: "Bride's home",
                position: GridPoint::new(-150.0, 150.0),
                footprint: (28.0, 28.0),
                height: 45.0,
                color: 0xffd700,
                route_start: GridPoint::new(200.0, -200.0),
                route_end: GridPoint::new(-150.0, 100.0),
            },
        ])
    }
}

impl VenueRegistry {
    pub fn from_venues(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    pub fn get(&self, id: DestinationId) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Venue> {
        self.venues.iter()
    }

    pub fn venue_position(&self, id: DestinationId) -> Option<GridPoint> {
        self.get(id).map(|v| v.position)
    }

    pub fn venue_height(&self, id: DestinationId) -> Option<f32> {
        self.get(id).map(|v| v.height)
    }

    /// `(start, end)` of the trip to `id`.
    pub fn route_endpoints(&self, id: DestinationId) -> Option<(GridPoint, GridPoint)> {
        self.get(id).map(|v| (v.route_start, v.route_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_destination_has_a_venue() {
        let registry = VenueRegistry::default();
        for id in DestinationId::ALL {
            assert!(registry.get(id).is_some(), "missing {id:?}");
            assert!(!id.label().is_empty());
        }
        assert_eq!(registry.iter().count(), DestinationId::ALL.len());
    }

    #[test]
    fn test_wedding_route_endpoints() {
        let registry = VenueRegistry::default();
        assert_eq!(
            registry.route_endpoints(DestinationId::Wedding),
            Some((GridPoint::new(200.0, 200.0), GridPoint::new(-150.0, -100.0)))
        );
        assert_eq!(registry.venue_height(DestinationId::Wedding), Some(55.0));
        assert_eq!(
            registry.venue_position(DestinationId::Groom),
            Some(GridPoint::new(150.0, -150.0))
        );
    }

    #[test]
    fn test_route_ends_near_venue() {
        let registry = VenueRegistry::default();
        for venue in registry.iter() {
            assert!(venue.route_end.distance(venue.position) <= 50.0);
        }
    }
}
