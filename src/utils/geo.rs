use crate::models::StationMetadata;

/// Number of coarse lat/lng grid cells: 4 bits of latitude index plus
/// 5 bits of longitude index.
pub const N_BUCKETS: usize = 512;

/// Approximate bucket size of 15 degrees.
const BUCKET_SCALE: f64 = 1.0 / 15.0;

/// Coarse grid cell indices for a coordinate. The longitude scale shrinks
/// with the cosine of latitude so cells stay roughly equal-area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatLngIndex {
    pub lat_index: u32,
    pub lng_index: u32,
}

pub fn latlng_index(lat: f64, lng: f64) -> LatLngIndex {
    let lat_index = ((lat + 90.0) * BUCKET_SCALE).round() as u32;
    let lng_scale = BUCKET_SCALE * (lat.abs() * std::f64::consts::PI / 180.0).cos();
    let lng_index = ((lng + 180.0) * lng_scale).round() as u32;
    LatLngIndex { lat_index, lng_index }
}

pub fn bucket_id(index: LatLngIndex) -> usize {
    ((index.lng_index << 4) | index.lat_index) as usize
}

/// A station position as consumed by the map-rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

/// Mean position of one occupied bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketCenter {
    pub bucket: usize,
    pub lat: f64,
    pub lng: f64,
}

/// Accumulates station locations into the coarse grid. The collaborator
/// pulls `locations()` for point rendering and `bucket_centers()` for the
/// aggregated overlay.
#[derive(Debug)]
pub struct StationLocations {
    locations: Vec<Location>,
    buckets: Vec<Vec<usize>>,
}

impl StationLocations {
    pub fn new() -> Self {
        Self {
            locations: Vec::new(),
            buckets: vec![Vec::new(); N_BUCKETS],
        }
    }

    pub fn add_location(&mut self, station: &StationMetadata) {
        let index = latlng_index(station.lat, station.lng);
        let bucket = bucket_id(index);
        self.buckets[bucket].push(self.locations.len());
        self.locations.push(Location {
            id: station.id.clone(),
            lat: station.lat,
            lng: station.lng,
        });
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn bucket(&self, bucket: usize) -> impl Iterator<Item = &Location> {
        self.buckets[bucket].iter().map(|&i| &self.locations[i])
    }

    pub fn bucket_centers(&self) -> Vec<BucketCenter> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, members)| !members.is_empty())
            .map(|(bucket, members)| {
                let n = members.len() as f64;
                let (lat_sum, lng_sum) = members.iter().fold((0.0, 0.0), |(lat, lng), &i| {
                    (lat + self.locations[i].lat, lng + self.locations[i].lng)
                });
                BucketCenter {
                    bucket,
                    lat: lat_sum / n,
                    lng: lng_sum / n,
                }
            })
            .collect()
    }
}

impl Default for StationLocations {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_at_origin() {
        let index = latlng_index(0.0, 0.0);
        assert_eq!(index.lat_index, 6);
        assert_eq!(index.lng_index, 12);
        assert_eq!(bucket_id(index), (12 << 4) | 6);
    }

    #[test]
    fn test_lng_scale_shrinks_toward_poles() {
        let equator = latlng_index(0.0, 120.0);
        let high_lat = latlng_index(75.0, 120.0);
        assert!(high_lat.lng_index < equator.lng_index);
    }

    #[test]
    fn test_bucket_membership_and_centers() {
        let mut locations = StationLocations::new();
        let a = StationMetadata::new("AAA00000001".to_string(), 40.0, -74.0, 0.0);
        let b = StationMetadata::new("AAA00000002".to_string(), 41.0, -73.0, 0.0);
        locations.add_location(&a);
        locations.add_location(&b);

        assert_eq!(locations.locations().len(), 2);

        let centers = bucket_centers_sorted(&locations);
        let total_members: usize = centers
            .iter()
            .map(|c| locations.bucket(c.bucket).count())
            .sum();
        assert_eq!(total_members, 2);
    }

    fn bucket_centers_sorted(locations: &StationLocations) -> Vec<BucketCenter> {
        let mut centers = locations.bucket_centers();
        centers.sort_by_key(|c| c.bucket);
        centers
    }

    #[test]
    fn test_same_cell_shares_bucket() {
        let a = latlng_index(40.1, -74.0);
        let b = latlng_index(40.2, -74.1);
        assert_eq!(bucket_id(a), bucket_id(b));
    }
}
