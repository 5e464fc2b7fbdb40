use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

/// A (latitude, longitude) pair in decimal degrees. Components are not range checked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLon(f64, f64);

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon(lat, lon)
    }

    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lon(self) -> f64 {
        self.1
    }

    /// Straight-line distance in degree units, not a geodesic.
    pub fn distance(self, other: LatLon) -> f64 {
        distance(self, other)
    }
}

pub fn distance(a: LatLon, b: LatLon) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Component-wise arithmetic mean. Every point has the same weight.
pub fn mean(coordinates: &[LatLon]) -> Result<LatLon> {
    if coordinates.is_empty() {
        return Err(Error::EmptyInput);
    }

    let (sum_lat, sum_lon) = coordinates
        .iter()
        .fold((0.0, 0.0), |(lat, lon), c| (lat + c.0, lon + c.1));
    let n = coordinates.len() as f64;

    Ok(LatLon(sum_lat / n, sum_lon / n))
}

// Ex: 37.3891,-5.9845
impl FromStr for LatLon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref LAT_LON_REGEX: Regex =
                Regex::new(r"^\s*([-+]?\d+(?:\.\d+)?)\s*,\s*([-+]?\d+(?:\.\d+)?)\s*$").unwrap();
        }

        LAT_LON_REGEX
            .captures(s)
            .and_then(|cap| {
                let (lat, lon) = (cap[1].parse().ok()?, cap[2].parse().ok()?);
                Some(LatLon(lat, lon))
            })
            .ok_or_else(|| Error::InvalidCoordinate { text: s.to_owned() })
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        for &(lat, lon) in &[(0.0, 0.0), (37.38, -5.98), (-90.0, 180.0), (1e6, -1e6)] {
            let a = LatLon::new(lat, lon);
            assert_eq!(distance(a, a), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LatLon::new(37.3891, -5.9845);
        let b = LatLon::new(36.7213, -4.4214);
        assert_eq!(distance(a, b), distance(b, a));
        assert_eq!(a.distance(b), distance(a, b));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = LatLon::new(0.0, 0.0);
        let b = LatLon::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
    }

    #[test]
    fn mean_of_one_point_is_that_point() {
        let p = LatLon::new(37.3891, -5.9845);
        assert_eq!(mean(&[p]).unwrap(), p);
    }

    #[test]
    fn mean_of_three_points() {
        let m = mean(&[
            LatLon::new(0.0, 0.0),
            LatLon::new(2.0, 0.0),
            LatLon::new(1.0, 2.0),
        ])
        .unwrap();
        assert!((m.lat() - 1.0).abs() < 1e-12);
        assert!((m.lon() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mean_of_nothing_fails() {
        match mean(&[]) {
            Err(Error::EmptyInput) => (),
            other => panic!("expected EmptyInput, got {:?}", other),
        }
    }

    #[test]
    fn parses_text_coordinates() {
        assert_eq!(
            "37.3891,-5.9845".parse::<LatLon>().unwrap(),
            LatLon::new(37.3891, -5.9845)
        );
        assert_eq!(" -1 , +2.5 ".parse::<LatLon>().unwrap(), LatLon::new(-1.0, 2.5));
    }

    #[test]
    fn rejects_malformed_text_coordinates() {
        for bad in &["", "37.3", "a,b", "1,2,3", "1.,2"] {
            match bad.parse::<LatLon>() {
                Err(Error::InvalidCoordinate { text }) => assert_eq!(&text, bad),
                other => panic!("expected InvalidCoordinate for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn displays_as_pair() {
        assert_eq!(LatLon::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
