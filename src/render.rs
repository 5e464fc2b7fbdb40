use std::path::Path;

use itertools::Itertools;
use tracing::info;

use crate::centers::NearbyCenter;
use crate::error::Result;
use crate::geo::{mean, LatLon};
use crate::map::{Map, MarkerColor};

/// Saves a map centred on the mean location of `nearby`, with one red marker per center
/// labelled by its locality. `nearby` must not be empty.
pub fn render_map<P: AsRef<Path>>(nearby: &[NearbyCenter], output: P) -> Result<()> {
    let locations: Vec<LatLon> = nearby.iter().map(|c| c.location).collect();
    let mut map = Map::new(mean(&locations)?);

    for c in nearby {
        map.add_marker(c.location, c.locality.as_str(), MarkerColor::Red);
    }

    info!(
        "Rendering {} markers in {} to {}",
        nearby.len(),
        nearby.iter().map(|c| c.locality.as_str()).unique().join(", "),
        output.as_ref().display()
    );
    map.save(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn nearby(name: &str, locality: &str, lat: f64, lon: f64) -> NearbyCenter {
        NearbyCenter {
            name: name.to_owned(),
            locality: locality.to_owned(),
            location: LatLon::new(lat, lon),
        }
    }

    #[test]
    fn renders_red_markers_centered_on_the_mean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cercanos.html");
        let results = vec![
            nearby("Hospital A", "Sevilla", 0.0, 0.0),
            nearby("Hospital B", "Osuna", 2.0, 0.0),
            nearby("Hospital C", "Sevilla", 1.0, 3.0),
        ];

        render_map(&results, &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("setView([1, 1], 9)"));
        assert!(html.contains(
            r#"[{"lat":0.0,"lon":0.0,"label":"Sevilla","color":"red"},{"lat":2.0,"lon":0.0,"label":"Osuna","color":"red"},{"lat":1.0,"lon":3.0,"label":"Sevilla","color":"red"}]"#
        ));
        assert!(!html.contains("Hospital A"));
    }

    #[test]
    fn nothing_to_render_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacio.html");
        match render_map(&[], &path) {
            Err(Error::EmptyInput) => (),
            other => panic!("expected EmptyInput, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn write_failures_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.html");
        match render_map(&[nearby("A", "X", 1.0, 1.0)], &path) {
            Err(Error::Write { .. }) => (),
            other => panic!("expected Write, got {:?}", other),
        }
    }
}
