//! Leaflet map documents.
//!
//! A [`Map`] collects markers in memory and is written out as a single HTML
//! file that loads Leaflet and OpenStreetMap tiles from public CDNs.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::LatLon;

pub const DEFAULT_ZOOM: u8 = 9;

const MAP_HTML: &str = r#"<!doctype html>
<html lang="es">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Centros sanitarios</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <style>
    html, body { height: 100%; margin: 0; }
    #map { height: 100%; width: 100%; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const map = L.map('map').setView([{{LAT}}, {{LON}}], {{ZOOM}});
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);

    const markers = {{MARKERS}};
    for (const m of markers) {
      L.circleMarker([m.lat, m.lon], {
        radius: 8,
        color: m.color,
        fillColor: m.color,
        fillOpacity: 0.8
      }).bindTooltip(m.label).bindPopup(m.label).addTo(map);
    }
  </script>
</body>
</html>
"#;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarkerColor {
    Red,
    Blue,
    Green,
    Orange,
    Gray,
}

impl From<MarkerColor> for &str {
    fn from(x: MarkerColor) -> Self {
        match x {
            MarkerColor::Red => "red",
            MarkerColor::Blue => "blue",
            MarkerColor::Green => "green",
            MarkerColor::Orange => "orange",
            MarkerColor::Gray => "gray",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub location: LatLon,
    pub label: String,
    pub color: MarkerColor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    center: LatLon,
    zoom: u8,
    markers: Vec<Marker>,
}

// What the page script sees for each marker.
#[derive(Serialize)]
struct MarkerJs<'a> {
    lat: f64,
    lon: f64,
    label: &'a str,
    color: &'static str,
}

impl Map {
    pub fn new(center: LatLon) -> Self {
        Map {
            center,
            zoom: DEFAULT_ZOOM,
            markers: Vec::new(),
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn center(&self) -> LatLon {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn add_marker<S: Into<String>>(&mut self, location: LatLon, label: S, color: MarkerColor) {
        self.markers.push(Marker {
            location,
            label: label.into(),
            color,
        });
    }

    pub fn to_html(&self) -> Result<String> {
        let markers: Vec<_> = self
            .markers
            .iter()
            .map(|m| MarkerJs {
                lat: m.location.lat(),
                lon: m.location.lon(),
                label: &m.label,
                color: m.color.into(),
            })
            .collect();

        // "</" inside a label must not close the script element.
        let markers = serde_json::to_string(&markers)?.replace("</", "<\\/");

        Ok(MAP_HTML
            .replace("{{LAT}}", &self.center.lat().to_string())
            .replace("{{LON}}", &self.center.lon().to_string())
            .replace("{{ZOOM}}", &self.zoom.to_string())
            .replace("{{MARKERS}}", &markers))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let html = self.to_html()?;
        std::fs::write(path, html).map_err(|source| Error::Write {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Wrote {} markers to {}", self.markers.len(), path.display());
        Ok(())
    }
}
