use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use derive_builder::Builder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{distance, LatLon};

#[derive(Clone, Debug, Default, PartialEq, Builder)]
#[builder(default, setter(into))]
pub struct HealthCenter {
    pub name: String,
    pub locality: String,
    pub location: LatLon,
    pub status: String,
    pub bed_count: i64,
    pub has_disability_access: bool,
    pub has_icu: bool,
}

impl fmt::Display for HealthCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn yes_no(x: bool) -> &'static str {
            if x {
                "yes"
            } else {
                "no"
            }
        }

        write!(
            f,
            "{} ({}) at {} [{}] beds: {}, accessible: {}, ICU: {}",
            self.name,
            self.locality,
            self.location,
            self.status,
            self.bed_count,
            yes_no(self.has_disability_access),
            yes_no(self.has_icu)
        )
    }
}

/// A center returned by [`nearby_icu_centers`].
#[derive(Clone, Debug, PartialEq)]
pub struct NearbyCenter {
    pub name: String,
    pub locality: String,
    pub location: LatLon,
}

impl fmt::Display for NearbyCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) at {}", self.name, self.locality, self.location)
    }
}

/// Header names the loader requires, matched case-sensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Columns {
    pub name: String,
    pub locality: String,
    pub latitude: String,
    pub longitude: String,
    pub status: String,
    pub bed_count: String,
    pub disability_access: String,
    pub icu: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            name: "NOMBRE".to_owned(),
            locality: "LOCALIDAD".to_owned(),
            latitude: "LATITUD".to_owned(),
            longitude: "LONGITUD".to_owned(),
            status: "ESTADO".to_owned(),
            bed_count: "NUM_CAMAS".to_owned(),
            disability_access: "TIENE_ACCESO_DISCAPACITADOS".to_owned(),
            icu: "TIENE_UCI".to_owned(),
        }
    }
}

// Position of every required column within a record.
struct Layout<'c> {
    columns: &'c Columns,
    name: usize,
    locality: usize,
    latitude: usize,
    longitude: usize,
    status: usize,
    bed_count: usize,
    disability_access: usize,
    icu: usize,
}

impl<'c> Layout<'c> {
    fn locate(headers: &StringRecord, columns: &'c Columns) -> Result<Self> {
        // A repeated header resolves to its last occurrence.
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|&(_, h)| h == name)
                .map(|(i, _)| i)
                .last()
                .ok_or_else(|| Error::missing_header(name))
        };

        Ok(Layout {
            columns,
            name: find(&columns.name)?,
            locality: find(&columns.locality)?,
            latitude: find(&columns.latitude)?,
            longitude: find(&columns.longitude)?,
            status: find(&columns.status)?,
            bed_count: find(&columns.bed_count)?,
            disability_access: find(&columns.disability_access)?,
            icu: find(&columns.icu)?,
        })
    }

    fn center(&self, record: &StringRecord, row: u64) -> Result<HealthCenter> {
        let field = |pos: usize, name: &str| {
            record
                .get(pos)
                .ok_or_else(|| Error::missing_in_row(name, row))
        };
        let c = self.columns;

        let lat = parse_number(field(self.latitude, &c.latitude)?, &c.latitude, row)?;
        let lon = parse_number(field(self.longitude, &c.longitude)?, &c.longitude, row)?;

        Ok(HealthCenter {
            name: field(self.name, &c.name)?.to_owned(),
            locality: field(self.locality, &c.locality)?.to_owned(),
            location: LatLon::new(lat, lon),
            status: field(self.status, &c.status)?.to_owned(),
            bed_count: parse_number(field(self.bed_count, &c.bed_count)?, &c.bed_count, row)?,
            has_disability_access: parse_flag(field(
                self.disability_access,
                &c.disability_access,
            )?),
            has_icu: parse_flag(field(self.icu, &c.icu)?),
        })
    }
}

fn parse_number<T: FromStr>(value: &str, field: &str, row: u64) -> Result<T> {
    value.trim().parse().map_err(|_| Error::Format {
        field: field.to_owned(),
        value: value.to_owned(),
        row,
    })
}

// Anything but a case-insensitive "true" counts as false, including "".
fn parse_flag(value: &str) -> bool {
    value.to_lowercase() == "true"
}

/// Loads every center from a `;`-delimited file using the default [`Columns`].
pub fn load_centers<P: AsRef<Path>>(path: P) -> Result<Vec<HealthCenter>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.display().to_string(),
        source,
    })?;

    let centers = read_centers(file, &Columns::default())?;
    debug!("Loaded {} centers from {}", centers.len(), path.display());
    Ok(centers)
}

/// Parses `;`-delimited records with a header row. The first bad row aborts the whole read.
///
/// Required headers are only checked once there is a data row, so an empty or
/// header-only input yields an empty catalog.
pub fn read_centers<R: Read>(reader: R, columns: &Columns) -> Result<Vec<HealthCenter>> {
    let mut csv = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let mut layout = None;

    let mut centers = Vec::new();
    for (i, record) in csv.records().enumerate() {
        let record = record?;
        let row = i as u64 + 1;
        if layout.is_none() {
            layout = Some(Layout::locate(&headers, columns)?);
        }
        if let Some(layout) = &layout {
            centers.push(layout.center(&record, row)?);
        }
    }

    Ok(centers)
}

/// Summed as `i128` so that no catalog of `i64` bed counts can overflow.
pub fn total_beds_accessible(centers: &[HealthCenter]) -> i128 {
    centers
        .iter()
        .filter(|c| c.has_disability_access)
        .map(|c| i128::from(c.bed_count))
        .sum()
}

/// Centers with an ICU no further than `threshold` from `point`. The boundary is inclusive.
pub fn nearby_icu_centers(
    centers: &[HealthCenter],
    point: LatLon,
    threshold: f64,
) -> Vec<NearbyCenter> {
    centers
        .iter()
        .filter(|c| c.has_icu && distance(c.location, point) <= threshold)
        .map(|c| NearbyCenter {
            name: c.name.clone(),
            locality: c.locality.clone(),
            location: c.location,
        })
        .collect()
}
