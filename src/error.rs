use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    FileNotFound{path: String, source: std::io::Error} = "unable to open {path}",
    Csv{source: csv::Error} = "CSV error",
    MissingField{field: String, location: String} = "missing field {field} in {location}",
    Format{field: String, value: String, row: u64} = "data row {row}: cannot convert {field} value '{value}'",
    EmptyInput = "cannot compute the mean of zero coordinates",
    InvalidCoordinate{text: String} = "'{text}' is not a coordinate, expected <lat>,<lon>",
    Encode{source: serde_json::Error} = "unable to encode map markers",
    Write{path: String, source: std::io::Error} = "unable to write map to {path}"
}

impl Error {
    pub(crate) fn missing_header(field: &str) -> Error {
        Error::MissingField {
            field: field.to_owned(),
            location: "header row".to_owned(),
        }
    }

    pub(crate) fn missing_in_row(field: &str, row: u64) -> Error {
        Error::MissingField {
            field: field.to_owned(),
            location: format!("data row {}", row),
        }
    }
}
