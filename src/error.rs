use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Io{source: std::io::Error} = "I/O error",
    NotYielded = "No item was yielded",
    Empty{what: &'static str} = "no {what} could be parsed",
    Json{serde_json: serde_json::Error} = "GeoJSON error",
    UnknownTurnpoint{ident: String} = "unknown turnpoint {ident}"
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json { serde_json: e }
    }
}
