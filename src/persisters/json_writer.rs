use std::{fs::File, io::BufWriter, io::Write, path::Path};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{error::Error, model::movie::TasteRating};

pub struct JsonWriter {}

impl JsonWriter {
    /// Writes the ratings as a JSON array with four space indentation. Going
    /// through `Value` sorts the keys of every object.
    pub fn save_ratings_to_json(ratings: &[TasteRating], file_path: &Path) -> Result<(), Error> {
        let value = serde_json::to_value(ratings)?;

        let mut out = BufWriter::new(File::create(file_path)?);
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        out.flush()?;

        Ok(())
    }
}
