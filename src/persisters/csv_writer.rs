use std::path::Path;

use csv::Writer;

use crate::{error::Error, model::movie::TasteRating};

pub struct CsvWriter {}

impl CsvWriter {
    pub fn save_ratings_to_csv(ratings: &[TasteRating], file_path: &Path) -> Result<(), Error> {
        let mut wrt = Writer::from_path(file_path)?;
        wrt.write_record(TasteRating::csv_titles())?;
        for rating in ratings {
            wrt.write_record(rating.to_csvable_array())?;
        }
        wrt.flush()?;

        Ok(())
    }
}
