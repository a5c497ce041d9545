use polars::prelude::{DataType, Field, Schema};

/// Feature columns in the order the scaler and classifier were fitted on.
pub const FEATURE_COLUMNS: [&str; 26] = [
    "Age",
    "Gender",
    "Ethnicity",
    "EducationLevel",
    "BMI",
    "Smoking",
    "PhysicalActivity",
    "DietQuality",
    "SleepQuality",
    "PollutionExposure",
    "PollenExposure",
    "DustExposure",
    "PetAllergy",
    "FamilyHistoryAsthma",
    "HistoryOfAllergies",
    "Eczema",
    "HayFever",
    "GastroesophagealReflux",
    "LungFunctionFEV1",
    "LungFunctionFVC",
    "Wheezing",
    "ShortnessOfBreath",
    "ChestTightness",
    "Coughing",
    "NighttimeSymptoms",
    "ExerciseInduced",
];

pub struct AsthmaRecord {}

impl AsthmaRecord {
    pub fn raw_schema() -> Schema {
        /* Every column is numeric by the time it reaches the model; categorical
        fields arrive pre-encoded by the caller. */
        Schema::from_iter(
            FEATURE_COLUMNS
                .iter()
                .map(|name| Field::new(name, DataType::Float64)),
        )
    }
}
