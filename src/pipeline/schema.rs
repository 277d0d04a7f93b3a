//! Fixed column contract of the trained model

/// Currency-formatted column (`$1,234.50`, `(12.00)`)
pub const CURRENCY_COLUMN: &str = "x12";

/// Percentage-formatted column (`12.5%`)
pub const PERCENTAGE_COLUMN: &str = "x63";

/// Columns that skip imputation and go straight to one-hot encoding
pub const CATEGORICAL_COLUMNS: [&str; 4] = ["x5", "x31", "x81", "x82"];

/// Raw columns a request must carry to be accepted
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "x5", "x81", "x31", "x91", "x53", "x44", "x12", "x62", "x58", "x56",
];

/// Feature names the model was trained on, in the order it expects them
pub const FEATURE_SCHEMA: [&str; 25] = [
    "x5_saturday",
    "x81_July",
    "x81_December",
    "x31_japan",
    "x81_October",
    "x5_sunday",
    "x31_asia",
    "x81_February",
    "x91",
    "x81_May",
    "x5_monday",
    "x81_September",
    "x81_March",
    "x53",
    "x81_November",
    "x44",
    "x81_June",
    "x12",
    "x5_tuesday",
    "x81_August",
    "x81_January",
    "x62",
    "x31_germany",
    "x58",
    "x56",
];

/// Name of the probability column appended to scored output
pub const PHAT_COLUMN: &str = "phat";

/// Name of the thresholded label column appended to scored output
pub const OUTCOME_COLUMN: &str = "business_outcome";

/// Suffix of the explicit missing-value indicator produced by one-hot encoding
pub const MISSING_LEVEL_SUFFIX: &str = "nan";

/// Return the required columns absent from `columns`, in contract order.
pub fn missing_required_columns<S: AsRef<str>>(columns: &[S]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !columns.iter().any(|c| c.as_ref() == *required))
        .collect()
}

/// Message returned to clients whose batch fails the required-column gate.
pub fn invalid_data_message() -> String {
    format!(
        "Invalid data, input data should contain the following columns [{}]",
        REQUIRED_COLUMNS.join(",")
    )
}
