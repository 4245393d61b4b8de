//! Advisory threshold overrides.
//!
//! A thresholds file is a JSON object with any subset of the
//! `AdvisoryThresholds` fields; missing fields keep their defaults.

use std::io::Read;

use stocksight_stats::AdvisoryThresholds;

use crate::error::{LoadError, LoadResult};

pub fn load_thresholds<R: Read>(reader: R) -> LoadResult<AdvisoryThresholds> {
    let thresholds: AdvisoryThresholds = serde_json::from_reader(reader)?;
    log::debug!("loaded thresholds: {:?}", thresholds);
    Ok(thresholds)
}

pub fn load_thresholds_file(path: &str) -> LoadResult<AdvisoryThresholds> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    load_thresholds(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let t = load_thresholds(r#"{"high_growth_threshold": 0.3}"#.as_bytes()).unwrap();
        assert_eq!(t.high_growth_threshold, 0.3);
        assert_eq!(
            t.moderate_growth_threshold,
            AdvisoryThresholds::default().moderate_growth_threshold
        );
    }

    #[test]
    fn empty_object_is_the_default() {
        let t = load_thresholds("{}".as_bytes()).unwrap();
        assert_eq!(t, AdvisoryThresholds::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            load_thresholds("{not json".as_bytes()),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_thresholds_file("/nonexistent/thresholds.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/thresholds.json"));
    }
}
