//! Forecast aggregation granularity.
//!
//! The time frame decides which scaling factor the confidence scorer uses
//! and which fields the forecast provider keys its points by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    #[default]
    Week,
    Month,
    Year,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 3] = [TimeFrame::Week, TimeFrame::Month, TimeFrame::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Week => "week",
            TimeFrame::Month => "month",
            TimeFrame::Year => "year",
        }
    }

    /// Field holding the period ordinal inside a provider point.
    pub fn period_field(&self) -> &'static str {
        match self {
            TimeFrame::Week => "week_number",
            TimeFrame::Month => "month_number",
            TimeFrame::Year => "year",
        }
    }

    /// Field holding the sales value inside a provider point.
    pub fn value_field(&self) -> &'static str {
        match self {
            TimeFrame::Week => "total_sales_in_week",
            TimeFrame::Month => "total_sales_in_month",
            TimeFrame::Year => "total_sales_in_year",
        }
    }

    pub fn lower_bound_field(&self) -> &'static str {
        match self {
            TimeFrame::Week => "total_sales_in_week_lower",
            TimeFrame::Month => "total_sales_in_month_lower",
            TimeFrame::Year => "total_sales_in_year_lower",
        }
    }

    pub fn upper_bound_field(&self) -> &'static str {
        match self {
            TimeFrame::Week => "total_sales_in_week_upper",
            TimeFrame::Month => "total_sales_in_month_upper",
            TimeFrame::Year => "total_sales_in_year_upper",
        }
    }

    /// Plural heading label ("Weeks").
    pub fn plural_label(&self) -> &'static str {
        match self {
            TimeFrame::Week => "Weeks",
            TimeFrame::Month => "Months",
            TimeFrame::Year => "Years",
        }
    }

    /// Singular heading label ("Week").
    pub fn singular_label(&self) -> &'static str {
        match self {
            TimeFrame::Week => "Week",
            TimeFrame::Month => "Month",
            TimeFrame::Year => "Year",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TimeFrame::Week),
            "month" => Ok(TimeFrame::Month),
            "year" => Ok(TimeFrame::Year),
            other => Err(StatsError::invalid(format!(
                "unknown time frame '{}' (expected week, month or year)",
                other
            ))),
        }
    }
}

/// Time frame as labelled by an outside document.
///
/// Unrecognized labels are kept verbatim instead of failing the whole
/// document; they score with the default scaling factor and have no
/// provider field names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FrameLabel {
    Known(TimeFrame),
    Unrecognized(String),
}

impl FrameLabel {
    pub fn known(&self) -> Option<TimeFrame> {
        match self {
            FrameLabel::Known(tf) => Some(*tf),
            FrameLabel::Unrecognized(_) => None,
        }
    }
}

impl Default for FrameLabel {
    fn default() -> Self {
        FrameLabel::Known(TimeFrame::default())
    }
}

impl From<TimeFrame> for FrameLabel {
    fn from(tf: TimeFrame) -> Self {
        FrameLabel::Known(tf)
    }
}

impl From<String> for FrameLabel {
    fn from(label: String) -> Self {
        match label.parse() {
            Ok(tf) => FrameLabel::Known(tf),
            Err(_) => FrameLabel::Unrecognized(label),
        }
    }
}

impl From<FrameLabel> for String {
    fn from(label: FrameLabel) -> Self {
        match label {
            FrameLabel::Known(tf) => tf.as_str().to_string(),
            FrameLabel::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for FrameLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameLabel::Known(tf) => write!(f, "{}", tf),
            FrameLabel::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Week".parse::<TimeFrame>().unwrap(), TimeFrame::Week);
        assert_eq!(" MONTH ".parse::<TimeFrame>().unwrap(), TimeFrame::Month);
        assert_eq!("year".parse::<TimeFrame>().unwrap(), TimeFrame::Year);
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(matches!(
            "quarter".parse::<TimeFrame>(),
            Err(StatsError::InvalidInput(_))
        ));
    }

    #[test]
    fn field_names_follow_provider_convention() {
        assert_eq!(TimeFrame::Week.value_field(), "total_sales_in_week");
        assert_eq!(TimeFrame::Month.period_field(), "month_number");
        assert_eq!(TimeFrame::Year.period_field(), "year");
        assert_eq!(TimeFrame::Year.upper_bound_field(), "total_sales_in_year_upper");
    }

    #[test]
    fn default_is_week() {
        assert_eq!(TimeFrame::default(), TimeFrame::Week);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&TimeFrame::Month).unwrap();
        assert_eq!(json, "\"month\"");
        let tf: TimeFrame = serde_json::from_str("\"year\"").unwrap();
        assert_eq!(tf, TimeFrame::Year);
    }

    #[test]
    fn every_frame_has_heading_labels() {
        let plural: Vec<&str> = TimeFrame::ALL.iter().map(|tf| tf.plural_label()).collect();
        assert_eq!(plural, ["Weeks", "Months", "Years"]);
        assert_eq!(TimeFrame::Month.singular_label(), "Month");
        for tf in TimeFrame::ALL {
            assert_eq!(tf.as_str().parse::<TimeFrame>().unwrap(), tf);
        }
    }

    #[test]
    fn frame_label_keeps_unknown_labels() {
        let label: FrameLabel = serde_json::from_str(r#""quarter""#).unwrap();
        assert_eq!(label, FrameLabel::Unrecognized("quarter".into()));
        assert_eq!(label.known(), None);

        let label: FrameLabel = serde_json::from_str(r#""Month""#).unwrap();
        assert_eq!(label.known(), Some(TimeFrame::Month));
        assert_eq!(serde_json::to_string(&label).unwrap(), r#""month""#);
    }
}
