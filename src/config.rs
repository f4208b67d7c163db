//! Calendar configuration: the shape of a calendar and its eras.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::STANDARD_LEAP_MONTH;
use crate::era::Era;
use crate::error::ConfigError;
use crate::prelude::*;

/// How leap days are added to a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum LeapYearRule {
    /// Gregorian test; the extra day goes to month index 1.
    #[default]
    #[display(fmt = "standard")]
    Standard,
    /// Every `leap_year_offset` years; the extra day goes to
    /// `leap_day_month_index`.
    #[display(fmt = "custom")]
    Custom,
    /// No leap years.
    #[display(fmt = "none")]
    None,
}

/// The rules defining one fictional calendar.
///
/// A configuration is a plain value. Applications load one per world, pass it
/// by reference into every calculation, and replace it wholesale on save.
/// Missing fields in a stored document fall back to the Gregorian template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarConfiguration {
    pub day_names: Vec<String>,
    pub month_names: Vec<String>,
    /// Index-aligned with `month_names`.
    pub days_per_month: Vec<u32>,
    pub leap_year_rule: LeapYearRule,
    /// Leap interval for [`LeapYearRule::Custom`].
    pub leap_year_offset: u32,
    /// Month receiving the leap day under [`LeapYearRule::Custom`].
    pub leap_day_month_index: usize,
    /// Week rendering offset only; does not affect day numbers.
    pub first_day_of_week: usize,
    pub eras: Vec<Era>,
}

impl Default for CalendarConfiguration {
    fn default() -> Self {
        Self::gregorian()
    }
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|&s| s.to_owned()).collect()
}

impl CalendarConfiguration {
    /// Twelve months, the standard leap rule and a Sunday-first week.
    pub fn gregorian() -> Self {
        Self {
            day_names: names(&[
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            month_names: names(&[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            days_per_month: vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
            leap_year_rule: LeapYearRule::Standard,
            leap_year_offset: 4,
            leap_day_month_index: STANDARD_LEAP_MONTH,
            first_day_of_week: 0,
            eras: Vec::new(),
        }
    }

    /// The calendar of Harptos: twelve 30-day months with five single-day
    /// festivals between them, ten-day weeks, and Shieldmeet added to
    /// Midsummer every fourth year.
    pub fn harptos() -> Self {
        Self {
            day_names: names(&[
                "First-day",
                "Second-day",
                "Third-day",
                "Fourth-day",
                "Fifth-day",
                "Sixth-day",
                "Seventh-day",
                "Eighth-day",
                "Ninth-day",
                "Tenth-day",
            ]),
            month_names: names(&[
                "Hammer",
                "Midwinter",
                "Alturiak",
                "Ches",
                "Tarsakh",
                "Greengrass",
                "Mirtul",
                "Kythorn",
                "Flamerule",
                "Midsummer",
                "Eleasias",
                "Eleint",
                "Highharvestide",
                "Marpenoth",
                "Uktar",
                "Feast of the Moon",
                "Nightal",
            ]),
            days_per_month: vec![30, 1, 30, 30, 30, 1, 30, 30, 30, 1, 30, 30, 1, 30, 30, 1, 30],
            leap_year_rule: LeapYearRule::Custom,
            leap_year_offset: 4,
            leap_day_month_index: 9,
            first_day_of_week: 0,
            eras: Vec::new(),
        }
    }

    /// Number of months in a year.
    pub fn month_count(&self) -> usize {
        self.month_names.len()
    }

    /// Number of days in a week.
    pub fn days_per_week(&self) -> usize {
        self.day_names.len()
    }

    /// Looks up an era by id.
    pub fn era(&self, id: &str) -> Option<&Era> {
        self.eras.iter().find(|era| era.id == id)
    }

    /// Checks every shape invariant, including each era.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.day_names.is_empty() {
            return Err(ConfigError::NoDayNames);
        }
        if self.month_names.is_empty() {
            return Err(ConfigError::NoMonths);
        }
        if self.days_per_month.len() != self.month_names.len() {
            return Err(ConfigError::MonthLengthMismatch {
                months: self.month_names.len(),
                days: self.days_per_month.len(),
            });
        }
        if let Some(month) = self.days_per_month.iter().position(|&days| days == 0) {
            return Err(ConfigError::EmptyMonth {
                month,
                name: self.month_names[month].clone(),
            });
        }
        match self.leap_year_rule {
            LeapYearRule::Standard if self.month_count() <= STANDARD_LEAP_MONTH => {
                return Err(ConfigError::StandardRuleWithoutSecondMonth {
                    months: self.month_count(),
                });
            }
            LeapYearRule::Custom => {
                if self.leap_year_offset == 0 {
                    return Err(ConfigError::InvalidLeapYearOffset);
                }
                if self.leap_day_month_index >= self.month_count() {
                    return Err(ConfigError::InvalidLeapDayMonth {
                        index: self.leap_day_month_index,
                        months: self.month_count(),
                    });
                }
            }
            LeapYearRule::Standard | LeapYearRule::None => {}
        }
        if self.first_day_of_week >= self.day_names.len() {
            return Err(ConfigError::InvalidFirstDayOfWeek {
                index: self.first_day_of_week,
                days: self.day_names.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.eras.len());
        for era in &self.eras {
            if !seen.insert(era.id.as_str()) {
                return Err(ConfigError::DuplicateEraId(era.id.clone()));
            }
            era.validate(self)?;
        }
        Ok(())
    }

    /// Decodes and validates a stored configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Malformed`] if the JSON does not decode, or the
    /// validation error if it decodes to an invalid shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Encodes the configuration in its stored document shape.
    ///
    /// # Errors
    /// Returns [`ConfigError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalendarDate;

    fn era(id: &str, start: CalendarDate, end: CalendarDate) -> Era {
        Era::new(id, id, start, end)
    }

    #[test]
    fn test_templates_are_valid() {
        assert_eq!(CalendarConfiguration::gregorian().validate(), Ok(()));
        assert_eq!(CalendarConfiguration::harptos().validate(), Ok(()));
    }

    #[test]
    fn test_harptos_shape() {
        let config = CalendarConfiguration::harptos();
        assert_eq!(config.month_count(), 17);
        assert_eq!(config.days_per_week(), 10);
        assert_eq!(config.days_per_month.iter().sum::<u32>(), 365);
        assert_eq!(config.month_names[config.leap_day_month_index], "Midsummer");
    }

    #[test]
    fn test_validate_cases() {
        struct TestCase {
            mutate:      fn(&mut CalendarConfiguration),
            expected:    ConfigError,
            description: &'static str,
        }

        let cases = [
            TestCase {
                mutate:      |c| c.day_names.clear(),
                expected:    ConfigError::NoDayNames,
                description: "no day names",
            },
            TestCase {
                mutate:      |c| {
                    c.month_names.clear();
                    c.days_per_month.clear();
                },
                expected:    ConfigError::NoMonths,
                description: "no months",
            },
            TestCase {
                mutate:      |c| {
                    c.days_per_month.pop();
                },
                expected:    ConfigError::MonthLengthMismatch { months: 12, days: 11 },
                description: "misaligned month lengths",
            },
            TestCase {
                mutate:      |c| c.days_per_month[3] = 0,
                expected:    ConfigError::EmptyMonth {
                    month: 3,
                    name:  "April".to_owned(),
                },
                description: "zero-length month",
            },
            TestCase {
                mutate:      |c| {
                    c.leap_year_rule = LeapYearRule::Custom;
                    c.leap_year_offset = 0;
                },
                expected:    ConfigError::InvalidLeapYearOffset,
                description: "custom rule with zero interval",
            },
            TestCase {
                mutate:      |c| {
                    c.leap_year_rule = LeapYearRule::Custom;
                    c.leap_day_month_index = 12;
                },
                expected:    ConfigError::InvalidLeapDayMonth { index: 12, months: 12 },
                description: "custom rule pointing past the last month",
            },
            TestCase {
                mutate:      |c| {
                    c.month_names.truncate(1);
                    c.days_per_month.truncate(1);
                },
                expected:    ConfigError::StandardRuleWithoutSecondMonth { months: 1 },
                description: "standard rule on a one-month calendar",
            },
            TestCase {
                mutate:      |c| c.first_day_of_week = 7,
                expected:    ConfigError::InvalidFirstDayOfWeek { index: 7, days: 7 },
                description: "week starting on a missing day",
            },
        ];

        for case in &cases {
            let mut config = CalendarConfiguration::gregorian();
            (case.mutate)(&mut config);
            assert_eq!(
                config.validate(),
                Err(case.expected.clone()),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_none_rule_allows_single_month() {
        let mut config = CalendarConfiguration::gregorian();
        config.month_names.truncate(1);
        config.days_per_month.truncate(1);
        config.leap_year_rule = LeapYearRule::None;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_eras() {
        let mut config = CalendarConfiguration::gregorian();
        config.eras = vec![
            era("dawn", CalendarDate::new(1, 0, 1), CalendarDate::new(100, 0, 1)),
            era("dawn", CalendarDate::new(200, 0, 1), CalendarDate::new(300, 0, 1)),
        ];
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateEraId("dawn".to_owned()))
        );

        config.eras = vec![era(
            "backwards",
            CalendarDate::new(300, 0, 1),
            CalendarDate::new(200, 0, 1),
        )];
        assert!(matches!(config.validate(), Err(ConfigError::Era(_))));
    }

    #[test]
    fn test_era_lookup() {
        let mut config = CalendarConfiguration::gregorian();
        config.eras = vec![era("dawn", CalendarDate::new(1, 0, 1), CalendarDate::new(9, 0, 1))];
        assert_eq!(config.era("dawn").map(|e| e.name.as_str()), Some("dawn"));
        assert!(config.era("dusk").is_none());
    }

    #[test]
    fn test_json_document_shape() {
        let json = CalendarConfiguration::harptos().to_json().unwrap();
        assert!(json.contains(r#""monthNames":["Hammer","#));
        assert!(json.contains(r#""leapYearRule":"custom""#));
        assert!(json.contains(r#""leapDayMonthIndex":9"#));
        let parsed = CalendarConfiguration::from_json(&json).unwrap();
        assert_eq!(parsed, CalendarConfiguration::harptos());
    }

    #[test]
    fn test_json_missing_fields_use_gregorian_defaults() {
        let parsed = CalendarConfiguration::from_json(r#"{"leapYearRule":"none"}"#).unwrap();
        assert_eq!(parsed.leap_year_rule, LeapYearRule::None);
        assert_eq!(parsed.month_count(), 12);
        assert_eq!(parsed.days_per_week(), 7);
    }

    #[test]
    fn test_json_rejects_invalid_documents() {
        assert!(matches!(
            CalendarConfiguration::from_json("not json"),
            Err(ConfigError::Malformed(_))
        ));
        assert!(matches!(
            CalendarConfiguration::from_json(r#"{"leapYearRule":"lunar"}"#),
            Err(ConfigError::Malformed(_))
        ));
        assert_eq!(
            CalendarConfiguration::from_json(r#"{"dayNames":[]}"#),
            Err(ConfigError::NoDayNames)
        );
    }

    #[test]
    fn test_leap_rule_display() {
        assert_eq!(LeapYearRule::Standard.to_string(), "standard");
        assert_eq!(LeapYearRule::Custom.to_string(), "custom");
        assert_eq!(LeapYearRule::None.to_string(), "none");
    }
}
