//! Core data model types for geoquiz.
//!
//! Country records as they arrive from the external dataset, the dataset
//! itself, and the questions generated from it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One dataset entry describing a country.
///
/// Every field is optional: the upstream export writes `null` for gaps, and
/// missing values must never surface as answer options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub capital_city: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    /// Area in square kilometres.
    #[serde(default)]
    pub area: Option<f64>,
}

impl Country {
    /// Convenience constructor for a fully populated record.
    pub fn new(
        country_name: impl Into<String>,
        capital_city: impl Into<String>,
        currency: impl Into<String>,
        continent: impl Into<String>,
        area: f64,
    ) -> Self {
        Self {
            country_name: Some(country_name.into()),
            capital_city: Some(capital_city.into()),
            currency: Some(currency.into()),
            continent: Some(continent.into()),
            area: Some(area),
        }
    }

    /// The display value of `field`, or `None` when it is missing or blank.
    pub fn value(&self, field: Field) -> Option<String> {
        let text = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        match field {
            Field::CountryName => text(&self.country_name),
            Field::CapitalCity => text(&self.capital_city),
            Field::Currency => text(&self.currency),
            Field::Continent => text(&self.continent),
            Field::Area => self.area.filter(|a| a.is_finite()).map(format_area),
        }
    }
}

/// Render an area the way it is shown as an answer option.
///
/// Uses the shortest decimal that round-trips, so `378000.0` prints as
/// `378000` and `0.44` stays `0.44`.
pub fn format_area(area: f64) -> String {
    format!("{area}")
}

/// A column of the country dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CountryName,
    CapitalCity,
    Currency,
    Continent,
    Area,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::CountryName,
        Field::CapitalCity,
        Field::Currency,
        Field::Continent,
        Field::Area,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::CountryName => write!(f, "country_name"),
            Field::CapitalCity => write!(f, "capital_city"),
            Field::Currency => write!(f, "currency"),
            Field::Continent => write!(f, "continent"),
            Field::Area => write!(f, "area"),
        }
    }
}

/// An immutable collection of country records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    countries: Vec<Country>,
}

impl Dataset {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn get(&self, index: usize) -> Option<&Country> {
        self.countries.get(index)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Every present value of `field`, in record order, duplicates included.
    pub fn values(&self, field: Field) -> Vec<String> {
        self.countries.iter().filter_map(|c| c.value(field)).collect()
    }

    /// Present values of `field` with duplicates removed, in first-seen order.
    pub fn distinct_values(&self, field: Field) -> Vec<String> {
        let mut seen = HashSet::new();
        self.values(field)
            .into_iter()
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }
}

impl From<Vec<Country>> for Dataset {
    fn from(countries: Vec<Country>) -> Self {
        Self::new(countries)
    }
}

/// The six question templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// "What is the capital of {country}?"
    CapitalOfCountry,
    /// "Which country uses {currency} as its currency?"
    CountryByCurrency,
    /// "Which continent does {country} belong to?"
    ContinentOfCountry,
    /// "Which currency is used in {capital}?"
    CurrencyOfCapital,
    /// "What is the total area of {country}?"
    AreaOfCountry,
    /// "Which of these countries is in {continent}?"
    CountryInContinent,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 6] = [
        QuestionKind::CapitalOfCountry,
        QuestionKind::CountryByCurrency,
        QuestionKind::ContinentOfCountry,
        QuestionKind::CurrencyOfCapital,
        QuestionKind::AreaOfCountry,
        QuestionKind::CountryInContinent,
    ];

    /// The column the answer options are drawn from.
    pub fn answer_field(self) -> Field {
        match self {
            QuestionKind::CapitalOfCountry => Field::CapitalCity,
            QuestionKind::CountryByCurrency | QuestionKind::CountryInContinent => {
                Field::CountryName
            }
            QuestionKind::ContinentOfCountry => Field::Continent,
            QuestionKind::CurrencyOfCapital => Field::Currency,
            QuestionKind::AreaOfCountry => Field::Area,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::CapitalOfCountry => write!(f, "capital-of-country"),
            QuestionKind::CountryByCurrency => write!(f, "country-by-currency"),
            QuestionKind::ContinentOfCountry => write!(f, "continent-of-country"),
            QuestionKind::CurrencyOfCapital => write!(f, "currency-of-capital"),
            QuestionKind::AreaOfCountry => write!(f, "area-of-country"),
            QuestionKind::CountryInContinent => write!(f, "country-in-continent"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionKind::ALL
            .into_iter()
            .find(|k| k.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("unknown question kind: {s}"))
    }
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Template the question was built from.
    pub kind: QuestionKind,
    /// Prompt text shown to the player.
    pub prompt: String,
    /// Four distinct answer options in display order.
    pub options: Vec<String>,
    /// The option that scores.
    pub correct_answer: String,
}

impl Question {
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }

    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|o| o == choice)
    }

    /// Zero-based position of the correct answer among the options.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_formats_without_trailing_zero() {
        assert_eq!(format_area(378000.0), "378000");
        assert_eq!(format_area(0.44), "0.44");
        assert_eq!(format_area(551695.5), "551695.5");
    }

    #[test]
    fn blank_and_missing_values_are_absent() {
        let country = Country {
            country_name: Some("  ".into()),
            capital_city: None,
            currency: Some(" Yen ".into()),
            continent: Some("Asia".into()),
            area: Some(f64::NAN),
        };
        assert_eq!(country.value(Field::CountryName), None);
        assert_eq!(country.value(Field::CapitalCity), None);
        assert_eq!(country.value(Field::Currency).as_deref(), Some("Yen"));
        assert_eq!(country.value(Field::Area), None);
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let dataset = Dataset::new(vec![
            Country::new("France", "Paris", "Euro", "Europe", 551695.0),
            Country::new("Japan", "Tokyo", "Yen", "Asia", 377975.0),
            Country::new("Germany", "Berlin", "Euro", "Europe", 357022.0),
        ]);
        assert_eq!(dataset.values(Field::Currency), vec!["Euro", "Yen", "Euro"]);
        assert_eq!(dataset.distinct_values(Field::Continent), vec!["Europe", "Asia"]);
    }

    #[test]
    fn dataset_deserializes_from_records_with_nulls() {
        let json = r#"[
            {"country_name": "Japan", "capital_city": "Tokyo", "currency": "Yen", "continent": "Asia", "area": 377975},
            {"country_name": "Vatican City", "capital_city": null, "currency": "Euro", "continent": "Europe", "area": 0.44},
            {"country_name": "Nauru"}
        ]"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.values(Field::CapitalCity), vec!["Tokyo"]);
        assert_eq!(dataset.values(Field::Area), vec!["377975", "0.44"]);
    }

    #[test]
    fn question_kind_display_and_parse() {
        for kind in QuestionKind::ALL {
            assert_eq!(kind.to_string().parse::<QuestionKind>().unwrap(), kind);
        }
        assert!("capital".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn question_helpers() {
        let question = Question {
            kind: QuestionKind::CapitalOfCountry,
            prompt: "What is the capital of Japan?".into(),
            options: vec!["Paris".into(), "Tokyo".into(), "Cairo".into(), "Ottawa".into()],
            correct_answer: "Tokyo".into(),
        };
        assert!(question.is_correct("Tokyo"));
        assert!(!question.is_correct("Paris"));
        assert!(question.has_option("Cairo"));
        assert!(!question.has_option("Lima"));
        assert_eq!(question.correct_index(), Some(1));
    }
}
