//! Random question generation.
//!
//! A question picks a subject record and one of six templates uniformly at
//! random, samples three distractors from the template's candidate pool, and
//! shuffles them together with the correct answer.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::GenerationError;
use crate::model::{Country, Dataset, Field, Question, QuestionKind};

/// Number of answer options per question.
pub const OPTION_COUNT: usize = 4;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Questions per quiz unless configured otherwise.
pub const DEFAULT_QUESTION_COUNT: usize = 10;
/// Upper bound on random draws while sampling distractors or subjects.
pub const DEFAULT_MAX_SAMPLING_ATTEMPTS: usize = 1000;

/// Configuration for the question generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Questions produced by `generate_quiz`.
    pub question_count: usize,
    /// Draw limit for each rejection-sampling loop.
    pub max_sampling_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            max_sampling_attempts: DEFAULT_MAX_SAMPLING_ATTEMPTS,
        }
    }
}

/// A template instantiated for one subject record.
struct Template {
    kind: QuestionKind,
    prompt: String,
    correct_answer: String,
    pool: Vec<String>,
}

impl Template {
    /// Returns `None` when the subject lacks a field the template needs.
    fn build(kind: QuestionKind, subject: &Country, dataset: &Dataset) -> Option<Self> {
        let (prompt, correct_answer) = match kind {
            QuestionKind::CapitalOfCountry => (
                format!(
                    "What is the capital of {}?",
                    subject.value(Field::CountryName)?
                ),
                subject.value(Field::CapitalCity)?,
            ),
            QuestionKind::CountryByCurrency => (
                format!(
                    "Which country uses {} as its currency?",
                    subject.value(Field::Currency)?
                ),
                subject.value(Field::CountryName)?,
            ),
            QuestionKind::ContinentOfCountry => (
                format!(
                    "Which continent does {} belong to?",
                    subject.value(Field::CountryName)?
                ),
                subject.value(Field::Continent)?,
            ),
            QuestionKind::CurrencyOfCapital => (
                format!(
                    "Which currency is used in {}?",
                    subject.value(Field::CapitalCity)?
                ),
                subject.value(Field::Currency)?,
            ),
            QuestionKind::AreaOfCountry => (
                format!(
                    "What is the total area of {}?",
                    subject.value(Field::CountryName)?
                ),
                subject.value(Field::Area)?,
            ),
            QuestionKind::CountryInContinent => (
                format!(
                    "Which of these countries is in {}?",
                    subject.value(Field::Continent)?
                ),
                subject.value(Field::CountryName)?,
            ),
        };

        // Continents repeat heavily, so that pool is deduplicated; the others
        // keep their multiplicity.
        let pool = match kind {
            QuestionKind::ContinentOfCountry => dataset.distinct_values(Field::Continent),
            other => dataset.values(other.answer_field()),
        };

        Some(Self {
            kind,
            prompt,
            correct_answer,
            pool,
        })
    }
}

/// Generates questions from a dataset using its own random number generator.
pub struct QuestionGenerator<R = StdRng> {
    rng: R,
    config: GeneratorConfig,
}

impl QuestionGenerator<StdRng> {
    /// A generator seeded from operating-system entropy.
    pub fn from_entropy(config: GeneratorConfig) -> Self {
        Self::with_rng(StdRng::from_os_rng(), config)
    }

    /// A generator that produces the same questions for the same seed and dataset.
    pub fn seeded(seed: u64, config: GeneratorConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn with_rng(rng: R, config: GeneratorConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate `question_count` independent questions.
    pub fn generate_quiz(&mut self, dataset: &Dataset) -> Result<Vec<Question>, GenerationError> {
        self.generate_questions(dataset, self.config.question_count)
    }

    /// Generate `count` independent questions. Repeats across the set are allowed.
    pub fn generate_questions(
        &mut self,
        dataset: &Dataset,
        count: usize,
    ) -> Result<Vec<Question>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::NoQuestionsRequested);
        }
        (0..count)
            .map(|_| self.generate_question(dataset))
            .collect()
    }

    /// Generate one question about a random record using a random template.
    ///
    /// Records missing a field their template needs, and templates whose pool
    /// is too small for three distractors, are redrawn up to
    /// `max_sampling_attempts` times. If every draw hit a small pool, the
    /// last `InsufficientDistractors` is returned.
    pub fn generate_question(&mut self, dataset: &Dataset) -> Result<Question, GenerationError> {
        if dataset.is_empty() {
            return Err(GenerationError::EmptyDataset);
        }

        let attempts = self.config.max_sampling_attempts;
        let mut small_pool = None;
        for _ in 0..attempts {
            let index = self.rng.random_range(0..dataset.len());
            let kind = QuestionKind::ALL[self.rng.random_range(0..QuestionKind::ALL.len())];
            let subject = &dataset.countries()[index];

            let Some(template) = Template::build(kind, subject, dataset) else {
                debug!(index, %kind, "record lacks fields for template, redrawing");
                continue;
            };
            match self.complete(template) {
                Err(e @ GenerationError::InsufficientDistractors { .. }) => {
                    debug!(index, %kind, "pool too small for template, redrawing");
                    small_pool = Some(e);
                }
                result => return result,
            }
        }

        Err(small_pool.unwrap_or(GenerationError::NoUsableSubject { attempts }))
    }

    /// Generate a question of a specific kind about a specific record.
    pub fn generate_for(
        &mut self,
        dataset: &Dataset,
        index: usize,
        kind: QuestionKind,
    ) -> Result<Question, GenerationError> {
        let subject = dataset
            .get(index)
            .ok_or(GenerationError::SubjectOutOfRange {
                index,
                len: dataset.len(),
            })?;
        let template = Template::build(kind, subject, dataset)
            .ok_or(GenerationError::IncompleteRecord { index, kind })?;
        self.complete(template)
    }

    fn complete(&mut self, template: Template) -> Result<Question, GenerationError> {
        let mut options = self.sample_distractors(&template)?;
        options.push(template.correct_answer.clone());
        options.shuffle(&mut self.rng);

        debug!(kind = %template.kind, prompt = %template.prompt, "generated question");

        Ok(Question {
            kind: template.kind,
            prompt: template.prompt,
            options,
            correct_answer: template.correct_answer,
        })
    }

    /// Rejection-sample three distinct values from the pool that differ from
    /// the correct answer.
    fn sample_distractors(&mut self, template: &Template) -> Result<Vec<String>, GenerationError> {
        let available = template
            .pool
            .iter()
            .filter(|v| **v != template.correct_answer)
            .collect::<HashSet<_>>()
            .len();
        if available < DISTRACTOR_COUNT {
            return Err(GenerationError::InsufficientDistractors {
                kind: template.kind,
                available,
            });
        }

        let attempts = self.config.max_sampling_attempts;
        let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
        for _ in 0..attempts {
            let candidate = &template.pool[self.rng.random_range(0..template.pool.len())];
            if *candidate == template.correct_answer || distractors.contains(candidate) {
                continue;
            }
            distractors.push(candidate.clone());
            if distractors.len() == DISTRACTOR_COUNT {
                return Ok(distractors);
            }
        }

        Err(GenerationError::SamplingExhausted {
            kind: template.kind,
            attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_countries() -> Dataset {
        Dataset::new(vec![
            Country::new("Japan", "Tokyo", "Yen", "Asia", 378000.0),
            Country::new("France", "Paris", "Euro", "Europe", 551695.0),
            Country::new("Brazil", "Brasilia", "Real", "South America", 8515767.0),
            Country::new("Egypt", "Cairo", "Egyptian Pound", "Africa", 1002450.0),
            Country::new("Canada", "Ottawa", "Canadian Dollar", "North America", 9984670.0),
        ])
    }

    fn assert_well_formed(question: &Question) {
        assert_eq!(question.options.len(), OPTION_COUNT, "{question:?}");
        let distinct: HashSet<_> = question.options.iter().collect();
        assert_eq!(distinct.len(), OPTION_COUNT, "{question:?}");
        let matches = question
            .options
            .iter()
            .filter(|o| **o == question.correct_answer)
            .count();
        assert_eq!(matches, 1, "{question:?}");
        assert!(question.options.iter().all(|o| !o.trim().is_empty()));
    }

    #[test]
    fn capital_of_japan_scenario() {
        let dataset = five_countries();
        let mut generator = QuestionGenerator::seeded(7, GeneratorConfig::default());

        let question = generator
            .generate_for(&dataset, 0, QuestionKind::CapitalOfCountry)
            .unwrap();

        assert_eq!(question.prompt, "What is the capital of Japan?");
        assert_eq!(question.correct_answer, "Tokyo");
        assert_well_formed(&question);
        let capitals = dataset.values(Field::CapitalCity);
        for option in question.options.iter().filter(|o| *o != "Tokyo") {
            assert!(capitals.contains(option));
        }
    }

    #[test]
    fn every_template_produces_well_formed_questions() {
        let dataset = five_countries();
        let mut generator = QuestionGenerator::seeded(11, GeneratorConfig::default());

        for kind in QuestionKind::ALL {
            for index in 0..dataset.len() {
                let question = generator.generate_for(&dataset, index, kind).unwrap();
                assert_eq!(question.kind, kind);
                assert_well_formed(&question);
                let pool = dataset.values(kind.answer_field());
                assert!(question.options.iter().all(|o| pool.contains(o)));
            }
        }
    }

    #[test]
    fn prompts_interpolate_subject_fields() {
        let dataset = five_countries();
        let mut generator = QuestionGenerator::seeded(3, GeneratorConfig::default());
        let prompt = |generator: &mut QuestionGenerator, kind| {
            generator.generate_for(&dataset, 1, kind).unwrap().prompt
        };

        assert_eq!(
            prompt(&mut generator, QuestionKind::CountryByCurrency),
            "Which country uses Euro as its currency?"
        );
        assert_eq!(
            prompt(&mut generator, QuestionKind::ContinentOfCountry),
            "Which continent does France belong to?"
        );
        assert_eq!(
            prompt(&mut generator, QuestionKind::CurrencyOfCapital),
            "Which currency is used in Paris?"
        );
        assert_eq!(
            prompt(&mut generator, QuestionKind::AreaOfCountry),
            "What is the total area of France?"
        );
        assert_eq!(
            prompt(&mut generator, QuestionKind::CountryInContinent),
            "Which of these countries is in Europe?"
        );
    }

    #[test]
    fn random_questions_hold_invariants_across_seeds() {
        let dataset = five_countries();
        for seed in 0..50 {
            let mut generator = QuestionGenerator::seeded(seed, GeneratorConfig::default());
            let quiz = generator.generate_quiz(&dataset).unwrap();
            assert_eq!(quiz.len(), DEFAULT_QUESTION_COUNT);
            quiz.iter().for_each(assert_well_formed);
        }
    }

    #[test]
    fn same_seed_same_quiz() {
        let dataset = five_countries();
        let a = QuestionGenerator::seeded(42, GeneratorConfig::default())
            .generate_quiz(&dataset)
            .unwrap();
        let b = QuestionGenerator::seeded(42, GeneratorConfig::default())
            .generate_quiz(&dataset)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_question_count() {
        let dataset = five_countries();
        let mut generator = QuestionGenerator::seeded(1, GeneratorConfig::default());
        assert_eq!(generator.generate_questions(&dataset, 3).unwrap().len(), 3);
        assert_eq!(
            generator.generate_questions(&dataset, 0).unwrap_err(),
            GenerationError::NoQuestionsRequested
        );
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut generator = QuestionGenerator::seeded(1, GeneratorConfig::default());
        assert_eq!(
            generator.generate_question(&Dataset::default()).unwrap_err(),
            GenerationError::EmptyDataset
        );
    }

    #[test]
    fn small_pool_fails_instead_of_hanging() {
        let dataset = Dataset::new(five_countries().countries()[..3].to_vec());
        let mut generator = QuestionGenerator::seeded(1, GeneratorConfig::default());

        let err = generator
            .generate_for(&dataset, 0, QuestionKind::CapitalOfCountry)
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::InsufficientDistractors {
                kind: QuestionKind::CapitalOfCountry,
                available: 2,
            }
        );
    }

    #[test]
    fn duplicate_values_do_not_count_as_distinct_distractors() {
        let dataset = Dataset::new(vec![
            Country::new("France", "Paris", "Euro", "Europe", 551695.0),
            Country::new("Germany", "Berlin", "Euro", "Europe", 357022.0),
            Country::new("Spain", "Madrid", "Euro", "Europe", 505990.0),
            Country::new("Italy", "Rome", "Euro", "Europe", 301340.0),
            Country::new("Japan", "Tokyo", "Yen", "Asia", 377975.0),
        ]);
        let mut generator = QuestionGenerator::seeded(1, GeneratorConfig::default());

        let err = generator
            .generate_for(&dataset, 4, QuestionKind::CurrencyOfCapital)
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::InsufficientDistractors {
                kind: QuestionKind::CurrencyOfCapital,
                available: 1,
            }
        );
    }

    fn three_continents() -> Dataset {
        Dataset::new(vec![
            Country::new("Japan", "Tokyo", "Yen", "Asia", 377975.0),
            Country::new("India", "New Delhi", "Indian Rupee", "Asia", 3287263.0),
            Country::new("France", "Paris", "Euro", "Europe", 551695.0),
            Country::new("Poland", "Warsaw", "Zloty", "Europe", 312696.0),
            Country::new("Egypt", "Cairo", "Egyptian Pound", "Africa", 1002450.0),
            Country::new("Kenya", "Nairobi", "Kenyan Shilling", "Africa", 580367.0),
        ])
    }

    #[test]
    fn templates_with_small_pools_are_redrawn() {
        let dataset = three_continents();
        for seed in 0..50 {
            let mut generator = QuestionGenerator::seeded(seed, GeneratorConfig::default());
            let quiz = generator.generate_quiz(&dataset).unwrap();
            assert_eq!(quiz.len(), DEFAULT_QUESTION_COUNT);
            for question in &quiz {
                assert_ne!(question.kind, QuestionKind::ContinentOfCountry);
                assert_well_formed(question);
            }
        }

        let mut generator = QuestionGenerator::seeded(1, GeneratorConfig::default());
        assert_eq!(
            generator
                .generate_for(&dataset, 0, QuestionKind::ContinentOfCountry)
                .unwrap_err(),
            GenerationError::InsufficientDistractors {
                kind: QuestionKind::ContinentOfCountry,
                available: 2,
            }
        );
    }

    #[test]
    fn every_template_too_small_reports_the_pool() {
        let dataset = Dataset::new(five_countries().countries()[..3].to_vec());
        let mut generator = QuestionGenerator::seeded(2, GeneratorConfig::default());

        assert!(matches!(
            generator.generate_question(&dataset).unwrap_err(),
            GenerationError::InsufficientDistractors { .. }
        ));
    }

    #[test]
    fn sampling_is_capped() {
        let dataset = five_countries();
        let config = GeneratorConfig {
            question_count: 1,
            max_sampling_attempts: 2,
        };
        let mut generator = QuestionGenerator::seeded(1, config);

        let err = generator
            .generate_for(&dataset, 0, QuestionKind::CapitalOfCountry)
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::SamplingExhausted {
                kind: QuestionKind::CapitalOfCountry,
                attempts: 2,
            }
        );
    }

    #[test]
    fn records_without_usable_fields_are_rejected() {
        let bare = |name: &str| Country {
            country_name: Some(name.into()),
            ..Country::default()
        };
        let dataset = Dataset::new(vec![bare("A"), bare("B"), bare("C"), bare("D")]);
        let config = GeneratorConfig {
            question_count: 1,
            max_sampling_attempts: 20,
        };
        let mut generator = QuestionGenerator::seeded(1, config);

        assert_eq!(
            generator.generate_question(&dataset).unwrap_err(),
            GenerationError::NoUsableSubject { attempts: 20 }
        );
        assert_eq!(
            generator
                .generate_for(&dataset, 0, QuestionKind::AreaOfCountry)
                .unwrap_err(),
            GenerationError::IncompleteRecord {
                index: 0,
                kind: QuestionKind::AreaOfCountry,
            }
        );
        assert_eq!(
            generator
                .generate_for(&dataset, 9, QuestionKind::AreaOfCountry)
                .unwrap_err(),
            GenerationError::SubjectOutOfRange { index: 9, len: 4 }
        );
    }

    #[test]
    fn null_values_never_become_options() {
        let mut countries = five_countries().countries().to_vec();
        countries.push(Country {
            country_name: Some("Atlantis".into()),
            capital_city: None,
            currency: None,
            continent: None,
            area: None,
        });
        let dataset = Dataset::new(countries);

        for seed in 0..30 {
            let mut generator = QuestionGenerator::seeded(seed, GeneratorConfig::default());
            for question in generator.generate_quiz(&dataset).unwrap() {
                assert_well_formed(&question);
            }
        }
    }
}
