//! The `geoquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create geoquiz.toml
    if Path::new("geoquiz.toml").exists() {
        println!("geoquiz.toml already exists, skipping.");
    } else {
        std::fs::write("geoquiz.toml", SAMPLE_CONFIG)?;
        println!("Created geoquiz.toml");
    }

    // Create sample dataset
    std::fs::create_dir_all("data")?;
    let dataset_path = Path::new("data/countries.json");
    if dataset_path.exists() {
        println!("data/countries.json already exists, skipping.");
    } else {
        std::fs::write(dataset_path, SAMPLE_DATASET)?;
        println!("Created data/countries.json");
    }

    println!("\nNext steps:");
    println!("  1. Add more countries to data/countries.json");
    println!("  2. Run: geoquiz validate --dataset data/countries.json");
    println!("  3. Run: geoquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# geoquiz configuration

question_count = 10
max_sampling_attempts = 1000
# seed = 42

[dataset]
type = "file"
path = "data/countries.json"

# Or fetch from a URL:
# [dataset]
# type = "http"
# url = "https://example.com/countries.json"
# timeout_secs = 30
"#;

const SAMPLE_DATASET: &str = r#"[
  { "country_name": "Japan", "capital_city": "Tokyo", "currency": "Yen", "continent": "Asia", "area": 377975 },
  { "country_name": "India", "capital_city": "New Delhi", "currency": "Indian Rupee", "continent": "Asia", "area": 3287263 },
  { "country_name": "Thailand", "capital_city": "Bangkok", "currency": "Baht", "continent": "Asia", "area": 513120 },
  { "country_name": "South Korea", "capital_city": "Seoul", "currency": "Won", "continent": "Asia", "area": 100210 },
  { "country_name": "France", "capital_city": "Paris", "currency": "Euro", "continent": "Europe", "area": 551695 },
  { "country_name": "Poland", "capital_city": "Warsaw", "currency": "Zloty", "continent": "Europe", "area": 312696 },
  { "country_name": "Sweden", "capital_city": "Stockholm", "currency": "Swedish Krona", "continent": "Europe", "area": 450295 },
  { "country_name": "Switzerland", "capital_city": "Bern", "currency": "Swiss Franc", "continent": "Europe", "area": 41285 },
  { "country_name": "Egypt", "capital_city": "Cairo", "currency": "Egyptian Pound", "continent": "Africa", "area": 1002450 },
  { "country_name": "Kenya", "capital_city": "Nairobi", "currency": "Kenyan Shilling", "continent": "Africa", "area": 580367 },
  { "country_name": "Nigeria", "capital_city": "Abuja", "currency": "Naira", "continent": "Africa", "area": 923768 },
  { "country_name": "Morocco", "capital_city": "Rabat", "currency": "Moroccan Dirham", "continent": "Africa", "area": 446550 },
  { "country_name": "Canada", "capital_city": "Ottawa", "currency": "Canadian Dollar", "continent": "North America", "area": 9984670 },
  { "country_name": "Mexico", "capital_city": "Mexico City", "currency": "Mexican Peso", "continent": "North America", "area": 1964375 },
  { "country_name": "Cuba", "capital_city": "Havana", "currency": "Cuban Peso", "continent": "North America", "area": 109884 },
  { "country_name": "Brazil", "capital_city": "Brasilia", "currency": "Real", "continent": "South America", "area": 8515767 },
  { "country_name": "Argentina", "capital_city": "Buenos Aires", "currency": "Argentine Peso", "continent": "South America", "area": 2780400 },
  { "country_name": "Peru", "capital_city": "Lima", "currency": "Sol", "continent": "South America", "area": 1285216 },
  { "country_name": "Australia", "capital_city": "Canberra", "currency": "Australian Dollar", "continent": "Oceania", "area": 7692024 },
  { "country_name": "New Zealand", "capital_city": "Wellington", "currency": "New Zealand Dollar", "continent": "Oceania", "area": 268021 }
]
"#;
