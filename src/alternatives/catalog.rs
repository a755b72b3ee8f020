use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeFood {
    pub name: String,
    pub health_score: u8,
    pub calories: f32,
    pub sodium: f32,
    pub sugar: f32,
    pub benefits: Vec<String>,
    pub description: String,
}

/// Source of candidate foods for the recommender.
pub trait CatalogProvider {
    fn candidates(&self) -> &[AlternativeFood];
}

/// The built-in list of generally healthier meals.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    foods: Vec<AlternativeFood>,
}

fn food(
    name: &str,
    health_score: u8,
    (calories, sodium, sugar): (f32, f32, f32),
    benefits: &[&str],
    description: &str,
) -> AlternativeFood {
    AlternativeFood {
        name: name.to_string(),
        health_score,
        calories,
        sodium,
        sugar,
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
        description: description.to_string(),
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self {
            foods: vec![
                food(
                    "Grilled Chicken Salad",
                    85,
                    (320.0, 480.0, 4.0),
                    &["High protein", "Low sodium", "Rich in fiber"],
                    "Fresh greens with grilled chicken breast, cherry tomatoes, and light vinaigrette",
                ),
                food(
                    "Quinoa Buddha Bowl",
                    88,
                    (380.0, 290.0, 6.0),
                    &["Complete protein", "High fiber", "Low sodium"],
                    "Quinoa with roasted vegetables, avocado, and tahini dressing",
                ),
                food(
                    "Baked Salmon with Vegetables",
                    92,
                    (420.0, 350.0, 3.0),
                    &["Omega-3 fatty acids", "Heart healthy", "Anti-inflammatory"],
                    "Fresh salmon fillet with steamed broccoli and sweet potato",
                ),
                food(
                    "Turkey and Avocado Wrap",
                    78,
                    (340.0, 520.0, 5.0),
                    &["Lean protein", "Healthy fats", "Balanced nutrients"],
                    "Whole wheat wrap with sliced turkey, avocado, and mixed greens",
                ),
                food(
                    "Vegetable Stir-Fry with Brown Rice",
                    82,
                    (290.0, 380.0, 8.0),
                    &["High fiber", "Low calorie", "Nutrient dense"],
                    "Mixed vegetables stir-fried with minimal oil over brown rice",
                ),
            ],
        }
    }
}

impl CatalogProvider for StaticCatalog {
    fn candidates(&self) -> &[AlternativeFood] {
        &self.foods
    }
}

const NAME_COL: &str = "name";
const SCORE_COL: &str = "health_score";
const CALORIES_COL: &str = "calories";
const SODIUM_COL: &str = "sodium_mg";
const SUGAR_COL: &str = "sugar_g";
const BENEFITS_COL: &str = "benefits";
const DESCRIPTION_COL: &str = "description";

/// Catalog read from a CSV file. Benefits are `;`-separated.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    foods: Vec<AlternativeFood>,
}

impl CsvCatalog {
    pub fn load(csv_path: &Path) -> Result<Self> {
        let file = std::fs::File::open(csv_path)
            .with_context(|| format!("Failed to open catalog CSV file at {:?}", csv_path))?;
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| anyhow!("Column '{}' not found", name))
        };
        let name_idx = column(NAME_COL)?;
        let score_idx = column(SCORE_COL)?;
        let calories_idx = column(CALORIES_COL)?;
        let sodium_idx = column(SODIUM_COL)?;
        let sugar_idx = column(SUGAR_COL)?;
        let benefits_idx = column(BENEFITS_COL)?;
        let description_idx = column(DESCRIPTION_COL)?;

        let mut foods = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
            let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or_default();

            let name = field(name_idx);
            if name.is_empty() {
                tracing::warn!(row_index, "skipping catalog row without a name");
                continue;
            }
            let number = |idx: usize, col: &str| -> Result<f32> {
                field(idx)
                    .parse::<f32>()
                    .with_context(|| format!("Invalid {} for '{}' at row {}", col, name, row_index))
            };
            let health_score: u8 = field(score_idx)
                .parse()
                .with_context(|| format!("Invalid {} for '{}' at row {}", SCORE_COL, name, row_index))?;
            if health_score > 100 {
                return Err(anyhow!("Health score {} for '{}' is above 100", health_score, name));
            }

            foods.push(AlternativeFood {
                name: name.to_string(),
                health_score,
                calories: number(calories_idx, CALORIES_COL)?,
                sodium: number(sodium_idx, SODIUM_COL)?,
                sugar: number(sugar_idx, SUGAR_COL)?,
                benefits: field(benefits_idx)
                    .split(';')
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .map(str::to_string)
                    .collect(),
                description: field(description_idx).to_string(),
            });
        }

        if foods.is_empty() {
            return Err(anyhow!("No catalog entries loaded from {:?}", csv_path));
        }
        tracing::info!(entries = foods.len(), path = ?csv_path, "loaded alternatives catalog");
        Ok(Self { foods })
    }
}

impl CatalogProvider for CsvCatalog {
    fn candidates(&self) -> &[AlternativeFood] {
        &self.foods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_static_catalog_has_five_entries() {
        let catalog = StaticCatalog::default();
        let names: Vec<&str> = catalog.candidates().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names.len(), 5);
        assert_eq!(names[2], "Baked Salmon with Vegetables");
        assert_eq!(catalog.candidates()[2].health_score, 92);
    }

    #[test]
    fn test_load_csv_catalog() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,health_score,calories,sodium_mg,sugar_g,benefits,description").unwrap();
        writeln!(file, "Lentil Soup,90,310,420,5,High fiber; Plant protein,Red lentils with cumin").unwrap();
        writeln!(file, ",50,1,1,1,,skipped").unwrap();
        writeln!(file, "Fruit Bowl,80,150,5,22,Vitamin C,Seasonal fruit").unwrap();
        file.flush().unwrap();

        let catalog = CsvCatalog::load(file.path()).unwrap();
        let foods = catalog.candidates();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].name, "Lentil Soup");
        assert_eq!(foods[0].benefits, vec!["High fiber".to_string(), "Plant protein".to_string()]);
        assert_eq!(foods[1].sugar, 22.0);
    }

    #[test]
    fn test_load_csv_catalog_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,health_score").unwrap();
        writeln!(file, "Lentil Soup,90").unwrap();
        file.flush().unwrap();

        let err = CsvCatalog::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("calories"));
    }

    #[test]
    fn test_load_csv_catalog_rejects_bad_score() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,health_score,calories,sodium_mg,sugar_g,benefits,description").unwrap();
        writeln!(file, "Mystery,150,100,100,1,,?").unwrap();
        file.flush().unwrap();

        assert!(CsvCatalog::load(file.path()).is_err());
    }
}
