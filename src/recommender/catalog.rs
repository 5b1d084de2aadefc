//! Crop catalog with per-crop climate requirements.
//!
//! The built-in table covers fifteen common field and garden crops.
//! Deployments can swap in a regional crop list by loading a JSON array of
//! profiles instead of recompiling.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::season::Season;

/// Seasons in which a crop can be planted.
///
/// Serialized as a slash-joined string ("Winter/Spring") so catalog JSON
/// stays hand-editable. `Perennial` crops pass every season filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GrowingSeason {
    Perennial,
    Seasons(Vec<Season>),
}

impl GrowingSeason {
    pub fn supports(&self, season: Season) -> bool {
        match self {
            GrowingSeason::Perennial => true,
            GrowingSeason::Seasons(seasons) => seasons.contains(&season),
        }
    }
}

impl fmt::Display for GrowingSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowingSeason::Perennial => f.write_str("Perennial"),
            GrowingSeason::Seasons(seasons) => {
                let names: Vec<&str> = seasons.iter().map(|s| s.display_name()).collect();
                f.write_str(&names.join("/"))
            }
        }
    }
}

impl From<GrowingSeason> for String {
    fn from(value: GrowingSeason) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Error)]
#[error("unrecognized growing season '{0}'")]
pub struct ParseGrowingSeasonError(String);

impl TryFrom<String> for GrowingSeason {
    type Error = ParseGrowingSeasonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("perennial") {
            return Ok(GrowingSeason::Perennial);
        }
        let mut seasons = Vec::new();
        for part in value.split('/') {
            let season = match part.trim() {
                "Winter" => Season::Winter,
                "Spring" => Season::Spring,
                "Summer" => Season::Summer,
                "Fall" => Season::Fall,
                _ => return Err(ParseGrowingSeasonError(value.clone())),
            };
            seasons.push(season);
        }
        if seasons.is_empty() {
            return Err(ParseGrowingSeasonError(value));
        }
        Ok(GrowingSeason::Seasons(seasons))
    }
}

/// Climate requirements and tolerances for a single crop.
///
/// Temperatures in °C, rainfall in mm per growing season. `soil_ph` is the
/// preferred band; scoring does not use it but insight consumers display it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub optimal_temp: f64,
    pub min_rainfall: f64,
    pub max_rainfall: f64,
    pub drought_tolerant: bool,
    pub frost_tolerant: bool,
    pub growing_season: GrowingSeason,
    pub soil_ph: (f64, f64),
}

/// Ordered collection of crop profiles. Order is meaningful: ranking ties
/// resolve to the earlier catalog entry.
#[derive(Debug, Clone)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
}

impl CropCatalog {
    /// The built-in fifteen-crop table.
    pub fn builtin() -> Self {
        Self {
            crops: builtin_crops(),
        }
    }

    /// Parse a catalog from a JSON array of crop profiles.
    pub fn from_json(json: &str) -> Result<Self> {
        let crops: Vec<CropProfile> =
            serde_json::from_str(json).with_context(|| "Failed to parse crop catalog JSON")?;
        if crops.is_empty() {
            anyhow::bail!("Crop catalog contains no crops");
        }
        Ok(Self { crops })
    }

    /// Load a replacement catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crop catalog file: {:?}", path))?;
        Self::from_json(&contents)
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.name == name)
    }

    /// Crop names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_crops() -> Vec<CropProfile> {
    use GrowingSeason::{Perennial, Seasons};
    use Season::{Fall, Spring, Summer, Winter};

    vec![
        CropProfile {
            name: "Corn".to_string(),
            min_temp: 10.0,
            max_temp: 35.0,
            optimal_temp: 25.0,
            min_rainfall: 500.0,
            max_rainfall: 1200.0,
            drought_tolerant: false,
            frost_tolerant: false,
            growing_season: Seasons(vec![Summer]),
            soil_ph: (5.5, 7.5),
        },
        CropProfile {
            name: "Wheat".to_string(),
            min_temp: 3.0,
            max_temp: 30.0,
            optimal_temp: 20.0,
            min_rainfall: 350.0,
            max_rainfall: 1000.0,
            drought_tolerant: true,
            frost_tolerant: true,
            growing_season: Seasons(vec![Winter, Spring]),
            soil_ph: (6.0, 7.5),
        },
        CropProfile {
            name: "Soybeans".to_string(),
            min_temp: 10.0,
            max_temp: 38.0,
            optimal_temp: 27.0,
            min_rainfall: 450.0,
            max_rainfall: 1200.0,
            drought_tolerant: false,
            frost_tolerant: false,
            growing_season: Seasons(vec![Summer]),
            soil_ph: (6.0, 7.0),
        },
        CropProfile {
            name: "Rice".to_string(),
            min_temp: 16.0,
            max_temp: 40.0,
            optimal_temp: 30.0,
            min_rainfall: 900.0,
            max_rainfall: 2500.0,
            drought_tolerant: false,
            frost_tolerant: false,
            growing_season: Seasons(vec![Summer]),
            soil_ph: (5.0, 6.5),
        },
        CropProfile {
            name: "Cotton".to_string(),
            min_temp: 15.0,
            max_temp: 40.0,
            optimal_temp: 30.0,
            min_rainfall: 500.0,
            max_rainfall: 1500.0,
            drought_tolerant: true,
            frost_tolerant: false,
            growing_season: Seasons(vec![Summer]),
            soil_ph: (5.5, 8.0),
        },
        CropProfile {
            name: "Potatoes".to_string(),
            min_temp: 7.0,
            max_temp: 30.0,
            optimal_temp: 20.0,
            min_rainfall: 500.0,
            max_rainfall: 1000.0,
            drought_tolerant: false,
            frost_tolerant: false,
            growing_season: Seasons(vec![Spring, Summer]),
            soil_ph: (5.0, 6.5),
        },
        CropProfile {
            name: "Tomatoes".to_string(),
            min_temp: 10.0,
            max_temp: 35.0,
            optimal_temp: 25.0,
            min_rainfall: 400.0,
            max_rainfall: 1000.0,
            drought_tolerant: false,
            frost_tolerant: false,
            growing_season: Seasons(vec![Summer]),
            soil_ph: (5.5, 7.5),
        },
        CropProfile {
            name: "Lettuce".to_string(),
            min_temp: 5.0,
            max_temp: 25.0,
            optimal_temp: 18.0,
            min_rainfall: 300.0,
            max_rainfall: 800.0,
            drought_tolerant: false,
            frost_tolerant: true,
            growing_season: Seasons(vec![Spring, Fall]),
            soil_ph: (6.0, 7.0),
        },
        CropProfile {
            name: "Carrots".to_string(),
            min_temp: 7.0,
            max_temp: 30.0,
            optimal_temp: 18.0,
            min_rainfall: 300.0,
            max_rainfall: 900.0,
            drought_tolerant: false,
            frost_tolerant: true,
            growing_season: Seasons(vec![Spring, Fall]),
            soil_ph: (5.5, 7.0),
        },
        CropProfile {
            name: "Barley".to_string(),
            min_temp: 4.0,
            max_temp: 30.0,
            optimal_temp: 18.0,
            min_rainfall: 300.0,
            max_rainfall: 1000.0,
            drought_tolerant: true,
            frost_tolerant: true,
            growing_season: Seasons(vec![Spring, Winter]),
            soil_ph: (6.0, 8.0),
        },
        CropProfile {
            name: "Oats".to_string(),
            min_temp: 4.0,
            max_temp: 32.0,
            optimal_temp: 20.0,
            min_rainfall: 350.0,
            max_rainfall: 1000.0,
            drought_tolerant: true,
            frost_tolerant: true,
            growing_season: Seasons(vec![Spring]),
            soil_ph: (5.0, 7.5),
        },
        CropProfile {
            name: "Sunflower".to_string(),
            min_temp: 8.0,
            max_temp: 35.0,
            optimal_temp: 25.0,
            min_rainfall: 300.0,
            max_rainfall: 1000.0,
            drought_tolerant: true,
            frost_tolerant: false,
            growing_season: Seasons(vec![Summer]),
            soil_ph: (6.0, 7.5),
        },
        CropProfile {
            name: "Alfalfa".to_string(),
            min_temp: 5.0,
            max_temp: 35.0,
            optimal_temp: 25.0,
            min_rainfall: 400.0,
            max_rainfall: 1200.0,
            drought_tolerant: true,
            frost_tolerant: true,
            growing_season: Perennial,
            soil_ph: (6.5, 7.5),
        },
        CropProfile {
            name: "Sweet Corn".to_string(),
            min_temp: 10.0,
            max_temp: 35.0,
            optimal_temp: 25.0,
            min_rainfall: 500.0,
            max_rainfall: 1200.0,
            drought_tolerant: false,
            frost_tolerant: false,
            growing_season: Seasons(vec![Summer]),
            soil_ph: (5.5, 7.0),
        },
        CropProfile {
            name: "Peas".to_string(),
            min_temp: 5.0,
            max_temp: 24.0,
            optimal_temp: 18.0,
            min_rainfall: 350.0,
            max_rainfall: 800.0,
            drought_tolerant: false,
            frost_tolerant: true,
            growing_season: Seasons(vec![Spring, Fall]),
            soil_ph: (6.0, 7.0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = CropCatalog::builtin();
        assert_eq!(catalog.len(), 15);

        let names = catalog.names();
        assert_eq!(names[0], "Corn");
        assert_eq!(names[14], "Peas");

        let wheat = catalog.get("Wheat").unwrap();
        assert_eq!(wheat.min_temp, 3.0);
        assert_eq!(wheat.max_rainfall, 1000.0);
        assert!(wheat.drought_tolerant);
        assert!(wheat.frost_tolerant);
        assert_eq!(wheat.soil_ph, (6.0, 7.5));

        assert!(catalog.get("Durian").is_none());
    }

    #[test]
    fn test_growing_season_supports() {
        let catalog = CropCatalog::builtin();

        let wheat = catalog.get("Wheat").unwrap();
        assert!(wheat.growing_season.supports(Season::Winter));
        assert!(wheat.growing_season.supports(Season::Spring));
        assert!(!wheat.growing_season.supports(Season::Summer));

        let alfalfa = catalog.get("Alfalfa").unwrap();
        for season in Season::ALL {
            assert!(alfalfa.growing_season.supports(season));
        }
    }

    #[test]
    fn test_growing_season_string_form() {
        let wheat = CropCatalog::builtin().get("Wheat").unwrap().clone();
        let json = serde_json::to_string(&wheat).unwrap();
        assert!(json.contains("\"growing_season\":\"Winter/Spring\""));

        let season: GrowingSeason = serde_json::from_str("\"Perennial\"").unwrap();
        assert_eq!(season, GrowingSeason::Perennial);

        let season: GrowingSeason = serde_json::from_str("\"Spring/Fall\"").unwrap();
        assert_eq!(
            season,
            GrowingSeason::Seasons(vec![Season::Spring, Season::Fall])
        );

        let bad: Result<GrowingSeason, _> = serde_json::from_str("\"Autumn\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[
            {
                "name": "Quinoa",
                "min_temp": 2.0,
                "max_temp": 32.0,
                "optimal_temp": 17.0,
                "min_rainfall": 250.0,
                "max_rainfall": 900.0,
                "drought_tolerant": true,
                "frost_tolerant": true,
                "growing_season": "Spring/Summer",
                "soil_ph": [6.0, 8.5]
            }
        ]"#;

        let catalog = CropCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let quinoa = catalog.get("Quinoa").unwrap();
        assert!(quinoa.growing_season.supports(Season::Summer));
        assert_eq!(quinoa.soil_ph, (6.0, 8.5));

        assert!(CropCatalog::from_json("[]").is_err());
        assert!(CropCatalog::from_json("not json").is_err());
    }
}
