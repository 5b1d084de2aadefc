//! Season-specific work plans.
//!
//! Each season carries an editorial summary paragraph and a fixed three-month
//! task calendar. The summary is then conditioned on detected trends, and the
//! calendar on historical frost and heat patterns, so two regions in the same
//! season can receive different plans.

use serde::Serialize;

use crate::data::WeatherSeries;
use crate::season::Season;

/// Historical frost days needed before the April calendar warns about late
/// frosts.
const FROST_HISTORY_MIN_DAYS: usize = 1;

/// Historical days above 32°C needed before the July calendar adds heat
/// stress management.
const HEAT_HISTORY_MIN_DAYS: usize = 11;

/// Threshold for a historical heat day, °C.
const HEAT_HISTORY_TEMP: f64 = 32.0;

/// Task list for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTasks {
    pub month: &'static str,
    pub tasks: Vec<String>,
}

/// A season's summary paragraph plus its month-by-month task calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAdvisory {
    pub summary: String,
    pub monthly_tasks: Vec<MonthlyTasks>,
}

/// Build the work plan for a season.
///
/// `trends` are the sentences produced by trend analysis; matching ones
/// append follow-up advice to the summary in the order given. The historical
/// series conditions the calendar: past frost days add a late-frost warning
/// to April in spring, and more than ten days above 32°C add heat stress
/// management to July in summer.
pub fn seasonal_recommendations(
    season: Season,
    trends: &[String],
    historical: &WeatherSeries,
) -> SeasonalAdvisory {
    let mut advisory = base_plan(season);

    for trend in trends {
        let lowered = trend.to_lowercase();
        if lowered.contains("temperature has been increasing") {
            advisory.summary.push_str(
                " Due to the warming trend, consider selecting heat-tolerant crop varieties \
                 and adjusting planting dates accordingly.",
            );
        } else if lowered.contains("temperature has been decreasing") {
            advisory.summary.push_str(
                " With the cooling trend observed, be prepared for potential early frosts \
                 and consider cold-hardy varieties.",
            );
        } else if lowered.contains("precipitation has been increasing") {
            advisory.summary.push_str(
                " The increasing precipitation trend suggests investing in improved drainage \
                 systems and raising beds for crops sensitive to waterlogging.",
            );
        } else if lowered.contains("precipitation has been decreasing") {
            advisory.summary.push_str(
                " With decreasing precipitation levels, prioritize drought-resistant crop \
                 varieties and efficient irrigation methods.",
            );
        }
    }

    if !historical.is_empty() {
        let frost_days = historical
            .records()
            .iter()
            .filter(|r| r.temp_min < 0.0)
            .count();
        if season == Season::Spring && frost_days >= FROST_HISTORY_MIN_DAYS {
            push_task(
                &mut advisory,
                "April",
                "Be prepared for potential late frosts based on historical patterns",
            );
        }

        let heat_days = historical
            .records()
            .iter()
            .filter(|r| r.temp_max > HEAT_HISTORY_TEMP)
            .count();
        if season == Season::Summer && heat_days >= HEAT_HISTORY_MIN_DAYS {
            push_task(
                &mut advisory,
                "July",
                "Implement heat stress management strategies during historically \
                 high-temperature periods",
            );
        }
    }

    advisory
}

fn push_task(advisory: &mut SeasonalAdvisory, month: &str, task: &str) {
    if let Some(entry) = advisory.monthly_tasks.iter_mut().find(|m| m.month == month) {
        entry.tasks.push(task.to_string());
    }
}

fn base_plan(season: Season) -> SeasonalAdvisory {
    match season {
        Season::Winter => SeasonalAdvisory {
            summary: "Winter planning focuses on soil preparation, equipment maintenance, and \
                      planning for spring planting. Review your crop rotation plans and order \
                      seeds well in advance. Consider conducting soil tests to determine \
                      nutrient needs for spring."
                .to_string(),
            monthly_tasks: vec![
                month_tasks(
                    "December",
                    &[
                        "Maintain drainage systems to prevent waterlogging",
                        "Service farm equipment while activity is low",
                        "Analyze previous season's data and plan crop rotations",
                        "Check stored crops for signs of spoilage or pests",
                    ],
                ),
                month_tasks(
                    "January",
                    &[
                        "Order seeds and supplies for spring planting",
                        "Conduct soil tests to determine spring fertilizer needs",
                        "Repair fences, buildings, and other infrastructure",
                        "Monitor overwintering crops for frost damage",
                    ],
                ),
                month_tasks(
                    "February",
                    &[
                        "Start seedlings indoors for early spring crops",
                        "Begin pruning fruit trees before bud break",
                        "Apply winter fertilizers if ground is not frozen",
                        "Plan irrigation system maintenance before spring",
                    ],
                ),
            ],
        },
        Season::Spring => SeasonalAdvisory {
            summary: "Spring is the critical planting season. Prepare your fields once soil \
                      temperatures reach appropriate levels, being careful not to work wet \
                      soil. Monitor for early season pests as temperatures warm and implement \
                      your integrated pest management strategies."
                .to_string(),
            monthly_tasks: vec![
                month_tasks(
                    "March",
                    &[
                        "Prepare seedbeds once soil has dried sufficiently",
                        "Apply pre-planting fertilizers based on soil tests",
                        "Set up weather monitoring stations for the growing season",
                        "Begin early season weed control measures",
                    ],
                ),
                month_tasks(
                    "April",
                    &[
                        "Plant main season crops when soil temperature is optimal",
                        "Implement irrigation system as needed for germination",
                        "Monitor for early season pests and diseases",
                        "Apply post-emergence herbicides as needed",
                    ],
                ),
                month_tasks(
                    "May",
                    &[
                        "Complete planting of all warm-season crops",
                        "Thin seedlings to appropriate spacing",
                        "Begin regular scouting for pests and diseases",
                        "Apply side-dress fertilizers for early planted crops",
                    ],
                ),
            ],
        },
        Season::Summer => SeasonalAdvisory {
            summary: "Summer is focused on crop management, irrigation, and pest control. \
                      Monitor soil moisture regularly and adjust irrigation schedules based on \
                      weather conditions and crop needs. Stay vigilant for pest and disease \
                      pressures which increase in warm weather."
                .to_string(),
            monthly_tasks: vec![
                month_tasks(
                    "June",
                    &[
                        "Implement efficient irrigation scheduling based on crop needs",
                        "Monitor for insect pests with increased activity in warm weather",
                        "Apply foliar fertilizers if tissue tests indicate deficiencies",
                        "Prepare for harvest of early season crops",
                    ],
                ),
                month_tasks(
                    "July",
                    &[
                        "Maintain consistent irrigation during peak water demand",
                        "Continue regular pest and disease monitoring",
                        "Apply fungicides preventatively during periods of high humidity",
                        "Plan for cover crop seeding after early harvests",
                    ],
                ),
                month_tasks(
                    "August",
                    &[
                        "Monitor crops for signs of heat stress",
                        "Adjust irrigation to account for any rainfall",
                        "Prepare harvesting equipment for upcoming harvest season",
                        "Begin soil preparation for fall planted crops",
                    ],
                ),
            ],
        },
        Season::Fall => SeasonalAdvisory {
            summary: "Fall is harvest season and preparation for the following year. Focus on \
                      timely harvesting, proper crop storage, and establishment of winter \
                      cover crops. Perform post-harvest soil management practices and evaluate \
                      the season's performance for future planning."
                .to_string(),
            monthly_tasks: vec![
                month_tasks(
                    "September",
                    &[
                        "Harvest crops at optimal maturity to maximize quality",
                        "Plant cover crops in harvested fields to prevent erosion",
                        "Conduct soil testing after harvest to plan winter amendments",
                        "Clean and prepare storage facilities",
                    ],
                ),
                month_tasks(
                    "October",
                    &[
                        "Complete main crop harvest before frost damage",
                        "Apply fall fertilizers and soil amendments",
                        "Plant winter grains if part of rotation",
                        "Winterize irrigation systems to prevent freeze damage",
                    ],
                ),
                month_tasks(
                    "November",
                    &[
                        "Finish any remaining harvest activities",
                        "Complete fall tillage operations where appropriate",
                        "Apply winter weed control measures",
                        "Analyze yield data and begin planning for next season",
                    ],
                ),
            ],
        },
    }
}

fn month_tasks(month: &'static str, tasks: &[&str]) -> MonthlyTasks {
    MonthlyTasks {
        month,
        tasks: tasks.iter().map(|t| t.to_string()).collect(),
    }
}
