use serde::{Deserialize, Serialize};

use crate::domain::stats::{self, CorrelationMatrix};
use crate::utils::error::{ReportError, Result};

/// Parallel series of Tamil Nadu crime statistics, 2014-2024. Yearly series
/// are indexed by position against `years`, district rates against
/// `districts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrimeDataset {
    pub years: Vec<i32>,
    pub murders: Vec<i32>,
    pub juvenile_crimes: Vec<i32>,
    pub sc_st_crimes: Vec<i32>,
    pub districts: Vec<String>,
    pub district_rates: Vec<f64>,
    pub women_crime_rate: Vec<f64>,
}

/// A chart rendered to PNG bytes, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub file_name: String,
    pub title: String,
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Serialize)]
struct YearlyRow {
    year: i32,
    murders: i32,
    juvenile_crimes: i32,
    sc_st_crimes: i32,
    women_crime_rate: f64,
}

#[derive(Debug, Serialize)]
struct DistrictRow {
    district: String,
    crime_rate_per_100k: f64,
}

impl CrimeDataset {
    /// The built-in statistics the report is generated from (NCRB and Tamil
    /// Nadu State Police figures as compiled in the source report).
    pub fn builtin() -> Self {
        let women_crime_rate = stats::linspace(13.4, 9.8, 11);
        Self {
            years: (2014..=2024).collect(),
            murders: vec![
                1550, 1602, 1621, 1684, 1745, 1690, 1605, 1582, 1523, 1489, 1563,
            ],
            juvenile_crimes: vec![
                2100, 2180, 2000, 2300, 2500, 2350, 2212, 2607, 2450, 2510, 2485,
            ],
            sc_st_crimes: vec![
                950, 970, 1012, 1105, 1150, 1130, 1085, 1175, 1190, 1250, 1225,
            ],
            districts: vec![
                "Chennai".to_string(),
                "Coimbatore".to_string(),
                "Madurai".to_string(),
                "Trichy".to_string(),
                "Salem".to_string(),
            ],
            district_rates: vec![13.4, 9.0, 10.2, 8.5, 9.8],
            women_crime_rate,
        }
    }

    /// Array-length alignment is the one structural invariant of the dataset.
    pub fn validate(&self) -> Result<()> {
        let n = self.years.len();
        if n == 0 {
            return Err(ReportError::ValidationError {
                message: "dataset covers no years".to_string(),
            });
        }

        let yearly = [
            ("murders", self.murders.len()),
            ("juvenile_crimes", self.juvenile_crimes.len()),
            ("sc_st_crimes", self.sc_st_crimes.len()),
            ("women_crime_rate", self.women_crime_rate.len()),
        ];
        for (name, len) in yearly {
            if len != n {
                return Err(ReportError::ValidationError {
                    message: format!("series '{}' has {} entries, expected {}", name, len, n),
                });
            }
        }

        if self.districts.is_empty() || self.district_rates.len() != self.districts.len() {
            return Err(ReportError::ValidationError {
                message: format!(
                    "district_rates has {} entries, expected {}",
                    self.district_rates.len(),
                    self.districts.len()
                ),
            });
        }

        Ok(())
    }

    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        let as_f64 = |v: &[i32]| v.iter().map(|&x| x as f64).collect::<Vec<f64>>();
        stats::correlation_matrix(&[
            ("Murders", as_f64(&self.murders)),
            ("Juvenile Crimes", as_f64(&self.juvenile_crimes)),
            ("Caste Crimes", as_f64(&self.sc_st_crimes)),
            ("Women Crime Rate", self.women_crime_rate.clone()),
        ])
    }

    /// Yearly series as CSV bytes, one row per year.
    pub fn yearly_csv(&self) -> Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for (i, &year) in self.years.iter().enumerate() {
            wtr.serialize(YearlyRow {
                year,
                murders: self.murders[i],
                juvenile_crimes: self.juvenile_crimes[i],
                sc_st_crimes: self.sc_st_crimes[i],
                women_crime_rate: self.women_crime_rate[i],
            })?;
        }
        wtr.into_inner().map_err(|e| ReportError::ProcessingError {
            message: format!("CSV writer flush failed: {}", e),
        })
    }

    /// District crime rates as CSV bytes.
    pub fn district_csv(&self) -> Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for (district, &rate) in self.districts.iter().zip(self.district_rates.iter()) {
            wtr.serialize(DistrictRow {
                district: district.clone(),
                crime_rate_per_100k: rate,
            })?;
        }
        wtr.into_inner().map_err(|e| ReportError::ProcessingError {
            message: format!("CSV writer flush failed: {}", e),
        })
    }
}
