use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::domain::model::{CrimeDataset, RenderedChart};
use crate::domain::stats::CorrelationMatrix;
use crate::utils::error::{ReportError, Result};

pub const MURDER_TREND_FILE: &str = "murder_trend.png";
pub const JUVENILE_TREND_FILE: &str = "juvenile_trend.png";
pub const WOMEN_RATE_FILE: &str = "women_crime_rate.png";
pub const CASTE_TREND_FILE: &str = "caste_crime_trend.png";
pub const CORRELATION_FILE: &str = "correlation_matrix.png";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);

/// Renders all five report charts as in-memory PNGs. Nothing touches the
/// filesystem here; writing is the publish stage's job.
pub fn render_all(dataset: &CrimeDataset) -> Result<Vec<RenderedChart>> {
    Ok(vec![
        murder_trend(dataset)?,
        yearly_bars(
            dataset,
            &dataset.juvenile_crimes,
            "Juvenile Crime Cases in Tamil Nadu (2014–2024)",
            "Number of Juvenile Crimes",
            SKY_BLUE,
            JUVENILE_TREND_FILE,
        )?,
        district_rates(dataset)?,
        yearly_bars(
            dataset,
            &dataset.sc_st_crimes,
            "Caste-Based Crimes (SC/ST) in Tamil Nadu (2014–2024)",
            "Number of Cases",
            PURPLE,
            CASTE_TREND_FILE,
        )?,
        correlation_heatmap(&dataset.correlation_matrix())?,
    ])
}

fn murder_trend(dataset: &CrimeDataset) -> Result<RenderedChart> {
    let (width, height) = (1000u32, 600u32);
    let title = "Annual Murder Cases in Tamil Nadu (2014–2024)";
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_min = dataset.years.iter().copied().min().unwrap_or(0);
        let x_max = dataset.years.iter().copied().max().unwrap_or(0);
        let y_min = dataset.murders.iter().copied().min().unwrap_or(0) - 60;
        let y_max = dataset.murders.iter().copied().max().unwrap_or(0) + 60;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(72)
            .build_cartesian_2d(x_min..x_max + 1, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Number of Murder Cases")
            .x_labels(dataset.years.len())
            .x_label_formatter(&|year| year.to_string())
            .axis_desc_style(("sans-serif", 18))
            .label_style(("sans-serif", 15))
            .draw()?;

        let points: Vec<(i32, i32)> = dataset
            .years
            .iter()
            .copied()
            .zip(dataset.murders.iter().copied())
            .collect();

        chart.draw_series(LineSeries::new(
            points.clone(),
            ShapeStyle::from(&RED).stroke_width(2),
        ))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, RED.filled())),
        )?;

        root.present()?;
    }

    finish_chart(MURDER_TREND_FILE, title, width, height, buf)
}

/// Year-indexed bar chart; covers both the juvenile and the caste-based
/// crime trends, which differ only in data, color, and captions.
fn yearly_bars(
    dataset: &CrimeDataset,
    values: &[i32],
    title: &str,
    y_desc: &str,
    color: RGBColor,
    file_name: &str,
) -> Result<RenderedChart> {
    let (width, height) = (1000u32, 600u32);
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_min = dataset.years.iter().copied().min().unwrap_or(0);
        let x_max = dataset.years.iter().copied().max().unwrap_or(0);
        let y_max = values.iter().copied().max().unwrap_or(0) * 11 / 10;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(72)
            .build_cartesian_2d((x_min..x_max + 1).into_segmented(), 0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Year")
            .y_desc(y_desc)
            .axis_desc_style(("sans-serif", 18))
            .label_style(("sans-serif", 15))
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(6)
                .data(
                    dataset
                        .years
                        .iter()
                        .copied()
                        .zip(values.iter().copied()),
                ),
        )?;

        root.present()?;
    }

    finish_chart(file_name, title, width, height, buf)
}

fn district_rates(dataset: &CrimeDataset) -> Result<RenderedChart> {
    let (width, height) = (800u32, 500u32);
    let title = "Crimes Against Women (Rate per 100k) in Key Districts (2020)";
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = dataset.districts.len() as u32;
        let y_max = dataset
            .district_rates
            .iter()
            .copied()
            .fold(0.0f64, f64::max)
            * 1.15;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(16)
            .x_label_area_size(44)
            .y_label_area_size(56)
            .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("District")
            .y_desc("Crime Rate per 100k")
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => dataset
                    .districts
                    .get(*i as usize)
                    .cloned()
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .axis_desc_style(("sans-serif", 17))
            .label_style(("sans-serif", 15))
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(ORANGE.filled())
                .margin(12)
                .data((0..n).zip(dataset.district_rates.iter().copied())),
        )?;

        root.present()?;
    }

    finish_chart(WOMEN_RATE_FILE, title, width, height, buf)
}

fn correlation_heatmap(matrix: &CorrelationMatrix) -> Result<RenderedChart> {
    let (width, height) = (900u32, 640u32);
    let title = "Correlation Matrix of Crime Categories (2014–2024)";
    let n = matrix.len() as i32;
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(140)
            // Reversed y range puts row 0 at the top, matrix-style.
            .build_cartesian_2d(0..n, n..0)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(n as usize)
            .y_labels(n as usize)
            .x_label_offset(92)
            .y_label_offset(66)
            .x_label_formatter(&|x| {
                matrix
                    .labels
                    .get(*x as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .y_label_formatter(&|y| {
                matrix
                    .labels
                    .get(*y as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .label_style(("sans-serif", 15))
            .draw()?;

        let cells = || {
            (0..n).flat_map(move |x| {
                (0..n).map(move |y| (x, y, matrix.values[y as usize][x as usize]))
            })
        };

        chart.draw_series(cells().map(|(x, y, v)| {
            Rectangle::new([(x, y), (x + 1, y + 1)], heat_color(v).filled())
        }))?;

        // Value annotations, centered in each cell (offsets are in pixels).
        let font = ("sans-serif", 18).into_font();
        chart.draw_series(cells().map(|(x, y, v)| {
            let color = if v.abs() > 0.6 { &WHITE } else { &BLACK };
            let style = font.color(color).pos(Pos::new(HPos::Center, VPos::Center));
            EmptyElement::at((x, y)) + Text::new(format!("{:.2}", v), (92, 66), style)
        }))?;

        root.present()?;
    }

    finish_chart(CORRELATION_FILE, title, width, height, buf)
}

/// Diverging blue-white-red map over [-1, 1].
fn heat_color(v: f64) -> RGBColor {
    let v = v.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        ((59u8, 76u8, 192u8), (221u8, 221u8, 220u8), v + 1.0)
    } else {
        ((221u8, 221u8, 220u8), (180u8, 4u8, 38u8), v)
    };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

fn finish_chart(
    file_name: &str,
    title: &str,
    width: u32,
    height: u32,
    raw: Vec<u8>,
) -> Result<RenderedChart> {
    Ok(RenderedChart {
        file_name: file_name.to_string(),
        title: title.to_string(),
        png: encode_png(width, height, raw)?,
        width_px: width,
        height_px: height,
    })
}

fn encode_png(width: u32, height: u32, raw: Vec<u8>) -> Result<Vec<u8>> {
    let img =
        image::RgbImage::from_raw(width, height, raw).ok_or_else(|| ReportError::ProcessingError {
            message: "pixel buffer does not match chart dimensions".to_string(),
        })?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_all_produces_five_charts() {
        let charts = render_all(&CrimeDataset::builtin()).unwrap();
        let names: Vec<&str> = charts.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                MURDER_TREND_FILE,
                JUVENILE_TREND_FILE,
                WOMEN_RATE_FILE,
                CASTE_TREND_FILE,
                CORRELATION_FILE,
            ]
        );
        assert!(charts.iter().all(|c| !c.png.is_empty()));
    }

    #[test]
    fn test_charts_decode_as_png_with_expected_dimensions() {
        let charts = render_all(&CrimeDataset::builtin()).unwrap();
        for chart in charts {
            let img = image::load_from_memory(&chart.png).unwrap();
            assert_eq!(img.width(), chart.width_px, "{}", chart.file_name);
            assert_eq!(img.height(), chart.height_px, "{}", chart.file_name);
        }
    }

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(-1.0), RGBColor(59, 76, 192));
        assert_eq!(heat_color(1.0), RGBColor(180, 4, 38));
        // Midpoint is near-white.
        let mid = heat_color(0.0);
        assert!(mid.0 > 200 && mid.1 > 200 && mid.2 > 200);
    }
}
