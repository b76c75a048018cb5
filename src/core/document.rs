use docx_rs::{AlignmentType, Docx, Paragraph, Pic, Run, Style, StyleType};

use crate::core::charts;
use crate::domain::model::RenderedChart;
use crate::utils::error::{ReportError, Result};

pub const REPORT_FILE_NAME: &str = "Crime_Data_Analysis_TN_Final.docx";

const EMU_PER_INCH: f64 = 914_400.0;

const INTRODUCTION: &str = "This report presents a comprehensive analysis of crime trends in \
    Tamil Nadu from 2014 to the present. It draws on data from NCRB, Tamil Nadu State Police, \
    and local news sources. The goal is to analyze crime patterns, classify types of crimes, \
    visualize data trends, and suggest strategies for crime prevention and control.";

const MURDER_SUMMARY: &str = "Murder cases peaked in 2019 and have been on a consistent \
    decline since then, reaching the lowest point in a decade by 2024.";

const JUVENILE_SUMMARY: &str = "Juvenile crime trends show spikes in 2016, 2019, and 2022. \
    Influencing factors include socio-economic stress, lack of supervision, and substance abuse.";

const WOMEN_SUMMARY: &str = "Urban districts like Chennai and Coimbatore show relatively lower \
    crime rates against women. Still, underreporting could mask actual numbers.";

const CASTE_SUMMARY: &str = "Caste-based crimes have shown an increasing trend, partly due to \
    increased awareness and willingness to report such incidents.";

const CORRELATION_SUMMARY: &str = "The correlation matrix indicates how different crime \
    categories relate to each other. Juvenile and caste crimes appear moderately correlated \
    with murder trends.";

const CONCLUSION: &str = "Tamil Nadu has shown significant improvement in reducing murders and \
    managing crime in urban areas. However, juvenile offenses and caste-based violence are \
    emerging challenges. The following actions are recommended:";

const RECOMMENDATIONS: [&str; 4] = [
    "Expand proactive policing (e.g., OCIU, DARE)",
    "Strengthen school counseling and anti-substance programs",
    "Improve transparency in reporting women's crimes",
    "Enhance rural policing in high-risk caste-conflict zones",
];

struct Section<'a> {
    heading: &'a str,
    figure: Option<(String, &'a RenderedChart)>,
    body: &'a str,
}

fn figure_for<'a>(
    charts: &'a [RenderedChart],
    n: usize,
    caption: &str,
    file_name: &str,
) -> Result<(String, &'a RenderedChart)> {
    let chart = charts
        .iter()
        .find(|c| c.file_name == file_name)
        .ok_or_else(|| ReportError::ProcessingError {
            message: format!("missing rendered chart: {}", file_name),
        })?;
    Ok((format!("Figure {}: {}", n, caption), chart))
}

/// Assembles the full report as DOCX bytes. The chart slice must contain the
/// five charts produced by the render stage.
pub fn compose(
    title: &str,
    figure_width_inches: f64,
    charts: &[RenderedChart],
) -> Result<Vec<u8>> {
    let figure = |n: usize, caption: &str, file_name: &str| figure_for(charts, n, caption, file_name);

    let sections = [
        Section {
            heading: "1. Introduction",
            figure: None,
            body: INTRODUCTION,
        },
        Section {
            heading: "2. Murder Trends",
            figure: Some(figure(
                1,
                "Annual Murder Cases in Tamil Nadu (2014–2024)",
                charts::MURDER_TREND_FILE,
            )?),
            body: MURDER_SUMMARY,
        },
        Section {
            heading: "3. Juvenile Crimes",
            figure: Some(figure(
                2,
                "Juvenile Crime Cases in Tamil Nadu (2014–2024)",
                charts::JUVENILE_TREND_FILE,
            )?),
            body: JUVENILE_SUMMARY,
        },
        Section {
            heading: "4. Crimes Against Women",
            figure: Some(figure(
                3,
                "Crime Rate Against Women in Selected Districts (2020)",
                charts::WOMEN_RATE_FILE,
            )?),
            body: WOMEN_SUMMARY,
        },
        Section {
            heading: "5. Caste-Based Crimes",
            figure: Some(figure(
                4,
                "Caste-Based Crimes (SC/ST) in Tamil Nadu (2014–2024)",
                charts::CASTE_TREND_FILE,
            )?),
            body: CASTE_SUMMARY,
        },
        Section {
            heading: "6. Correlation Analysis",
            figure: Some(figure(
                5,
                "Correlation Matrix of Crime Categories",
                charts::CORRELATION_FILE,
            )?),
            body: CORRELATION_SUMMARY,
        },
        Section {
            heading: "7. Conclusion and Recommendations",
            figure: None,
            body: CONCLUSION,
        },
    ];

    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(56)
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_paragraph(
            Paragraph::new()
                .style("Title")
                .add_run(Run::new().add_text(title)),
        )
        .add_paragraph(Paragraph::new().add_run(
            Run::new()
                .add_text(format!(
                    "Generated on {}",
                    chrono::Local::now().format("%d %B %Y")
                ))
                .italic(),
        ));

    for section in &sections {
        docx = docx.add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(section.heading)),
        );

        if let Some((caption, chart)) = &section.figure {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(caption.as_str())),
            );

            let width_emu = (figure_width_inches * EMU_PER_INCH) as u32;
            let height_emu =
                (width_emu as f64 * chart.height_px as f64 / chart.width_px as f64) as u32;
            let pic = Pic::new(&chart.png).size(width_emu, height_emu);

            docx = docx.add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_image(pic)),
            );
        }

        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(section.body)));

        if section.heading.starts_with("7.") {
            for rec in RECOMMENDATIONS {
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text(format!("- {}", rec))),
                );
            }
        }
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ReportError::DocxError {
            message: e.to_string(),
        })?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::charts::render_all;
    use crate::domain::model::CrimeDataset;
    use std::io::Read;

    fn document_xml(docx_bytes: &[u8]) -> String {
        let cursor = std::io::Cursor::new(docx_bytes.to_vec());
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_compose_produces_well_formed_container() {
        let charts = render_all(&CrimeDataset::builtin()).unwrap();
        let bytes = compose("Test Report", 6.0, &charts).unwrap();
        assert!(!bytes.is_empty());

        let cursor = std::io::Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        assert!(archive.by_name("word/document.xml").is_ok());

        // Skip the word/media/ directory entry itself; only count files.
        let media_files = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .filter(|name| name.starts_with("word/media/") && !name.ends_with('/'))
            .count();
        assert_eq!(media_files, 5);
    }

    #[test]
    fn test_compose_has_expected_headings_and_figures() {
        let charts = render_all(&CrimeDataset::builtin()).unwrap();
        let bytes = compose("Crime Data Analysis in Tamil Nadu (2014–Present)", 6.0, &charts)
            .unwrap();
        let xml = document_xml(&bytes);

        assert_eq!(xml.matches("Heading1").count(), 7);
        assert_eq!(xml.matches("<w:drawing>").count(), 5);
        assert!(xml.contains("Crime Data Analysis in Tamil Nadu"));
        for heading in [
            "1. Introduction",
            "2. Murder Trends",
            "3. Juvenile Crimes",
            "4. Crimes Against Women",
            "5. Caste-Based Crimes",
            "6. Correlation Analysis",
            "7. Conclusion and Recommendations",
        ] {
            assert!(xml.contains(heading), "missing heading: {}", heading);
        }
        for n in 1..=5 {
            assert!(xml.contains(&format!("Figure {}:", n)));
        }
    }

    #[test]
    fn test_compose_fails_on_missing_chart() {
        let mut charts = render_all(&CrimeDataset::builtin()).unwrap();
        charts.retain(|c| c.file_name != charts::CORRELATION_FILE);
        assert!(compose("Test Report", 6.0, &charts).is_err());
    }
}
