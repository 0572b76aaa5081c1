//! Output formatting shared by the extract and batch commands.

use ruhsat_core::{ExtractionResult, RegistrationInfo};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&result.registration)?),
        OutputFormat::Csv => format_csv(&result.registration),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// Record values in `RegistrationInfo::FIELD_NAMES` order, blank when absent.
pub fn field_values(info: &RegistrationInfo) -> Vec<String> {
    fn text<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map(|v| v.to_string()).unwrap_or_default()
    }

    vec![
        text(&info.identity_number),
        text(&info.first_name),
        text(&info.last_name),
        text(&info.address),
        text(&info.city),
        text(&info.district),
        text(&info.plate),
        text(&info.registration_series),
        text(&info.registration_number),
        text(&info.brand_id),
        text(&info.model_id),
        text(&info.model_year),
        text(&info.usage_type),
    ]
}

fn format_csv(info: &RegistrationInfo) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(RegistrationInfo::FIELD_NAMES)?;
    wtr.write_record(field_values(info))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let info = &result.registration;
    let mut output = String::new();

    let line = |label: &str, value: String| format!("  {:<14}{}\n", label, value);
    let or_dash = |value: String| if value.is_empty() { "-".to_string() } else { value };
    let values = field_values(info);

    output.push_str("Owner:\n");
    output.push_str(&line("Identity no:", or_dash(values[0].clone())));
    output.push_str(&line(
        "Name:",
        or_dash(format!("{} {}", values[1], values[2]).trim().to_string()),
    ));
    output.push_str(&line("Address:", or_dash(values[3].clone())));
    output.push_str(&line("City:", or_dash(values[4].clone())));
    output.push_str(&line("District:", or_dash(values[5].clone())));
    output.push('\n');

    output.push_str("Vehicle:\n");
    output.push_str(&line("Plate:", or_dash(values[6].clone())));
    output.push_str(&line(
        "Document:",
        or_dash(format!("{} {}", values[7], values[8]).trim().to_string()),
    ));
    let brand = result
        .brand
        .as_ref()
        .map(|b| format!("{} ({})", b.name, b.id))
        .unwrap_or_default();
    output.push_str(&line("Brand:", or_dash(brand)));
    let model = result
        .model
        .as_ref()
        .map(|m| format!("{} ({})", m.name, m.id))
        .unwrap_or_default();
    output.push_str(&line("Model:", or_dash(model)));
    output.push_str(&line("Model year:", or_dash(values[11].clone())));
    output.push_str(&line("Usage:", or_dash(values[12].clone())));

    if !result.missing_fields.is_empty() {
        output.push_str(&format!("\nMissing: {}\n", result.missing_fields.join(", ")));
    }

    output
}
