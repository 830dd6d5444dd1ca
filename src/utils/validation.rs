use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MarkError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(MarkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MarkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| MarkError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_mark_selection(analyze_tvp: bool, analyze_aga: bool) -> Result<()> {
    if !(analyze_tvp || analyze_aga) {
        return Err(MarkError::ValidationError {
            message: "Please select at least one mark type (TVP/AGA)".to_string(),
        });
    }
    Ok(())
}

pub fn validate_formats(field_name: &str, formats: &[OutputFormat]) -> Result<()> {
    if formats.is_empty() {
        return Err(MarkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for format in formats {
        if !seen.insert(format) {
            return Err(MarkError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.extension().to_string(),
                reason: "Output format listed more than once".to_string(),
            });
        }
    }
    Ok(())
}

/// 共用的設定檢查，CLI 與 TOML 兩種來源都走這裡
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let input = config.input_path().map(str::to_string);
    let input = validate_required_field("input.path", &input)?;
    validate_path("input.path", input)?;
    validate_mark_selection(config.analyze_tvp(), config.analyze_aga())?;
    validate_path("output.path", config.output_path())?;
    validate_formats("output.formats", config.output_formats())?;
    Ok(())
}
