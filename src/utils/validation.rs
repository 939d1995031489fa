use crate::utils::error::{PortfolioError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

/// The id ends up inside a double-quoted attribute of the marker.
pub fn validate_marker_id(field_name: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(invalid(field_name, id, "Marker id cannot be empty"));
    }

    if id.contains('"') || id.contains('>') {
        return Err(invalid(
            field_name,
            id,
            "Marker id cannot contain '\"' or '>'",
        ));
    }

    Ok(())
}

pub fn validate_command_template(field_name: &str, template: &str) -> Result<()> {
    if template.split_whitespace().next().is_none() {
        return Err(invalid(field_name, template, "Command cannot be empty"));
    }

    for placeholder in ["{input}", "{output}"] {
        if !template.contains(placeholder) {
            return Err(invalid(
                field_name,
                template,
                &format!("Command must contain {}", placeholder),
            ));
        }
    }

    Ok(())
}

fn invalid(field_name: &str, value: &str, reason: &str) -> PortfolioError {
    PortfolioError::InvalidArgumentError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
