use validator::ValidationError;

pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

/// Uppercases a licence plate and checks it is 3..=8 ASCII alphanumerics.
pub fn normalize_plate(plate: &str) -> Result<String, String> {
    let plate = plate.trim().to_uppercase();
    if !(3..=8).contains(&plate.len()) {
        return Err("Plate must be 3-8 characters".to_string());
    }
    if !plate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(
            "Plate must be alphanumeric uppercase without special characters".to_string(),
        );
    }
    Ok(plate)
}

/// `validator` custom check: rejects strings that are empty once trimmed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
