use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    /// Team names come from free-form user input; they must survive trimming.
    pub fn validate_team_name(name: &str) -> Result<(), AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidName(
                "Team name cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > 100 {
            return Err(AppError::InvalidName(
                "Team name too long (max 100 characters)".to_string(),
            ));
        }
        Ok(())
    }

    /// A catalog item must carry its display fields before it is persisted
    /// into favorites or a team roster.
    pub fn validate_persistable_item(title: &str, image_url: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Item title cannot be empty".to_string(),
            ));
        }
        if image_url.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Item image URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
