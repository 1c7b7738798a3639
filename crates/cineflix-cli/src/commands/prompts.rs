use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input = input.default(default_value.to_string());
    }

    input.interact_text().map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Masked input for secrets
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| eyre!("Failed to read secret: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`, returning its index
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}

/// Star rating from 0 (not rated) to 5
pub fn prompt_rating(prompt: &str, default: u8) -> Result<u8> {
    Input::<u8>::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|value: &u8| -> Result<(), &'static str> {
            if *value <= 5 {
                Ok(())
            } else {
                Err("Rating must be between 0 and 5")
            }
        })
        .interact_text()
        .map_err(|e| eyre!("Failed to read rating: {}", e))
}

/// Optional number; blank input means none
pub fn prompt_optional_number(prompt: &str) -> Result<Option<u8>> {
    loop {
        let raw = prompt_string(prompt, None)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<u8>() {
            Ok(value) if value <= 5 => return Ok(Some(value)),
            _ => eprintln!("Please enter a number from 0 to 5, or leave blank."),
        }
    }
}
