//! Prompt template for CV field extraction

/// Prompt templates for the field extraction request
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub field_extraction: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            field_extraction: FIELD_EXTRACTION_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Render the field extraction prompt for a CV text blob
    pub fn render_field_extraction(&self, cv_text: &str) -> String {
        self.field_extraction.replace("{cv_text}", cv_text)
    }
}

const FIELD_EXTRACTION_TEMPLATE: &str = r#"Extract the following fields from this CV:
1. Name
2. Nationality
3. Qualification

CV Text:
{cv_text}

Respond in JSON format with keys: Name, Nationality, Qualification."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_extraction_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_field_extraction("Jane Doe, Teacher since Jan 2015.");

        assert!(prompt.contains("Jane Doe, Teacher since Jan 2015."));
        assert!(prompt.contains("1. Name"));
        assert!(prompt.contains("2. Nationality"));
        assert!(prompt.contains("3. Qualification"));
        assert!(!prompt.contains("{cv_text}"));
    }

    #[test]
    fn test_prompt_template_creation() {
        let templates = PromptTemplates::default();
        assert!(!templates.field_extraction.is_empty());
        assert!(templates
            .field_extraction
            .contains("Respond in JSON format with keys: Name, Nationality, Qualification."));
    }
}
