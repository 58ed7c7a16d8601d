use super::{IdentifierSource, LoadedIdentifiers, clean_identifiers};
use crate::utils::error::{DispatchError, Result};
use async_trait::async_trait;

/// Identifiers given directly in configuration or on the command line
#[derive(Debug, Clone)]
pub struct InlineSource {
    identifiers: Vec<String>,
    label: Option<String>,
}

impl InlineSource {
    pub fn new(identifiers: Vec<String>, label: Option<String>) -> Self {
        Self { identifiers, label }
    }
}

#[async_trait]
impl IdentifierSource for InlineSource {
    async fn load(&self) -> Result<LoadedIdentifiers> {
        let identifiers = clean_identifiers(&self.identifiers, "inline list");
        if identifiers.is_empty() {
            return Err(DispatchError::source_unavailable(
                "Inline identifier list has no valid identifiers",
            ));
        }

        let description = match &self.label {
            Some(label) => label.clone(),
            None => format!("Inline identifiers ({})", identifiers.len()),
        };
        Ok(LoadedIdentifiers::new(identifiers, description))
    }
}
