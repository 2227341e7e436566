use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::{DomainError, EmailTemplate};

/// Load and validate the invitation template.
///
/// A missing file is not an error: the renderer falls back to its built-in
/// document. A file that exists but cannot be read or lacks a placeholder is.
pub async fn load_template(path: impl AsRef<Path>) -> Result<Option<EmailTemplate>, DomainError> {
    let path = path.as_ref();

    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Template file not found, using fallback template");
            return Ok(None);
        }
        Err(e) => {
            return Err(DomainError::input(format!(
                "Failed to read template {}: {}",
                path.display(),
                e
            )));
        }
    };

    let template = EmailTemplate::parse(content)?;
    info!(path = %path.display(), "Loaded email template");

    Ok(Some(template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::{LOGIN_BUTTON_PLACEHOLDER, MEMBER_NAME_PLACEHOLDER};
    use crate::domain::TemplateError;

    #[tokio::test]
    async fn test_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_template(dir.path().join("missing.html")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_load_valid_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invite.html");
        tokio::fs::write(
            &path,
            format!("<p>{}</p>{}", MEMBER_NAME_PLACEHOLDER, LOGIN_BUTTON_PLACEHOLDER),
        )
        .await
        .unwrap();

        let template = load_template(&path).await.unwrap();
        assert!(template.is_some());
    }

    #[tokio::test]
    async fn test_template_without_button_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invite.html");
        tokio::fs::write(&path, format!("<p>{}</p>", MEMBER_NAME_PLACEHOLDER))
            .await
            .unwrap();

        let result = load_template(&path).await;
        assert!(matches!(
            result,
            Err(DomainError::Template(TemplateError::MissingPlaceholder { .. }))
        ));
    }
}
