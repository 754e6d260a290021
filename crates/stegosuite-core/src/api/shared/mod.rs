use crate::error::ValidationError;
use crate::selection::SelectedFile;
use crate::transport::FormPart;

/// Upper bound for a secret message, counted in characters
pub const MAX_MESSAGE_CHARS: usize = 500;

pub(crate) const IMAGE_FIELD: &str = "image";
pub(crate) const MESSAGE_FIELD: &str = "message";
pub(crate) const SCHEME_FIELD: &str = "scheme";

/// Checks presence and length of a secret message
pub fn validate_message(message: Option<&str>) -> Result<(), ValidationError> {
    let Some(message) = message.filter(|m| !m.is_empty()) else {
        return Err(ValidationError::MissingMessage);
    };

    let chars = message.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooLong(chars));
    }

    Ok(())
}

pub(crate) fn image_part(image: &SelectedFile) -> FormPart {
    FormPart::File {
        field: IMAGE_FIELD,
        file_name: image.name().to_string(),
        path: image.path().to_path_buf(),
    }
}

pub(crate) fn text_part(field: &'static str, value: impl Into<String>) -> FormPart {
    FormPart::Text {
        field,
        value: value.into(),
    }
}
