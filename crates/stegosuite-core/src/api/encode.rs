use crate::api::shared::{
    image_part, text_part, validate_message, MESSAGE_FIELD, SCHEME_FIELD,
};
use crate::error::ValidationError;
use crate::scheme::Scheme;
use crate::selection::{Direction, SelectedFile};
use crate::transport::WireRequest;

pub fn prepare() -> EncodeApi {
    EncodeApi::default()
}

/// Collects the fields of an encode submission: `image`, `message`, `scheme`.
#[derive(Default, Debug, Clone)]
pub struct EncodeApi {
    image: Option<SelectedFile>,
    message: Option<String>,
    scheme: Scheme,
}

impl EncodeApi {
    /// The cover image the message gets embedded into
    pub fn with_image(mut self, image: SelectedFile) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the cover image, `None` leaves the request incomplete
    pub fn use_image(mut self, image: Option<&SelectedFile>) -> Self {
        self.image = image.cloned();
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Assembles the multipart request, nothing is read or sent yet
    pub fn build(self) -> Result<WireRequest, ValidationError> {
        self.validate()?;
        let (Some(image), Some(message)) = (self.image, self.message) else {
            return Err(ValidationError::MissingImage);
        };

        Ok(WireRequest::new(
            Direction::Encode,
            vec![
                image_part(&image),
                text_part(MESSAGE_FIELD, message),
                text_part(SCHEME_FIELD, self.scheme.code()),
            ],
        ))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.image.is_none() {
            return Err(ValidationError::MissingImage);
        }
        validate_message(self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FormPart;
    use std::fs;
    use tempfile::TempDir;

    fn cover(dir: &TempDir) -> SelectedFile {
        let p = dir.path().join("cover.png");
        fs::write(&p, b"\x89PNG\r\n\x1a\n").unwrap();
        SelectedFile::from_path(p).unwrap()
    }

    #[test]
    fn should_build_parts_in_contract_order() {
        let dir = TempDir::new().unwrap();
        let request = prepare()
            .with_image(cover(&dir))
            .with_message("Hello World")
            .with_scheme(Scheme::Erde)
            .build()
            .unwrap();

        assert_eq!(request.direction(), Direction::Encode);
        assert_eq!(
            request.parts(),
            &[
                FormPart::File {
                    field: "image",
                    file_name: "cover.png".into(),
                    path: dir.path().join("cover.png"),
                },
                FormPart::Text {
                    field: "message",
                    value: "Hello World".into(),
                },
                FormPart::Text {
                    field: "scheme",
                    value: "erde".into(),
                },
            ]
        );
    }

    #[test]
    fn should_default_to_dct() {
        let dir = TempDir::new().unwrap();
        let request = prepare()
            .with_image(cover(&dir))
            .with_message("x")
            .build()
            .unwrap();

        assert_eq!(request.text("scheme"), Some("dct"));
    }

    #[test]
    fn should_check_the_image_before_the_message() {
        assert_eq!(
            prepare().build().unwrap_err(),
            ValidationError::MissingImage
        );

        let dir = TempDir::new().unwrap();
        assert_eq!(
            prepare().use_image(Some(&cover(&dir))).build().unwrap_err(),
            ValidationError::MissingMessage
        );
    }

    #[test]
    fn should_reject_oversized_messages() {
        let dir = TempDir::new().unwrap();
        let err = prepare()
            .with_image(cover(&dir))
            .use_message(Some("m".repeat(501)))
            .build()
            .unwrap_err();

        assert_eq!(err, ValidationError::MessageTooLong(501));
    }
}
