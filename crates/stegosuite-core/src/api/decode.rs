use crate::api::shared::{image_part, text_part, SCHEME_FIELD};
use crate::error::ValidationError;
use crate::scheme::Scheme;
use crate::selection::{Direction, SelectedFile};
use crate::transport::WireRequest;

pub fn prepare() -> DecodeApi {
    DecodeApi::default()
}

/// Collects the fields of a decode submission: `image`, `scheme`.
#[derive(Default, Debug, Clone)]
pub struct DecodeApi {
    image: Option<SelectedFile>,
    scheme: Scheme,
}

impl DecodeApi {
    /// This is the stego image that contains the message to be unveiled
    pub fn from_secret_image(mut self, image: SelectedFile) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the stego image, `None` leaves the request incomplete
    pub fn use_secret_image(mut self, image: Option<&SelectedFile>) -> Self {
        self.image = image.cloned();
        self
    }

    /// Has to be the scheme the image was encoded with
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn build(self) -> Result<WireRequest, ValidationError> {
        let Some(image) = self.image else {
            return Err(ValidationError::MissingImage);
        };

        Ok(WireRequest::new(
            Direction::Decode,
            vec![
                image_part(&image),
                text_part(SCHEME_FIELD, self.scheme.code()),
            ],
        ))
    }
}
