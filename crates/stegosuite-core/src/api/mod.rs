//! Builders that assemble a submission for either direction.
//!
//! ```rust
//! use stegosuite_core::{Scheme, SelectedFile};
//! # let dir = tempfile::tempdir().unwrap();
//! # let cover = dir.path().join("cover.png");
//! # std::fs::write(&cover, b"png").unwrap();
//!
//! let request = stegosuite_core::api::encode::prepare()
//!     .with_image(SelectedFile::from_path(&cover).unwrap())
//!     .with_message("Hello, World!")
//!     .with_scheme(Scheme::Pvd)
//!     .build()
//!     .expect("all required fields are present");
//!
//! assert_eq!(request.text("scheme"), Some("pvd"));
//! ```

pub mod decode;
pub mod encode;
pub mod shared;
