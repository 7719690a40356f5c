use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of value a theme resource holds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceKind {
    Color,
    Dimension,
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Color => "color",
            ResourceKind::Dimension => "dimension",
            ResourceKind::Image => "image",
        })
    }
}

/// Failures while building a face from its theme.
///
/// All of them abort `on_create`; a face never falls back to made-up styles.
#[derive(Debug, Error)]
pub enum FaceError {
    #[error("theme resource `{key}` is missing")]
    MissingResource { key: String },

    #[error("theme resource `{key}` is a {found}, expected a {expected}")]
    WrongResourceKind {
        key: String,
        expected: ResourceKind,
        found: ResourceKind,
    },

    #[error("theme color `{key}` has unparseable value `{value}`")]
    InvalidColor { key: String, value: String },

    #[error("theme dimension `{key}` must be finite and non-negative, got {value}")]
    InvalidDimension { key: String, value: f32 },

    #[error("failed to load background image {}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
