//! Theme resources: the colors, stroke widths and bitmaps a face is built from.
//!
//! A face never hardcodes its palette. It asks a [`ThemeResources`]
//! implementation for each key listed in [`keys`] while handling `on_create`,
//! and a missing or mistyped key fails creation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use quadrant_engine::paint::Color;
use serde::Deserialize;

use crate::error::{FaceError, ResourceKind};

/// Resource keys looked up by the analog face.
pub mod keys {
    pub const BACKGROUND: &str = "background";
    pub const MAIN_TICKS: &str = "main_ticks";
    pub const SIDE_TICKS: &str = "side_ticks";
    pub const ANALOG_HANDS: &str = "analog_hands";
    pub const SEC_HAND: &str = "sec_hand";

    pub const TICK_STROKE: &str = "tick_stroke";
    pub const MIN_HAND_STROKE: &str = "min_hand_stroke";
    pub const HOUR_HAND_STROKE: &str = "hour_hand_stroke";
    pub const SEC_HAND_STROKE: &str = "sec_hand_stroke";

    pub const BACKGROUND_IMAGE: &str = "background_image";
}

/// One resolved theme resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    Color(Color),
    /// Length in surface pixels.
    Dimension(f32),
    Image(Arc<RgbaImage>),
}

impl ResourceValue {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceValue::Color(_) => ResourceKind::Color,
            ResourceValue::Dimension(_) => ResourceKind::Dimension,
            ResourceValue::Image(_) => ResourceKind::Image,
        }
    }
}

/// Read-only resource lookup, consulted while a face is being created.
pub trait ThemeResources {
    fn resource(&self, key: &str) -> Option<ResourceValue>;

    fn color(&self, key: &str) -> Result<Color, FaceError> {
        match self.require(key)? {
            ResourceValue::Color(c) => Ok(c),
            other => Err(wrong_kind(key, ResourceKind::Color, &other)),
        }
    }

    fn dimension(&self, key: &str) -> Result<f32, FaceError> {
        match self.require(key)? {
            ResourceValue::Dimension(d) => Ok(d),
            other => Err(wrong_kind(key, ResourceKind::Dimension, &other)),
        }
    }

    fn image(&self, key: &str) -> Result<Arc<RgbaImage>, FaceError> {
        match self.require(key)? {
            ResourceValue::Image(img) => Ok(img),
            other => Err(wrong_kind(key, ResourceKind::Image, &other)),
        }
    }

    fn require(&self, key: &str) -> Result<ResourceValue, FaceError> {
        self.resource(key).ok_or_else(|| FaceError::MissingResource {
            key: key.to_string(),
        })
    }
}

fn wrong_kind(key: &str, expected: ResourceKind, found: &ResourceValue) -> FaceError {
    FaceError::WrongResourceKind {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Theme overrides as written in a config file.
///
/// ```toml
/// [theme.colors]
/// sec_hand = "#FF5722"
///
/// [theme.dimensions]
/// hour_hand_stroke = 7.0
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    /// Key to `#RRGGBB` / `#AARRGGBB`.
    pub colors: HashMap<String, String>,
    /// Key to length in pixels.
    pub dimensions: HashMap<String, f32>,
    /// PNG decoded into [`keys::BACKGROUND_IMAGE`].
    pub background_image: Option<PathBuf>,
}

/// In-memory [`ThemeResources`].
#[derive(Debug, Clone, Default)]
pub struct ThemeTable {
    entries: HashMap<String, ResourceValue>,
}

impl ThemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock palette: white ticks and hands on black, red second hand.
    pub fn standard() -> Self {
        let mut t = Self::new();
        t.insert(keys::BACKGROUND, ResourceValue::Color(Color::BLACK));
        t.insert(keys::MAIN_TICKS, ResourceValue::Color(Color::WHITE));
        t.insert(keys::SIDE_TICKS, ResourceValue::Color(Color::from_srgb_u8(0x9E, 0x9E, 0x9E, 0xFF)));
        t.insert(keys::ANALOG_HANDS, ResourceValue::Color(Color::from_srgb_u8(0xEE, 0xEE, 0xEE, 0xFF)));
        t.insert(keys::SEC_HAND, ResourceValue::Color(Color::from_srgb_u8(0xF4, 0x43, 0x36, 0xFF)));

        t.insert(keys::TICK_STROKE, ResourceValue::Dimension(3.0));
        t.insert(keys::MIN_HAND_STROKE, ResourceValue::Dimension(4.0));
        t.insert(keys::HOUR_HAND_STROKE, ResourceValue::Dimension(6.0));
        t.insert(keys::SEC_HAND_STROKE, ResourceValue::Dimension(2.0));
        t
    }

    /// Standard palette with `spec` applied on top.
    pub fn from_spec(spec: &ThemeSpec) -> Result<Self, FaceError> {
        let mut t = Self::standard();
        t.apply(spec)?;
        Ok(t)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ResourceValue) -> &mut Self {
        self.entries.insert(key.into(), value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<ResourceValue> {
        self.entries.remove(key)
    }

    /// Validates and merges `spec`. On error nothing from `spec` is applied.
    pub fn apply(&mut self, spec: &ThemeSpec) -> Result<(), FaceError> {
        let mut staged = Vec::with_capacity(spec.colors.len() + spec.dimensions.len() + 1);

        for (key, value) in &spec.colors {
            let color = Color::from_hex(value).ok_or_else(|| FaceError::InvalidColor {
                key: key.clone(),
                value: value.clone(),
            })?;
            staged.push((key.clone(), ResourceValue::Color(color)));
        }

        for (key, &value) in &spec.dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(FaceError::InvalidDimension { key: key.clone(), value });
            }
            staged.push((key.clone(), ResourceValue::Dimension(value)));
        }

        if let Some(path) = &spec.background_image {
            let img = image::open(path)
                .map_err(|source| FaceError::ImageLoad { path: path.clone(), source })?
                .into_rgba8();
            log::debug!(
                "loaded background image {} ({}x{})",
                path.display(),
                img.width(),
                img.height()
            );
            staged.push((keys::BACKGROUND_IMAGE.to_string(), ResourceValue::Image(Arc::new(img))));
        }

        self.entries.extend(staged);
        Ok(())
    }
}

impl ThemeResources for ThemeTable {
    fn resource(&self, key: &str) -> Option<ResourceValue> {
        self.entries.get(key).cloned()
    }
}
