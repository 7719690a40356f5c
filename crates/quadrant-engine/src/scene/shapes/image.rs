use std::sync::Arc;

use image::RgbaImage;

use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Bitmap blit payload.
///
/// The bitmap is shared, not copied: faces keep one pre-scaled image alive and
/// hand out clones of the `Arc` every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub dest: Rect,
    pub image: Arc<RgbaImage>,
}

impl DrawList {
    /// Records a bitmap draw into `dest`.
    #[inline]
    pub fn push_image(&mut self, z: ZIndex, dest: Rect, image: Arc<RgbaImage>) {
        self.push(z, DrawCmd::Image(ImageCmd { dest, image }));
    }
}
