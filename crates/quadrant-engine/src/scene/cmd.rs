use crate::scene::shapes::{CircleCmd, FillCmd, ImageCmd, LineCmd, TextCmd};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - teach each renderer the new variant
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(FillCmd),
    Image(ImageCmd),
    Line(LineCmd),
    Circle(CircleCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Short lowercase name, used in logs and frame summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::Fill(_) => "fill",
            DrawCmd::Image(_) => "image",
            DrawCmd::Line(_) => "line",
            DrawCmd::Circle(_) => "circle",
            DrawCmd::Text(_) => "text",
        }
    }
}
