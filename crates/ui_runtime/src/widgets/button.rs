//! Button widget - clickable text on a colored background

use std::rc::Rc;

use crate::events::UiEventKind;
use crate::foundation::math::{Vec2, Vec4};
use crate::input::MouseButton;
use crate::pipeline::FrameContext;
use crate::render::MaterialId;
use crate::text::{GlyphMetrics, RichText, TextBoard, TextMode};
use crate::tree::{NodeId, UiTree};
use super::{Clickable, Drawable, QuadEmitter, Sizable};

/// Button state for visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVisual {
    /// Normal resting state
    #[default]
    Normal,
    /// Button owns the cursor
    Hovered,
    /// Button is being pressed
    Pressed,
    /// Button is disabled (non-interactive)
    Disabled,
}

/// Text button
///
/// Emits `Clicked` when the primary button goes down while it owns the cursor.
#[derive(Debug)]
pub struct LabelButton {
    label: TextBoard,

    /// Current button state
    pub state: ButtonVisual,

    /// Background material
    pub material: MaterialId,

    /// Resting color
    pub normal_color: Vec4,
    /// Hover state color
    pub hover_color: Vec4,
    /// Pressed state color
    pub pressed_color: Vec4,
    /// Disabled state color
    pub disabled_color: Vec4,
    /// Color while selected (list rows)
    pub selected_color: Vec4,

    /// Space between the text and the button edge, total per axis
    pub text_padding: Vec2,

    /// Whether the button reacts to input
    pub enabled: bool,

    /// Drawn with the selected color
    pub selected: bool,

    held: bool,
}

impl LabelButton {
    /// Create a button that sizes itself around its text
    pub fn new(metrics: Rc<dyn GlyphMetrics>, text: &RichText) -> Self {
        let mut label = TextBoard::new(metrics, TextMode::Unlined);
        label.builder_mut().set_text(text);

        Self {
            label,
            state: ButtonVisual::Normal,
            material: MaterialId::SOLID,
            normal_color: Vec4::new(0.3, 0.3, 0.3, 0.9),
            hover_color: Vec4::new(0.4, 0.4, 0.5, 1.0),
            pressed_color: Vec4::new(0.5, 0.5, 0.6, 1.0),
            disabled_color: Vec4::new(0.2, 0.2, 0.2, 0.5),
            selected_color: Vec4::new(0.25, 0.4, 0.65, 1.0),
            text_padding: Vec2::new(8.0, 4.0),
            enabled: true,
            selected: false,
            held: false,
        }
    }

    /// Label board
    pub fn label(&self) -> &TextBoard {
        &self.label
    }

    /// Mutable label board
    pub fn label_mut(&mut self) -> &mut TextBoard {
        &mut self.label
    }

    /// Replace the label text
    pub fn set_text(&mut self, text: &RichText) {
        self.label.builder_mut().set_text(text);
    }

    /// Label text
    pub fn text(&self) -> RichText {
        self.label.builder().text()
    }

    /// Size to the text (true) or clip the text to the node size (false)
    pub fn set_auto_size(&mut self, auto_size: bool) {
        self.label.set_auto_resize(auto_size);
    }

    /// Get the current color based on button state
    pub fn current_color(&self) -> Vec4 {
        if !self.enabled {
            return self.disabled_color;
        }

        match self.state {
            ButtonVisual::Pressed => self.pressed_color,
            ButtonVisual::Hovered => self.hover_color,
            ButtonVisual::Disabled => self.disabled_color,
            ButtonVisual::Normal if self.selected => self.selected_color,
            ButtonVisual::Normal => self.normal_color,
        }
    }
}

impl Sizable for LabelButton {
    fn update_size(&mut self, id: NodeId, tree: &mut UiTree) {
        let Some(entry) = tree.get_mut(id) else {
            return;
        };
        if self.label.auto_resize() {
            entry.placement.unscaled_size = self.label.size() + self.text_padding;
        } else {
            self.label.set_fixed_size(entry.placement.unscaled_size - self.text_padding);
        }
    }
}

impl Drawable for LabelButton {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        out.fill(self.material, self.current_color());
        out.text(&self.label, Vec2::zeros());
    }
}

impl Clickable for LabelButton {
    fn handle_input(&mut self, id: NodeId, _tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        if !self.enabled {
            self.state = ButtonVisual::Disabled;
            self.held = false;
            return;
        }

        let owner = ctx.arbiter.is_owner(id);
        let left = ctx.input.left();

        if owner {
            for button in MouseButton::ALL {
                if ctx.input.button(button).pressed {
                    ctx.events.send(id, UiEventKind::Pressed(button));
                }
            }
            if left.pressed {
                self.held = true;
                ctx.events.send(id, UiEventKind::Clicked);
            }
        }

        if left.released && self.held {
            ctx.events.send(id, UiEventKind::Released(MouseButton::Left));
        }
        if !left.down {
            self.held = false;
        }

        self.state = if self.held {
            ButtonVisual::Pressed
        } else if owner {
            ButtonVisual::Hovered
        } else {
            ButtonVisual::Normal
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMetrics;
    use crate::tree::NodeEntry;
    use approx::assert_relative_eq;

    fn button(text: &str) -> LabelButton {
        LabelButton::new(Rc::new(MonospaceMetrics::new(10.0, 16.0)), &RichText::from(text))
    }

    #[test]
    fn test_auto_size_adds_padding() {
        let mut tree = UiTree::new(NodeEntry::container());
        let id = tree.insert(NodeEntry::container());
        let mut ok = button("OK");

        ok.update_size(id, &mut tree);
        assert_relative_eq!(tree.get(id).unwrap().placement.unscaled_size, Vec2::new(28.0, 20.0));
    }

    #[test]
    fn test_color_follows_state() {
        let mut ok = button("OK");
        assert_eq!(ok.current_color(), ok.normal_color);

        ok.selected = true;
        assert_eq!(ok.current_color(), ok.selected_color);
        ok.state = ButtonVisual::Hovered;
        assert_eq!(ok.current_color(), ok.hover_color);

        ok.enabled = false;
        assert_eq!(ok.current_color(), ok.disabled_color);
    }
}
