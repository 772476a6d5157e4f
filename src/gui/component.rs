use cgmath::SquareMatrix;

use super::batch::GuiBatch;
use crate::input::MouseEvent;
use crate::math::Matrix3f;

/// Where a component sits inside its parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// Centred in the parent, offsets ignored.
    Center,
    /// Anchored to the top-left corner, inset by the offset. With a zero
    /// offset this is the parent's origin.
    #[default]
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    /// Stacked top to bottom after the previous flow children.
    Flow,
}

/// What changed on a component since its parent last looked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Changes {
    pub resized: bool,
    pub moved: bool,
}

impl Changes {
    /// True when the parent has to lay its children out again.
    pub fn needs_layout(&self) -> bool {
        self.resized || self.moved
    }
}

/// Size, placement settings and absolute transform shared by every
/// component.
#[derive(Debug, Clone)]
pub struct ComponentBase {
    width: f32,
    height: f32,
    offset_x: f32,
    offset_y: f32,
    position: PositionMode,
    transform: Matrix3f,
    changes: Changes,
}

impl ComponentBase {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
            position: PositionMode::default(),
            transform: Matrix3f::identity(),
            changes: Changes::default(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn position(&self) -> PositionMode {
        self.position
    }

    /// Absolute placement, written by the parent's layout pass.
    pub fn transform(&self) -> &Matrix3f {
        &self.transform
    }

    /// Returns true if the size actually changed.
    pub fn set_size(&mut self, width: f32, height: f32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.changes.resized = true;
        true
    }

    pub fn set_offset(&mut self, x: f32, y: f32) {
        if self.offset_x != x || self.offset_y != y {
            self.offset_x = x;
            self.offset_y = y;
            self.changes.moved = true;
        }
    }

    pub fn set_position(&mut self, position: PositionMode) {
        if self.position != position {
            self.position = position;
            self.changes.moved = true;
        }
    }

    pub fn set_transform(&mut self, transform: Matrix3f) {
        self.transform = transform;
    }

    /// Pending changes, left in place.
    pub fn changes(&self) -> Changes {
        self.changes
    }

    /// Hands the accumulated changes to the caller and clears them.
    pub fn take_changes(&mut self) -> Changes {
        std::mem::take(&mut self.changes)
    }

    /// Whether the pixel `(x, y)` lies inside this component. Assumes an
    /// unrotated placement.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (left, top) = crate::math::translation(&self.transform);
        x >= left && x < left + self.width && y >= top && y < top + self.height
    }
}

/// A node of the GUI tree.
///
/// Containers own their children and are the only writers of a child's
/// transform; components never position themselves.
pub trait Component {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Per-frame hook. Reports what changed so the parent can re-run its
    /// layout.
    fn update(&mut self) -> Changes {
        self.base_mut().take_changes()
    }

    fn render(&self, batch: &mut GuiBatch);

    /// Releases what the component holds. Called once when the component
    /// leaves the tree.
    fn destroy(&mut self) {}

    /// Called by the parent's layout pass with the new absolute placement.
    fn set_transform(&mut self, transform: Matrix3f) {
        self.base_mut().set_transform(transform);
    }

    fn receive_mouse_event(&mut self, _event: &MouseEvent) {}

    /// Builder shorthand for the position mode and offset.
    fn positioned(mut self, position: PositionMode, x: f32, y: f32) -> Self
    where
        Self: Sized,
    {
        let base = self.base_mut();
        base.set_position(position);
        base.set_offset(x, y);
        self
    }
}

/// Forwards the structural part of [`Component`] to a wrapped component
/// field, for widgets built by composing a container.
macro_rules! delegate_component {
    ($field:ident) => {
        fn base(&self) -> &$crate::gui::component::ComponentBase {
            self.$field.base()
        }

        fn base_mut(&mut self) -> &mut $crate::gui::component::ComponentBase {
            self.$field.base_mut()
        }

        fn render(&self, batch: &mut $crate::gui::batch::GuiBatch) {
            self.$field.render(batch)
        }

        fn destroy(&mut self) {
            self.$field.destroy()
        }

        fn set_transform(&mut self, transform: $crate::math::Matrix3f) {
            self.$field.set_transform(transform)
        }
    };
}
pub(crate) use delegate_component;

impl<T: Component + ?Sized> Component for Box<T> {
    fn base(&self) -> &ComponentBase {
        (**self).base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        (**self).base_mut()
    }

    fn update(&mut self) -> Changes {
        (**self).update()
    }

    fn render(&self, batch: &mut GuiBatch) {
        (**self).render(batch)
    }

    fn destroy(&mut self) {
        (**self).destroy()
    }

    fn set_transform(&mut self, transform: Matrix3f) {
        (**self).set_transform(transform)
    }

    fn receive_mouse_event(&mut self, event: &MouseEvent) {
        (**self).receive_mouse_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_record_changes_until_taken() {
        let mut base = ComponentBase::new(10.0, 10.0);
        assert_eq!(base.take_changes(), Changes::default());

        assert!(!base.set_size(10.0, 10.0));
        assert!(base.set_size(20.0, 10.0));
        base.set_offset(4.0, 0.0);
        let changes = base.take_changes();
        assert!(changes.resized && changes.moved);
        assert!(!base.take_changes().needs_layout());

        base.set_position(PositionMode::TopLeft);
        assert!(!base.take_changes().moved);
        base.set_position(PositionMode::Flow);
        assert!(base.take_changes().moved);
    }

    #[test]
    fn contains_uses_the_placement() {
        let mut base = ComponentBase::new(30.0, 20.0);
        base.set_transform(crate::math::with_translation(&Matrix3f::identity(), 100.0, 100.0));
        assert!(base.contains(100.0, 100.0));
        assert!(base.contains(129.0, 119.0));
        assert!(!base.contains(130.0, 110.0));
        assert!(!base.contains(99.0, 110.0));
    }
}
