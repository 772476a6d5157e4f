use cgmath::Vector3;

use super::batch::{Color, GuiBatch, UvRect};
use super::component::{Changes, Component, ComponentBase, PositionMode};
use crate::input::MouseEvent;
use crate::math::{with_translation, Matrix3f};

/// Whether a container dimension is fixed or follows its flow content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    #[default]
    Static,
    Auto,
}

/// A component that positions, updates, renders and destroys an ordered list
/// of children as one unit.
///
/// Insertion order is both the drawing order and the order in which flow
/// children are stacked. Every mutation that can move a child goes through
/// [`Container::refresh`], the only place child transforms are written.
pub struct Container<C> {
    base: ComponentBase,
    children: Vec<C>,
    inner_offset_x: f32,
    inner_offset_y: f32,
    width_mode: SizeMode,
    height_mode: SizeMode,
    background: Option<(Color, UvRect)>,
    destroyed: bool,
}

impl<C: Component> Container<C> {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            base: ComponentBase::new(width, height),
            children: Vec::new(),
            inner_offset_x: 0.0,
            inner_offset_y: 0.0,
            width_mode: SizeMode::Static,
            height_mode: SizeMode::Static,
            background: None,
            destroyed: false,
        }
    }

    pub fn add(&mut self, child: C) {
        self.children.push(child);
        self.refresh();
    }

    /// Detaches the child at `index`. The caller owns it and is expected to
    /// destroy it.
    pub fn remove(&mut self, index: usize) -> C {
        let child = self.children.remove(index);
        self.refresh();
        child
    }

    /// Detaches the first child matching `predicate`.
    pub fn remove_first<F>(&mut self, predicate: F) -> Option<C>
    where
        F: FnMut(&C) -> bool,
    {
        let index = self.children.iter().position(predicate)?;
        Some(self.remove(index))
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Mutable access to the children. Size or placement changes made through
    /// it are picked up by the next [`Component::update`].
    pub fn children_mut(&mut self) -> &mut [C] {
        &mut self.children
    }

    pub fn child(&self, index: usize) -> Option<&C> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut C> {
        self.children.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        if self.base.set_size(width, height) {
            self.refresh();
        }
    }

    /// Padding kept between the container edge and its flow children.
    pub fn set_inner_offset(&mut self, x: f32, y: f32) {
        self.inner_offset_x = x;
        self.inner_offset_y = y;
        self.refresh();
    }

    pub fn set_width_mode(&mut self, mode: SizeMode) {
        self.width_mode = mode;
        self.refresh();
    }

    pub fn set_height_mode(&mut self, mode: SizeMode) {
        self.height_mode = mode;
        self.refresh();
    }

    /// Fills the container area with `color`, sampling the solid patch `uv`.
    pub fn set_background(&mut self, color: Color, uv: UvRect) {
        self.background = Some((color, uv));
    }

    /// Lays out every child from the current settings and, for automatic
    /// dimensions, fits the container to its flow content.
    pub fn refresh(&mut self) {
        let content = self.place_children();
        if self.fit_to_content(content) {
            // Flow extents never depend on the container's own size, so a
            // second pass cannot resize again.
            self.place_children();
        }
    }

    /// Positions every child and returns the flow content extents.
    fn place_children(&mut self) -> (f32, f32) {
        let parent = *self.base.transform();
        let (inner_width, inner_height) = (self.base.width(), self.base.height());
        let (flow_x, mut flow_y) = (self.inner_offset_x, self.inner_offset_y);
        let (mut content_width, mut content_height) = (0.0f32, 0.0f32);

        for child in self.children.iter_mut() {
            let b = child.base();
            let (width, height) = (b.width(), b.height());
            let (offset_x, offset_y) = (b.offset_x(), b.offset_y());
            let (x, y) = match b.position() {
                PositionMode::Center => (
                    ((inner_width - width) / 2.0).trunc(),
                    ((inner_height - height) / 2.0).trunc(),
                ),
                PositionMode::TopLeft => (offset_x, offset_y),
                PositionMode::TopRight => (inner_width - width - offset_x, offset_y),
                PositionMode::BottomRight => (
                    inner_width - width - offset_x,
                    inner_height - height - offset_y,
                ),
                PositionMode::BottomLeft => (offset_x, inner_height - height - offset_y),
                PositionMode::Flow => {
                    let at = (flow_x, flow_y);
                    content_width = content_width.max(flow_x + width + self.inner_offset_x);
                    content_height = content_height.max(flow_y + height + self.inner_offset_y);
                    flow_y += height + offset_y;
                    at
                }
            };
            let absolute = parent * Vector3::new(x, y, 1.0);
            child.set_transform(with_translation(&parent, absolute.x, absolute.y));
        }
        (content_width, content_height)
    }

    fn fit_to_content(&mut self, (content_width, content_height): (f32, f32)) -> bool {
        let width = match self.width_mode {
            SizeMode::Auto => content_width,
            SizeMode::Static => self.base.width(),
        };
        let height = match self.height_mode {
            SizeMode::Auto => content_height,
            SizeMode::Static => self.base.height(),
        };
        self.base.set_size(width, height)
    }
}

impl<C: Component> Component for Container<C> {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self) -> Changes {
        // Own size or placement may have been set through `base_mut`.
        let mut relayout = self.base.changes().needs_layout();
        for child in self.children.iter_mut() {
            relayout |= child.update().needs_layout();
        }
        if relayout {
            self.refresh();
        }
        self.base.take_changes()
    }

    fn render(&self, batch: &mut GuiBatch) {
        if let Some((color, uv)) = self.background {
            batch.push_quad(
                self.base.transform(),
                0.0,
                0.0,
                self.base.width(),
                self.base.height(),
                uv,
                color,
            );
        }
        for child in &self.children {
            child.render(batch);
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        for child in self.children.iter_mut() {
            child.destroy();
        }
        log::debug!("destroyed container with {} children", self.children.len());
    }

    fn set_transform(&mut self, transform: Matrix3f) {
        self.base.set_transform(transform);
        self.refresh();
    }

    fn receive_mouse_event(&mut self, event: &MouseEvent) {
        for child in self.children.iter_mut() {
            child.receive_mouse_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use cgmath::SquareMatrix;

    use super::*;
    use crate::math::translation;

    struct Block {
        base: ComponentBase,
        destroyed: Rc<Cell<u32>>,
    }

    impl Block {
        fn new(width: f32, height: f32, position: PositionMode) -> Self {
            let mut base = ComponentBase::new(width, height);
            base.set_position(position);
            base.take_changes();
            Self {
                base,
                destroyed: Rc::new(Cell::new(0)),
            }
        }

        fn offset(mut self, x: f32, y: f32) -> Self {
            self.base.set_offset(x, y);
            self.base.take_changes();
            self
        }

        fn counting(mut self, counter: &Rc<Cell<u32>>) -> Self {
            self.destroyed = Rc::clone(counter);
            self
        }
    }

    impl Component for Block {
        fn base(&self) -> &ComponentBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }

        fn render(&self, _batch: &mut GuiBatch) {}

        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    type Dyn = Box<dyn Component>;

    fn block(width: f32, height: f32, position: PositionMode) -> Dyn {
        Box::new(Block::new(width, height, position))
    }

    fn placed_at(container: &Container<Dyn>, index: usize) -> (f32, f32) {
        translation(container.child(index).unwrap().base().transform())
    }

    fn moved_to(x: f32, y: f32) -> Matrix3f {
        with_translation(&Matrix3f::identity(), x, y)
    }

    #[test]
    fn top_left_child_sits_at_the_container_origin_for_any_size() {
        for (w, h) in [(100.0, 100.0), (640.0, 480.0), (3.0, 7.0)] {
            let mut container: Container<Dyn> = Container::new(w, h);
            container.set_transform(moved_to(50.0, 30.0));
            container.add(block(20.0, 20.0, PositionMode::TopLeft));
            assert_eq!(placed_at(&container, 0), (50.0, 30.0));
        }
    }

    #[test]
    fn corners_are_inset_by_the_child_offset() {
        let mut container: Container<Dyn> = Container::new(200.0, 100.0);
        container.add(Box::new(
            Block::new(20.0, 10.0, PositionMode::TopLeft).offset(5.0, 3.0),
        ));
        container.add(Box::new(
            Block::new(20.0, 10.0, PositionMode::TopRight).offset(5.0, 3.0),
        ));
        container.add(Box::new(
            Block::new(20.0, 10.0, PositionMode::BottomRight).offset(5.0, 3.0),
        ));
        container.add(Box::new(
            Block::new(20.0, 10.0, PositionMode::BottomLeft).offset(5.0, 3.0),
        ));
        assert_eq!(placed_at(&container, 0), (5.0, 3.0));
        assert_eq!(placed_at(&container, 1), (175.0, 3.0));
        assert_eq!(placed_at(&container, 2), (175.0, 87.0));
        assert_eq!(placed_at(&container, 3), (5.0, 87.0));
    }

    #[test]
    fn center_ignores_offsets() {
        let mut container: Container<Dyn> = Container::new(101.0, 50.0);
        container.add(Box::new(Block::new(20.0, 10.0, PositionMode::Center).offset(9.0, 9.0)));
        assert_eq!(placed_at(&container, 0), (40.0, 20.0));
    }

    #[test]
    fn flow_children_stack_top_to_bottom() {
        let mut container: Container<Dyn> = Container::new(300.0, 300.0);
        container.add(Box::new(Block::new(40.0, 20.0, PositionMode::Flow).offset(0.0, 5.0)));
        container.add(Box::new(Block::new(60.0, 35.0, PositionMode::Flow).offset(0.0, 5.0)));
        container.add(block(10.0, 10.0, PositionMode::Flow));
        assert_eq!(placed_at(&container, 0), (0.0, 0.0));
        assert_eq!(placed_at(&container, 1), (0.0, 25.0));
        assert_eq!(placed_at(&container, 2), (0.0, 65.0));
    }

    #[test]
    fn flow_starts_at_the_inner_offset() {
        let mut container: Container<Dyn> = Container::new(300.0, 300.0);
        container.set_inner_offset(8.0, 12.0);
        container.add(block(40.0, 20.0, PositionMode::Flow));
        container.add(block(40.0, 20.0, PositionMode::Flow));
        assert_eq!(placed_at(&container, 0), (8.0, 12.0));
        assert_eq!(placed_at(&container, 1), (8.0, 32.0));
    }

    #[test]
    fn auto_size_fits_flow_content_plus_inner_offsets() {
        let mut container: Container<Dyn> = Container::new(500.0, 500.0);
        container.set_inner_offset(4.0, 6.0);
        container.add(block(30.0, 10.0, PositionMode::Flow));
        container.add(Box::new(Block::new(50.0, 20.0, PositionMode::Flow).offset(0.0, 2.0)));
        container.set_width_mode(SizeMode::Auto);
        container.set_height_mode(SizeMode::Auto);

        assert_eq!((container.base().width(), container.base().height()), (58.0, 42.0));
        assert!(container.base_mut().take_changes().resized);

        let before: Vec<_> = (0..container.len()).map(|i| placed_at(&container, i)).collect();
        container.refresh();
        let after: Vec<_> = (0..container.len()).map(|i| placed_at(&container, i)).collect();
        assert_eq!(before, after);
        assert!(!container.base_mut().take_changes().resized);
    }

    #[test]
    fn auto_width_leaves_height_alone() {
        let mut container: Container<Dyn> = Container::new(500.0, 80.0);
        container.add(block(30.0, 10.0, PositionMode::Flow));
        container.set_width_mode(SizeMode::Auto);
        assert_eq!((container.base().width(), container.base().height()), (30.0, 80.0));
    }

    #[test]
    fn anchored_children_follow_an_auto_resize_in_the_same_pass() {
        let mut container: Container<Dyn> = Container::new(500.0, 500.0);
        container.add(block(10.0, 10.0, PositionMode::BottomRight));
        container.add(block(100.0, 40.0, PositionMode::Flow));
        container.set_width_mode(SizeMode::Auto);
        container.set_height_mode(SizeMode::Auto);
        assert_eq!(placed_at(&container, 0), (90.0, 30.0));
    }

    #[test]
    fn update_relays_out_after_a_child_resizes() {
        let mut container: Container<Dyn> = Container::new(300.0, 300.0);
        container.add(block(40.0, 20.0, PositionMode::Flow));
        container.add(block(40.0, 20.0, PositionMode::Flow));
        container.child_mut(0).unwrap().base_mut().set_size(40.0, 50.0);
        assert_eq!(placed_at(&container, 1), (0.0, 20.0));
        container.update();
        assert_eq!(placed_at(&container, 1), (0.0, 50.0));
    }

    #[test]
    fn update_relays_out_after_its_own_base_resizes() {
        let mut container: Container<Dyn> = Container::new(100.0, 100.0);
        container.add(block(10.0, 10.0, PositionMode::BottomRight));
        assert_eq!(placed_at(&container, 0), (90.0, 90.0));

        container.base_mut().set_size(200.0, 200.0);
        assert!(container.update().resized);
        assert_eq!(placed_at(&container, 0), (190.0, 190.0));
        assert!(!container.update().needs_layout());
    }

    #[test]
    fn oversized_centred_child_rounds_towards_zero() {
        let mut container: Container<Dyn> = Container::new(10.0, 10.0);
        container.add(block(21.0, 21.0, PositionMode::Center));
        assert_eq!(placed_at(&container, 0), (-5.0, -5.0));
    }

    #[test]
    fn update_reports_an_auto_resize_to_the_parent() {
        let mut container: Container<Dyn> = Container::new(10.0, 10.0);
        container.set_height_mode(SizeMode::Auto);
        container.base_mut().take_changes();
        container.add(block(40.0, 20.0, PositionMode::Flow));
        assert!(container.update().resized);
        assert!(!container.update().resized);
    }

    #[test]
    fn nested_containers_inherit_the_parent_placement() {
        let mut inner: Container<Dyn> = Container::new(100.0, 100.0);
        inner.base_mut().set_offset(10.0, 20.0);
        inner.add(Box::new(Block::new(5.0, 5.0, PositionMode::TopLeft).offset(1.0, 2.0)));

        let mut outer: Container<Dyn> = Container::new(400.0, 400.0);
        outer.set_transform(moved_to(100.0, 100.0));
        outer.add(Box::new(inner));

        assert_eq!(placed_at(&outer, 0), (110.0, 120.0));
        outer.set_transform(moved_to(0.0, 0.0));
        assert_eq!(placed_at(&outer, 0), (10.0, 20.0));
    }

    #[test]
    fn destroy_reaches_every_descendant_exactly_once() {
        let counter = Rc::new(Cell::new(0));
        let leaf = |c: &Rc<Cell<u32>>| -> Dyn {
            Box::new(Block::new(1.0, 1.0, PositionMode::Flow).counting(c))
        };

        let mut deepest: Container<Dyn> = Container::new(10.0, 10.0);
        deepest.add(leaf(&counter));
        deepest.add(leaf(&counter));
        let mut middle: Container<Dyn> = Container::new(10.0, 10.0);
        middle.add(leaf(&counter));
        middle.add(Box::new(deepest));
        let mut root: Container<Dyn> = Container::new(10.0, 10.0);
        root.add(leaf(&counter));
        root.add(Box::new(middle));

        root.destroy();
        assert_eq!(counter.get(), 4);
        root.destroy();
        assert_eq!(counter.get(), 4);
    }

    #[test]
    fn removed_children_are_handed_back_and_the_rest_reflow() {
        let counter = Rc::new(Cell::new(0));
        let mut container: Container<Dyn> = Container::new(100.0, 100.0);
        container.add(Box::new(Block::new(10.0, 30.0, PositionMode::Flow).counting(&counter)));
        container.add(block(10.0, 10.0, PositionMode::Flow));

        let mut removed = container
            .remove_first(|c| c.base().height() == 30.0)
            .expect("child present");
        assert_eq!(container.len(), 1);
        assert_eq!(placed_at(&container, 0), (0.0, 0.0));

        removed.destroy();
        assert_eq!(counter.get(), 1);
        assert!(container.remove_first(|c| c.base().height() == 30.0).is_none());
    }

    #[test]
    fn background_renders_beneath_children() {
        let mut container: Container<Dyn> = Container::new(40.0, 20.0);
        container.set_background([0.0, 0.0, 0.0, 0.5], [0.0, 0.0, 0.1, 0.1]);
        let mut batch = GuiBatch::new(100.0, 100.0);
        container.render(&mut batch);
        assert_eq!(batch.vertices().len(), 4);
        assert_eq!(batch.vertices()[2].position, [40.0, 20.0]);
    }
}
