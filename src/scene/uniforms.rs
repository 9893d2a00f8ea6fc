use glam::Vec2;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub const U_TIME: &str = "u_time";
pub const U_RESOLUTION: &str = "u_resolution";
pub const U_MOUSE: &str = "u_mouse";

/// A single shader input value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
}

/// Named shader inputs, mutated by the frame tick and read by the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformBag {
    values: BTreeMap<String, UniformValue>,
}

/// Uniform bag shared by every material built over it
pub type SharedUniforms = Rc<RefCell<UniformBag>>;

impl UniformBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag holding the time, resolution and mouse inputs of the matrix shaders
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let mut bag = Self::new();
        bag.set(U_MOUSE, UniformValue::Vec2(Vec2::new(width / 2.0, height / 2.0)));
        bag.set(U_RESOLUTION, UniformValue::Vec2(Vec2::new(width, height)));
        bag.set(U_TIME, UniformValue::Float(0.0));
        bag
    }

    pub fn shared(self) -> SharedUniforms {
        Rc::new(RefCell::new(self))
    }

    pub fn set(&mut self, name: &str, value: UniformValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(v) => Some(v),
            UniformValue::Vec2(_) => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<Vec2> {
        match self.get(name)? {
            UniformValue::Vec2(v) => Some(v),
            UniformValue::Float(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_bag_defaults() {
        let bag = UniformBag::for_viewport(800.0, 600.0);

        assert_eq!(bag.float(U_TIME), Some(0.0));
        assert_eq!(bag.vec2(U_RESOLUTION), Some(Vec2::new(800.0, 600.0)));
        assert_eq!(bag.vec2(U_MOUSE), Some(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn test_typed_getters_reject_wrong_kind() {
        let bag = UniformBag::for_viewport(10.0, 10.0);
        assert_eq!(bag.vec2(U_TIME), None);
        assert_eq!(bag.float(U_MOUSE), None);
        assert_eq!(bag.float("u_missing"), None);
    }

    #[test]
    fn test_shared_bag_sees_writes() {
        let shared = UniformBag::for_viewport(1.0, 1.0).shared();
        let reader = Rc::clone(&shared);

        shared.borrow_mut().set(U_TIME, UniformValue::Float(2.5));
        assert_eq!(reader.borrow().float(U_TIME), Some(2.5));
    }
}
