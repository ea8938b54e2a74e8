pub(crate) mod compositor;
pub(crate) mod depth;
pub(crate) mod hole_fill;
pub(crate) mod renderer;
