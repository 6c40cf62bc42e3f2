//! View projection interface
//!
//! A view (rectilinear, fisheye, little planet, ...) supplies the GLSL that
//! projects vertices the way the panorama is projected, and the uniform
//! values that code needs every frame.

use std::collections::BTreeMap;

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};

/// Value bound to a shader uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// `int` / `bool`
    Int(i32),
    /// `float`
    Float(f32),
    /// `vec2`
    Vec2(Vec2),
    /// `vec3`
    Vec3(Vec3),
    /// `vec4`
    Vec4(Vec4),
    /// `mat4`
    Mat4(Mat4),
}

/// Uniform names of a program mapped to the value the view wants bound
///
/// `None` means the view has nothing for that uniform.
pub type UniformMap = BTreeMap<String, Option<UniformValue>>;

/// Current view projection
pub trait View {
    /// GLSL uniform declarations needed by the projection code
    fn uniforms_def(&self) -> &str;

    /// Fill in the values of the uniforms this view knows about
    fn update_uniforms(&self, uniforms: &mut UniformMap);

    /// Vertex shader of the view's own projection material
    fn projection_vertex_shader(&self) -> &str;
}

/// Linked GPU program of a mesh material
pub trait ShaderProgram {
    /// Whether the program has been compiled and linked
    fn is_linked(&self) -> bool;

    /// Make this the current program
    fn use_program(&mut self);

    /// Names of the active uniforms
    fn uniform_names(&self) -> Vec<String>;

    /// Bind a uniform value
    fn set_uniform(&mut self, name: &str, value: &UniformValue);
}

/// Shader sources handed to a material before compilation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    /// Material name
    pub name: String,
    /// Vertex shader source
    pub vertex_shader: String,
    /// Fragment shader source
    pub fragment_shader: String,
}

impl ShaderSource {
    /// Sources from a vertex and fragment shader
    pub fn new(name: impl Into<String>, vertex_shader: impl Into<String>, fragment_shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertex_shader: vertex_shader.into(),
            fragment_shader: fragment_shader.into(),
        }
    }
}
