//! Render hooks attached to meshes of interactive layers
//!
//! Layer meshes are drawn with the panorama's projection instead of a plain
//! perspective one. Two hooks make that happen:
//!
//! - [`ShaderHook`] runs once before a material compiles and splices the
//!   view's projection code into the vertex shader
//! - [`UniformHook`] runs before every draw and binds the view's uniform
//!   values on the mesh's program
//!
//! Both look up the viewer's current view at call time, so switching views
//! needs no re-preparation of meshes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::render::view::{ShaderProgram, ShaderSource, UniformMap, View};
use crate::scene::Material;
use crate::viewer::Viewer;

/// Placeholder replaced by the view's projection code
pub const PROJECT_VERTEX_INCLUDE: &str = "#include <project_vertex>";

/// Body of the first `main()` of a shader source
///
/// Takes the text after the first `main`, cuts it at the first `}` and
/// returns what follows the first `{`. Nested blocks are not supported.
pub fn extract_main_body(source: &str) -> Option<&str> {
    let (_, after_main) = source.split_once("main")?;
    let before_close = after_main.split('}').next()?;
    before_close.split('{').nth(1)
}

/// Prefix `vertex_shader` with uniform declarations and replace every
/// projection include with the body of `projection_shader`'s `main()`
///
/// A projection source without a `main()` body leaves the includes in
/// place.
pub fn inject_projection(uniforms_def: &str, vertex_shader: &str, projection_shader: &str) -> String {
    let shader = format!("{uniforms_def}\n{vertex_shader}");

    match extract_main_body(projection_shader) {
        Some(body) => shader.replace(PROJECT_VERTEX_INCLUDE, body),
        None => {
            log::warn!("Projection shader has no main() body, vertex shader left without projection code");
            shader
        }
    }
}

fn current_view(viewer: &Weak<RefCell<Viewer>>) -> Option<Rc<dyn View>> {
    let viewer = viewer.upgrade()?;
    let view = viewer.try_borrow().ok().map(|viewer| Rc::clone(&viewer.view));
    view
}

/// One-time shader injection hook
#[derive(Clone)]
pub struct ShaderHook {
    viewer: Weak<RefCell<Viewer>>,
}

impl ShaderHook {
    /// Hook reading the view of the given viewer
    pub fn new(viewer: Weak<RefCell<Viewer>>) -> Self {
        Self { viewer }
    }

    /// Rewrite the vertex shader of `shader`
    ///
    /// Returns `false` when the viewer is gone or busy and nothing was
    /// injected.
    pub fn inject(&self, shader: &mut ShaderSource) -> bool {
        log::debug!("Material '{}' before compile", shader.name);

        let Some(view) = current_view(&self.viewer) else {
            log::warn!("No view available to prepare material '{}'", shader.name);
            return false;
        };

        shader.vertex_shader = inject_projection(
            view.uniforms_def(),
            &shader.vertex_shader,
            view.projection_vertex_shader(),
        );
        true
    }
}

impl fmt::Debug for ShaderHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderHook")
            .field("viewer_alive", &(self.viewer.strong_count() > 0))
            .finish()
    }
}

/// Per-draw uniform update hook
#[derive(Clone)]
pub struct UniformHook {
    viewer: Weak<RefCell<Viewer>>,
}

impl UniformHook {
    /// Hook reading the view of the given viewer
    pub fn new(viewer: Weak<RefCell<Viewer>>) -> Self {
        Self { viewer }
    }

    /// Bind the view's uniform values on `program`
    ///
    /// Programs that are not linked yet are skipped. Only uniforms the
    /// program declares and the view provides are bound. Returns the
    /// number of bound uniforms.
    pub fn apply(&self, program: &mut dyn ShaderProgram) -> usize {
        if !program.is_linked() {
            return 0;
        }
        let Some(view) = current_view(&self.viewer) else {
            return 0;
        };

        program.use_program();

        let names = program.uniform_names();
        let mut uniforms: UniformMap = names.iter().map(|name| (name.clone(), None)).collect();
        view.update_uniforms(&mut uniforms);

        let mut bound = 0;
        for name in &names {
            if let Some(Some(value)) = uniforms.get(name) {
                program.set_uniform(name, value);
                bound += 1;
            }
        }

        log::trace!("Bound {bound}/{} view uniforms", names.len());
        bound
    }
}

impl fmt::Debug for UniformHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformHook")
            .field("viewer_alive", &(self.viewer.strong_count() > 0))
            .finish()
    }
}

impl From<&Material> for ShaderSource {
    fn from(material: &Material) -> Self {
        Self::new(&material.name, &material.vertex_shader, &material.fragment_shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::view::UniformValue;
    use crate::testing::{FakeProgram, Fixture, PROJECTION_SHADER, UNIFORMS_DEF};

    const MESH_SHADER: &str = "void main() {\n    #include <begin_vertex>\n    #include <project_vertex>\n}";

    #[test]
    fn test_extract_main_body() {
        let source = "uniform float tViewportResolution;\nvoid main() { gl_Position = project(position); }";
        assert_eq!(extract_main_body(source), Some(" gl_Position = project(position); "));
        assert_eq!(extract_main_body("void entry() {}"), None);
        assert_eq!(extract_main_body("void main()"), None);
    }

    #[test]
    fn test_inject_projection_replaces_every_include() {
        let vertex = format!("{PROJECT_VERTEX_INCLUDE}\n{PROJECT_VERTEX_INCLUDE}");
        let injected = inject_projection("uniform float a;", &vertex, "void main() {P}");
        assert_eq!(injected, "uniform float a;\nP\nP");
    }

    #[test]
    fn test_malformed_projection_keeps_prefix_only() {
        let injected = inject_projection("uniform float a;", MESH_SHADER, "no entry point");
        assert!(injected.starts_with("uniform float a;\n"));
        assert!(injected.contains(PROJECT_VERTEX_INCLUDE));
    }

    #[test]
    fn test_shader_hook_uses_current_view() {
        let fx = Fixture::new();
        let hook = ShaderHook::new(Rc::downgrade(&fx.viewer));
        let mut shader = ShaderSource::new("sphere", MESH_SHADER, "");

        assert!(hook.inject(&mut shader));
        assert!(shader.vertex_shader.starts_with(UNIFORMS_DEF));
        assert!(!shader.vertex_shader.contains(PROJECT_VERTEX_INCLUDE));
        assert!(shader.vertex_shader.contains(extract_main_body(PROJECTION_SHADER).unwrap()));
    }

    #[test]
    fn test_hooks_without_viewer_do_nothing() {
        let viewer = Fixture::new().viewer;
        let weak = Rc::downgrade(&viewer);
        drop(viewer);

        let mut shader = ShaderSource::new("sphere", MESH_SHADER, "");
        assert!(!ShaderHook::new(weak.clone()).inject(&mut shader));
        assert_eq!(shader.vertex_shader, MESH_SHADER);

        let mut program = FakeProgram::linked(&["tFov"]);
        assert_eq!(UniformHook::new(weak).apply(&mut program), 0);
    }

    #[test]
    fn test_uniform_hook_binds_known_values() {
        let fx = Fixture::new();
        let hook = UniformHook::new(Rc::downgrade(&fx.viewer));
        let mut program = FakeProgram::linked(&["tFov", "tUnknown", "modelViewMatrix"]);

        assert_eq!(hook.apply(&mut program), 1);
        assert!(program.used);
        assert_eq!(program.bound, vec![("tFov".to_string(), UniformValue::Float(90.0))]);
    }

    #[test]
    fn test_uniform_hook_skips_unlinked_program() {
        let fx = Fixture::new();
        let hook = UniformHook::new(Rc::downgrade(&fx.viewer));
        let mut program = FakeProgram::unlinked(&["tFov"]);

        assert_eq!(hook.apply(&mut program), 0);
        assert!(!program.used);
    }

    #[test]
    fn test_shader_source_from_material() {
        let material = Material::new("basic", MESH_SHADER);
        let source = ShaderSource::from(&material);
        assert_eq!(source.name, "basic");
        assert_eq!(source.vertex_shader, MESH_SHADER);
    }
}
