//! PHP code generation.
//!
//! The model renderer turns the finished [`Model`](crate::ir::Model) into a
//! class file. The companion renderers are stateless and parameterised by the
//! model plus a few names taken from the config; writing their output is the
//! driver's job.

pub mod controller;
pub mod php;
pub mod repository;
pub mod request;
pub mod resource;
pub mod routes;

pub use php::{php_string, render_model, render_value};

/// Joins a namespace and a `/` separated sub path (`App\Http`, `Admin/Api`
/// becomes `App\Http\Admin\Api`).
pub fn join_namespace(namespace: &str, sub_path: &str) -> String {
    let mut parts: Vec<&str> = namespace
        .split('\\')
        .filter(|p| !p.is_empty())
        .collect();
    parts.extend(sub_path.split(['/', '\\']).filter(|p| !p.is_empty()));
    parts.join("\\")
}
