//! Repository classes.
//!
//! The shared base files are embedded at compile time and only written when
//! missing from the application.

use crate::ir::Model;

/// Repository interface.
pub const REPOSITORY_CONTRACT: &str = include_str!("../../stubs/repositories/RepositoryContract.php");
/// Abstract Eloquent-backed repository.
pub const ELOQUENT_REPOSITORY: &str = include_str!("../../stubs/repositories/EloquentRepository.php");
/// Exception thrown by repositories.
pub const GENERIC_EXCEPTION: &str = include_str!("../../stubs/repositories/GenericException.php");

/// Which directory a base file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDir {
    Repositories,
    Exceptions,
}

/// Base files as (directory, file name, content) triples.
pub fn base_files(app_namespace: &str) -> Vec<(BaseDir, &'static str, String)> {
    let fill = |stub: &str| stub.replace("{{app_namespace}}", app_namespace.trim_matches('\\'));
    vec![
        (BaseDir::Exceptions, "GenericException.php", fill(GENERIC_EXCEPTION)),
        (BaseDir::Repositories, "RepositoryContract.php", fill(REPOSITORY_CONTRACT)),
        (BaseDir::Repositories, "EloquentRepository.php", fill(ELOQUENT_REPOSITORY)),
    ]
}

pub fn repository_class_name(model: &Model) -> String {
    format!("{}Repository", model.class_name)
}

/// Renders the model repository, bound to the model through its constructor.
///
/// `app_namespace` locates the shared `EloquentRepository` base class.
pub fn render_repository(model: &Model, namespace: &str, app_namespace: &str) -> String {
    let namespace = namespace.trim_matches('\\');
    let base_namespace = format!("{}\\Repositories", app_namespace.trim_matches('\\'));

    let mut imports = vec![model.full_class_name()];
    if base_namespace != namespace {
        imports.push(format!("{}\\EloquentRepository", base_namespace));
    }
    imports.sort();

    let mut output = String::new();
    output.push_str("<?php\n\n");
    output.push_str(&format!("namespace {};\n\n", namespace));
    for import in &imports {
        output.push_str(&format!("use {};\n", import));
    }
    output.push('\n');
    output.push_str(&format!(
        "class {} extends EloquentRepository\n{{\n",
        repository_class_name(model)
    ));
    output.push_str("    /**\n");
    output.push_str(&format!("     * @param {} $model\n", model.class_name));
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public function __construct({} $model)\n    {{\n",
        model.class_name
    ));
    output.push_str("        $this->model = $model;\n");
    output.push_str("    }\n");
    output.push_str("}\n");
    output
}
