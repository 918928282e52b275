//! Companion artifacts written next to a generated model.
//!
//! Every artifact sits behind its own config toggle. Class files are only
//! created when missing; route files are appended to.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::codegen::controller::{controller_class_name, render_controller, ControllerTemplate};
use crate::codegen::repository::{base_files, render_repository, repository_class_name, BaseDir};
use crate::codegen::request::{
    render_request, request_class_name, retype_controller_action, RequestKind,
};
use crate::codegen::resource::{render_resource, resource_class_name};
use crate::codegen::routes::{
    api_resource_route, append_route, controller_reference, resource_route,
};
use crate::codegen::join_namespace;
use crate::config::Config;
use crate::diagnostic::{GeneratorError, Result};
use crate::ir::Model;

/// Sub-namespace and directory of API controllers.
const API_SEGMENT: &str = "Api";

/// Where companion artifacts go.
pub struct Scaffolder<'a> {
    /// Project root; route files are relative to it.
    pub root: &'a Path,
    /// Application directory; class files are relative to it.
    pub app_dir: &'a Path,
    pub config: &'a Config,
}

impl Scaffolder<'_> {
    /// Writes every enabled artifact for `model`, returning the touched files.
    pub fn run(&self, model: &Model) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        if self.config.is_enabled("controller") {
            let path = self
                .controller(model, false)
                .map_err(|e| GeneratorError::scaffold("controller", e))?;
            written.extend(path);
        }
        if self.config.is_enabled("api_controller") {
            let path = self
                .controller(model, true)
                .map_err(|e| GeneratorError::scaffold("api controller", e))?;
            written.extend(path);
        }
        if self.config.is_enabled("request") {
            let paths = self
                .requests(model)
                .map_err(|e| GeneratorError::scaffold("requests", e))?;
            written.extend(paths);
        }
        if self.config.is_enabled("resource") {
            let path = self
                .resource(model)
                .map_err(|e| GeneratorError::scaffold("resource", e))?;
            written.extend(path);
        }
        if self.config.is_enabled("routes") {
            let path = self
                .routes(model, false)
                .map_err(|e| GeneratorError::scaffold("routes", e))?;
            written.extend(path);
        }
        if self.config.is_enabled("api_routes") {
            let path = self
                .routes(model, true)
                .map_err(|e| GeneratorError::scaffold("api routes", e))?;
            written.extend(path);
        }
        if self.config.is_enabled("repository") {
            let paths = self
                .repository(model)
                .map_err(|e| GeneratorError::scaffold("repository", e))?;
            written.extend(paths);
        }

        Ok(written)
    }

    fn app_namespace(&self) -> String {
        self.config
            .get_str("app_namespace")
            .unwrap_or("App")
            .trim_matches('\\')
            .to_string()
    }

    fn controller_path(&self, api: bool) -> String {
        let base = self.config.get_str("controller_path").unwrap_or("").trim_matches('/');
        match (base.is_empty(), api) {
            (_, false) => base.to_string(),
            (true, true) => API_SEGMENT.to_string(),
            (false, true) => format!("{base}/{API_SEGMENT}"),
        }
    }

    fn request_classes(&self, model: &Model) -> Result<(String, String)> {
        let namespace = self.config.require_str("request_namespace")?.trim_matches('\\');
        Ok((
            format!("{}\\{}", namespace, request_class_name(model, RequestKind::Create)),
            format!("{}\\{}", namespace, request_class_name(model, RequestKind::Update)),
        ))
    }

    fn controller(&self, model: &Model, api: bool) -> Result<Option<PathBuf>> {
        let sub_path = self.controller_path(api);
        let controllers_namespace = join_namespace(&self.app_namespace(), "Http/Controllers");
        let requests = if self.config.is_enabled("request") {
            Some(self.request_classes(model)?)
        } else {
            None
        };
        let resource = if api && self.config.is_enabled("resource") {
            let namespace = self.config.require_str("resource_namespace")?;
            Some(join_namespace(namespace, &resource_class_name(model)))
        } else {
            None
        };

        let template = ControllerTemplate {
            model,
            namespace: join_namespace(&controllers_namespace, &sub_path),
            base_controller: format!("{}\\Controller", controllers_namespace),
            requests,
            resource,
            api,
        };

        let dir = self.app_dir.join("Http").join("Controllers").join(&sub_path);
        let path = dir.join(format!("{}.php", template.class_name()));
        write_if_missing(&path, &render_controller(&template))
    }

    fn requests(&self, model: &Model) -> Result<Vec<PathBuf>> {
        let namespace = self.config.require_str("request_namespace")?;
        let dir = self.class_dir("request_path")?;
        let (create, update) = self.request_classes(model)?;

        let mut written = Vec::new();
        for (kind, class) in [(RequestKind::Create, create), (RequestKind::Update, update)] {
            let path = dir.join(format!("{}.php", request_class_name(model, kind)));
            written.extend(write_if_missing(&path, &render_request(model, kind, namespace))?);
            written.extend(self.retype_controllers(model, kind, &class)?);
        }
        Ok(written)
    }

    /// Types `store`/`update` of existing controllers for `model` with the
    /// generated request.
    fn retype_controllers(
        &self,
        model: &Model,
        kind: RequestKind,
        request_class: &str,
    ) -> Result<Vec<PathBuf>> {
        let file_name = format!("{}.php", controller_class_name(model));
        let mut updated = Vec::new();

        for entry in WalkDir::new(self.app_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && e.file_name().to_string_lossy() == file_name)
        {
            let path = entry.path();
            let source = read(path)?;
            if let Some(retyped) = retype_controller_action(&source, kind, request_class) {
                write(path, &retyped)?;
                debug!(path = %path.display(), action = kind.action(), "controller retyped");
                updated.push(path.to_path_buf());
            }
        }
        Ok(updated)
    }

    fn resource(&self, model: &Model) -> Result<Option<PathBuf>> {
        let namespace = self.config.require_str("resource_namespace")?;
        let path = self
            .class_dir("resource_path")?
            .join(format!("{}.php", resource_class_name(model)));
        write_if_missing(&path, &render_resource(model, namespace))
    }

    fn routes(&self, model: &Model, api: bool) -> Result<Option<PathBuf>> {
        let key = if api { "api_routes_path" } else { "routes_path" };
        let path = self.root.join(self.config.require_str(key)?);
        let controller = controller_reference(
            &self.controller_path(api),
            &controller_class_name(model),
        );
        let line = if api {
            api_resource_route(&model.table_name, &controller)
        } else {
            resource_route(&model.table_name, &controller)
        };

        let content = if path.exists() { read(&path)? } else { String::new() };
        match append_route(&content, &line) {
            Some(updated) => {
                ensure_parent(&path)?;
                write(&path, &updated)?;
                info!(path = %path.display(), "route registered");
                Ok(Some(path))
            }
            None => {
                debug!(path = %path.display(), "route already registered");
                Ok(None)
            }
        }
    }

    fn repository(&self, model: &Model) -> Result<Vec<PathBuf>> {
        let app_namespace = self.app_namespace();
        let mut written = Vec::new();

        for (dir, name, content) in base_files(&app_namespace) {
            let dir = match dir {
                BaseDir::Repositories => self.app_dir.join("Repositories"),
                BaseDir::Exceptions => self.app_dir.join("Exceptions"),
            };
            written.extend(write_if_missing(&dir.join(name), &content)?);
        }

        let namespace = self.config.require_str("repository_namespace")?;
        let path = self
            .class_dir("repository_path")?
            .join(format!("{}.php", repository_class_name(model)));
        written.extend(write_if_missing(
            &path,
            &render_repository(model, namespace, &app_namespace),
        )?);
        Ok(written)
    }

    fn class_dir(&self, key: &str) -> Result<PathBuf> {
        let path = Path::new(self.config.require_str(key)?);
        Ok(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.app_dir.join(path)
        })
    }
}

fn write_if_missing(path: &Path, content: &str) -> Result<Option<PathBuf>> {
    if path.exists() {
        debug!(path = %path.display(), "exists, left untouched");
        return Ok(None);
    }
    ensure_parent(path)?;
    write(path, content)?;
    info!(path = %path.display(), "companion written");
    Ok(Some(path.to_path_buf()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|_| GeneratorError::DirectoryNotCreated {
            path: parent.to_path_buf(),
        })?;
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e.to_string()))
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| GeneratorError::io(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post() -> Model {
        let mut model = Model::new();
        model.class_name = "Post".to_string();
        model.namespace = "App\\Models".to_string();
        model.table_name = "posts".to_string();
        model
    }

    #[test]
    fn test_nothing_written_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        let config = Config::defaults();
        let scaffolder = Scaffolder { root: dir.path(), app_dir: &app, config: &config };
        assert!(scaffolder.run(&post()).unwrap().is_empty());
        assert!(!app.exists());
    }

    #[test]
    fn test_all_writes_controller_requests_routes_and_repository() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        let config = Config::new([("all", json!(true))], None);
        let scaffolder = Scaffolder { root: dir.path(), app_dir: &app, config: &config };

        scaffolder.run(&post()).unwrap();

        let controller =
            std::fs::read_to_string(app.join("Http/Controllers/PostController.php")).unwrap();
        assert!(controller.contains("public function store(CreatePostRequest $request)"));
        assert!(app.join("Http/Requests/CreatePostRequest.php").exists());
        assert!(app.join("Http/Requests/UpdatePostRequest.php").exists());
        assert!(app.join("Repositories/PostRepository.php").exists());
        assert!(app.join("Repositories/EloquentRepository.php").exists());
        assert!(app.join("Exceptions/GenericException.php").exists());

        let routes = std::fs::read_to_string(dir.path().join("routes/web.php")).unwrap();
        assert!(routes.contains("Route::resource(\"posts\", 'PostController');"));

        // A second run leaves the routes file alone.
        scaffolder.run(&post()).unwrap();
        let again = std::fs::read_to_string(dir.path().join("routes/web.php")).unwrap();
        assert_eq!(routes, again);
    }

    #[test]
    fn test_api_controller_lives_under_api_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        let config = Config::new([("all_api", json!(true))], None);
        let scaffolder = Scaffolder { root: dir.path(), app_dir: &app, config: &config };

        scaffolder.run(&post()).unwrap();

        let controller =
            std::fs::read_to_string(app.join("Http/Controllers/Api/PostController.php")).unwrap();
        assert!(controller.contains("namespace App\\Http\\Controllers\\Api;"));
        assert!(controller.contains("use App\\Http\\Resources\\PostResource;"));
        assert!(app.join("Http/Resources/PostResource.php").exists());
        let routes = std::fs::read_to_string(dir.path().join("routes/api.php")).unwrap();
        assert!(routes.contains("Route::apiResource(\"posts\", 'Api/PostController');"));
    }

    #[test]
    fn test_requests_retype_existing_controllers() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        let existing = app.join("Http/Controllers/Admin/PostController.php");
        std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
        std::fs::write(
            &existing,
            "public function store(Request $request) {}\npublic function update(Request $request, Post $post) {}",
        )
        .unwrap();

        let config = Config::new([("request", json!(true))], None);
        let scaffolder = Scaffolder { root: dir.path(), app_dir: &app, config: &config };
        scaffolder.run(&post()).unwrap();

        let source = std::fs::read_to_string(&existing).unwrap();
        assert!(source.contains("store(\\App\\Http\\Requests\\CreatePostRequest $request)"));
        assert!(source.contains("update(\\App\\Http\\Requests\\UpdatePostRequest $request"));
    }

    #[test]
    fn test_existing_controller_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        let existing = app.join("Http/Controllers/PostController.php");
        std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
        std::fs::write(&existing, "<?php // hand written").unwrap();

        let config = Config::new([("controller", json!(true))], None);
        let scaffolder = Scaffolder { root: dir.path(), app_dir: &app, config: &config };
        assert!(scaffolder.run(&post()).unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "<?php // hand written");
    }
}
