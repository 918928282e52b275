//! Form request classes.

use super::php::render_model;
use crate::ir::{Method, Model};

/// Which action a request validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Create,
    Update,
}

impl RequestKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            RequestKind::Create => "Create",
            RequestKind::Update => "Update",
        }
    }

    /// Controller action receiving this request.
    pub fn action(&self) -> &'static str {
        match self {
            RequestKind::Create => "store",
            RequestKind::Update => "update",
        }
    }
}

pub fn request_class_name(model: &Model, kind: RequestKind) -> String {
    format!("{}{}Request", kind.prefix(), model.class_name)
}

/// Builds the request class; validation defers to the model's static rules.
pub fn build_request(model: &Model, kind: RequestKind, namespace: &str) -> Model {
    let mut request = Model::new();
    request.class_name = request_class_name(model, kind);
    request.base_class_name = "FormRequest".to_string();
    request.namespace = namespace.trim_matches('\\').to_string();
    request.add_use("Illuminate\\Foundation\\Http\\FormRequest");
    request.add_use(model.full_class_name());

    request.add_method(
        Method::new("authorize", "return true;").with_doc(&[
            "Determine if the user is authorized to make this request.",
            "",
            "@return bool",
        ]),
    );
    request.add_method(
        Method::new("rules", format!("return {}::$rules;", model.class_name)).with_doc(&[
            "Get the validation rules that apply to the request.",
            "",
            "@return array",
        ]),
    );
    request
}

pub fn render_request(model: &Model, kind: RequestKind, namespace: &str) -> String {
    render_model(&build_request(model, kind, namespace))
}

/// Retypes `action(Request` in a controller source to the given request class.
///
/// Returns `None` when the source has no untyped signature for the action.
pub fn retype_controller_action(source: &str, kind: RequestKind, request_class: &str) -> Option<String> {
    let search = format!("public function {}(Request", kind.action());
    if !source.contains(&search) {
        return None;
    }
    let replacement = format!(
        "public function {}(\\{}",
        kind.action(),
        request_class.trim_start_matches('\\')
    );
    Some(source.replace(&search, &replacement))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag() -> Model {
        let mut model = Model::new();
        model.class_name = "Tag".to_string();
        model.namespace = "App\\Models".to_string();
        model
    }

    #[test]
    fn test_render_request() {
        let php = render_request(&tag(), RequestKind::Update, "App\\Http\\Requests");
        assert!(php.contains("namespace App\\Http\\Requests;"));
        assert!(php.contains("use App\\Models\\Tag;"));
        assert!(php.contains("use Illuminate\\Foundation\\Http\\FormRequest;"));
        assert!(php.contains("class UpdateTagRequest extends FormRequest"));
        assert!(php.contains("return Tag::$rules;"));
        assert!(php.contains("return true;"));
    }

    #[test]
    fn test_retype_controller_action() {
        let source = "public function store(Request $request)\npublic function update(Request $request, Tag $tag)";
        let updated = retype_controller_action(
            source,
            RequestKind::Create,
            "App\\Http\\Requests\\CreateTagRequest",
        )
        .unwrap();
        assert!(updated.contains("public function store(\\App\\Http\\Requests\\CreateTagRequest $request)"));
        assert!(updated.contains("public function update(Request $request"));

        assert!(retype_controller_action(&updated, RequestKind::Create, "X").is_none());
    }
}
