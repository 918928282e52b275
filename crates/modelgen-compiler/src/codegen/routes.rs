//! Route registration lines.

/// `Route::resource` line for a web controller.
pub fn resource_route(table: &str, controller: &str) -> String {
    format!("Route::resource(\"{}\", '{}');", table, controller)
}

/// `Route::apiResource` line for an API controller.
pub fn api_resource_route(table: &str, controller: &str) -> String {
    format!("Route::apiResource(\"{}\", '{}');", table, controller)
}

/// Controller reference relative to the controllers namespace root.
pub fn controller_reference(controller_path: &str, class_name: &str) -> String {
    let path = controller_path.trim_matches('/');
    if path.is_empty() {
        class_name.to_string()
    } else {
        format!("{}/{}", path, class_name)
    }
}

/// Appends `line` to a routes file, or returns `None` when it is already there.
pub fn append_route(content: &str, line: &str) -> Option<String> {
    if content.contains(line) {
        return None;
    }
    let mut output = content.to_string();
    if output.is_empty() {
        output.push_str("<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n");
    }
    output.push_str("\n\n");
    output.push_str(line);
    Some(output)
}
