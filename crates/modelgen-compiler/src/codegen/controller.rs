//! Resource controllers.

use super::php::render_doc;
use crate::ir::Model;
use crate::naming::{camel, pluralize, singularize};

/// Inputs for a resource controller.
pub struct ControllerTemplate<'a> {
    pub model: &'a Model,
    /// Namespace of the controller class.
    pub namespace: String,
    /// Fully qualified base controller class.
    pub base_controller: String,
    /// Fully qualified create and update request classes, when generated.
    pub requests: Option<(String, String)>,
    /// Fully qualified API resource class, when generated.
    pub resource: Option<String>,
    /// API controllers skip the `create` and `edit` form actions.
    pub api: bool,
}

impl ControllerTemplate<'_> {
    pub fn class_name(&self) -> String {
        controller_class_name(self.model)
    }
}

pub fn controller_class_name(model: &Model) -> String {
    format!("{}Controller", model.class_name)
}

/// Renders the controller class.
pub fn render_controller(template: &ControllerTemplate) -> String {
    let model = template.model;
    let class = &model.class_name;
    let var = singularize(&camel(class));
    let plural = pluralize(&var);
    let view = &model.table_name;

    let (create_request, update_request) = match &template.requests {
        Some((create, update)) => (short(create).to_string(), short(update).to_string()),
        None => ("Request".to_string(), "Request".to_string()),
    };
    let input = if template.requests.is_some() {
        "$request->validated()"
    } else {
        "$request->all()"
    };

    let mut output = String::new();
    output.push_str("<?php\n\n");
    output.push_str(&format!("namespace {};\n\n", template.namespace));

    let mut imports = vec![model.full_class_name()];
    if short(&template.base_controller) != "Controller"
        || namespace_of(&template.base_controller) != template.namespace
    {
        imports.push(template.base_controller.clone());
    }
    match &template.requests {
        Some((create, update)) => {
            imports.push(create.clone());
            imports.push(update.clone());
        }
        None => imports.push("Illuminate\\Http\\Request".to_string()),
    }
    if let Some(resource) = &template.resource {
        imports.push(resource.clone());
    }
    imports.sort();
    imports.dedup();
    for import in &imports {
        output.push_str(&format!("use {};\n", import));
    }
    output.push('\n');

    output.push_str(&format!(
        "class {} extends {}\n{{\n",
        template.class_name(),
        short(&template.base_controller)
    ));

    let mut actions = Vec::new();
    let wrap_one = |expr: &str| match &template.resource {
        Some(resource) => format!("new {}({})", short(resource), expr),
        None => expr.to_string(),
    };

    if template.api {
        let index = match &template.resource {
            Some(resource) => format!("return {}::collection({}::paginate());", short(resource), class),
            None => format!("return {}::paginate();", class),
        };
        actions.push(action("Display a listing of the resource.", "index", "", &index));
        actions.push(action(
            "Store a newly created resource in storage.",
            "store",
            &format!("{create_request} $request"),
            &format!("${var} = {class}::create({input});\n\nreturn {};", wrap_one(&format!("${var}"))),
        ));
        actions.push(action(
            "Display the specified resource.",
            "show",
            &format!("{class} ${var}"),
            &format!("return {};", wrap_one(&format!("${var}"))),
        ));
        actions.push(action(
            "Update the specified resource in storage.",
            "update",
            &format!("{update_request} $request, {class} ${var}"),
            &format!("${var}->update({input});\n\nreturn {};", wrap_one(&format!("${var}"))),
        ));
        actions.push(action(
            "Remove the specified resource from storage.",
            "destroy",
            &format!("{class} ${var}"),
            &format!("${var}->delete();\n\nreturn response()->noContent();"),
        ));
    } else {
        actions.push(action(
            "Display a listing of the resource.",
            "index",
            "",
            &format!("${plural} = {class}::paginate();\n\nreturn view('{view}.index', compact('{plural}'));"),
        ));
        actions.push(action(
            "Show the form for creating a new resource.",
            "create",
            "",
            &format!("return view('{view}.create');"),
        ));
        actions.push(action(
            "Store a newly created resource in storage.",
            "store",
            &format!("{create_request} $request"),
            &format!("${var} = {class}::create({input});\n\nreturn redirect()->route('{view}.show', ${var});"),
        ));
        actions.push(action(
            "Display the specified resource.",
            "show",
            &format!("{class} ${var}"),
            &format!("return view('{view}.show', compact('{var}'));"),
        ));
        actions.push(action(
            "Show the form for editing the specified resource.",
            "edit",
            &format!("{class} ${var}"),
            &format!("return view('{view}.edit', compact('{var}'));"),
        ));
        actions.push(action(
            "Update the specified resource in storage.",
            "update",
            &format!("{update_request} $request, {class} ${var}"),
            &format!("${var}->update({input});\n\nreturn redirect()->route('{view}.show', ${var});"),
        ));
        actions.push(action(
            "Remove the specified resource from storage.",
            "destroy",
            &format!("{class} ${var}"),
            &format!("${var}->delete();\n\nreturn redirect()->route('{view}.index');"),
        ));
    }

    output.push_str(&actions.join("\n"));
    output.push_str("}\n");
    output
}

fn action(summary: &str, name: &str, params: &str, body: &str) -> String {
    let mut output = String::new();
    render_doc(&[summary.to_string()], &mut output);
    output.push_str(&format!("    public function {name}({params})\n    {{\n"));
    for line in body.lines() {
        if line.is_empty() {
            output.push('\n');
        } else {
            output.push_str(&format!("        {line}\n"));
        }
    }
    output.push_str("    }\n");
    output
}

fn short(class: &str) -> &str {
    crate::naming::short_class_name(class)
}

fn namespace_of(class: &str) -> &str {
    class.rsplit_once('\\').map(|(ns, _)| ns).unwrap_or("")
}
