//! PHP source rendering for models.

use crate::ir::{Method, Model, Property, Value};

const INDENT: &str = "    ";

/// Renders `model` as a complete PHP class file.
pub fn render_model(model: &Model) -> String {
    let mut output = String::new();

    output.push_str("<?php\n\n");
    if !model.namespace.is_empty() {
        output.push_str(&format!("namespace {};\n\n", model.namespace));
    }

    let imports = imports(model);
    for import in &imports {
        output.push_str(&format!("use {};\n", import));
    }
    if !imports.is_empty() {
        output.push('\n');
    }

    // Class doc block
    if !model.virtual_properties().is_empty() {
        output.push_str("/**\n");
        for property in model.virtual_properties() {
            let typ = if property.nullable {
                format!("{}|null", property.typ)
            } else {
                property.typ.clone()
            };
            output.push_str(&format!(" * @property {} ${}\n", typ, property.name));
        }
        output.push_str(" */\n");
    }

    output.push_str(&format!(
        "class {} extends {}\n{{\n",
        model.class_name, model.base_class_name
    ));

    let mut sections: Vec<String> = Vec::new();

    let traits: Vec<&str> = model.capabilities().iter().map(|c| c.trait_name()).collect();
    if !traits.is_empty() {
        sections.push(format!("{INDENT}use {};\n", traits.join(", ")));
    }
    for property in model.properties() {
        sections.push(render_property(property));
    }
    for method in model.methods() {
        sections.push(render_method(method));
    }

    output.push_str(&sections.join("\n"));
    output.push_str("}\n");
    output
}

/// Imports sorted and deduplicated, including capability traits.
fn imports(model: &Model) -> Vec<String> {
    let mut imports: Vec<String> = model.uses().to_vec();
    imports.extend(model.capabilities().iter().map(|c| c.import().to_string()));
    imports.sort();
    imports.dedup();
    imports
}

pub(crate) fn render_doc(doc: &[String], output: &mut String) {
    if doc.is_empty() {
        return;
    }
    output.push_str(&format!("{INDENT}/**\n"));
    for line in doc {
        if line.is_empty() {
            output.push_str(&format!("{INDENT} *\n"));
        } else {
            output.push_str(&format!("{INDENT} * {}\n", line));
        }
    }
    output.push_str(&format!("{INDENT} */\n"));
}

fn render_property(property: &Property) -> String {
    let mut output = String::new();
    render_doc(&property.doc, &mut output);

    let modifiers = if property.is_static {
        format!("{} static", property.visibility.as_str())
    } else {
        property.visibility.as_str().to_string()
    };

    match &property.value {
        Some(value) => output.push_str(&format!(
            "{INDENT}{} ${} = {};\n",
            modifiers,
            property.name,
            render_value(value, 1)
        )),
        None => output.push_str(&format!("{INDENT}{} ${};\n", modifiers, property.name)),
    }
    output
}

pub(crate) fn render_method(method: &Method) -> String {
    let mut output = String::new();
    render_doc(&method.doc, &mut output);

    let return_type = method
        .return_type
        .as_ref()
        .map(|t| format!(": {t}"))
        .unwrap_or_default();
    output.push_str(&format!(
        "{INDENT}{} function {}(){}\n{INDENT}{{\n",
        method.visibility.as_str(),
        method.name,
        return_type
    ));
    for line in method.body.lines() {
        if line.is_empty() {
            output.push('\n');
        } else {
            output.push_str(&format!("{INDENT}{INDENT}{}\n", line));
        }
    }
    output.push_str(&format!("{INDENT}}}\n"));
    output
}

/// Renders a literal. `depth` is the indentation level of the line holding it.
pub fn render_value(value: &Value, depth: usize) -> String {
    let inner = INDENT.repeat(depth + 1);
    let outer = INDENT.repeat(depth);
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Str(s) => php_string(s),
        Value::List(items) if items.is_empty() => "[]".to_string(),
        Value::List(items) => {
            let mut output = String::from("[\n");
            for item in items {
                output.push_str(&format!("{inner}{},\n", php_string(item)));
            }
            output.push_str(&format!("{outer}]"));
            output
        }
        Value::Map(entries) if entries.is_empty() => "[]".to_string(),
        Value::Map(entries) => {
            let mut output = String::from("[\n");
            for (key, value) in entries {
                output.push_str(&format!("{inner}{} => {},\n", php_string(key), php_string(value)));
            }
            output.push_str(&format!("{outer}]"));
            output
        }
    }
}

/// Single-quoted PHP string literal.
pub fn php_string(s: &str) -> String {
    let mut output = String::with_capacity(s.len() + 2);
    output.push('\'');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => output.push_str("\\'"),
            '\\' if matches!(chars.peek(), None | Some(&'\\') | Some(&'\'')) => {
                output.push_str("\\\\")
            }
            c => output.push(c),
        }
    }
    output.push('\'');
    output
}
