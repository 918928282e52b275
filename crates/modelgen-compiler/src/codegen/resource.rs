//! JSON API resources.

use crate::ir::Model;

pub fn resource_class_name(model: &Model) -> String {
    format!("{}Resource", model.class_name)
}

/// Renders a `JsonResource` exposing every column and lazily every relation.
pub fn render_resource(model: &Model, namespace: &str) -> String {
    let mut output = String::new();
    output.push_str("<?php\n\n");
    output.push_str(&format!("namespace {};\n\n", namespace.trim_matches('\\')));
    output.push_str("use Illuminate\\Http\\Resources\\Json\\JsonResource;\n\n");
    output.push_str(&format!("/**\n * @mixin \\{}\n */\n", model.full_class_name()));
    output.push_str(&format!(
        "class {} extends JsonResource\n{{\n",
        resource_class_name(model)
    ));
    output.push_str("    /**\n");
    output.push_str("     * Transform the resource into an array.\n");
    output.push_str("     *\n");
    output.push_str("     * @param  \\Illuminate\\Http\\Request  $request\n");
    output.push_str("     * @return array\n");
    output.push_str("     */\n");
    output.push_str("    public function toArray($request)\n    {\n");
    output.push_str("        return [\n");
    for property in model.virtual_properties() {
        if model.method(&property.name).is_some() {
            output.push_str(&format!(
                "            '{0}' => $this->whenLoaded('{0}'),\n",
                property.name
            ));
        } else {
            output.push_str(&format!(
                "            '{0}' => $this->{0},\n",
                property.name
            ));
        }
    }
    output.push_str("        ];\n");
    output.push_str("    }\n");
    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Method, VirtualProperty};

    #[test]
    fn test_columns_and_relations() {
        let mut model = Model::new();
        model.class_name = "Post".to_string();
        model.namespace = "App\\Models".to_string();
        for (name, typ) in [("id", "int"), ("title", "string"), ("user", "User")] {
            model.add_virtual_property(VirtualProperty {
                name: name.to_string(),
                typ: typ.to_string(),
                nullable: false,
            });
        }
        model.add_method(Method::new("user", "return $this->belongsTo('App\\Models\\User');"));

        let php = render_resource(&model, "App\\Http\\Resources");
        assert!(php.contains("namespace App\\Http\\Resources;"));
        assert!(php.contains("@mixin \\App\\Models\\Post"));
        assert!(php.contains("class PostResource extends JsonResource"));
        assert!(php.contains("'title' => $this->title,"));
        assert!(php.contains("'user' => $this->whenLoaded('user'),"));
    }
}
