//! The model class under construction.

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// A literal value assigned to a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Str(String),
    List(Vec<String>),
    /// Ordered key/value pairs.
    Map(Vec<(String, String)>),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn empty_list() -> Self {
        Value::List(Vec::new())
    }
}

/// A declared class property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub value: Option<Value>,
    /// Doc block lines, without comment markers.
    pub doc: Vec<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, visibility: Visibility, value: Value) -> Self {
        Self {
            name: name.into(),
            visibility,
            is_static: false,
            value: Some(value),
            doc: Vec::new(),
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_doc(mut self, lines: &[&str]) -> Self {
        self.doc = lines.iter().map(|l| l.to_string()).collect();
        self
    }
}

/// A property documented with `@property` but backed by a column or relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualProperty {
    pub name: String,
    pub typ: String,
    pub nullable: bool,
}

/// A class method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    pub body: String,
    pub doc: Vec<String>,
    pub return_type: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            body: body.into(),
            doc: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_doc(mut self, lines: &[&str]) -> Self {
        self.doc = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }
}

/// Behaviour mixed into the model through a trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    SoftDelete,
    Translatable,
}

impl Capability {
    /// Short trait name used inside the class body.
    pub fn trait_name(&self) -> &'static str {
        match self {
            Capability::SoftDelete => "SoftDeletes",
            Capability::Translatable => "Translatable",
        }
    }

    /// Fully qualified trait imported at the top of the file.
    pub fn import(&self) -> &'static str {
        match self {
            Capability::SoftDelete => "Illuminate\\Database\\Eloquent\\SoftDeletes",
            Capability::Translatable => "Astrotomic\\Translatable\\Translatable",
        }
    }
}

/// The generated class.
///
/// Adding a property, virtual property or method whose name already exists
/// replaces it in place, so later processors can refine earlier output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub class_name: String,
    /// Short name of the parent class.
    pub base_class_name: String,
    pub namespace: String,
    /// Logical table name, prefix stripped.
    pub table_name: String,
    properties: Vec<Property>,
    virtual_properties: Vec<VirtualProperty>,
    methods: Vec<Method>,
    uses: Vec<String>,
    capabilities: Vec<Capability>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace-qualified class name without a leading separator.
    pub fn full_class_name(&self) -> String {
        if self.namespace.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}\\{}", self.namespace, self.class_name)
        }
    }

    pub fn add_property(&mut self, property: Property) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    pub fn add_virtual_property(&mut self, property: VirtualProperty) {
        match self
            .virtual_properties
            .iter_mut()
            .find(|p| p.name == property.name)
        {
            Some(existing) => *existing = property,
            None => self.virtual_properties.push(property),
        }
    }

    pub fn add_method(&mut self, method: Method) {
        match self.methods.iter_mut().find(|m| m.name == method.name) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
    }

    pub fn add_use(&mut self, class: impl Into<String>) {
        let class = class.into();
        let class = class.trim_start_matches('\\').to_string();
        if !self.uses.contains(&class) {
            self.uses.push(class);
        }
    }

    pub fn add_capability(&mut self, capability: Capability) {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn virtual_properties(&self) -> &[VirtualProperty] {
        &self.virtual_properties
    }

    pub fn virtual_property(&self, name: &str) -> Option<&VirtualProperty> {
        self.virtual_properties.iter().find(|p| p.name == name)
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
