//! Relation descriptors.
//!
//! A relation is always expressed from the point of view of the model being
//! generated: how the current model reaches the related rows.

/// Keys of a relation resolved through a single foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRelation {
    /// Related table, prefix stripped.
    pub related_table: String,
    /// Column carrying the foreign key.
    pub foreign_column: String,
    /// Column the foreign key points at, usually the primary key.
    pub local_column: String,
}

impl DirectRelation {
    pub fn new(related_table: &str, foreign_column: &str, local_column: &str) -> Self {
        Self {
            related_table: related_table.to_string(),
            foreign_column: foreign_column.to_string(),
            local_column: local_column.to_string(),
        }
    }
}

/// A many-to-many relation through a pivot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRelation {
    /// Related table, prefix stripped.
    pub related_table: String,
    /// Pivot table, prefix stripped.
    pub join_table: String,
    /// Pivot column pointing at the current model.
    pub foreign_column: String,
    /// Pivot column pointing at the related model.
    pub local_column: String,
    /// Pivot carries both `created_at` and `updated_at`.
    pub has_timestamps: bool,
    /// Pivot columns besides the two keys and the timestamps, in table order.
    pub extra_pivot_columns: Vec<String>,
}

/// A relation detected between the current table and another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    BelongsTo(DirectRelation),
    HasOne(DirectRelation),
    HasMany(DirectRelation),
    BelongsToMany(PivotRelation),
}

impl Relation {
    pub fn related_table(&self) -> &str {
        match self {
            Relation::BelongsTo(r) | Relation::HasOne(r) | Relation::HasMany(r) => &r.related_table,
            Relation::BelongsToMany(r) => &r.related_table,
        }
    }

    pub fn foreign_column(&self) -> &str {
        match self {
            Relation::BelongsTo(r) | Relation::HasOne(r) | Relation::HasMany(r) => &r.foreign_column,
            Relation::BelongsToMany(r) => &r.foreign_column,
        }
    }

    pub fn local_column(&self) -> &str {
        match self {
            Relation::BelongsTo(r) | Relation::HasOne(r) | Relation::HasMany(r) => &r.local_column,
            Relation::BelongsToMany(r) => &r.local_column,
        }
    }

    /// Name of the ORM builder method (`belongsTo`, `hasMany`, ...).
    pub fn builder_method(&self) -> &'static str {
        match self {
            Relation::BelongsTo(_) => "belongsTo",
            Relation::HasOne(_) => "hasOne",
            Relation::HasMany(_) => "hasMany",
            Relation::BelongsToMany(_) => "belongsToMany",
        }
    }

    /// Fully qualified ORM relation class returned by the generated method.
    pub fn orm_class(&self) -> &'static str {
        match self {
            Relation::BelongsTo(_) => "\\Illuminate\\Database\\Eloquent\\Relations\\BelongsTo",
            Relation::HasOne(_) => "\\Illuminate\\Database\\Eloquent\\Relations\\HasOne",
            Relation::HasMany(_) => "\\Illuminate\\Database\\Eloquent\\Relations\\HasMany",
            Relation::BelongsToMany(_) => {
                "\\Illuminate\\Database\\Eloquent\\Relations\\BelongsToMany"
            }
        }
    }

    /// Whether the relation yields a collection rather than a single model.
    pub fn is_many(&self) -> bool {
        matches!(self, Relation::HasMany(_) | Relation::BelongsToMany(_))
    }
}
