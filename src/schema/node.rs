use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic value types a slot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Date,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Date => "date",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value type of a single slot.
///
/// Schema nodes nest freely: an array of nullable records of composites is a
/// perfectly valid slot type. `Generic` leaves are type variables that get
/// replaced once a connection binds them to something concrete.
///
/// Prefer the smart constructors ([`SchemaNode::nullable`], [`SchemaNode::optional`],
/// [`SchemaNode::composite`], ...) over building variants by hand, they keep the
/// wrapper and binding invariants intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", from = "RawSchemaNode")]
pub enum SchemaNode {
    Primitive {
        kind: PrimitiveKind,
    },
    /// A closed set of string literals.
    Picklist {
        options: Vec<String>,
    },
    Array {
        item: Box<SchemaNode>,
    },
    /// The value may be an explicit `null`.
    Nullable {
        wrapped: Box<SchemaNode>,
    },
    /// The value may be absent altogether.
    Optional {
        wrapped: Box<SchemaNode>,
    },
    Record {
        key: Box<SchemaNode>,
        value: Box<SchemaNode>,
    },
    Composite(CompositeType),
    Generic {
        name: String,
    },
    Union {
        options: Vec<SchemaNode>,
    },
}

impl SchemaNode {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        SchemaNode::Primitive { kind }
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    pub fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub fn date() -> Self {
        Self::primitive(PrimitiveKind::Date)
    }

    pub fn picklist<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchemaNode::Picklist {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn array(item: SchemaNode) -> Self {
        SchemaNode::Array {
            item: Box::new(item),
        }
    }

    /// Wraps `inner` as nullable. Wrapping an already nullable node returns it as is.
    pub fn nullable(inner: SchemaNode) -> Self {
        match inner {
            nullable @ SchemaNode::Nullable { .. } => nullable,
            other => SchemaNode::Nullable {
                wrapped: Box::new(other),
            },
        }
    }

    /// Wraps `inner` as optional. Wrapping an already optional node returns it as is.
    pub fn optional(inner: SchemaNode) -> Self {
        match inner {
            optional @ SchemaNode::Optional { .. } => optional,
            other => SchemaNode::Optional {
                wrapped: Box::new(other),
            },
        }
    }

    pub fn record(key: SchemaNode, value: SchemaNode) -> Self {
        SchemaNode::Record {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn composite<N, I, K>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        SchemaNode::Composite(CompositeType::new(name, fields))
    }

    pub fn generic(name: impl Into<String>) -> Self {
        SchemaNode::Generic { name: name.into() }
    }

    pub fn union(options: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::Union {
            options: options.into_iter().collect(),
        }
    }
}

/// A named structured type with ordered fields.
///
/// Besides its fields, a composite remembers every generic placeholder its
/// fields referenced when it was declared, together with the concrete schema
/// each one was later bound to (`None` while unbound).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCompositeType")]
pub struct CompositeType {
    pub name: String,
    pub fields: IndexMap<String, SchemaNode>,
    pub(crate) generics: IndexMap<String, Option<SchemaNode>>,
}

impl CompositeType {
    pub fn new<N, I, K>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        let mut composite = Self {
            name: name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            generics: IndexMap::new(),
        };
        composite.track_new_generics();
        composite
    }

    /// Every placeholder this composite tracks, bound or not.
    pub fn generics(&self) -> &IndexMap<String, Option<SchemaNode>> {
        &self.generics
    }

    /// The schema `placeholder` was bound to, if it has been resolved.
    pub fn binding(&self, placeholder: &str) -> Option<&SchemaNode> {
        self.generics.get(placeholder).and_then(Option::as_ref)
    }

    /// Placeholders that are still waiting for a binding.
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.generics
            .iter()
            .filter(|(_, binding)| binding.is_none())
            .map(|(name, _)| name.as_str())
    }

    /// Registers any placeholder reachable from the fields that isn't tracked yet.
    pub(crate) fn track_new_generics(&mut self) {
        let mut names = IndexSet::new();
        for field in self.fields.values() {
            field.collect_generic_names(&mut names);
        }
        for name in names {
            self.generics.entry(name).or_insert(None);
        }
    }
}

#[derive(Deserialize)]
struct RawCompositeType {
    name: String,
    #[serde(default)]
    fields: IndexMap<String, SchemaNode>,
    #[serde(default)]
    generics: IndexMap<String, Option<SchemaNode>>,
}

impl From<RawCompositeType> for CompositeType {
    fn from(raw: RawCompositeType) -> Self {
        let mut composite = CompositeType {
            name: raw.name,
            fields: raw.fields,
            generics: raw.generics,
        };
        composite.track_new_generics();
        composite
    }
}

/// Wire form of [`SchemaNode`]. Deserialized trees are rebuilt through the
/// smart constructors so stacked `Nullable`/`Optional` wrappers collapse.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum RawSchemaNode {
    Primitive { kind: PrimitiveKind },
    Picklist { options: Vec<String> },
    Array { item: Box<SchemaNode> },
    Nullable { wrapped: Box<SchemaNode> },
    Optional { wrapped: Box<SchemaNode> },
    Record { key: Box<SchemaNode>, value: Box<SchemaNode> },
    Composite(CompositeType),
    Generic { name: String },
    Union { options: Vec<SchemaNode> },
}

impl From<RawSchemaNode> for SchemaNode {
    fn from(raw: RawSchemaNode) -> Self {
        match raw {
            RawSchemaNode::Primitive { kind } => SchemaNode::Primitive { kind },
            RawSchemaNode::Picklist { options } => SchemaNode::Picklist { options },
            RawSchemaNode::Array { item } => SchemaNode::Array { item },
            RawSchemaNode::Nullable { wrapped } => SchemaNode::nullable(*wrapped),
            RawSchemaNode::Optional { wrapped } => SchemaNode::optional(*wrapped),
            RawSchemaNode::Record { key, value } => SchemaNode::Record { key, value },
            RawSchemaNode::Composite(composite) => SchemaNode::Composite(composite),
            RawSchemaNode::Generic { name } => SchemaNode::Generic { name },
            RawSchemaNode::Union { options } => SchemaNode::Union { options },
        }
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_label())
    }
}
