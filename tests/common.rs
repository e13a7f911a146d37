//! Common test utilities for building node definitions and registries.
use kata::prelude::*;

/// `math-add`: inputs `a: T`, `b: T`, output `result: T`.
#[allow(dead_code)]
pub fn math_add() -> NodeDefinition {
    NodeDefinition::builder("math", "add")
        .input("a", SchemaNode::generic("T"))
        .input("b", SchemaNode::generic("T"))
        .output("result", SchemaNode::generic("T"))
        .title("add")
        .build()
        .expect("math-add is a valid definition")
}

/// `literal-number`: output `value: number`.
#[allow(dead_code)]
pub fn literal_number() -> NodeDefinition {
    NodeDefinition::builder("literal", "number")
        .output("value", SchemaNode::number())
        .title("number")
        .build()
        .expect("literal-number is a valid definition")
}

/// `literal-string`: output `value: string`.
#[allow(dead_code)]
pub fn literal_string() -> NodeDefinition {
    NodeDefinition::builder("literal", "string")
        .output("value", SchemaNode::string())
        .title("string")
        .build()
        .expect("literal-string is a valid definition")
}

/// `console-log`: input `message: string`, output `message: string` renamed `passthrough`.
#[allow(dead_code)]
pub fn console_log() -> NodeDefinition {
    NodeDefinition::builder("console", "log")
        .input("message", SchemaNode::string())
        .output("passthrough", SchemaNode::string())
        .build()
        .expect("console-log is a valid definition")
}

/// `array-first`: input `items: Array<T>`, output `item: T | null`.
#[allow(dead_code)]
pub fn array_first() -> NodeDefinition {
    NodeDefinition::builder("array", "first")
        .input("items", SchemaNode::array(SchemaNode::generic("T")))
        .output("item", SchemaNode::nullable(SchemaNode::generic("T")))
        .build()
        .expect("array-first is a valid definition")
}

/// `array-split`: input `text: string`, output `parts: Array<string>`.
#[allow(dead_code)]
pub fn array_split() -> NodeDefinition {
    NodeDefinition::builder("array", "split")
        .input("text", SchemaNode::string())
        .output("parts", SchemaNode::array(SchemaNode::string()))
        .build()
        .expect("array-split is a valid definition")
}

/// `conditional-if`: inputs `condition: boolean`, `then: T`, `otherwise: T`, output `value: T`.
#[allow(dead_code)]
pub fn conditional_if() -> NodeDefinition {
    NodeDefinition::builder("conditional", "if")
        .input("condition", SchemaNode::boolean())
        .input("then", SchemaNode::generic("T"))
        .input("otherwise", SchemaNode::generic("T"))
        .output("value", SchemaNode::generic("T"))
        .build()
        .expect("conditional-if is a valid definition")
}

/// `pair-make`: wraps two generics in a `Pair` composite.
#[allow(dead_code)]
pub fn pair_make() -> NodeDefinition {
    NodeDefinition::builder("pair", "make")
        .input("left", SchemaNode::generic("L"))
        .input("right", SchemaNode::generic("R"))
        .output("pair", pair_of(SchemaNode::generic("L"), SchemaNode::generic("R")))
        .build()
        .expect("pair-make is a valid definition")
}

/// `Pair { left, right }` composite.
#[allow(dead_code)]
pub fn pair_of(left: SchemaNode, right: SchemaNode) -> SchemaNode {
    SchemaNode::composite("Pair", [("left", left), ("right", right)])
}

/// `pass-through`: input `value: number`, output `value_out: number`.
#[allow(dead_code)]
pub fn pass_through() -> NodeDefinition {
    NodeDefinition::builder("flow", "pass")
        .input("value", SchemaNode::number())
        .output("value_out", SchemaNode::number())
        .build()
        .expect("flow-pass is a valid definition")
}

/// A registry holding every fixture above.
#[allow(dead_code)]
pub fn create_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    for definition in [
        math_add(),
        literal_number(),
        literal_string(),
        console_log(),
        array_first(),
        array_split(),
        conditional_if(),
        pair_make(),
        pass_through(),
    ] {
        registry
            .register(definition)
            .expect("fixture type keys are unique");
    }
    registry
}

/// The catalog used by the JSON loading tests.
#[allow(dead_code)]
pub const SAMPLE_CATALOG_JSON: &str = r#"{
    "categories": [
        { "id": "math", "name": "Math" },
        { "id": "notifications", "name": "Notifications" }
    ],
    "nodes": [
        {
            "category": "math",
            "name": "add",
            "title": "add",
            "aliases": ["sum", "plus"],
            "inputs": {
                "a": { "type": "generic", "name": "T" },
                "b": { "type": "generic", "name": "T" }
            },
            "outputs": {
                "result": { "type": "generic", "name": "T" }
            }
        },
        {
            "category": "notifications",
            "name": "warning",
            "title": "warning",
            "inputs": {
                "message": { "type": "primitive", "kind": "string" },
                "details": {
                    "type": "optional",
                    "wrapped": {
                        "type": "nullable",
                        "wrapped": { "type": "primitive", "kind": "string" }
                    }
                }
            }
        },
        {
            "category": "literal",
            "name": "number",
            "searchable": false,
            "outputs": {
                "value": { "type": "primitive", "kind": "number" }
            }
        },
        {
            "category": "group",
            "name": "entries",
            "inputs": {
                "items": {
                    "type": "array",
                    "item": {
                        "type": "composite",
                        "name": "Entry",
                        "fields": {
                            "key": { "type": "primitive", "kind": "string" },
                            "value": { "type": "generic", "name": "V" }
                        }
                    }
                }
            },
            "outputs": {
                "grouped": {
                    "type": "record",
                    "key": { "type": "primitive", "kind": "string" },
                    "value": { "type": "array", "item": { "type": "generic", "name": "V" } }
                }
            }
        }
    ]
}"#;
