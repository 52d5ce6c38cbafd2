//! Shared fixture types and the constraint set used across the engine's
//! integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use bindcheck_engine::{
    describe, Arguments, BindError, Bindable, ConstructError, Engine, Options, SchemaBuilder,
    Value,
};
use bindcheck_rules::{ConstraintValidator, Min, NotBlank, NotNull, Pattern};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Nested objects
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub struct NestedFoo {
    pub not_null_string: String,
    pub nested: Option<Node>,
}

impl Bindable for NestedFoo {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<String>("not_null_string").rename("notNullString");
        schema.param::<Option<Node>>("nested");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            not_null_string: args.take("not_null_string")?,
            nested: args.take("nested")?,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct Node {
    pub other_not_blank: String,
    pub some_nullable: Option<String>,
    pub child: Option<Box<Node>>,
}

impl Bindable for Node {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<String>("other_not_blank").rename("otherNotBlank");
        schema.param::<Option<String>>("some_nullable").rename("someNullable");
        schema.param::<Option<Box<Node>>>("child");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            other_not_blank: args.take("other_not_blank")?,
            some_nullable: args.take("some_nullable")?,
            child: args.take("child")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ClassWithListOfNodes {
    pub list: Vec<Node>,
}

impl Bindable for ClassWithListOfNodes {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Vec<Node>>("list");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            list: args.take("list")?,
        })
    }
}

#[derive(Debug)]
pub struct ClassWithMapOfNodes {
    pub map: BTreeMap<String, Node>,
}

impl Bindable for ClassWithMapOfNodes {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<BTreeMap<String, Node>>("map");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            map: args.take("map")?,
        })
    }
}

#[derive(Debug)]
pub struct ClassWithArrays {
    pub nodes: [Node; 3],
    pub tags: Option<[String; 2]>,
}

impl Bindable for ClassWithArrays {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<[Node; 3]>("nodes");
        schema.param::<Option<[String; 2]>>("tags");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            nodes: args.take("nodes")?,
            tags: args.take("tags")?,
        })
    }
}

#[derive(Debug)]
pub struct NestedListClass {
    pub strings: Vec<Option<Vec<String>>>,
}

impl Bindable for NestedListClass {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Vec<Option<Vec<String>>>>("strings");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            strings: args.take("strings")?,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct Foo {
    pub bar: String,
}

impl Bindable for Foo {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<String>("bar");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            bar: args.take("bar")?,
        })
    }
}

#[derive(Debug)]
pub struct ClassWithList {
    pub list: Vec<Foo>,
}

impl Bindable for ClassWithList {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Vec<Foo>>("list");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            list: args.take("list")?,
        })
    }
}

#[derive(Debug)]
pub struct Strings {
    pub strings: Vec<String>,
}

impl Bindable for Strings {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Vec<String>>("strings");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            strings: args.take("strings")?,
        })
    }
}

#[derive(Debug)]
pub struct Keyed {
    pub map: BTreeMap<u32, String>,
}

impl Bindable for Keyed {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<BTreeMap<u32, String>>("map");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            map: args.take("map")?,
        })
    }
}

#[derive(Debug)]
pub struct ClassWithKeyedList {
    pub inner: Vec<Keyed>,
}

impl Bindable for ClassWithKeyedList {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Vec<Keyed>>("inner");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            inner: args.take("inner")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Defaults and settable properties
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub struct DefaultArgs {
    pub foo: String,
    pub bar: i32,
}

pub const DEFAULT_FOO: &str = "hello";

impl Bindable for DefaultArgs {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<String>("foo").optional();
        schema.param::<i32>("bar");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            foo: args.take_or_else("foo", || DEFAULT_FOO.to_owned())?,
            bar: args.take("bar")?,
        })
    }
}

#[derive(Debug)]
pub struct OuterHolder {
    pub holder: NodeHolder,
}

impl Bindable for OuterHolder {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<NodeHolder>("holder");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            holder: args.take("holder")?,
        })
    }
}

/// Bean-style holder: constructed empty, `node` assigned afterwards.
#[derive(Debug)]
pub struct NodeHolder {
    pub node: Option<Node>,
    pub label: String,
}

impl Bindable for NodeHolder {
    fn declare(schema: &mut SchemaBuilder) {
        schema.property::<Option<Node>>("node");
        schema.property::<String>("label");
    }

    fn construct(_: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            node: None,
            label: "unlabelled".to_owned(),
        })
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ConstructError> {
        match name {
            "node" => self.node = bindcheck_engine::Describe::from_value(value)?,
            "label" => self.label = bindcheck_engine::Describe::from_value(value)?,
            other => {
                return Err(ConstructError::UnknownProperty {
                    name: other.to_owned(),
                })
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Single-value wrappers
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub struct SomeValue {
    pub s: String,
}

impl Bindable for SomeValue {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<String>("s");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self { s: args.take("s")? })
    }
}

#[derive(Debug)]
pub struct SomeValueHolder {
    pub v: SomeValue,
}

impl Bindable for SomeValueHolder {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<SomeValue>("v");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self { v: args.take("v")? })
    }
}

#[derive(Debug)]
pub struct ClassWithWrapperList {
    pub values: Vec<SomeValue>,
}

impl Bindable for ClassWithWrapperList {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Vec<SomeValue>>("values");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            values: args.take("values")?,
        })
    }
}

/// Wrapper around a list; its elements must not be null.
#[derive(Debug)]
pub struct Tags {
    pub values: Vec<String>,
}

impl Bindable for Tags {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Vec<String>>("values");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            values: args.take("values")?,
        })
    }
}

/// Wrapper around another wrapper.
#[derive(Debug)]
pub struct Label {
    pub inner: SomeValue,
}

impl Bindable for Label {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<SomeValue>("inner");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            inner: args.take("inner")?,
        })
    }
}

#[derive(Debug)]
pub struct Tagged {
    pub tags: Tags,
    pub label: Option<Label>,
}

impl Bindable for Tagged {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Tags>("tags");
        schema.param::<Option<Label>>("label");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            tags: args.take("tags")?,
            label: args.take("label")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Renames, primitives and plain serde types
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct CustomProperties {
    pub custom_foo: String,
    pub custom_bar: String,
}

impl Bindable for CustomProperties {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<String>("custom_foo").rename("foo");
        schema.param::<String>("custom_bar").rename("bar");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            custom_foo: args.take("custom_foo")?,
            custom_bar: args.take("custom_bar")?,
        })
    }
}

#[derive(Debug)]
pub struct ClassWithInt {
    pub value: i32,
    pub ratio: Option<f64>,
    pub enabled: bool,
}

impl Bindable for ClassWithInt {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<i32>("value");
        schema.param::<Option<f64>>("ratio");
        schema.param::<bool>("enabled").optional();
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            value: args.take("value")?,
            ratio: args.take("ratio")?,
            enabled: args.take_or_default("enabled")?,
        })
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Amount {
    Units(i64),
    Text(String),
}

#[derive(Debug)]
pub struct Invoice {
    pub amount: Amount,
}

impl Bindable for Invoice {
    fn declare(schema: &mut SchemaBuilder) {
        schema.param::<Amount>("amount");
    }

    fn construct(args: &mut Arguments) -> Result<Self, ConstructError> {
        Ok(Self {
            amount: args.take("amount")?,
        })
    }
}

describe!(
    object NestedFoo,
    Node,
    ClassWithListOfNodes,
    ClassWithMapOfNodes,
    ClassWithArrays,
    NestedListClass,
    Foo,
    ClassWithList,
    DefaultArgs,
    OuterHolder,
    NodeHolder,
    SomeValueHolder,
    ClassWithWrapperList,
    CustomProperties,
    ClassWithInt,
    Invoice,
    Strings,
    Keyed,
    ClassWithKeyedList,
    Tagged,
);
describe!(wrapper SomeValue, Tags, Label);
describe!(plain Amount);

// ---------------------------------------------------------------------------
// Engine helpers
// ---------------------------------------------------------------------------

/// Full-match pattern used on `Node::some_nullable`.
pub const NO_SPACES: &str = "[^ ]+";

pub fn validator() -> ConstraintValidator {
    ConstraintValidator::builder()
        .constrain::<Node>("other_not_blank", NotBlank)
        .constrain::<Node>("some_nullable", Pattern::new(NO_SPACES).expect("valid regex"))
        .constrain::<Foo>("bar", NotBlank)
        .constrain::<NodeHolder>("node", NotNull)
        .constrain::<SomeValue>("s", NotBlank)
        .constrain::<CustomProperties>("custom_foo", NotBlank)
        .constrain::<CustomProperties>("custom_bar", NotBlank)
        .constrain::<ClassWithInt>("value", Min(0))
        .build()
}

pub fn engine() -> Engine<ConstraintValidator> {
    Engine::new(validator())
}

pub fn engine_with(options: Options) -> Engine<ConstraintValidator> {
    Engine::with_options(validator(), options)
}

/// The `"<path>: <message>"` lines of a constraint failure.
pub fn violation_lines(err: &BindError) -> Vec<String> {
    match err.violations() {
        Some(violations) => violations.lines(),
        None => panic!("expected constraint violations, got {err}"),
    }
}
