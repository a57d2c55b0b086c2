// Mon Oct 19 2026 - Alex

pub mod engine;
pub mod error;
pub mod node;
pub mod trace;

pub use engine::{ComparisonEngine, Step};
pub use error::{AssertError, ConfigurationError, MismatchKind, Side, StructuralMismatch};
pub use node::AssertNode;
pub use trace::TraceWriter;

use crate::config::AssertConfig;
use crate::types::TypeRef;
use crate::value::Value;
use std::fmt;

/// Asserts that `actual` conforms to `target` and deeply equals `expected`.
///
/// `target` of `None` only accepts two nulls. On failure the error carries the path of
/// the first difference found, walking members in declaration order.
pub fn assert_deep_equal(
    target: Option<&TypeRef>,
    actual: &Value,
    expected: &Value,
    root_label: &str,
    message: Option<&str>,
) -> Result<(), AssertError> {
    let mut config = AssertConfig::new().with_root_label(root_label);
    config.message = message.map(str::to_string);
    DeepAssert::new(config).assert(target, actual, expected)
}

/// Configured assertion runner with an optional diagnostic sink.
pub struct DeepAssert<'w> {
    config: AssertConfig,
    sink: Option<&'w mut dyn fmt::Write>,
}

impl<'w> DeepAssert<'w> {
    pub fn new(config: AssertConfig) -> Self {
        Self { config, sink: None }
    }

    /// Receives the indented trace of every node visited.
    pub fn with_sink(mut self, sink: &'w mut dyn fmt::Write) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &AssertConfig {
        &self.config
    }

    pub fn assert(&mut self, target: Option<&TypeRef>, actual: &Value, expected: &Value) -> Result<(), AssertError> {
        let root = AssertNode::root(&self.config.root_label, target.cloned(), actual.clone(), expected.clone());
        let width = self.config.indent_width.max(1);
        let mut buffer = String::new();

        let result = {
            let sink: Option<&mut dyn fmt::Write> = match self.sink.as_mut() {
                Some(sink) => Some(&mut **sink),
                None if self.config.trace => Some(&mut buffer as &mut dyn fmt::Write),
                None => None,
            };
            let mut engine = ComparisonEngine::new(self.config.message.as_deref());
            if let Some(sink) = sink {
                engine = engine.with_trace(TraceWriter::new(sink, width));
            }
            engine.assert_node(&root)
        };

        if !buffer.is_empty() {
            log::debug!("trace for {}:\n{}", self.config.root_label, buffer.trim_end());
        }
        match &result {
            Ok(()) => log::debug!("{} matches expected", self.config.root_label),
            Err(err) if err.is_configuration() => log::error!("{}", err),
            Err(_) => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrimitiveType, TypeBuilder, TypeDescriptor};
    use proptest::prelude::*;

    fn int() -> TypeRef {
        TypeDescriptor::primitive(PrimitiveType::I32)
    }

    fn string() -> TypeRef {
        TypeDescriptor::primitive(PrimitiveType::String)
    }

    fn check(target: Option<&TypeRef>, actual: &Value, expected: &Value) -> Result<(), AssertError> {
        assert_deep_equal(target, actual, expected, "actual", None)
    }

    fn kind_of(result: Result<(), AssertError>) -> MismatchKind {
        match result {
            Err(AssertError::Mismatch(m)) => m.kind,
            other => panic!("expected a structural mismatch, got {:?}", other),
        }
    }

    fn path_of(result: Result<(), AssertError>) -> String {
        match result {
            Err(AssertError::Mismatch(m)) => m.path,
            other => panic!("expected a structural mismatch, got {:?}", other),
        }
    }

    fn named() -> TypeRef {
        TypeBuilder::class("Named").property("name", string()).build().unwrap()
    }

    fn node_type() -> TypeRef {
        let builder = TypeBuilder::class("Node");
        let node = builder.handle();
        builder.property("Id", int()).property("Next", node).build().unwrap()
    }

    fn linked(node: &TypeRef, id: i32, next: Option<&Value>) -> Value {
        let value = Value::object(node, [("Id", Value::from(id))]).unwrap();
        let next = next.cloned().unwrap_or_else(|| value.clone());
        value.as_instance().unwrap().set("Next", next).unwrap();
        value
    }

    #[test]
    fn test_null_rules() {
        assert!(check(None, &Value::Null, &Value::Null).is_ok());
        assert_eq!(
            kind_of(check(None, &Value::from(1), &Value::Null)),
            MismatchKind::NullTargetViolation(Side::Actual)
        );
        assert_eq!(
            kind_of(check(None, &Value::Null, &Value::from(1))),
            MismatchKind::NullTargetViolation(Side::Expected)
        );
        assert_eq!(
            kind_of(check(Some(&int()), &Value::Null, &Value::Null)),
            MismatchKind::NonNullableActualIsNull
        );
        assert_eq!(
            kind_of(check(Some(&int()), &Value::Null, &Value::from(1))),
            MismatchKind::NonNullableActualIsNull
        );
        let nullable = TypeDescriptor::nullable(&int());
        assert!(check(Some(&nullable), &Value::Null, &Value::Null).is_ok());
        assert_eq!(
            kind_of(check(Some(&nullable), &Value::Null, &Value::from(1))),
            MismatchKind::ActualNullExpectedNonNull
        );
        assert_eq!(
            kind_of(check(Some(&string()), &Value::from("a"), &Value::Null)),
            MismatchKind::ActualNonNullExpectedNull
        );
    }

    #[test]
    fn test_numeric_cross_width() {
        assert!(check(Some(&int()), &Value::from(3), &Value::from(3.0f64)).is_ok());
        assert!(check(Some(&int()), &Value::from(3), &Value::from(3u64)).is_ok());
        assert_eq!(
            kind_of(check(Some(&int()), &Value::from(3), &Value::from(4))),
            MismatchKind::NumericMismatch
        );
        assert_eq!(
            kind_of(check(Some(&int()), &Value::from("3"), &Value::from(3))),
            MismatchKind::ActualNotNumeric
        );
        let nullable = TypeDescriptor::nullable(&TypeDescriptor::primitive(PrimitiveType::Decimal));
        assert!(check(Some(&nullable), &Value::from(2i64), &Value::Decimal("2.0".parse().unwrap())).is_ok());
    }

    #[test]
    fn test_primitive_scalars() {
        assert!(check(Some(&string()), &Value::from("x"), &Value::from("x")).is_ok());
        assert_eq!(
            kind_of(check(Some(&string()), &Value::from("x"), &Value::from("y"))),
            MismatchKind::PrimitiveMismatch
        );
        assert_eq!(
            kind_of(check(Some(&string()), &Value::from('x'), &Value::from("x"))),
            MismatchKind::ActualViolatesPrimitiveType
        );

        let color = TypeDescriptor::enumeration("Color", &["Red", "Green"]);
        let red = Value::enumeration(&color, "Red").unwrap();
        let green = Value::enumeration(&color, "Green").unwrap();
        assert!(check(Some(&color), &red, &red.clone()).is_ok());
        assert_eq!(kind_of(check(Some(&color), &red, &green)), MismatchKind::PrimitiveMismatch);

        let guid = TypeDescriptor::primitive(PrimitiveType::Guid);
        let id = uuid::Uuid::new_v4();
        assert!(check(Some(&guid), &Value::from(id), &Value::from(id)).is_ok());
    }

    #[test]
    fn test_reference_identity() {
        let value = Value::anonymous([("name", Value::from("x")), ("age", Value::from(3))]).unwrap();
        assert!(check(Some(&named()), &value, &value.clone()).is_ok());

        let other = Value::anonymous([("nickname", Value::from("x"))]).unwrap();
        assert_eq!(
            kind_of(check(Some(&named()), &other, &other.clone())),
            MismatchKind::SharedReferenceViolatesTarget
        );
    }

    #[test]
    fn test_circular_references() {
        let node = node_type();
        let a = linked(&node, 1, None);
        let b = linked(&node, 1, None);
        assert!(check(Some(&node), &a, &b).is_ok());

        let tail = linked(&node, 1, None);
        let b2 = linked(&node, 1, Some(&tail));
        let result = check(Some(&node), &a, &b2);
        assert_eq!(path_of(check(Some(&node), &a, &b2)), "actual.Next");
        assert_eq!(kind_of(result), MismatchKind::CircularActualWithoutCircularExpected);

        let a2 = linked(&node, 1, Some(&tail));
        assert_eq!(
            kind_of(check(Some(&node), &a2, &b)),
            MismatchKind::CircularExpectedWithoutCircularActual
        );
    }

    #[test]
    fn test_circular_reference_must_conform_to_target() {
        let wants_missing = TypeBuilder::class("WantsMissing").property("Missing", int()).build().unwrap();
        let holder = TypeBuilder::class("Holder").property("Child", wants_missing).build().unwrap();
        let looped = TypeBuilder::class("Looped")
            .property("Child", TypeDescriptor::any())
            .build()
            .unwrap();

        let actual = Value::object(&looped, Vec::<(&str, Value)>::new()).unwrap();
        actual.as_instance().unwrap().set("Child", actual.clone()).unwrap();
        let expected = Value::object(&looped, Vec::<(&str, Value)>::new()).unwrap();
        expected.as_instance().unwrap().set("Child", expected.clone()).unwrap();

        assert_eq!(
            kind_of(check(Some(&holder), &actual, &expected)),
            MismatchKind::CircularReferenceViolatesTarget
        );
    }

    #[test]
    fn test_collections() {
        let list = TypeDescriptor::collection(&int());
        let a = Value::seq(&list, vec![Value::from(1), Value::from(2)]).unwrap();
        let b = Value::list(vec![Value::from(1i64), Value::from(2.0f64)]);
        assert!(check(Some(&list), &a, &b).is_ok());

        let short = Value::list(vec![Value::from(1)]);
        assert_eq!(
            kind_of(check(Some(&list), &a, &short)),
            MismatchKind::CollectionLengthMismatch { actual: 2, expected: 1 }
        );
        assert_eq!(
            kind_of(check(Some(&list), &Value::from(1), &short)),
            MismatchKind::ActualNotCollection("i32".to_string())
        );
        assert_eq!(
            kind_of(check(Some(&list), &short, &Value::from(1))),
            MismatchKind::ExpectedNotCollection("i32".to_string())
        );
    }

    #[test]
    fn test_collection_stops_at_first_mismatch() {
        let list = TypeDescriptor::collection(&int());
        let actual = Value::list(vec![Value::from(1), Value::from(2), Value::from("not a number")]);
        let expected = Value::list(vec![Value::from(1), Value::from(3), Value::from(4)]);
        let result = check(Some(&list), &actual, &expected);
        assert_eq!(path_of(check(Some(&list), &actual, &expected)), "actual[1]");
        assert_eq!(kind_of(result), MismatchKind::NumericMismatch);
    }

    #[test]
    fn test_untyped_collection_uses_runtime_item_type() {
        let enumerable = TypeDescriptor::enumerable();
        let actual = Value::list(vec![Value::from("a"), Value::from(1)]);
        let expected = Value::list(vec![Value::from("a"), Value::from(1.0f64)]);
        assert!(check(Some(&enumerable), &actual, &expected).is_ok());

        let strict = Value::list(vec![Value::from("a"), Value::from(2)]);
        assert_eq!(path_of(check(Some(&enumerable), &actual, &strict)), "actual[1]");

        assert!(check(Some(&enumerable), &Value::from("ab"), &Value::list(vec![Value::from('a'), Value::from('b')])).is_ok());
    }

    #[test]
    fn test_composite_exhaustiveness() {
        let actual = Value::anonymous([("name", Value::from("x"))]).unwrap();
        let expected = Value::anonymous([("name", Value::from("x")), ("extra", Value::from(1))]).unwrap();
        assert_eq!(
            kind_of(check(Some(&named()), &actual, &expected)),
            MismatchKind::ExpectedHasExtraMembers(vec!["extra".to_string()])
        );
        assert!(check(Some(&named()), &expected, &actual).is_ok());
    }

    #[test]
    fn test_missing_members() {
        let nameless = Value::anonymous([("title", Value::from("x"))]).unwrap();
        let good = Value::anonymous([("name", Value::from("x"))]).unwrap();
        assert_eq!(
            kind_of(check(Some(&named()), &nameless, &good)),
            MismatchKind::MissingMemberOnActual("name".to_string())
        );
        assert_eq!(
            kind_of(check(Some(&named()), &good, &nameless)),
            MismatchKind::MissingMemberOnExpected("name".to_string())
        );
    }

    #[test]
    fn test_member_paths_and_types() {
        let line = TypeBuilder::record("Line").property("Sku", string()).property("Qty", int()).build().unwrap();
        let order = TypeBuilder::class("Order")
            .property("Lines", TypeDescriptor::collection(&line))
            .build()
            .unwrap();
        let make = |qty: i32| {
            let line_value = Value::record(&line, [("Sku", Value::from("A-1")), ("Qty", Value::from(qty))]).unwrap();
            Value::object(&order, [("Lines", Value::list(vec![line_value]))]).unwrap()
        };
        assert!(check(Some(&order), &make(2), &make(2)).is_ok());
        let err = check(Some(&order), &make(2), &make(5)).unwrap_err();
        let mismatch = err.mismatch().unwrap();
        assert_eq!(mismatch.path, "actual.Lines[0].Qty");
        assert_eq!(mismatch.target_type.as_ref().map(|t| t.name()), Some("i32"));
    }

    #[test]
    fn test_derived_actual_is_compared_through_target() {
        let entity = TypeBuilder::class("Entity").property("Id", int()).build().unwrap();
        let customer = TypeBuilder::class("Customer")
            .base(entity.clone())
            .property("Name", string())
            .build()
            .unwrap();
        let actual = Value::object(&customer, [("Id", Value::from(7)), ("Name", Value::from("a"))]).unwrap();
        let expected = Value::anonymous([("Id", Value::from(7))]).unwrap();
        assert!(check(Some(&entity), &actual, &expected).is_ok());
    }

    #[test]
    fn test_overridden_member_is_read_through_runtime_type() {
        let shape = TypeBuilder::class("Shape").property("Area", int()).build().unwrap();
        let square = TypeBuilder::class("Square")
            .base(shape.clone())
            .override_property("Area", int())
            .build()
            .unwrap();
        let four = Value::object(&square, [("Area", Value::from(4))]).unwrap();
        let also_four = Value::object(&square, [("Area", Value::from(4))]).unwrap();
        let nine = Value::object(&square, [("Area", Value::from(9))]).unwrap();

        assert!(check(Some(&shape), &four, &also_four).is_ok());
        let result = check(Some(&shape), &four, &nine);
        assert_eq!(path_of(check(Some(&shape), &four, &nine)), "actual.Area");
        assert_eq!(kind_of(result), MismatchKind::NumericMismatch);
    }

    #[test]
    fn test_record_inside_object_cycle() {
        let owner_builder = TypeBuilder::class("Owner");
        let wrapper = TypeBuilder::record("Wrapper")
            .property("Owner", owner_builder.handle())
            .build()
            .unwrap();
        let owner = owner_builder.property("Inner", wrapper.clone()).build().unwrap();

        let make = || {
            let holder = Value::object(&owner, Vec::<(&str, Value)>::new()).unwrap();
            let inner = Value::record(&wrapper, [("Owner", holder.clone())]).unwrap();
            holder.as_instance().unwrap().set("Inner", inner).unwrap();
            holder
        };
        assert!(check(Some(&owner), &make(), &make()).is_ok());
    }

    #[test]
    fn test_ambiguous_target_is_configuration_error() {
        let left = TypeBuilder::class("Left").property("Id", int()).build().unwrap();
        let right = TypeBuilder::class("Right").property("Id", int()).build().unwrap();
        let both = TypeBuilder::class("Both").base(left).base(right).build().unwrap();
        let actual = Value::anonymous([("Id", Value::from(1))]).unwrap();
        let expected = Value::anonymous([("Id", Value::from(1))]).unwrap();

        let err = check(Some(&both), &actual, &expected).unwrap_err();
        assert!(err.is_configuration());
        assert!(!err.is_mismatch());
        assert_eq!(err.to_string(), "'Left.Id' and 'Right.Id' in type 'Both' are ambiguous");
    }

    #[test]
    fn test_message_and_label_reach_failure() {
        let err = assert_deep_equal(Some(&int()), &Value::from(1), &Value::from(2), "total", Some("totals differ")).unwrap_err();
        let mismatch = err.mismatch().unwrap();
        assert_eq!(mismatch.path, "total");
        assert_eq!(mismatch.message.as_deref(), Some("totals differ"));
        assert!(err.to_string().starts_with("totals differ\n"));
    }

    #[test]
    fn test_trace_output() {
        let person = TypeBuilder::class("Person")
            .property("Name", string())
            .property("Tags", TypeDescriptor::collection(&string()))
            .build()
            .unwrap();
        let value = Value::object(
            &person,
            [("Name", Value::from("Ann")), ("Tags", Value::list(vec![Value::from("a")]))],
        )
        .unwrap();
        let copy = Value::object(
            &person,
            [("Name", Value::from("Ann")), ("Tags", Value::list(vec![Value::from("a")]))],
        )
        .unwrap();

        let mut out = String::new();
        let result = DeepAssert::new(AssertConfig::new().with_root_label("person"))
            .with_sink(&mut out)
            .assert(Some(&person), &value, &copy);
        assert!(result.is_ok());
        let expected_trace = "person: Person = {\n\
                              \x20   Name: string = \"Ann\"    // actual and expected are equal as string\n\
                              \x20   Tags: [string] = {\n\
                              \x20       [0]: string = \"a\"    // actual and expected are equal as string\n\
                              \x20   }\n\
                              }\n";
        assert_eq!(out, expected_trace);
    }

    #[test]
    fn test_trace_marks_failure() {
        let mut out = String::new();
        let result = DeepAssert::new(AssertConfig::new())
            .with_sink(&mut out)
            .assert(Some(&int()), &Value::from(1), &Value::from(2));
        assert!(result.is_err());
        assert_eq!(out, "actual: i32 =     // FAILED: actual and expected are not equal as numbers\n");
    }

    #[test]
    fn test_trace_does_not_change_outcome() {
        let node = node_type();
        let a = linked(&node, 1, None);
        let tail = linked(&node, 2, None);
        let b = linked(&node, 1, Some(&tail));
        let mut out = String::new();
        let traced = DeepAssert::new(AssertConfig::new().with_trace(true))
            .with_sink(&mut out)
            .assert(Some(&node), &a, &b);
        let silent = check(Some(&node), &a, &b);
        assert_eq!(kind_of(traced), kind_of(silent));
        assert!(out.contains("FAILED"));
    }

    #[test]
    fn test_object_target_accepts_anything_without_members() {
        let any = TypeDescriptor::any();
        assert!(check(Some(&any), &Value::from(1), &Value::from(2)).is_ok());
        let a = Value::anonymous([("x", Value::from(1))]).unwrap();
        let b = Value::anonymous([("x", Value::from(2))]).unwrap();
        assert_eq!(
            kind_of(check(Some(&any), &a, &b)),
            MismatchKind::ExpectedHasExtraMembers(vec!["x".to_string()])
        );

        // Sequences expose no members, so any two pass under an object target.
        let short = Value::list(vec![Value::from(1)]);
        let long = Value::list(vec![Value::from(2), Value::from(3)]);
        assert!(check(Some(&any), &short, &long).is_ok());
    }

    proptest! {
        #[test]
        fn any_string_equals_itself(s in ".*") {
            let value = Value::from(s.as_str());
            prop_assert!(check(Some(&string()), &value, &value.clone()).is_ok());
        }

        #[test]
        fn collections_of_different_length_always_fail(a in prop::collection::vec(any::<i32>(), 0..8), b in prop::collection::vec(any::<i32>(), 0..8)) {
            prop_assume!(a.len() != b.len());
            let list = TypeDescriptor::collection(&int());
            let actual = Value::list(a.iter().map(|v| Value::from(*v)).collect());
            let expected = Value::list(b.iter().map(|v| Value::from(*v)).collect());
            let result = check(Some(&list), &actual, &expected);
            prop_assert_eq!(
                kind_of(result),
                MismatchKind::CollectionLengthMismatch { actual: a.len(), expected: b.len() }
            );
        }
    }
}
