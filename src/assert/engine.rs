// Mon Oct 19 2026 - Alex

use crate::assert::{AssertError, AssertNode, ConfigurationError, MismatchKind, Side, StructuralMismatch, TraceWriter};
use crate::types::{is_structurally_compatible, underlying, DataMember, TypeDescriptor, TypeRef};
use crate::value::{to_primitive_string, Numeric, Value};
use indexmap::IndexMap;

/// Outcome of one dispatch step that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The step does not apply; try the next one.
    Continue,
    /// The node is settled.
    Done,
}

type StepFn<'w> = fn(&mut ComparisonEngine<'w>, &AssertNode<'_>, &TypeRef) -> Result<Step, AssertError>;

/// Depth-first structural comparison. Stops at the first mismatch.
pub struct ComparisonEngine<'w> {
    message: Option<String>,
    trace: Option<TraceWriter<'w>>,
}

impl<'w> ComparisonEngine<'w> {
    /// Steps that settle a node on their own, in evaluation order.
    const SCALAR_STEPS: [(&'static str, StepFn<'w>); 4] = [
        ("numeric", Self::numeric),
        ("primitive", Self::primitive),
        ("reference", Self::reference),
        ("circular", Self::circular),
    ];

    /// Steps that recurse into children. Composite always settles the node.
    const STRUCTURAL_STEPS: [(&'static str, StepFn<'w>); 2] = [
        ("collection", Self::collection),
        ("composite", Self::composite),
    ];

    pub fn new(message: Option<&str>) -> Self {
        Self {
            message: message.map(str::to_string),
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: TraceWriter<'w>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn assert_node(&mut self, node: &AssertNode<'_>) -> Result<(), AssertError> {
        let type_name = node.target_type().map(|t| t.name()).unwrap_or("(null)");
        let head = format!("{}: {} = ", node.member_name(), type_name);
        self.trace_with(|t| t.write(&head));

        let Some(target) = self.evaluate_scalar(node)? else {
            return Ok(());
        };

        self.trace_with(|t| {
            t.write_line("{");
            t.indent();
        });
        let result = self.evaluate_structural(node, &target);
        self.trace_with(|t| {
            t.finish_line();
            t.outdent();
            t.write_line("}");
        });
        result
    }

    fn evaluate_scalar(&mut self, node: &AssertNode<'_>) -> Result<Option<TypeRef>, AssertError> {
        let Some(target) = self.classify_nulls(node)? else {
            return Ok(None);
        };
        for (name, step) in Self::SCALAR_STEPS {
            if step(self, node, &target)? == Step::Done {
                log::trace!("{} settled by {} step", node.path(), name);
                return Ok(None);
            }
        }
        Ok(Some(target))
    }

    fn evaluate_structural(&mut self, node: &AssertNode<'_>, target: &TypeRef) -> Result<(), AssertError> {
        for (name, step) in Self::STRUCTURAL_STEPS {
            if step(self, node, target)? == Step::Done {
                log::trace!("{} settled by {} step", node.path(), name);
                break;
            }
        }
        Ok(())
    }

    /// Settles null cases. Returns the target type when both sides are non-null.
    fn classify_nulls(&mut self, node: &AssertNode<'_>) -> Result<Option<TypeRef>, AssertError> {
        let actual = node.actual();
        let expected = node.expected();

        let Some(target) = node.target_type() else {
            if !actual.is_null() {
                return Err(self.fail(node, MismatchKind::NullTargetViolation(Side::Actual)));
            }
            if !expected.is_null() {
                return Err(self.fail(node, MismatchKind::NullTargetViolation(Side::Expected)));
            }
            self.settle(node, "actual and expected are both null");
            return Ok(None);
        };

        if target.is_non_nullable_value_type() && actual.is_null() {
            return Err(self.fail(node, MismatchKind::NonNullableActualIsNull));
        }
        match (actual.is_null(), expected.is_null()) {
            (true, true) => {
                self.settle(node, "actual and expected are both null");
                Ok(None)
            }
            (true, false) => Err(self.fail(node, MismatchKind::ActualNullExpectedNonNull)),
            (false, true) => Err(self.fail(node, MismatchKind::ActualNonNullExpectedNull)),
            (false, false) => Ok(Some(target.clone())),
        }
    }

    fn numeric(&mut self, node: &AssertNode<'_>, target: &TypeRef) -> Result<Step, AssertError> {
        if !target.is_numeric() {
            return Ok(Step::Continue);
        }
        let actual = Numeric::from_value(node.actual()).ok_or_else(|| self.fail(node, MismatchKind::ActualNotNumeric))?;
        if !actual.equals_value(node.expected()) {
            return Err(self.fail(node, MismatchKind::NumericMismatch));
        }
        self.settle(node, "actual and expected are equal as numbers");
        Ok(Step::Done)
    }

    fn primitive(&mut self, node: &AssertNode<'_>, target: &TypeRef) -> Result<Step, AssertError> {
        if !target.is_primitive_scalar() {
            return Ok(Step::Continue);
        }
        let is_instance = node
            .actual()
            .runtime_type()
            .map_or(false, |runtime| target.is_assignable_from(&runtime));
        if !is_instance {
            return Err(self.fail(node, MismatchKind::ActualViolatesPrimitiveType));
        }
        if !node.actual().primitive_eq(node.expected()) {
            return Err(self.fail(node, MismatchKind::PrimitiveMismatch));
        }
        self.settle(node, &format!("actual and expected are equal as {}", target.name()));
        Ok(Step::Done)
    }

    fn reference(&mut self, node: &AssertNode<'_>, target: &TypeRef) -> Result<Step, AssertError> {
        if !Value::same_reference(node.actual(), node.expected()) {
            return Ok(Step::Continue);
        }
        if !conforms(node.actual(), target) {
            return Err(self.fail(node, MismatchKind::SharedReferenceViolatesTarget));
        }
        self.settle(node, "actual and expected are the same reference");
        Ok(Step::Done)
    }

    fn circular(&mut self, node: &AssertNode<'_>, target: &TypeRef) -> Result<Step, AssertError> {
        let actual = node.actual();
        let expected = node.expected();
        if actual.is_value_kind() || expected.is_value_kind() {
            return Ok(Step::Continue);
        }

        for ancestor in node.ancestors() {
            if Value::same_reference(ancestor.actual(), actual) {
                if !Value::same_reference(ancestor.expected(), expected) {
                    return Err(self.fail(node, MismatchKind::CircularActualWithoutCircularExpected));
                }
                if !conforms(actual, target) {
                    return Err(self.fail(node, MismatchKind::CircularReferenceViolatesTarget));
                }
                self.settle(
                    node,
                    &format!("actual and expected are circular references to {}", ancestor.path()),
                );
                return Ok(Step::Done);
            }
            if Value::same_reference(ancestor.expected(), expected) {
                return Err(self.fail(node, MismatchKind::CircularExpectedWithoutCircularActual));
            }
        }
        Ok(Step::Continue)
    }

    fn collection(&mut self, node: &AssertNode<'_>, target: &TypeRef) -> Result<Step, AssertError> {
        if !target.is_collection() || target.is_string() {
            return Ok(Step::Continue);
        }
        let actual_items = node
            .actual()
            .as_iterable()
            .ok_or_else(|| self.fail(node, MismatchKind::ActualNotCollection(node.actual().type_name())))?;
        let expected_items = node
            .expected()
            .as_iterable()
            .ok_or_else(|| self.fail(node, MismatchKind::ExpectedNotCollection(node.expected().type_name())))?;
        if actual_items.len() != expected_items.len() {
            return Err(self.fail(
                node,
                MismatchKind::CollectionLengthMismatch {
                    actual: actual_items.len(),
                    expected: expected_items.len(),
                },
            ));
        }

        let element_type = target.element_type();
        for (index, (actual, expected)) in actual_items.into_iter().zip(expected_items).enumerate() {
            // Unknown element type falls back to the runtime type of the actual item.
            let item_type = element_type.clone().or_else(|| actual.runtime_type());
            let child = AssertNode::item(node, index, item_type, actual, expected);
            self.assert_node(&child)?;
        }
        Ok(Step::Done)
    }

    fn composite(&mut self, node: &AssertNode<'_>, target: &TypeRef) -> Result<Step, AssertError> {
        let target = underlying(target);
        let actual_runtime = node.actual().runtime_type().unwrap_or_else(TypeDescriptor::any);
        let actual_type = if target.is_assignable_from(&actual_runtime) {
            target.clone()
        } else {
            actual_runtime
        };
        let expected_type = node.expected().runtime_type().unwrap_or_else(TypeDescriptor::any);

        let target_members = target.data_members();
        self.member_map(&target)?;
        let mut actual_members = self.member_map(&actual_type)?;
        let mut expected_members = self.member_map(&expected_type)?;

        for member in target_members {
            let actual_member = actual_members
                .shift_remove(member.name())
                .ok_or_else(|| self.fail(node, MismatchKind::MissingMemberOnActual(member.name().to_string())))?;
            let expected_member = expected_members
                .shift_remove(member.name())
                .ok_or_else(|| self.fail(node, MismatchKind::MissingMemberOnExpected(member.name().to_string())))?;

            let actual = read_member(node.actual(), actual_member)
                .ok_or_else(|| self.fail(node, MismatchKind::MissingMemberOnActual(member.name().to_string())))?;
            let expected = read_member(node.expected(), expected_member)
                .ok_or_else(|| self.fail(node, MismatchKind::MissingMemberOnExpected(member.name().to_string())))?;
            let child = AssertNode::member(node, member.name(), Some(member.data_type().clone()), actual, expected);
            self.assert_node(&child)?;
        }

        if !expected_members.is_empty() {
            let extra = expected_members.keys().map(|name| name.to_string()).collect();
            return Err(self.fail(node, MismatchKind::ExpectedHasExtraMembers(extra)));
        }
        Ok(Step::Done)
    }

    fn fail(&mut self, node: &AssertNode<'_>, kind: MismatchKind) -> AssertError {
        log::debug!("mismatch at {}: {}", node.path(), kind);
        self.trace_failure(&kind.to_string());
        StructuralMismatch::new(node, kind, self.message.as_deref()).into()
    }

    /// Data members of `ty` keyed by name. Two members sharing a name cannot be resolved.
    fn member_map<'t>(&mut self, ty: &'t TypeDescriptor) -> Result<IndexMap<&'t str, &'t DataMember>, AssertError> {
        let mut map: IndexMap<&str, &DataMember> = IndexMap::new();
        for member in ty.data_members() {
            if let Some(existing) = map.insert(member.name(), member) {
                let err = ConfigurationError::AmbiguousMember {
                    type_name: ty.name().to_string(),
                    members: vec![existing.to_string(), member.to_string()],
                };
                log::warn!("{}", err);
                self.trace_failure(&err.to_string());
                return Err(err.into());
            }
        }
        Ok(map)
    }

    fn settle(&mut self, node: &AssertNode<'_>, reason: &str) {
        log::trace!("{}: {}", node.path(), reason);
        if self.trace.is_some() {
            let line = format!("{}    // {}", to_primitive_string(node.actual()), reason);
            self.trace_with(|t| t.write_line(&line));
        }
    }

    fn trace_failure(&mut self, reason: &str) {
        let line = format!("    // FAILED: {}", reason);
        self.trace_with(|t| {
            t.write(&line);
            t.finish_line();
        });
    }

    fn trace_with(&mut self, write: impl FnOnce(&mut TraceWriter<'w>)) {
        if let Some(trace) = self.trace.as_mut() {
            write(trace);
        }
    }
}

/// Reads a member through the value's runtime type, so a member re-declared by a
/// derived type yields the derived slot even when matched through a base.
fn read_member(value: &Value, member: &DataMember) -> Option<Value> {
    let instance = value.as_instance()?;
    instance
        .get_by_name(member.name())
        .or_else(|| instance.get(&member.key()))
}

fn conforms(value: &Value, target: &TypeRef) -> bool {
    value
        .runtime_type()
        .map_or(false, |runtime| is_structurally_compatible(&runtime, target))
}
