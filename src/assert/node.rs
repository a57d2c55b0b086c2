// Mon Oct 19 2026 - Alex

use crate::types::TypeRef;
use crate::value::Value;
use std::fmt;

/// One step of a comparison.
///
/// `parent` borrows the node one level up the call stack. The chain is only walked to
/// find circular references; nodes never own their ancestors.
pub struct AssertNode<'a> {
    member_name: String,
    path: String,
    target_type: Option<TypeRef>,
    actual: Value,
    expected: Value,
    parent: Option<&'a AssertNode<'a>>,
}

impl<'a> AssertNode<'a> {
    pub fn root(label: &str, target_type: Option<TypeRef>, actual: Value, expected: Value) -> Self {
        Self {
            member_name: label.to_string(),
            path: label.to_string(),
            target_type,
            actual,
            expected,
            parent: None,
        }
    }

    /// Child for a composite member: path gains `.name`.
    pub fn member(parent: &'a AssertNode<'a>, name: &str, target_type: Option<TypeRef>, actual: Value, expected: Value) -> Self {
        Self {
            member_name: name.to_string(),
            path: format!("{}.{}", parent.path, name),
            target_type,
            actual,
            expected,
            parent: Some(parent),
        }
    }

    /// Child for a collection element: path gains `[index]`.
    pub fn item(parent: &'a AssertNode<'a>, index: usize, target_type: Option<TypeRef>, actual: Value, expected: Value) -> Self {
        let member_name = format!("[{}]", index);
        Self {
            path: format!("{}{}", parent.path, member_name),
            member_name,
            target_type,
            actual,
            expected,
            parent: Some(parent),
        }
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn target_type(&self) -> Option<&TypeRef> {
        self.target_type.as_ref()
    }

    pub fn actual(&self) -> &Value {
        &self.actual
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    pub fn parent(&self) -> Option<&'a AssertNode<'a>> {
        self.parent
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a AssertNode<'a>> {
        std::iter::successors(self.parent, |node| node.parent)
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }
}

impl fmt::Display for AssertNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        writeln!(f, "      path: {}", self.path)?;
        writeln!(
            f,
            "    target: {}",
            self.target_type.as_ref().map(|t| t.name()).unwrap_or("(null)")
        )?;
        writeln!(f, "    actual: {}", self.actual)?;
        writeln!(f, "  expected: {}", self.expected)?;
        write!(f, "}}")
    }
}
