//! Row/role accessor contract exposed to the UI binding layer

use serde::Serialize;

/// Value of a single role for a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RoleValue {
    Text(String),
    Int(i32),
    Bool(bool),
}

impl RoleValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RoleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            RoleValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RoleValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<String> for RoleValue {
    fn from(value: String) -> Self {
        RoleValue::Text(value)
    }
}

impl From<&str> for RoleValue {
    fn from(value: &str) -> Self {
        RoleValue::Text(value.to_string())
    }
}

impl From<i32> for RoleValue {
    fn from(value: i32) -> Self {
        RoleValue::Int(value)
    }
}

impl From<bool> for RoleValue {
    fn from(value: bool) -> Self {
        RoleValue::Bool(value)
    }
}

/// A flat list model readable by role
pub trait ListModel {
    type Role: Copy;

    fn row_count(&self) -> usize;

    /// Value of `role` at `row`, or `None` when the row is out of range
    fn data(&self, row: usize, role: Self::Role) -> Option<RoleValue>;

    /// Binding names for every role, in declaration order
    fn role_names(&self) -> Vec<(Self::Role, &'static str)>;
}
