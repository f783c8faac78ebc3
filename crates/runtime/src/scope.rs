use indexmap::IndexMap;

use crate::value::Value;

/// An index into the evaluator's scope arena. Cheap to copy, cheap to
/// compare; stands in for the shared/owning parent pointers a reference
/// implementation might use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeId(usize);

struct ScopeData {
  bindings: IndexMap<String, Value>,
  parent: Option<ScopeId>,
  return_value: Option<Value>,
}

/// Arena of scopes forming a chain toward a root global scope.
///
/// A callee scope's parent link points at the *caller's current* scope —
/// dynamic, not lexical, linkage — and its lifetime is bounded by
/// [`Scopes::truncate`], which reclaims every scope pushed since a
/// remembered [`Scopes::mark`]. Calls nest strictly, so this is always
/// safe: nothing outside a call can ever hold a [`ScopeId`] created inside
/// it.
pub struct Scopes {
  arena: Vec<ScopeData>,
}

impl Scopes {
  pub fn new() -> Self {
    Scopes {
      arena: vec![ScopeData {
        bindings: IndexMap::new(),
        parent: None,
        return_value: None,
      }],
    }
  }

  pub fn root(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn mark(&self) -> usize {
    self.arena.len()
  }

  pub fn truncate(&mut self, mark: usize) {
    self.arena.truncate(mark);
  }

  pub fn push_child(&mut self, parent: ScopeId) -> ScopeId {
    self.arena.push(ScopeData {
      bindings: IndexMap::new(),
      parent: Some(parent),
      return_value: None,
    });
    ScopeId(self.arena.len() - 1)
  }

  /// Set-or-overwrite in `scope` only; never rebinds in an ancestor.
  pub fn bind(&mut self, scope: ScopeId, name: String, value: Value) {
    self.arena[scope.0].bindings.insert(name, value);
  }

  /// Resolve `name` walking the chain from `scope` toward the root.
  pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<Value> {
    let mut current = Some(scope);
    while let Some(id) = current {
      let data = &self.arena[id.0];
      if let Some(value) = data.bindings.get(name) {
        return Some(value.clone());
      }
      current = data.parent;
    }
    None
  }

  pub fn return_value(&self, scope: ScopeId) -> Option<Value> {
    self.arena[scope.0].return_value.clone()
  }

  pub fn has_returned(&self, scope: ScopeId) -> bool {
    self.arena[scope.0].return_value.is_some()
  }

  pub fn set_return_value(&mut self, scope: ScopeId, value: Value) {
    self.arena[scope.0].return_value = Some(value);
  }
}

impl Default for Scopes {
  fn default() -> Self {
    Self::new()
  }
}
