//! Context registry and rule table.
//!
//! A context is a named lexical mode (root text, a double-quoted string, a
//! command substitution). A rule says "inside context `owner`, the text
//! `initiator` opens context `context`". Contexts may inherit the rules of a
//! parent context; [`Registry::lookup`] resolves everything a context can see.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use log::debug;

use super::tokenizer::Scope;
use super::types::Argv;
use crate::error::{Result, TokenizerError};

/// Custom parser invoked right after a rule's initiator has been consumed.
///
/// It receives the remaining input and must return an [`Argv`] whose `rest`
/// is a suffix of that input. The [`Scope`] gives access to the owning
/// tokenizer for recursive parses.
pub type ParseFn = Arc<dyn Fn(&Scope<'_>, &str) -> Result<Argv> + Send + Sync>;

/// A registered lexical context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub id: String,
    pub initiator: String,
    /// Literal text closing the context; empty means "only the outer stop".
    pub terminator: String,
    pub inherit: Option<String>,
    pub quoted: bool,
}

/// A context-scoped dispatch entry.
#[derive(Clone)]
pub struct Rule {
    /// Context in which the initiator is recognized.
    pub owner: String,
    pub initiator: String,
    /// Context entered once the initiator is consumed.
    pub context: String,
    pub parse: Option<ParseFn>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("owner", &self.owner)
            .field("initiator", &self.initiator)
            .field("context", &self.context)
            .field("parse", &self.parse.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Registration request for a context and the rules that open it.
#[derive(Clone, Default)]
pub struct Definition {
    pub id: Option<String>,
    pub initiator: String,
    pub terminator: String,
    pub inherit: Option<String>,
    pub quoted: Option<bool>,
    /// Owner contexts in which `initiator` opens this context.
    pub depend: Vec<String>,
    pub parse: Option<ParseFn>,
}

impl Definition {
    pub fn new(initiator: impl Into<String>, terminator: impl Into<String>) -> Self {
        Self {
            initiator: initiator.into(),
            terminator: terminator.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn inherit(mut self, parent: impl Into<String>) -> Self {
        self.inherit = Some(parent.into());
        self
    }

    pub fn quoted(mut self, quoted: bool) -> Self {
        self.quoted = Some(quoted);
        self
    }

    pub fn depend(mut self, owner: impl Into<String>) -> Self {
        self.depend.push(owner.into());
        self
    }

    pub fn parse<F>(mut self, parse: F) -> Self
    where
        F: Fn(&Scope<'_>, &str) -> Result<Argv> + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(parse));
        self
    }
}

/// All contexts and rules known to a tokenizer.
#[derive(Debug, Default)]
pub struct Registry {
    contexts: HashMap<String, Context>,
    /// owner id → initiator → rule
    rules: HashMap<String, BTreeMap<String, Rule>>,
}

impl Registry {
    /// Register a context and one rule per owner in `depend`.
    ///
    /// Nothing is modified when the definition is rejected.
    pub fn define(&mut self, definition: Definition) -> Result<()> {
        let Definition {
            id,
            initiator,
            terminator,
            inherit,
            quoted,
            mut depend,
            parse,
        } = definition;
        let id = id.unwrap_or_else(|| initiator.clone());

        if let Some(existing) = self.contexts.get(&id)
            && (existing.terminator != terminator || existing.inherit != inherit)
        {
            return Err(TokenizerError::ContextConflict { id });
        }

        depend.sort();
        depend.dedup();
        if !depend.is_empty() && initiator.is_empty() {
            return Err(TokenizerError::InvalidPattern(format!(
                "rule for context \"{id}\" has an empty initiator"
            )));
        }
        for owner in &depend {
            if self
                .rules
                .get(owner)
                .is_some_and(|owned| owned.contains_key(&initiator))
            {
                return Err(TokenizerError::DuplicateRule {
                    owner: owner.clone(),
                    initiator,
                });
            }
        }

        // Walk the would-be chain; the new context itself counts as visited.
        let mut visited = vec![id.as_str()];
        let mut cursor = inherit.as_deref();
        while let Some(parent) = cursor {
            if visited.contains(&parent) {
                return Err(TokenizerError::CyclicInherit(id));
            }
            visited.push(parent);
            cursor = self.contexts.get(parent).and_then(|c| c.inherit.as_deref());
        }

        debug!(
            "define context {id:?} (initiator {initiator:?}, terminator {terminator:?}, owners {depend:?})"
        );

        for owner in depend {
            self.rules.entry(owner.clone()).or_default().insert(
                initiator.clone(),
                Rule {
                    owner,
                    initiator: initiator.clone(),
                    context: id.clone(),
                    parse: parse.clone(),
                },
            );
        }
        self.contexts.insert(
            id.clone(),
            Context {
                id,
                initiator,
                terminator,
                inherit,
                quoted: quoted.unwrap_or(true),
            },
        );
        Ok(())
    }

    pub fn context(&self, id: &str) -> Option<&Context> {
        self.contexts.get(id)
    }

    /// `id` followed by each ancestor reachable through `inherit`.
    pub fn inherit_chain<'a>(&'a self, id: &'a str) -> Result<Vec<&'a str>> {
        if !self.contexts.contains_key(id) {
            return Err(TokenizerError::UnknownContext(id.to_string()));
        }
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.contexts.get(current).and_then(|c| c.inherit.as_deref()) {
            if chain.contains(&parent) {
                return Err(TokenizerError::CyclicInherit(id.to_string()));
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// Every rule visible from context `id`: its own rules plus the rules of
    /// each inherited context. A nearer owner shadows a farther one for the
    /// same initiator.
    pub fn lookup(&self, id: &str) -> Result<Vec<&Rule>> {
        let mut visible: Vec<&Rule> = Vec::new();
        for owner in self.inherit_chain(id)? {
            let Some(owned) = self.rules.get(owner) else {
                continue;
            };
            for rule in owned.values() {
                if !visible.iter().any(|r| r.initiator == rule.initiator) {
                    visible.push(rule);
                }
            }
        }
        Ok(visible)
    }
}
