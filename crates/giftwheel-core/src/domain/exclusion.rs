//! Exclusion constraints: pairs that must never be matched as santa/recipient.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::errors::DrawError;
use super::ids::ParticipantId;

/// An unordered pair of participants forbidden from being paired in either
/// direction. Immutable once created; the generator only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExclusionConstraint {
    a: ParticipantId,
    b: ParticipantId,
}

impl ExclusionConstraint {
    /// Build a constraint between two distinct participants.
    ///
    /// The pair is stored in normalized order so `{a, b}` and `{b, a}` are
    /// the same constraint.
    pub fn new(a: ParticipantId, b: ParticipantId) -> Result<Self, DrawError> {
        if a == b {
            return Err(DrawError::SelfExclusion(a));
        }
        if a <= b {
            Ok(Self { a, b })
        } else {
            Ok(Self { a: b, b: a })
        }
    }

    pub fn first(&self) -> &ParticipantId {
        &self.a
    }

    pub fn second(&self) -> &ParticipantId {
        &self.b
    }

    /// Does this constraint forbid the directed edge `santa -> recipient`?
    /// Symmetric: direction does not matter.
    pub fn forbids(&self, santa: &ParticipantId, recipient: &ParticipantId) -> bool {
        (&self.a == santa && &self.b == recipient) || (&self.a == recipient && &self.b == santa)
    }
}

/// The forbidden-edge set over the participant graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    pairs: HashSet<ExclusionConstraint>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, constraint: ExclusionConstraint) {
        self.pairs.insert(constraint);
    }

    /// Is the edge `a -> b` (or `b -> a`) forbidden?
    pub fn forbids(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        // Normalized order, so a single probe suffices.
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.pairs.contains(&ExclusionConstraint {
            a: lo.clone(),
            b: hi.clone(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionConstraint> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<ExclusionConstraint> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ExclusionConstraint>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    #[test]
    fn constraint_is_symmetric() {
        let c = ExclusionConstraint::new(p("alice"), p("bob")).unwrap();
        assert!(c.forbids(&p("alice"), &p("bob")));
        assert!(c.forbids(&p("bob"), &p("alice")));
        assert!(!c.forbids(&p("alice"), &p("carol")));
    }

    #[test]
    fn constraint_normalizes_order() {
        let c1 = ExclusionConstraint::new(p("alice"), p("bob")).unwrap();
        let c2 = ExclusionConstraint::new(p("bob"), p("alice")).unwrap();
        assert_eq!(c1, c2);
    }

    #[test]
    fn self_pair_is_rejected() {
        let err = ExclusionConstraint::new(p("alice"), p("alice")).unwrap_err();
        assert!(matches!(err, DrawError::SelfExclusion(_)));
    }

    #[test]
    fn set_deduplicates_symmetric_pairs() {
        let mut set = ExclusionSet::new();
        set.insert(ExclusionConstraint::new(p("alice"), p("bob")).unwrap());
        set.insert(ExclusionConstraint::new(p("bob"), p("alice")).unwrap());

        assert_eq!(set.len(), 1);
        assert!(set.forbids(&p("alice"), &p("bob")));
        assert!(set.forbids(&p("bob"), &p("alice")));
        assert!(!set.forbids(&p("alice"), &p("carol")));
    }
}
