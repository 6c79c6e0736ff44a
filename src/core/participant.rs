use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a participant in the settlement group.
///
/// A participant is anyone who can owe or be owed money: a roommate,
/// a trip member, a small business partner. Names are opaque strings;
/// identity is exact string equality.
///
/// # Examples
///
/// ```
/// use settle_engine::core::participant::Participant;
///
/// let alice = Participant::new("alice");
/// let bob = Participant::new("bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this participant.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Participant {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The fixed, ordered group of participants a settlement is computed for.
///
/// The roster fixes the mapping between participant names and matrix
/// indices: participant `k` corresponds to row/column `k` of the debt
/// and payment matrices. The roster is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster from an ordered list of names.
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    /// Build a roster of `n` generated placeholder names (`P-000`, `P-001`, ...)
    /// for index-only use.
    pub fn generated(n: usize) -> Self {
        Self {
            participants: (0..n)
                .map(|i| Participant::new(format!("P-{:03}", i)))
                .collect(),
        }
    }

    /// Number of participants in the group.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// The matrix index of a participant, if present.
    pub fn index_of(&self, participant: &Participant) -> Option<usize> {
        self.participants.iter().position(|p| p == participant)
    }

    /// The participant at a matrix index, if in range.
    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    /// All participants in index order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }
}

impl FromIterator<Participant> for Roster {
    fn from_iter<T: IntoIterator<Item = Participant>>(iter: T) -> Self {
        Self {
            participants: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_equality() {
        let a = Participant::new("alice");
        let b = Participant::new("alice");
        let c = Participant::new("bob");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_participant_display() {
        let p = Participant::new("carol");
        assert_eq!(format!("{}", p), "carol");
    }

    #[test]
    fn test_roster_indexing() {
        let roster = Roster::new(vec![
            Participant::new("alice"),
            Participant::new("bob"),
            Participant::new("carol"),
        ]);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.index_of(&Participant::new("bob")), Some(1));
        assert_eq!(roster.index_of(&Participant::new("dave")), None);
        assert_eq!(roster.get(2), Some(&Participant::new("carol")));
        assert_eq!(roster.get(3), None);
    }

    #[test]
    fn test_generated_roster() {
        let roster = Roster::generated(4);
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.get(0).unwrap().as_str(), "P-000");
        assert_eq!(roster.get(3).unwrap().as_str(), "P-003");
    }
}
