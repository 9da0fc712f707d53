use hashbrown::HashSet;

use std::collections::BTreeSet;

/// Specimens considered assayed in a run: the union of the specimen ids
/// of the raw caller tables. Kept ordered so downstream rows are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecimenUniverse {
    ids: BTreeSet<String>,
}

impl SpecimenUniverse {
    /// set union of the specimen ids of two caller tables
    pub fn union<A, B, S>(table_a: A, table_b: B) -> Self
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = table_a
            .into_iter()
            .chain(table_b)
            .map(|id| id.into())
            .collect::<BTreeSet<String>>();

        Self { ids }
    }

    /// keeps only the ids present in `subset`
    pub fn restrict(&self, subset: &HashSet<String>) -> Self {
        Self {
            ids: self
                .ids
                .iter()
                .filter(|id| subset.contains(*id))
                .cloned()
                .collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SpecimenUniverse {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_deduplicates() {
        let universe = SpecimenUniverse::union(vec!["S1", "S2"], vec!["S2", "S3"]);

        assert_eq!(universe.len(), 3);
        assert_eq!(universe.iter().collect::<Vec<_>>(), vec!["S1", "S2", "S3"]);
    }

    #[test]
    fn test_union_with_repeated_rows() {
        // caller tables carry one row per fusion call, not per specimen
        let arriba = vec!["BS_2".to_string(), "BS_1".to_string(), "BS_2".to_string()];
        let starfusion: Vec<String> = vec![];

        let universe = SpecimenUniverse::union(arriba, starfusion);

        assert_eq!(universe.iter().collect::<Vec<_>>(), vec!["BS_1", "BS_2"]);
        assert!(universe.contains("BS_1"));
        assert!(!universe.contains("BS_3"));
    }

    #[test]
    fn test_restrict() {
        let universe = SpecimenUniverse::union(vec!["S1", "S2"], vec!["S3"]);
        let subset: HashSet<String> = ["S3".to_string(), "S9".to_string()].into_iter().collect();

        let restricted = universe.restrict(&subset);

        assert_eq!(restricted.iter().collect::<Vec<_>>(), vec!["S3"]);
        assert_eq!(universe.len(), 3);
    }

    #[test]
    fn test_empty_tables() {
        let universe = SpecimenUniverse::union(Vec::<String>::new(), Vec::<String>::new());
        assert!(universe.is_empty());
    }
}
