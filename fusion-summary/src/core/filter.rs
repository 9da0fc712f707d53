use config::Subtype;
use fusionpack::FusionRecord;
use hashbrown::HashSet;

/// a (specimen, fusion name) event surviving the selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FusionPair {
    pub specimen: String,
    pub fusion_name: String,
}

impl FusionPair {
    pub fn new(specimen: &str, fusion_name: &str) -> Self {
        Self {
            specimen: specimen.to_string(),
            fusion_name: fusion_name.to_string(),
        }
    }
}

impl From<&FusionRecord> for FusionPair {
    fn from(record: &FusionRecord) -> Self {
        Self::new(&record.sample, &record.fusion_name)
    }
}

/// Row selector over the curated fusion table.
///
/// Every field is independently optional. When both `fusions` and `genes`
/// are set a record is kept if it satisfies either of them; with neither
/// set only the specimen restriction [if any] applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FusionSelector {
    pub specimens: Option<HashSet<String>>,
    pub fusions: Option<HashSet<String>>,
    pub genes: Option<HashSet<String>>,
}

fn to_set<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl FusionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// preset for a subtype panel: exact names OR partner genes
    pub fn for_subtype(subtype: Subtype) -> Self {
        Self::new()
            .with_fusions(subtype.fusions().iter().copied())
            .with_genes(subtype.genes().iter().copied())
    }

    pub fn with_specimens<I, S>(mut self, specimens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specimens = Some(to_set(specimens));
        self
    }

    pub fn with_fusions<I, S>(mut self, fusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fusions = Some(to_set(fusions));
        self
    }

    pub fn with_genes<I, S>(mut self, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genes = Some(to_set(genes));
        self
    }

    #[inline(always)]
    pub fn matches(&self, record: &FusionRecord) -> bool {
        if let Some(specimens) = &self.specimens {
            if !specimens.contains(&record.sample) {
                return false;
            }
        }

        match (&self.fusions, &self.genes) {
            (Some(fusions), Some(genes)) => {
                fusions.contains(&record.fusion_name) || record.has_any_gene(genes)
            }
            (Some(fusions), None) => fusions.contains(&record.fusion_name),
            (None, Some(genes)) => record.has_any_gene(genes),
            (None, None) => true,
        }
    }
}

/// keeps the records accepted by `selector` and projects them to
/// (specimen, fusion name); input order is preserved
pub fn filter(records: &[FusionRecord], selector: &FusionSelector) -> Vec<FusionPair> {
    records
        .iter()
        .filter(|record| selector.matches(record))
        .map(FusionPair::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<FusionRecord> {
        vec![
            FusionRecord::new("S1", "C11orf95--RELA", [Some("C11orf95"), None, Some("RELA"), None]),
            FusionRecord::new("S2", "FOO--BAR", [Some("FOO"), None, Some("RELA"), None]),
            FusionRecord::new("S3", "EWSR1--FLI1", [Some("EWSR1"), None, Some("FLI1"), None]),
            FusionRecord::new("S3", "MN1--BEND2", [Some("MN1"), None, Some("BEND2"), None]),
        ]
    }

    #[test]
    fn test_gene_only_match_is_included() {
        let selector = FusionSelector::new()
            .with_fusions(["C11orf95--RELA", "YAP1--MAMLD1"])
            .with_genes(["RELA"]);

        let pairs = filter(&records(), &selector);

        assert!(pairs.contains(&FusionPair::new("S2", "FOO--BAR")));
        assert!(pairs.contains(&FusionPair::new("S1", "C11orf95--RELA")));
    }

    #[test]
    fn test_no_match_is_excluded() {
        let selector = FusionSelector::new()
            .with_fusions(["C11orf95--RELA"])
            .with_genes(["RELA"]);

        let pairs = filter(&records(), &selector);

        assert_eq!(pairs.len(), 2);
        assert!(!pairs.iter().any(|p| p.fusion_name == "EWSR1--FLI1"));
    }

    #[test]
    fn test_fusion_names_only() {
        let selector = FusionSelector::new().with_fusions(["MN1--BEND2"]);
        let pairs = filter(&records(), &selector);

        assert_eq!(pairs, vec![FusionPair::new("S3", "MN1--BEND2")]);
    }

    #[test]
    fn test_genes_only_matches_any_gene_field() {
        let record = FusionRecord::new("S9", "X--Y", [None, Some("TTYH1"), None, None]);
        let selector = FusionSelector::new().with_genes(["TTYH1"]);

        assert!(selector.matches(&record));
    }

    #[test]
    fn test_no_name_or_gene_set_is_pass_through() {
        let selector = FusionSelector::new().with_specimens(["S3"]);
        let pairs = filter(&records(), &selector);

        assert_eq!(
            pairs,
            vec![
                FusionPair::new("S3", "EWSR1--FLI1"),
                FusionPair::new("S3", "MN1--BEND2"),
            ]
        );

        assert_eq!(filter(&records(), &FusionSelector::new()).len(), 4);
    }

    #[test]
    fn test_specimen_restriction_applies_before_matching() {
        let selector = FusionSelector::new()
            .with_specimens(["S1"])
            .with_genes(["RELA"]);

        assert_eq!(
            filter(&records(), &selector),
            vec![FusionPair::new("S1", "C11orf95--RELA")]
        );
    }

    #[test]
    fn test_empty_result_is_valid() {
        let selector = FusionSelector::for_subtype(Subtype::Embryonal).with_specimens(["S1"]);

        assert!(filter(&records(), &selector).is_empty());
        assert!(filter(&[], &FusionSelector::for_subtype(Subtype::Ependymoma)).is_empty());
    }

    #[test]
    fn test_subtype_preset() {
        let selector = FusionSelector::for_subtype(Subtype::Embryonal);
        let pairs = filter(&records(), &selector);

        assert_eq!(pairs, vec![FusionPair::new("S3", "MN1--BEND2")]);
        assert!(selector.specimens.is_none());
    }
}
