use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Sentences used when no custom catalog is configured
pub const BUILTIN_SENTENCES: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog",
    "Pack my box with five dozen liquor jugs",
    "How vexingly quick daft zebras jump",
    "The five boxing wizards jump quickly",
    "Sphinx of black quartz, judge my vow",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("sentence catalog has no usable entries")]
    Empty,
}

/// Fixed, non-empty set of reference sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceCatalog {
    sentences: Vec<String>,
}

impl SentenceCatalog {
    /// Entries are trimmed, blank ones dropped and duplicates removed (first one wins).
    pub fn new<I, S>(sentences: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sentences: Vec<String> = sentences
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .unique()
            .collect();

        if sentences.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { sentences })
    }

    pub fn builtin() -> Self {
        Self {
            sentences: BUILTIN_SENTENCES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Use `sentences` if any survive normalization, otherwise the built-in set
    pub fn or_builtin<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match Self::new(sentences) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::debug!("{e}, falling back to built-in sentences");
                Self::builtin()
            }
        }
    }

    /// Uniform draw; all randomness comes from `rng`
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.sentences
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(BUILTIN_SENTENCES[0])
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }
}

impl Default for SentenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builtin_catalog() {
        let catalog = SentenceCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.sentences()[4], "Sphinx of black quartz, judge my vow");
    }

    #[test]
    fn test_new_normalizes_entries() {
        let catalog =
            SentenceCatalog::new(["  hello world ", "", "   ", "hello world", "other"]).unwrap();
        assert_eq!(catalog.sentences(), &["hello world", "other"]);
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(
            SentenceCatalog::new(Vec::<String>::new()),
            Err(CatalogError::Empty)
        );
        assert_eq!(SentenceCatalog::new([" ", "\t"]), Err(CatalogError::Empty));
    }

    #[test]
    fn test_or_builtin_fallback() {
        let catalog = SentenceCatalog::or_builtin(Vec::<String>::new());
        assert_eq!(catalog, SentenceCatalog::builtin());

        let custom = SentenceCatalog::or_builtin(["just this"]);
        assert_eq!(custom.sentences(), &["just this"]);
    }

    #[test]
    fn test_pick_single_entry() {
        let catalog = SentenceCatalog::new(["only one"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(catalog.pick(&mut rng), "only one");
        }
    }

    #[test]
    fn test_pick_is_deterministic_for_seed() {
        let catalog = SentenceCatalog::builtin();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        let first: Vec<String> = (0..20).map(|_| catalog.pick(&mut a).to_string()).collect();
        let second: Vec<String> = (0..20).map(|_| catalog.pick(&mut b).to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_reaches_every_sentence() {
        let catalog = SentenceCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        let seen: std::collections::HashSet<&str> =
            (0..500).map(|_| catalog.pick(&mut rng)).collect();
        assert_eq!(seen.len(), catalog.len());
    }
}
