use crate::loader::Record;

/// Normalized search terms. Both dimensions are independent substring
/// filters, AND'ed together; an empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    name: String,
    hash: String,
}

impl Query {
    pub fn new(name_input: &str, hash_input: &str) -> Self {
        Query {
            name: name_input.trim().to_lowercase(),
            hash: hash_input.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.hash.is_empty()
    }

    /// The name term matches against name OR version, the hash term
    /// against the sha256. Substring containment, case-insensitive.
    pub fn matches(&self, record: &Record) -> bool {
        let name_match = self.name.is_empty()
            || record.name.to_lowercase().contains(&self.name)
            || record.version.to_lowercase().contains(&self.name);

        let hash_match = self.hash.is_empty() || record.sha256.to_lowercase().contains(&self.hash);

        name_match && hash_match
    }
}

/// Stable filter over the dataset, returning matching row indices in
/// dataset order.
pub fn filter_dataset(dataset: &[Record], query: &Query) -> Vec<usize> {
    if query.is_empty() {
        return (0..dataset.len()).collect();
    }
    dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| query.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}
