/// One selectable conversation topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    pub genre: String,
    pub topic: String,
}

impl TopicRecord {
    pub fn new(genre: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            topic: topic.into(),
        }
    }

    /// Both fields must be non-empty. No trimming: " " counts as a value.
    pub fn is_valid(&self) -> bool {
        !self.genre.is_empty() && !self.topic.is_empty()
    }
}

/// Header names identifying the genre and topic columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub genre: String,
    pub topic: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            genre: "genre".to_string(),
            topic: "topic".to_string(),
        }
    }
}

/// Validated, order-preserving list of topics produced by one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicCatalog {
    records: Vec<TopicRecord>,
}

impl TopicCatalog {
    /// Builds a catalog, dropping any record that fails validation.
    pub fn from_records(records: impl IntoIterator<Item = TopicRecord>) -> Self {
        Self {
            records: records.into_iter().filter(TopicRecord::is_valid).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TopicRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[TopicRecord] {
        &self.records
    }

    pub fn contains(&self, record: &TopicRecord) -> bool {
        self.records.contains(record)
    }
}
