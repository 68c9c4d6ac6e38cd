use indexmap::IndexMap;

/// One usable CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    /// area in the primary unit (m²)
    pub area: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, area: f64) -> Self {
        Self {
            name: name.into(),
            area,
        }
    }
}

/// Records sharing the first word of their name
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub items: Vec<Record>,
    pub total: f64,
}

impl Group {
    fn new(key: String, items: Vec<Record>) -> Self {
        let total = items.iter().map(|r| r.area).sum();
        Self { key, items, total }
    }

    /// Singleton groups are drawn as a single line
    pub fn is_singleton(&self) -> bool {
        self.items.len() == 1
    }
}

/// Ordered groups of one CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub label: String,
    pub groups: Vec<Group>,
    pub total: f64,
}

impl FileReport {
    /// Groups, orders and totals the records of one file
    pub fn from_records(label: impl Into<String>, records: Vec<Record>) -> Self {
        let groups = order(aggregate(records));
        let total = groups.iter().map(|g| g.total).sum();
        Self {
            label: label.into(),
            groups,
            total,
        }
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

/// First whitespace-delimited word, or the whole name if it has none
pub fn group_key(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

/// Buckets records by [`group_key`], keeping first-seen key order
pub fn aggregate(records: Vec<Record>) -> Vec<Group> {
    let mut buckets: IndexMap<String, Vec<Record>> = IndexMap::new();
    for record in records {
        buckets
            .entry(group_key(&record.name).to_string())
            .or_default()
            .push(record);
    }

    buckets
        .into_iter()
        .map(|(key, items)| Group::new(key, items))
        .collect()
}

/// Sorts groups by total and items by area, both descending.
/// Stable: ties keep their first-seen order.
pub fn order(mut groups: Vec<Group>) -> Vec<Group> {
    for group in &mut groups {
        group.items.sort_by(|a, b| b.area.total_cmp(&a.area));
    }
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    groups
}
