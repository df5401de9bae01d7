//! Test data builders for creating test objects

use bagpilot::bag::BagSummary;
use bagpilot::types::{BagStamp, TopicInfo};

/// Builder for creating test BagSummaries
pub struct BagSummaryBuilder {
    path: String,
    begin: BagStamp,
    end: BagStamp,
    topics: Vec<TopicInfo>,
}

impl BagSummaryBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            begin: BagStamp::from_secs(100),
            end: BagStamp::from_secs(130),
            topics: Vec::new(),
        }
    }

    pub fn begin(mut self, begin: BagStamp) -> Self {
        self.begin = begin;
        self
    }

    pub fn end(mut self, end: BagStamp) -> Self {
        self.end = end;
        self
    }

    pub fn topic(mut self, name: &str) -> Self {
        self.topics.push(TopicInfo::new(name, "std_msgs/String"));
        self
    }

    pub fn build(self) -> BagSummary {
        BagSummary::new(self.path, self.begin, self.end, self.topics)
    }
}

/// Shorthand for a topic list with a common datatype
pub fn topic_list(names: &[&str]) -> Vec<TopicInfo> {
    names
        .iter()
        .map(|n| TopicInfo::new(*n, "std_msgs/String"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_summary_builder() {
        let summary = BagSummaryBuilder::new("/data/test.bag")
            .begin(BagStamp::from_secs(10))
            .end(BagStamp::from_secs(40))
            .topic("/odom")
            .build();

        assert_eq!(summary.duration(), std::time::Duration::from_secs(30));
        assert_eq!(summary.topic_count(), 1);
    }
}
