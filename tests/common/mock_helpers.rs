//! Mock collaborators generated with mockall

use std::path::Path;

use bagpilot::bag::{BagReader, BagSummary};
use bagpilot::discovery::TopicDiscovery;
use bagpilot::error::Result;
use bagpilot::launch::{ProcessAction, ProcessLauncher};
use bagpilot::types::TopicInfo;
use mockall::mock;

mock! {
    pub BagIndexer {}

    impl BagReader for BagIndexer {
        fn open(&mut self, path: &Path) -> Result<BagSummary>;
    }
}

mock! {
    pub Launcher {}

    impl ProcessLauncher for Launcher {
        fn launch(&mut self, action: &ProcessAction) -> Result<()>;
    }
}

mock! {
    pub Discovery {}

    impl TopicDiscovery for Discovery {
        fn snapshot(&mut self) -> Result<Vec<TopicInfo>>;
    }
}
