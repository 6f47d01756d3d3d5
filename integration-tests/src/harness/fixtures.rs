use logloom_core::conf::CONFIG_FILE_NAME;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Three producers, four entities. `req-2` spans two streams and `req-4`
/// never ends.
pub const PRODUCER_1: &str = "\
1:req-1::http-1 2019-05-14 10:00:00,100 - **START**
1:req-1::http-1 2019-05-14 10:00:00,900 - lookup user 42
1:req-2::http-1 2019-05-14 10:00:01,000 - **START**
1:req-1::http-1 2019-05-14 10:00:03,100 - **END**
1:req-2::http-1 2019-05-14 10:00:07,000 - **END**
";

pub const PRODUCER_2: &str = "\
2:req-3::http-2 2019-05-14 10:00:00,500 - **START**
2:req-3::http-2 2019-05-14 10:00:02,000 - query failed
java.sql.SQLException: timeout
    at Db.query(Db.java:10)
2:req-3::http-2 2019-05-14 10:00:05,500 - **END**
";

pub const PRODUCER_3: &str = "\
3:req-2::batch 2019-05-14 10:00:02,000 - **START**
3:req-4::batch 2019-05-14 10:00:04,000 - **START**
3:req-2::batch 2019-05-14 10:00:08,000 - **END**
";

/// A throwaway directory laid out like a real deployment:
/// `logloom.hcl`, `logs/` with the producer files, and `entity-logs/` as output.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new(config: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), config).unwrap();
        Self { dir }
    }

    /// Workspace with the default config and the three producer logs.
    pub fn with_corpus() -> Self {
        let ws = Self::new("");
        ws.add_source("producer-1.log", PRODUCER_1);
        ws.add_source("producer-2.log", PRODUCER_2);
        ws.add_source("producer-3.log", PRODUCER_3);
        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_source(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join("logs").join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn entity_logs(&self) -> PathBuf {
        self.root().join("entity-logs")
    }

    /// Every persisted entity log as `(file name, contents)`, sorted by name.
    pub fn read_entity_logs(&self) -> Vec<(String, String)> {
        let mut files: Vec<_> = fs::read_dir(self.entity_logs())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort();
        files
            .into_iter()
            .map(|p| {
                let name = p.file_name().unwrap().to_string_lossy().into_owned();
                (name, fs::read_to_string(&p).unwrap())
            })
            .collect()
    }
}
